pub mod modifier;

pub use modifier::Comparator;
pub use modifier::Condition;
pub use modifier::Modifier;

/// Sides thrown for a fate die before shifting the face
const FATE_SIDES: u32 = 3;
/// Shift applied to a fate throw to land in `-1..=1`
const FATE_SHIFT: i64 = 2;

/// Kind of die rolled by a term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Die {
    Sides(u32),
    Fate,
}

impl Die {
    /// Number of sides thrown
    pub fn sides(&self) -> u32 {
        match *self {
            Die::Sides(n) => n,
            Die::Fate => FATE_SIDES,
        }
    }

    pub fn is_fate(&self) -> bool {
        matches!(self, Die::Fate)
    }

    /// Map a thrown value in `1..=sides` to the face it stands for
    pub(crate) fn face(&self, thrown: u64) -> i64 {
        match self {
            Die::Sides(_) => thrown as i64,
            Die::Fate => thrown as i64 - FATE_SHIFT,
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Die::Sides(n) => write!(f, "d{n}"),
            Die::Fate => write!(f, "dF"),
        }
    }
}

/// Symbol of a fate face
pub(crate) fn fate_symbol(face: i64) -> &'static str {
    match face {
        f if f < 0 => "-",
        0 => "0",
        _ => "+",
    }
}

/// Wrap a value as a critical success
pub(crate) fn format_crit_success(value: &str) -> String {
    format!("**{value}**")
}

/// Wrap a value as a critical failure
pub(crate) fn format_crit_failure(value: &str) -> String {
    format!("__{value}__")
}
