/// Result type of a term or expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Faces are added together
    Sum,
    /// Faces are tallied as successes minus failures
    Success,
}

/// Outcome of an executed term or expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Total {
    Sum(i64),
    Successes(i64),
}

impl Total {
    /// Total of the given kind holding `value`
    pub fn new(kind: Kind, value: i64) -> Self {
        match kind {
            Kind::Sum => Total::Sum(value),
            Kind::Success => Total::Successes(value),
        }
    }

    pub fn get_kind(&self) -> Kind {
        match self {
            Total::Sum(_) => Kind::Sum,
            Total::Successes(_) => Kind::Success,
        }
    }

    pub fn get_sum(&self) -> Option<i64> {
        match *self {
            Total::Sum(n) => Some(n),
            Total::Successes(_) => None,
        }
    }

    pub fn get_successes(&self) -> Option<i64> {
        match *self {
            Total::Sum(_) => None,
            Total::Successes(n) => Some(n),
        }
    }

    /// Either scalar, whatever the kind
    pub fn get_value(&self) -> i64 {
        match *self {
            Total::Sum(n) | Total::Successes(n) => n,
        }
    }
}

impl std::fmt::Display for Total {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Total::Sum(n) => write!(f, "{n}"),
            Total::Successes(n) if n.abs() == 1 => write!(f, "{n} success"),
            Total::Successes(n) => write!(f, "{n} successes"),
        }
    }
}
