use crate::parser;

/// Crate Error type
#[derive(Debug)]
pub enum Error {
    /// Input does not match the term grammar
    InvalidSyntax(Option<Box<pest::error::Error<parser::Rule>>>),
    /// Requested dice count exceeds the configured maximum
    LimitExceeded { count: u64, max: u64 },
    /// A composite expression mixes sum and success terms
    MixedResultTypes,
    /// Grouped roll syntax while the feature is disabled
    UnsupportedFeature,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSyntax(_) => write!(f, "Error: invalid roll command."),
            Self::LimitExceeded { .. } => write!(f, "Error: max number of dice exceeded."),
            Self::MixedResultTypes => write!(f, "Error: mixed sum and success roll types."),
            Self::UnsupportedFeature => write!(f, "Error: grouped rolls not yet supported."),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidSyntax(Some(e)) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<pest::error::Error<parser::Rule>> for Error {
    fn from(value: pest::error::Error<parser::Rule>) -> Self {
        Self::InvalidSyntax(Some(Box::new(value)))
    }
}

/// Crate Result type
pub type Result<T> = std::result::Result<T, Error>;
