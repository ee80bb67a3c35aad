pub mod dice;
pub mod error;
pub mod group;
pub mod parser;
pub mod range;
pub mod roll;
pub mod solver;
pub mod sum;

pub use error::Error;
pub use roll::kind::Kind;
pub use roll::kind::Total;
pub use roll::Roll;
pub use solver::Options;
pub use solver::Solver;
pub use sum::RollSum;
