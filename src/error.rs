use std::fmt;

use crate::types::Var;

/// Error type for evaluation, compilation and solving.
///
/// Gate construction never fails; errors only arise when an expression or a
/// model is used.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A sample does not assign a value to a variable of the expression or model.
    MissingVariable(Var),
    /// Penalty strength for degree reduction must be finite and positive.
    InvalidStrength(f64),
    /// An auxiliary variable introduced by degree reduction clashes with a user variable.
    AuxNameCollision(Var),
    /// Exhaustive enumeration was asked for more variables than allowed.
    TooManyVariables { count: usize, limit: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingVariable(v) => write!(f, "No value for variable '{}'", v),
            Error::InvalidStrength(s) => write!(f, "Invalid penalty strength: {}", s),
            Error::AuxNameCollision(v) => {
                write!(f, "Auxiliary variable '{}' collides with an existing variable", v)
            }
            Error::TooManyVariables { count, limit } => {
                write!(f, "Too many variables to enumerate: {} (limit is {})", count, limit)
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
