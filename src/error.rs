use std::{
    error::Error,
    fmt::{self, Display},
};

use crate::params::LinearParams;

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, MleErr>;

/// The crate's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum MleErr {
    /// A generation or run setting is out of its valid domain.
    InvalidConfiguration { what: &'static str, reason: String },
    SizeMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },
    /// Every raw noise draw was zero, so the noise can't be normalized.
    DegenerateNoise,
    /// The optimizer didn't converge. Carries the last iterate, the log-likelihood there and the
    /// optimizer's own diagnostic.
    EstimationFailure {
        last: LinearParams,
        objective: f64,
        message: String,
    },
    Config { path: String, reason: String },
}

impl MleErr {
    pub(crate) fn invalid(what: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            what,
            reason: reason.into(),
        }
    }
}

impl Display for MleErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MleErr::InvalidConfiguration { what, reason } => {
                write!(f, "invalid configuration for {what}: {reason}")
            }
            MleErr::SizeMismatch {
                a,
                b,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch between {a} and {b}, got {got} and expected {expected}"
            ),
            MleErr::DegenerateNoise => write!(
                f,
                "the raw noise draw has a maximum absolute value of zero and can't be normalized"
            ),
            MleErr::EstimationFailure {
                last,
                objective,
                message,
            } => write!(
                f,
                "estimation did not converge ({message}), last iterate {last} with log-likelihood {objective}"
            ),
            MleErr::Config { path, reason } => write!(f, "cannot load config '{path}': {reason}"),
        }
    }
}

impl Error for MleErr {}
