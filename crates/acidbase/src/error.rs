use thiserror::Error;

use logph_solvers::equation::bisection;

use crate::{AcidId, Species};

/// Errors raised while building, validating, evaluating, or solving a system.
#[derive(Debug, Error)]
pub enum Error {
    /// Construction arguments or a pH range are malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A deprotonation index lies outside `0..=protons`.
    #[error("deprotonation index {index} is out of range for acid {acid} with {protons} proton(s)")]
    InvalidIndex {
        acid: AcidId,
        index: usize,
        protons: usize,
    },

    /// An auxiliary expression name is already registered.
    #[error("auxiliary name `{0}` is already in use")]
    NameCollision(String),

    /// A species handle does not resolve to anything registered in the system.
    #[error("{0} is not registered in this system")]
    UnknownSpecies(Species),

    /// No auxiliary expression is registered under the name.
    #[error("no auxiliary expression named `{0}`")]
    UnknownAuxiliary(String),

    /// An expression term carries a NaN or infinite coefficient.
    #[error("coefficient {coefficient} of {species} is not finite")]
    NonFiniteCoefficient { species: Species, coefficient: f64 },

    /// The two sides of a balance do not cross within the pH range.
    #[error(
        "no sign change between pH {left} and pH {right}: \
         difference is {left_residual:e} and {right_residual:e}"
    )]
    NoSignChange {
        left: f64,
        right: f64,
        left_residual: f64,
        right_residual: f64,
    },

    /// The root finder failed for a reason other than a missing sign change.
    #[error("solver failed: {0}")]
    Solver(#[source] bisection::Error),
}

impl From<bisection::Error> for Error {
    fn from(err: bisection::Error) -> Self {
        match err {
            bisection::Error::NoSignChange {
                left,
                right,
                left_residual,
                right_residual,
            } => Self::NoSignChange {
                left,
                right,
                left_residual,
                right_residual,
            },
            bisection::Error::InvalidBracket(err) => Self::InvalidInput(format!("pH range: {err}")),
            bisection::Error::Model(source) => match source.downcast::<Error>() {
                Ok(err) => *err,
                Err(source) => Self::Solver(bisection::Error::Model(source)),
            },
            other => Self::Solver(other),
        }
    }
}
