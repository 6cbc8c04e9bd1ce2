use std::fmt;

use crate::{Error, Species};

/// Identifies a spectator within the [`System`](crate::System) that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpectatorId(usize);

impl SpectatorId {
    #[must_use]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for SpectatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A species whose concentration does not depend on the pH,
/// such as the sodium counter-ion of a titrant.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectator {
    id: SpectatorId,
    name: String,
    concentration: f64,
}

impl Spectator {
    /// Creates a spectator with a fixed concentration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the concentration is negative or
    /// not finite.
    pub fn new(id: SpectatorId, name: impl Into<String>, concentration: f64) -> Result<Self, Error> {
        if !concentration.is_finite() || concentration < 0.0 {
            return Err(Error::InvalidInput(format!(
                "spectator concentration {concentration} must be finite and non-negative"
            )));
        }

        Ok(Self {
            id,
            name: name.into(),
            concentration,
        })
    }

    #[must_use]
    pub fn id(&self) -> SpectatorId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fixed concentration, in mol/L.
    #[must_use]
    pub fn concentration(&self) -> f64 {
        self.concentration
    }

    /// Returns the handle used to refer to this spectator in expressions.
    #[must_use]
    pub fn species(&self) -> Species {
        Species::Spectator(self.id)
    }
}
