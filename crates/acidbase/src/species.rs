use std::fmt;

use crate::{AcidId, Expression, SpectatorId};

/// Negative base-10 logarithm of the ion product of water at 25 °C.
pub const PKW: f64 = 14.0;

/// Hydronium concentration at a given pH.
#[must_use]
pub fn hydronium(ph: f64) -> f64 {
    10f64.powf(-ph)
}

/// Hydroxide concentration at a given pH, from `[OH⁻] = Kw / [H₃O⁺]`.
#[must_use]
pub fn hydroxide(ph: f64) -> f64 {
    10f64.powf(ph - PKW)
}

/// A handle to one species whose concentration depends on (or is fixed
/// independently of) the pH.
///
/// Handles are plain data. An acid handle stores only the acid identifier
/// and is resolved against a [`System`](crate::System) when it is used, so
/// the same handle can appear in any number of expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// The solvent's hydronium ion, `H₃O⁺`.
    Hydronium,
    /// The solvent's hydroxide ion, `OH⁻`.
    Hydroxide,
    /// The state of an acid that has lost `index` protons.
    Acid { acid: AcidId, index: usize },
    /// A species with a fixed, pH-independent concentration.
    Spectator(SpectatorId),
}

impl Species {
    /// Returns the handle of an acid state without checking the index.
    ///
    /// The index is checked when an expression containing the handle is
    /// registered or evaluated. Use [`Acid::species`](crate::Acid::species)
    /// to check it immediately.
    #[must_use]
    pub fn acid(acid: AcidId, index: usize) -> Self {
        Species::Acid { acid, index }
    }

    /// Returns an expression holding this species with coefficient one.
    #[must_use]
    pub fn to_expression(self) -> Expression {
        Expression::from(self)
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Species::Hydronium => f.write_str("H₃O⁺"),
            Species::Hydroxide => f.write_str("OH⁻"),
            Species::Acid { acid, index } => write!(f, "state {index} of acid {acid}"),
            Species::Spectator(id) => write!(f, "spectator {id}"),
        }
    }
}
