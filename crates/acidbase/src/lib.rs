//! Acid-base equilibria and logarithmic concentration diagrams.
//!
//! A [`System`] holds mono- and polyprotic [`Acid`]s and [`Spectator`]s.
//! Each deprotonation state, the solvent's hydronium and hydroxide, and
//! every spectator is identified by a [`Species`] handle. Handles combine
//! into linear [`Expression`]s, which the system evaluates at any pH, stores
//! as named auxiliary curves, and equates to find the pH of a balance.
//!
//! # Example
//!
//! ```
//! use logph_acidbase::{SolveConfig, Species, System};
//!
//! let mut system = System::new();
//! let acetic = system.add_acid([4.75], 0.1, None).unwrap();
//! let acetate = system.acid(acetic).unwrap().species(1).unwrap();
//!
//! // Protonic balance of a pure acetic acid solution.
//! let balance = system
//!     .solve(
//!         &Species::Hydronium.into(),
//!         &(acetate + Species::Hydroxide),
//!         [0.0, 14.0],
//!         &SolveConfig::default(),
//!     )
//!     .unwrap();
//!
//! assert!((balance.ph - 2.88).abs() < 0.01);
//! ```

mod acid;
mod balance;
mod color;
mod diagram;
mod error;
mod expression;
mod species;
mod spectator;
mod system;

#[cfg(feature = "serde")]
pub mod definition;

pub use acid::{Acid, AcidId};
pub use balance::{BalanceEvent, BalancePoint, BalanceSolution, SolveConfig};
pub use color::Color;
pub use diagram::{Curve, CurveKind, Diagram, PhGrid};
pub use error::Error;
pub use expression::{Expression, Term};
pub use species::{PKW, Species, hydronium, hydroxide};
pub use spectator::{Spectator, SpectatorId};
pub use system::{Auxiliary, System};

pub use logph_solvers::equation::bisection::{Action, Status};
