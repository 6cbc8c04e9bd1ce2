//! Declarative system definitions.
//!
//! A [`SystemDefinition`] describes a whole [`System`] as data, so that it
//! can be read from a file with any serde format. Acids and spectators are
//! referenced by their position in the definition, which is also the
//! identifier the built system assigns them.
//!
//! In TOML:
//!
//! ```toml
//! [[acids]]
//! pka = [4.75]
//! concentration = 0.1
//! names = ["CH₃COOH", "CH₃COO⁻"]
//!
//! [[auxiliaries]]
//! name = "protons"
//! terms = [{ species = "hydronium" }]
//!
//! [[auxiliaries]]
//! name = "bases"
//! color = "#d62728"
//! terms = [
//!     { species = { acid = 0, index = 1 } },
//!     { species = "hydroxide" },
//! ]
//!
//! [[equations]]
//! left = "protons"
//! right = "bases"
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    AcidId, BalanceSolution, Color, Error, Expression, SolveConfig, Species, SpectatorId, System,
};

/// A complete system: its species, named expressions, and the balances to
/// solve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemDefinition {
    #[serde(default)]
    pub acids: Vec<AcidDefinition>,
    #[serde(default)]
    pub spectators: Vec<SpectatorDefinition>,
    #[serde(default)]
    pub auxiliaries: Vec<AuxiliaryDefinition>,
    #[serde(default)]
    pub equations: Vec<EquationDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AcidDefinition {
    pub pka: Vec<f64>,
    pub concentration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpectatorDefinition {
    pub name: String,
    pub concentration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuxiliaryDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// A `#rrggbb` hex code or a basic color name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub terms: Vec<TermDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TermDefinition {
    pub species: SpeciesDefinition,
    #[serde(default = "unit_coefficient")]
    pub coefficient: f64,
}

fn unit_coefficient() -> f64 {
    1.0
}

/// A species reference: `"hydronium"`, `"hydroxide"`,
/// `{ acid = i, index = j }`, or `{ spectator = k }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpeciesDefinition {
    Solvent(Solvent),
    Acid(AcidRef),
    Spectator(SpectatorRef),
}

/// State `index` of the acid declared at position `acid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AcidRef {
    pub acid: usize,
    pub index: usize,
}

/// The spectator declared at position `spectator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpectatorRef {
    pub spectator: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Solvent {
    Hydronium,
    Hydroxide,
}

/// A balance between two auxiliaries, referenced by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EquationDefinition {
    pub left: String,
    pub right: String,
    #[serde(default = "full_scale")]
    pub range: [f64; 2],
    #[serde(default = "default_eabs")]
    pub eabs: f64,
}

fn full_scale() -> [f64; 2] {
    [0.0, 14.0]
}

fn default_eabs() -> f64 {
    SolveConfig::default().eabs()
}

impl From<SpeciesDefinition> for Species {
    fn from(definition: SpeciesDefinition) -> Self {
        match definition {
            SpeciesDefinition::Solvent(Solvent::Hydronium) => Species::Hydronium,
            SpeciesDefinition::Solvent(Solvent::Hydroxide) => Species::Hydroxide,
            SpeciesDefinition::Acid(AcidRef { acid, index }) => {
                Species::acid(AcidId::new(acid), index)
            }
            SpeciesDefinition::Spectator(SpectatorRef { spectator }) => {
                Species::Spectator(SpectatorId::new(spectator))
            }
        }
    }
}

impl AuxiliaryDefinition {
    #[must_use]
    pub fn expression(&self) -> Expression {
        self.terms
            .iter()
            .fold(Expression::new(), |expr, term| {
                expr.with_term(term.species.into(), term.coefficient)
            })
    }
}

impl SystemDefinition {
    /// Builds the system, registering acids, spectators, and auxiliaries in
    /// declaration order.
    ///
    /// # Errors
    ///
    /// Returns the first registration error, or [`Error::InvalidInput`] for
    /// an unrecognized color.
    pub fn build(&self) -> Result<System, Error> {
        let mut system = System::new();

        for acid in &self.acids {
            system.add_acid(acid.pka.clone(), acid.concentration, acid.names.clone())?;
        }
        for spectator in &self.spectators {
            system.add_spectator(spectator.name.clone(), spectator.concentration)?;
        }
        for aux in &self.auxiliaries {
            let color = aux.color.as_deref().map(str::parse::<Color>).transpose()?;
            system.add_auxiliary(aux.expression(), aux.name.as_deref(), color)?;
        }

        Ok(system)
    }
}

impl EquationDefinition {
    /// Solves the balance against a built system.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAuxiliary`] if a side is not defined, or any
    /// error from [`System::solve`].
    pub fn solve(&self, system: &System) -> Result<BalanceSolution, Error> {
        let config = SolveConfig::new(self.eabs, SolveConfig::default().max_iters())?;
        system.solve_named(&self.left, &self.right, self.range, &config)
    }
}
