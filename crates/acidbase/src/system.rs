use log::debug;

use crate::{
    Acid, AcidId, Color, Error, Expression, Species, Spectator, SpectatorId, hydronium, hydroxide,
};

/// A named expression stored in a [`System`], drawn as a dashed curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Auxiliary {
    name: String,
    expression: Expression,
    color: Option<Color>,
}

impl Auxiliary {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    #[must_use]
    pub fn color(&self) -> Option<Color> {
        self.color
    }
}

/// A registry of acids, spectators, and auxiliary expressions sharing one
/// solution.
///
/// Identifiers are handed out by the system in registration order and
/// double as positions in its internal vectors. A handle is only
/// meaningful for the system that issued it.
#[derive(Debug, Clone, Default)]
pub struct System {
    acids: Vec<Acid>,
    spectators: Vec<Spectator>,
    auxiliaries: Vec<Auxiliary>,
}

impl System {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an acid and returns its identifier.
    ///
    /// # Errors
    ///
    /// Fails for the same reasons as [`Acid::new`].
    pub fn add_acid(
        &mut self,
        pka: impl Into<Vec<f64>>,
        concentration: f64,
        names: Option<Vec<String>>,
    ) -> Result<AcidId, Error> {
        let id = AcidId::new(self.acids.len());
        let acid = Acid::new(id, pka, concentration, names)?;

        debug!(
            "registered acid {id} ({}) with pKa {:?} at {concentration} mol/L",
            acid.names().join(", "),
            acid.pka()
        );
        self.acids.push(acid);
        Ok(id)
    }

    /// Registers a spectator and returns its identifier.
    ///
    /// # Errors
    ///
    /// Fails for the same reasons as [`Spectator::new`].
    pub fn add_spectator(
        &mut self,
        name: impl Into<String>,
        concentration: f64,
    ) -> Result<SpectatorId, Error> {
        let id = SpectatorId::new(self.spectators.len());
        let spectator = Spectator::new(id, name, concentration)?;

        debug!(
            "registered spectator {id} ({}) at {concentration} mol/L",
            spectator.name()
        );
        self.spectators.push(spectator);
        Ok(id)
    }

    /// Validates and stores a named expression, returning its name.
    ///
    /// Without a name the expression is called `aux. k`, where `k` is one
    /// more than the number of auxiliaries already stored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NameCollision`] if the name is taken, or any error
    /// from [`System::validate`].
    pub fn add_auxiliary(
        &mut self,
        expression: impl Into<Expression>,
        name: Option<&str>,
        color: Option<Color>,
    ) -> Result<&str, Error> {
        let expression = expression.into();
        let name = name.map_or_else(
            || format!("aux. {}", self.auxiliaries.len() + 1),
            str::to_owned,
        );

        if self.auxiliary(&name).is_some() {
            return Err(Error::NameCollision(name));
        }
        self.validate(&expression)?;

        debug!(
            "registered auxiliary `{name}` = {}",
            self.describe(&expression)?
        );
        let position = self.auxiliaries.len();
        self.auxiliaries.push(Auxiliary {
            name,
            expression,
            color,
        });

        Ok(&self.auxiliaries[position].name)
    }

    #[must_use]
    pub fn acid(&self, id: AcidId) -> Option<&Acid> {
        self.acids.get(id.get())
    }

    #[must_use]
    pub fn spectator(&self, id: SpectatorId) -> Option<&Spectator> {
        self.spectators.get(id.get())
    }

    #[must_use]
    pub fn auxiliary(&self, name: &str) -> Option<&Auxiliary> {
        self.auxiliaries.iter().find(|aux| aux.name == name)
    }

    #[must_use]
    pub fn acids(&self) -> &[Acid] {
        &self.acids
    }

    #[must_use]
    pub fn spectators(&self) -> &[Spectator] {
        &self.spectators
    }

    #[must_use]
    pub fn auxiliaries(&self) -> &[Auxiliary] {
        &self.auxiliaries
    }

    /// Checks that every term of an expression refers to a registered
    /// species and carries a finite coefficient.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSpecies`] for an unregistered acid or
    /// spectator, [`Error::InvalidIndex`] for an acid state that does not
    /// exist, and [`Error::NonFiniteCoefficient`] for a NaN or infinite
    /// coefficient.
    pub fn validate(&self, expression: &Expression) -> Result<(), Error> {
        for term in expression.terms() {
            match term.species {
                Species::Hydronium | Species::Hydroxide => {}
                Species::Acid { acid, index } => {
                    self.acid(acid)
                        .ok_or(Error::UnknownSpecies(term.species))?
                        .check_index(index)?;
                }
                Species::Spectator(id) => {
                    self.spectator(id)
                        .ok_or(Error::UnknownSpecies(term.species))?;
                }
            }

            if !term.coefficient.is_finite() {
                return Err(Error::NonFiniteCoefficient {
                    species: term.species,
                    coefficient: term.coefficient,
                });
            }
        }
        Ok(())
    }

    /// Returns the concentration of a single species at the given pH.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSpecies`] or [`Error::InvalidIndex`] if the
    /// handle does not resolve.
    pub fn concentration(&self, species: Species, ph: f64) -> Result<f64, Error> {
        match species {
            Species::Hydronium => Ok(hydronium(ph)),
            Species::Hydroxide => Ok(hydroxide(ph)),
            Species::Acid { acid, index } => self
                .acid(acid)
                .ok_or(Error::UnknownSpecies(species))?
                .concentration(index, ph),
            Species::Spectator(id) => self
                .spectator(id)
                .map(Spectator::concentration)
                .ok_or(Error::UnknownSpecies(species)),
        }
    }

    /// Evaluates an expression at the given pH.
    ///
    /// # Errors
    ///
    /// Returns an error if a term does not resolve. Expressions stored with
    /// [`System::add_auxiliary`] always resolve.
    pub fn evaluate(&self, expression: &Expression, ph: f64) -> Result<f64, Error> {
        expression.terms().iter().try_fold(0.0, |sum, term| {
            Ok(sum + term.coefficient * self.concentration(term.species, ph)?)
        })
    }

    /// Evaluates a stored auxiliary expression at the given pH.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAuxiliary`] if no auxiliary has that name.
    pub fn evaluate_auxiliary(&self, name: &str, ph: f64) -> Result<f64, Error> {
        let aux = self
            .auxiliary(name)
            .ok_or_else(|| Error::UnknownAuxiliary(name.to_owned()))?;
        self.evaluate(&aux.expression, ph)
    }

    /// Returns the display name of a species.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSpecies`] or [`Error::InvalidIndex`] if the
    /// handle does not resolve.
    pub fn species_name(&self, species: Species) -> Result<&str, Error> {
        match species {
            Species::Hydronium => Ok("H₃O⁺"),
            Species::Hydroxide => Ok("OH⁻"),
            Species::Acid { acid, index } => {
                let acid = self.acid(acid).ok_or(Error::UnknownSpecies(species))?;
                acid.check_index(index)?;
                Ok(&acid.names()[index])
            }
            Species::Spectator(id) => self
                .spectator(id)
                .map(Spectator::name)
                .ok_or(Error::UnknownSpecies(species)),
        }
    }

    /// Formats an expression with species names, such as `H₃O⁺ - 2·A²⁻`.
    ///
    /// # Errors
    ///
    /// Returns an error if a term does not resolve.
    #[allow(clippy::float_cmp)]
    pub fn describe(&self, expression: &Expression) -> Result<String, Error> {
        let mut text = String::new();

        for (position, term) in expression.terms().iter().enumerate() {
            let name = self.species_name(term.species)?;
            let magnitude = term.coefficient.abs();
            let negative = term.coefficient.is_sign_negative();

            match (position, negative) {
                (0, true) => text.push('-'),
                (0, false) => {}
                (_, true) => text.push_str(" - "),
                (_, false) => text.push_str(" + "),
            }
            if magnitude != 1.0 {
                text.push_str(&format!("{magnitude}·"));
            }
            text.push_str(name);
        }

        if text.is_empty() {
            text.push('0');
        }
        Ok(text)
    }
}
