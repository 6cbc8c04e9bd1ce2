use std::ops::{Add, Mul, Neg, Sub};

use crate::Species;

/// One weighted species in an [`Expression`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub species: Species,
    pub coefficient: f64,
}

impl Term {
    #[must_use]
    pub fn new(species: Species, coefficient: f64) -> Self {
        Self {
            species,
            coefficient,
        }
    }
}

/// A linear combination of species concentrations.
///
/// The value of an expression at a given pH is the sum of each coefficient
/// times the concentration of its species. Terms keep the order they were
/// added in, and the same species may appear more than once.
///
/// Expressions are built with the arithmetic operators, which never mutate
/// their operands:
///
/// ```
/// use logph_acidbase::{AcidId, Expression, Species};
///
/// let acid = AcidId::new(0);
/// let charge: Expression = Species::Hydronium
///     - Species::Hydroxide
///     - Species::acid(acid, 1)
///     - 2.0 * Species::acid(acid, 2);
///
/// assert_eq!(charge.len(), 4);
/// assert_eq!(charge.terms()[3].coefficient, -2.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expression {
    terms: Vec<Term>,
}

impl Expression {
    /// Creates an empty expression, which evaluates to zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns this expression with one more term.
    #[must_use]
    pub fn with_term(mut self, species: Species, coefficient: f64) -> Self {
        self.terms.push(Term::new(species, coefficient));
        self
    }

    /// Returns the sum of this expression and `other`.
    #[must_use]
    pub fn plus(mut self, other: impl Into<Expression>) -> Self {
        self.terms.extend(other.into().terms);
        self
    }

    /// Returns this expression minus `other`.
    #[must_use]
    pub fn minus(self, other: impl Into<Expression>) -> Self {
        self.plus(other.into().scale(-1.0))
    }

    /// Returns this expression with every coefficient multiplied by `factor`.
    #[must_use]
    pub fn scale(mut self, factor: f64) -> Self {
        for term in &mut self.terms {
            term.coefficient *= factor;
        }
        self
    }
}

impl From<Species> for Expression {
    fn from(species: Species) -> Self {
        Self::new().with_term(species, 1.0)
    }
}

impl From<Term> for Expression {
    fn from(term: Term) -> Self {
        Self { terms: vec![term] }
    }
}

impl FromIterator<Term> for Expression {
    fn from_iter<T: IntoIterator<Item = Term>>(iter: T) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

impl<T: Into<Expression>> Add<T> for Expression {
    type Output = Expression;

    fn add(self, rhs: T) -> Expression {
        self.plus(rhs)
    }
}

impl<T: Into<Expression>> Sub<T> for Expression {
    type Output = Expression;

    fn sub(self, rhs: T) -> Expression {
        self.minus(rhs)
    }
}

impl Mul<f64> for Expression {
    type Output = Expression;

    fn mul(self, rhs: f64) -> Expression {
        self.scale(rhs)
    }
}

impl Mul<Expression> for f64 {
    type Output = Expression;

    fn mul(self, rhs: Expression) -> Expression {
        rhs.scale(self)
    }
}

impl Neg for Expression {
    type Output = Expression;

    fn neg(self) -> Expression {
        self.scale(-1.0)
    }
}

impl<T: Into<Expression>> Add<T> for Species {
    type Output = Expression;

    fn add(self, rhs: T) -> Expression {
        Expression::from(self).plus(rhs)
    }
}

impl<T: Into<Expression>> Sub<T> for Species {
    type Output = Expression;

    fn sub(self, rhs: T) -> Expression {
        Expression::from(self).minus(rhs)
    }
}

impl Mul<f64> for Species {
    type Output = Expression;

    fn mul(self, rhs: f64) -> Expression {
        Expression::new().with_term(self, rhs)
    }
}

impl Mul<Species> for f64 {
    type Output = Expression;

    fn mul(self, rhs: Species) -> Expression {
        Expression::new().with_term(rhs, self)
    }
}

impl Neg for Species {
    type Output = Expression;

    fn neg(self) -> Expression {
        Expression::new().with_term(self, -1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::AcidId;

    fn coefficients(expr: &Expression) -> Vec<f64> {
        expr.terms().iter().map(|term| term.coefficient).collect()
    }

    #[test]
    fn species_sum_keeps_order() {
        let acid = Species::acid(AcidId::new(0), 1);
        let expr = acid + Species::Hydroxide;

        assert_eq!(
            expr.terms(),
            [
                Term::new(acid, 1.0),
                Term::new(Species::Hydroxide, 1.0)
            ]
        );
    }

    #[test]
    fn subtraction_negates_only_the_right_operand() {
        let left = Species::Hydronium + 3.0 * Species::Hydroxide;
        let right = 2.0 * Species::Hydronium - Species::Hydroxide;

        let expr = left - right;

        assert_eq!(coefficients(&expr), [1.0, 3.0, -2.0, 1.0]);
    }

    #[test]
    fn scaling_works_from_either_side() {
        let expr = Species::Hydronium - Species::Hydroxide;

        assert_eq!(coefficients(&(expr.clone() * 0.5)), [0.5, -0.5]);
        assert_eq!(coefficients(&(0.5 * expr)), [0.5, -0.5]);
        assert_eq!(Species::Hydronium * 2.0, 2.0 * Species::Hydronium);
    }

    #[test]
    fn negation_flips_every_sign() {
        let expr = -(Species::Hydronium - 4.0 * Species::Hydroxide);
        assert_eq!(coefficients(&expr), [-1.0, 4.0]);
        assert_eq!(coefficients(&-Species::Hydroxide), [-1.0]);
    }

    #[test]
    fn operators_do_not_touch_operands() {
        let base = Species::Hydronium + Species::Hydroxide;
        let _sum = base.clone() + base.clone();

        assert_eq!(base.len(), 2);
        assert!(Expression::new().is_empty());
    }

    #[test]
    fn same_species_may_repeat() {
        let expr = Species::Hydronium + Species::Hydronium;
        assert_eq!(expr.len(), 2);
    }
}
