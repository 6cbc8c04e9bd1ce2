use std::convert::Infallible;

use log::info;
use logph_core::{EquationProblem, Model, Observer};
use logph_solvers::equation::bisection::{self, Action, Config, Event, Status};

use crate::{Error, Expression, System};

/// Both sides of a balance evaluated at one pH.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalancePoint {
    pub first: f64,
    pub second: f64,
}

/// A bisection event raised while solving a balance.
pub type BalanceEvent<'a> = Event<'a, f64, BalancePoint>;

/// Tolerance and iteration cap for balance solving.
///
/// The default stops once the pH bracket is narrower than `1e-6`, giving up
/// after 200 halvings.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SolveConfig {
    bisection: Config,
}

impl SolveConfig {
    /// Creates a config from a pH tolerance and an iteration cap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `eabs` is not finite and positive,
    /// or if `max_iters` is zero.
    pub fn new(eabs: f64, max_iters: usize) -> Result<Self, Error> {
        let bisection = Config::new(max_iters, eabs).map_err(|err| {
            Error::InvalidInput(format!("eabs {eabs}, max_iters {max_iters}: {err}"))
        })?;
        Ok(Self { bisection })
    }

    /// Returns the absolute pH tolerance.
    #[must_use]
    pub fn eabs(&self) -> f64 {
        self.bisection.x_abs_tol()
    }

    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.bisection.max_iters()
    }
}

/// The pH at which two expressions are equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceSolution {
    pub ph: f64,
    /// Value of the first expression at `ph`.
    pub first: f64,
    /// Value of the second expression at `ph`.
    pub second: f64,
    /// `first - second`.
    pub residual: f64,
    pub iters: usize,
    pub status: Status,
}

/// Evaluates both sides of a balance at a pH.
struct BalanceModel<'a> {
    system: &'a System,
    first: &'a Expression,
    second: &'a Expression,
}

impl Model for BalanceModel<'_> {
    type Input = f64;
    type Output = BalancePoint;
    type Error = Error;

    fn call(&self, ph: &f64) -> Result<BalancePoint, Error> {
        Ok(BalancePoint {
            first: self.system.evaluate(self.first, *ph)?,
            second: self.system.evaluate(self.second, *ph)?,
        })
    }
}

/// Drives the difference between the two sides to zero.
struct BalanceProblem;

impl EquationProblem for BalanceProblem {
    type Input = f64;
    type Output = BalancePoint;
    type Error = Infallible;

    fn input(&self, x: f64) -> Result<f64, Infallible> {
        Ok(x)
    }

    fn residual(&self, _ph: &f64, point: &BalancePoint) -> Result<f64, Infallible> {
        Ok(point.first - point.second)
    }
}

impl System {
    /// Finds the pH in `range` at which `first` equals `second`.
    ///
    /// The difference `first - second` must change sign across the range.
    /// Bisection stops once the pH bracket is narrower than the configured
    /// tolerance, or as soon as the difference is exactly zero.
    ///
    /// # Errors
    ///
    /// Returns a validation error if either expression does not resolve,
    /// [`Error::NoSignChange`] if the difference has the same sign at both
    /// ends of the range, and [`Error::Solver`] for an invalid range or a
    /// non-finite difference.
    pub fn solve(
        &self,
        first: &Expression,
        second: &Expression,
        range: [f64; 2],
        config: &SolveConfig,
    ) -> Result<BalanceSolution, Error> {
        self.solve_observed(first, second, range, config, ())
    }

    /// Solves on the full pH scale with the default config.
    ///
    /// # Errors
    ///
    /// See [`System::solve`].
    pub fn solve_default(
        &self,
        first: &Expression,
        second: &Expression,
    ) -> Result<BalanceSolution, Error> {
        self.solve(first, second, [0.0, 14.0], &SolveConfig::default())
    }

    /// Solves a balance between two stored auxiliary expressions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAuxiliary`] if either name is not stored, or
    /// any error from [`System::solve`].
    pub fn solve_named(
        &self,
        first: &str,
        second: &str,
        range: [f64; 2],
        config: &SolveConfig,
    ) -> Result<BalanceSolution, Error> {
        let lookup = |name: &str| {
            self.auxiliary(name)
                .map(|aux| aux.expression())
                .ok_or_else(|| Error::UnknownAuxiliary(name.to_owned()))
        };
        self.solve(lookup(first)?, lookup(second)?, range, config)
    }

    /// Like [`System::solve`], reporting every midpoint to an observer,
    /// which may stop the search early.
    ///
    /// # Errors
    ///
    /// See [`System::solve`].
    pub fn solve_observed<Obs>(
        &self,
        first: &Expression,
        second: &Expression,
        range: [f64; 2],
        config: &SolveConfig,
        observer: Obs,
    ) -> Result<BalanceSolution, Error>
    where
        Obs: for<'a> Observer<BalanceEvent<'a>, Action>,
    {
        self.validate(first)?;
        self.validate(second)?;

        let model = BalanceModel {
            system: self,
            first,
            second,
        };
        let solution =
            bisection::solve(&model, &BalanceProblem, range, &config.bisection, observer)?;

        info!(
            "balance solved at pH {:.6} after {} iteration(s) ({:?})",
            solution.x, solution.iters, solution.status
        );
        Ok(BalanceSolution {
            ph: solution.x,
            first: solution.snapshot.output.first,
            second: solution.snapshot.output.second,
            residual: solution.residual,
            iters: solution.iters,
            status: solution.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::Species;

    #[test]
    fn half_equivalence_point_is_at_pka() {
        let mut system = System::new();
        let acid = system.add_acid([4.0], 0.1, None).unwrap();

        let solution = system
            .solve_default(
                &Species::acid(acid, 0).into(),
                &Species::acid(acid, 1).into(),
            )
            .unwrap();

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.ph, 4.0, epsilon = 1e-5);
        assert_relative_eq!(solution.first, solution.second, max_relative = 1e-4);
    }

    #[test]
    fn pure_water_is_neutral() {
        let system = System::new();
        let config = SolveConfig::default();

        let solution = system
            .solve(
                &Species::Hydronium.into(),
                &Species::Hydroxide.into(),
                [0.0, 14.0],
                &config,
            )
            .unwrap();

        assert_relative_eq!(solution.ph, 7.0, epsilon = config.eabs());
    }

    #[test]
    fn diprotic_protonic_balance() {
        // Carbonic acid, 0.01 mol/L: pH ≈ 4.18.
        let mut system = System::new();
        let carbonic = system.add_acid([6.35, 10.33], 0.01, None).unwrap();
        let a = |index| Species::acid(carbonic, index);

        let solution = system
            .solve(
                &Species::Hydronium.into(),
                &(a(1) + 2.0 * a(2) + Species::Hydroxide),
                [0.0, 14.0],
                &SolveConfig::new(1e-9, 200).unwrap(),
            )
            .unwrap();

        assert_relative_eq!(solution.ph, 4.18, epsilon = 0.01);
        assert!(solution.residual.abs() < 1e-9);
    }

    #[test]
    fn reversed_range_is_accepted() {
        let system = System::new();

        let solution = system
            .solve(
                &Species::Hydronium.into(),
                &Species::Hydroxide.into(),
                [12.0, 1.0],
                &SolveConfig::default(),
            )
            .unwrap();

        assert_relative_eq!(solution.ph, 7.0, epsilon = 1e-6);
    }

    #[test]
    fn same_sign_difference_has_no_solution() {
        let mut system = System::new();
        let sodium = system.add_spectator("Na⁺", 2.0).unwrap();

        let result = system.solve_default(
            &Species::Spectator(sodium).into(),
            &Species::Hydronium.into(),
        );

        assert!(matches!(result, Err(Error::NoSignChange { .. })));
    }

    #[test]
    fn validates_expressions_before_solving() {
        let mut system = System::new();
        let acid = system.add_acid([4.0], 0.1, None).unwrap();

        let result = system.solve_default(
            &Species::acid(acid, 2).into(),
            &Species::Hydronium.into(),
        );

        assert!(matches!(result, Err(Error::InvalidIndex { index: 2, .. })));
    }

    #[test]
    fn rejects_bad_tolerance() {
        for eabs in [0.0, -1e-6, f64::NAN] {
            assert!(matches!(
                SolveConfig::new(eabs, 100),
                Err(Error::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn rejects_empty_range() {
        let system = System::new();

        let result = system.solve(
            &Species::Hydronium.into(),
            &Species::Hydroxide.into(),
            [3.0, 3.0],
            &SolveConfig::default(),
        );

        assert!(matches!(result, Err(Error::InvalidInput(_))));

        let result = system.solve(
            &Species::Hydronium.into(),
            &Species::Hydroxide.into(),
            [f64::NAN, 14.0],
            &SolveConfig::default(),
        );
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn rejects_zero_iterations() {
        assert!(matches!(
            SolveConfig::new(1e-6, 0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn tolerance_below_float_spacing_still_converges() {
        let mut system = System::new();
        let carbonic = system.add_acid([6.35, 10.33], 0.01, None).unwrap();
        let a = |index| Species::acid(carbonic, index);

        let solution = system
            .solve(
                &Species::Hydronium.into(),
                &(a(1) + 2.0 * a(2) + Species::Hydroxide),
                [0.0, 14.0],
                &SolveConfig::new(1e-17, 200).unwrap(),
            )
            .unwrap();

        assert_eq!(solution.status, Status::Converged);
        assert!(solution.iters < 200);
        assert_relative_eq!(solution.ph, 4.176, epsilon = 1e-3);
    }

    #[test]
    fn solves_between_named_auxiliaries() {
        let mut system = System::new();
        let acid = system.add_acid([4.0], 0.1, None).unwrap();
        system
            .add_auxiliary(Species::acid(acid, 0), Some("left"), None)
            .unwrap();
        system
            .add_auxiliary(Species::acid(acid, 1), Some("right"), None)
            .unwrap();

        let config = SolveConfig::default();
        let solution = system
            .solve_named("left", "right", [0.0, 14.0], &config)
            .unwrap();
        assert_relative_eq!(solution.ph, 4.0, epsilon = 1e-5);

        assert!(matches!(
            system.solve_named("left", "missing", [0.0, 14.0], &config),
            Err(Error::UnknownAuxiliary(name)) if name == "missing"
        ));
    }

    #[test]
    fn observer_can_stop_the_search() {
        let mut system = System::new();
        let acid = system.add_acid([4.0], 0.1, None).unwrap();

        let mut seen = Vec::new();
        let solution = system
            .solve_observed(
                &Species::acid(acid, 0).into(),
                &Species::acid(acid, 1).into(),
                [0.0, 14.0],
                &SolveConfig::default(),
                |event: &BalanceEvent<'_>| {
                    seen.push(event.x());
                    (event.iter == 2).then_some(Action::StopEarly)
                },
            )
            .unwrap();

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(seen, [7.0, 3.5]);
        assert_relative_eq!(solution.ph, 3.5);
    }
}
