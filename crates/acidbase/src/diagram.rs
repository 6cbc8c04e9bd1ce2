use crate::{Color, Error, Species, System};

/// Evenly spaced pH values from `start` up to, but excluding, `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhGrid {
    start: f64,
    end: f64,
    step: f64,
}

impl Default for PhGrid {
    /// The full pH scale in steps of `0.001`.
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 14.0,
            step: 0.001,
        }
    }
}

impl PhGrid {
    /// Creates a grid over `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if a bound or the step is not finite,
    /// if `start >= end`, or if the step is not positive.
    pub fn new(start: f64, end: f64, step: f64) -> Result<Self, Error> {
        if !start.is_finite() || !end.is_finite() || start >= end {
            return Err(Error::InvalidInput(format!(
                "pH grid bounds [{start}, {end}) must be finite and increasing"
            )));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "pH grid step {step} must be finite and positive"
            )));
        }
        Ok(Self { start, end, step })
    }

    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Iterates over the grid points.
    ///
    /// Each point is computed as `start + i * step` so rounding errors do
    /// not accumulate along the grid.
    #[allow(clippy::cast_precision_loss)]
    pub fn points(&self) -> impl Iterator<Item = f64> + '_ {
        (0_u64..)
            .map(move |i| self.start + i as f64 * self.step)
            .take_while(move |ph| *ph < self.end)
    }

    /// Returns the number of grid points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points().count()
    }

    /// Always `false`, since `start < end`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// What a [`Curve`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveKind {
    /// Hydronium or hydroxide.
    Solvent,
    /// One deprotonation state of an acid.
    AcidState,
    /// A spectator's constant concentration.
    Spectator,
    /// A stored auxiliary expression.
    Auxiliary,
}

/// One sampled concentration curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub label: String,
    pub kind: CurveKind,
    /// Explicit color, only ever set on auxiliaries.
    pub color: Option<Color>,
    /// One value per point of [`Diagram::ph`], in mol/L.
    pub values: Vec<f64>,
}

/// Every curve of a system sampled over a shared pH grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    pub ph: Vec<f64>,
    pub curves: Vec<Curve>,
}

impl Diagram {
    /// Returns the first curve with the given label.
    #[must_use]
    pub fn curve(&self, label: &str) -> Option<&Curve> {
        self.curves.iter().find(|curve| curve.label == label)
    }

    /// Returns the pH range covered by the samples.
    #[must_use]
    pub fn ph_range(&self) -> Option<[f64; 2]> {
        Some([*self.ph.first()?, *self.ph.last()?])
    }
}

impl System {
    /// Samples every curve of the logarithmic diagram over a pH grid.
    ///
    /// Curves come in a fixed order: hydronium, hydroxide, each acid state
    /// (acids in registration order, fully protonated first), spectators,
    /// then auxiliaries.
    ///
    /// # Errors
    ///
    /// Propagates evaluation errors, which stored expressions never raise.
    pub fn sample(&self, grid: &PhGrid) -> Result<Diagram, Error> {
        let ph: Vec<f64> = grid.points().collect();
        let mut curves = Vec::new();

        let mut push = |label: &str,
                        kind: CurveKind,
                        color: Option<Color>,
                        species: &dyn Fn(f64) -> Result<f64, Error>| {
            let values = ph.iter().map(|&ph| species(ph)).collect::<Result<_, _>>()?;
            curves.push(Curve {
                label: label.to_owned(),
                kind,
                color,
                values,
            });
            Ok::<_, Error>(())
        };

        for solvent in [Species::Hydronium, Species::Hydroxide] {
            push(
                self.species_name(solvent)?,
                CurveKind::Solvent,
                None,
                &|ph| self.concentration(solvent, ph),
            )?;
        }

        for acid in self.acids() {
            for (index, name) in acid.names().iter().enumerate() {
                push(name, CurveKind::AcidState, None, &|ph| {
                    acid.concentration(index, ph)
                })?;
            }
        }

        for spectator in self.spectators() {
            push(spectator.name(), CurveKind::Spectator, None, &|_| {
                Ok(spectator.concentration())
            })?;
        }

        for aux in self.auxiliaries() {
            push(aux.name(), CurveKind::Auxiliary, aux.color(), &|ph| {
                self.evaluate(aux.expression(), ph)
            })?;
        }

        Ok(Diagram { ph, curves })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn default_grid_excludes_end() {
        let grid = PhGrid::default();

        assert_eq!(grid.len(), 14_000);
        assert_relative_eq!(grid.points().last().unwrap(), 13.999, epsilon = 1e-9);
    }

    #[test]
    fn coarse_grid_points() {
        let grid = PhGrid::new(2.0, 3.0, 0.25).unwrap();
        let points: Vec<f64> = grid.points().collect();

        assert_eq!(points, [2.0, 2.25, 2.5, 2.75]);
    }

    #[test]
    fn rejects_bad_grids() {
        assert!(PhGrid::new(5.0, 5.0, 0.1).is_err());
        assert!(PhGrid::new(7.0, 1.0, 0.1).is_err());
        assert!(PhGrid::new(0.0, 14.0, 0.0).is_err());
        assert!(PhGrid::new(0.0, f64::INFINITY, 0.1).is_err());
        assert!(PhGrid::new(0.0, 14.0, f64::NAN).is_err());
    }

    #[test]
    fn samples_every_curve_in_order() {
        let mut system = System::new();
        let acid = system.add_acid([6.35, 10.33], 0.05, None).unwrap();
        system.add_spectator("Na⁺", 0.1).unwrap();
        let color = Color::rgb(0, 0, 255);
        system
            .add_auxiliary(
                Species::Hydronium - Species::acid(acid, 1),
                Some("balance"),
                Some(color),
            )
            .unwrap();

        let grid = PhGrid::new(0.0, 14.0, 0.5).unwrap();
        let diagram = system.sample(&grid).unwrap();

        let labels: Vec<&str> = diagram.curves.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            labels,
            ["H₃O⁺", "OH⁻", "H₂A", "HA⁻", "A²⁻", "Na⁺", "balance"]
        );

        let kinds: Vec<CurveKind> = diagram.curves.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            [
                CurveKind::Solvent,
                CurveKind::Solvent,
                CurveKind::AcidState,
                CurveKind::AcidState,
                CurveKind::AcidState,
                CurveKind::Spectator,
                CurveKind::Auxiliary,
            ]
        );

        assert_eq!(diagram.ph.len(), 28);
        assert!(diagram.curves.iter().all(|c| c.values.len() == 28));
        assert_eq!(diagram.curve("balance").unwrap().color, Some(color));
        assert_eq!(diagram.ph_range(), Some([0.0, 13.5]));
    }

    #[test]
    fn sampled_values_match_evaluation() {
        let mut system = System::new();
        let acid = system.add_acid([4.75], 0.1, None).unwrap();
        let grid = PhGrid::new(3.0, 6.0, 0.5).unwrap();

        let diagram = system.sample(&grid).unwrap();
        let acetate = diagram.curve("A⁻").unwrap();

        for (ph, value) in diagram.ph.iter().zip(&acetate.values) {
            assert_relative_eq!(
                *value,
                system.acid(acid).unwrap().concentration(1, *ph).unwrap()
            );
        }
        assert!(diagram.curve("OH⁻").unwrap().values.iter().all(|v| *v > 0.0));
    }
}
