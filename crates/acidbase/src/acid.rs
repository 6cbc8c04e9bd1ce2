use std::fmt;

use crate::{Error, Species};

/// Identifies an acid within the [`System`](crate::System) that created it.
///
/// A system hands out identifiers in registration order, starting at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AcidId(usize);

impl AcidId {
    /// Creates an identifier from its raw value.
    #[must_use]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for AcidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A mono- or polyprotic acid at a fixed analytical concentration.
///
/// The number of acidic protons equals the number of pKa values. The
/// values are kept sorted, so the acid always dissociates from the lowest
/// pKa upward regardless of the order they were given in.
///
/// Internally the cumulative dissociation products
/// `beta[m] = Ka[0] · … · Ka[m-1]` are stored as base-10 logarithms,
/// `log_betas[m] = -(pKa[0] + … + pKa[m-1])`, which keeps every
/// concentration finite across the whole pH scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Acid {
    id: AcidId,
    pka: Vec<f64>,
    log_betas: Vec<f64>,
    concentration: f64,
    names: Vec<String>,
}

impl Acid {
    /// Creates an acid from its pKa values and total concentration.
    ///
    /// When `names` is `None`, the states are named after the identifier:
    /// acid 0 with two protons yields `H₂A`, `HA⁻`, and `A²⁻`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if there are no pKa values, a pKa is
    /// not finite, the concentration is not finite and positive, or the
    /// number of names differs from the number of states (`protons + 1`).
    pub fn new(
        id: AcidId,
        pka: impl Into<Vec<f64>>,
        concentration: f64,
        names: Option<Vec<String>>,
    ) -> Result<Self, Error> {
        let mut pka = pka.into();

        if pka.is_empty() {
            return Err(Error::InvalidInput(
                "an acid needs at least one pKa value".into(),
            ));
        }
        if let Some(value) = pka.iter().find(|value| !value.is_finite()) {
            return Err(Error::InvalidInput(format!("pKa {value} is not finite")));
        }
        if !concentration.is_finite() || concentration <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "acid concentration {concentration} must be finite and positive"
            )));
        }

        pka.sort_by(f64::total_cmp);

        let names = match names {
            Some(names) if names.len() != pka.len() + 1 => {
                return Err(Error::InvalidInput(format!(
                    "{} name(s) given for {} deprotonation state(s)",
                    names.len(),
                    pka.len() + 1
                )));
            }
            Some(names) => names,
            None => default_names(id, pka.len()),
        };

        let log_betas = std::iter::once(0.0)
            .chain(pka.iter().scan(0.0, |sum, pka| {
                *sum -= pka;
                Some(*sum)
            }))
            .collect();

        Ok(Self {
            id,
            pka,
            log_betas,
            concentration,
            names,
        })
    }

    #[must_use]
    pub fn id(&self) -> AcidId {
        self.id
    }

    /// Returns the number of acidic protons.
    #[must_use]
    pub fn protons(&self) -> usize {
        self.pka.len()
    }

    /// Returns the pKa values in ascending order.
    #[must_use]
    pub fn pka(&self) -> &[f64] {
        &self.pka
    }

    /// Returns the total analytical concentration, in mol/L.
    #[must_use]
    pub fn total_concentration(&self) -> f64 {
        self.concentration
    }

    /// Returns the display name of every state, from fully protonated to
    /// fully deprotonated.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the handle of the state that has lost `index` protons.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIndex`] if `index > protons`.
    pub fn species(&self, index: usize) -> Result<Species, Error> {
        self.check_index(index)?;
        Ok(Species::acid(self.id, index))
    }

    /// Returns the equilibrium concentration of the state that has lost
    /// `index` protons at the given pH.
    ///
    /// The concentration follows the distribution function
    ///
    /// ```text
    /// C_i = Ca / Σ_m [H₃O⁺]^(i-m) · beta[m] / beta[i]
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIndex`] if `index > protons`.
    pub fn concentration(&self, index: usize, ph: f64) -> Result<f64, Error> {
        self.check_index(index)?;
        Ok(self.concentration * self.fraction_unchecked(index, ph))
    }

    /// Returns the fraction of the total concentration held by each state
    /// at the given pH. The fractions sum to one.
    #[must_use]
    pub fn fractions(&self, ph: f64) -> Vec<f64> {
        (0..=self.protons())
            .map(|index| self.fraction_unchecked(index, ph))
            .collect()
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<(), Error> {
        if index > self.protons() {
            return Err(Error::InvalidIndex {
                acid: self.id,
                index,
                protons: self.protons(),
            });
        }
        Ok(())
    }

    /// Evaluates the distribution function in log space.
    ///
    /// Each term of the sum is `10^e_m` with
    /// `e_m = (m - index) · pH + log_betas[m] - log_betas[index]`.
    /// Factoring out the largest term keeps the sum in `[1, protons + 1]`.
    #[allow(clippy::cast_precision_loss)]
    fn fraction_unchecked(&self, index: usize, ph: f64) -> f64 {
        let target = self.log_betas[index];
        let exponent = |m: usize| (m as f64 - index as f64) * ph + self.log_betas[m] - target;

        let largest = (0..self.log_betas.len())
            .map(exponent)
            .fold(f64::NEG_INFINITY, f64::max);
        let sum: f64 = (0..self.log_betas.len())
            .map(|m| 10f64.powf(exponent(m) - largest))
            .sum();

        10f64.powf(-largest) / sum
    }
}

/// Builds names like `H₂A`, `HA⁻`, `A²⁻` for an acid.
///
/// The letter runs from `A` to `Z` with the identifier; identifiers past
/// `Z` start over with a numeric suffix (`A1`, `B1`, …).
fn default_names(id: AcidId, protons: usize) -> Vec<String> {
    let letter = char::from(b'A' + u8::try_from(id.0 % 26).unwrap_or(0));
    let base = match id.0 / 26 {
        0 => letter.to_string(),
        cycle => format!("{letter}{cycle}"),
    };

    (0..=protons)
        .map(|lost| {
            let remaining = protons - lost;
            let mut name = String::new();
            if remaining > 0 {
                name.push('H');
            }
            if remaining > 1 {
                name.extend(remaining.to_string().chars().map(subscript));
            }
            name.push_str(&base);
            if lost > 1 {
                name.extend(lost.to_string().chars().map(superscript));
            }
            if lost > 0 {
                name.push('⁻');
            }
            name
        })
        .collect()
}

fn subscript(digit: char) -> char {
    const DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];
    digit.to_digit(10).map_or(digit, |d| DIGITS[d as usize])
}

fn superscript(digit: char) -> char {
    const DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
    digit.to_digit(10).map_or(digit, |d| DIGITS[d as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn acid(pka: &[f64], concentration: f64) -> Acid {
        Acid::new(AcidId::new(0), pka, concentration, None).expect("valid acid")
    }

    fn total(acid: &Acid, ph: f64) -> f64 {
        (0..=acid.protons())
            .map(|index| acid.concentration(index, ph).unwrap())
            .sum()
    }

    #[test]
    fn monoprotic_states_are_equal_at_pka() {
        let acid = acid(&[4.0], 0.1);

        let protonated = acid.concentration(0, 4.0).unwrap();
        let deprotonated = acid.concentration(1, 4.0).unwrap();

        assert_relative_eq!(protonated, deprotonated, epsilon = 1e-9);
        assert_relative_eq!(protonated, 0.05, epsilon = 1e-9);
    }

    #[test]
    fn monoprotic_mass_balance() {
        let acid = acid(&[4.0], 0.1);

        for step in 0..=140 {
            let ph = f64::from(step) * 0.1;
            assert_relative_eq!(total(&acid, ph), 0.1, epsilon = 1e-9);
        }
    }

    #[test]
    fn polyprotic_mass_balance() {
        let acids = [
            acid(&[9.24], 0.01),
            acid(&[6.35, 10.33], 0.05),
            acid(&[2.15, 7.20, 12.35], 0.2),
        ];

        for acid in &acids {
            for step in 0..=56 {
                let ph = f64::from(step) * 0.25;
                assert_relative_eq!(
                    total(acid, ph),
                    acid.total_concentration(),
                    epsilon = 1e-9
                );
            }
        }
    }

    #[test]
    fn matches_closed_form_for_diprotic_acid() {
        let acid = acid(&[6.35, 10.33], 0.05);
        let ph = 8.0;

        let h = 10f64.powf(-ph);
        let (k1, k2) = (10f64.powf(-6.35), 10f64.powf(-10.33));
        let denominator = h * h + k1 * h + k1 * k2;

        assert_relative_eq!(
            acid.concentration(0, ph).unwrap(),
            0.05 * h * h / denominator,
            max_relative = 1e-10
        );
        assert_relative_eq!(
            acid.concentration(1, ph).unwrap(),
            0.05 * k1 * h / denominator,
            max_relative = 1e-10
        );
        assert_relative_eq!(
            acid.concentration(2, ph).unwrap(),
            0.05 * k1 * k2 / denominator,
            max_relative = 1e-10
        );
    }

    #[test]
    fn stays_finite_for_extreme_constants() {
        let acid = acid(&[-2.0, 5.0, 16.0, 30.0, 45.0], 1.0);

        for ph in [0.0, 7.0, 14.0] {
            for index in 0..=acid.protons() {
                let value = acid.concentration(index, ph).unwrap();
                assert!(value.is_finite() && value >= 0.0);
            }
            assert_relative_eq!(total(&acid, ph), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn sorts_pka_values() {
        let unsorted = acid(&[12.35, 2.15, 7.20], 0.1);
        let sorted = acid(&[2.15, 7.20, 12.35], 0.1);

        assert_eq!(unsorted.pka(), &[2.15, 7.20, 12.35]);
        assert_eq!(
            unsorted.concentration(1, 5.0).unwrap(),
            sorted.concentration(1, 5.0).unwrap()
        );
    }

    #[test]
    fn fractions_sum_to_one() {
        let acid = acid(&[2.15, 7.20, 12.35], 0.1);
        let fractions = acid.fractions(7.2);

        assert_eq!(fractions.len(), 4);
        assert_relative_eq!(fractions.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(fractions[1], fractions[2], epsilon = 1e-6);
    }

    #[test]
    fn rejects_index_past_last_state() {
        let acid = acid(&[2.15, 7.20, 12.35], 0.1);

        assert!(matches!(
            acid.concentration(4, 7.0),
            Err(Error::InvalidIndex {
                index: 4,
                protons: 3,
                ..
            })
        ));
        assert!(matches!(acid.species(4), Err(Error::InvalidIndex { .. })));
        assert_eq!(acid.species(3).unwrap(), Species::acid(AcidId::new(0), 3));
    }

    #[test]
    fn rejects_wrong_number_of_names() {
        let result = Acid::new(
            AcidId::new(0),
            [4.75],
            0.1,
            Some(vec!["CH3COOH".into()]),
        );
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        let result = Acid::new(
            AcidId::new(0),
            [4.75],
            0.1,
            Some(vec!["CH3COOH".into(), "CH3COO-".into()]),
        );
        assert_eq!(result.unwrap().names(), ["CH3COOH", "CH3COO-"]);
    }

    #[test]
    fn rejects_bad_parameters() {
        let id = AcidId::new(0);
        assert!(matches!(
            Acid::new(id, Vec::<f64>::new(), 0.1, None),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            Acid::new(id, [f64::NAN], 0.1, None),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            Acid::new(id, [4.0], 0.0, None),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            Acid::new(id, [4.0], f64::INFINITY, None),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn default_names_follow_identifier() {
        assert_eq!(default_names(AcidId::new(0), 1), ["HA", "A⁻"]);
        assert_eq!(
            default_names(AcidId::new(2), 3),
            ["H₃C", "H₂C⁻", "HC²⁻", "C³⁻"]
        );
        assert_eq!(default_names(AcidId::new(27), 1), ["HB1", "B1⁻"]);
    }
}
