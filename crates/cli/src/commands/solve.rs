use std::fmt;

use log::info;
use logph_acidbase::{
    BalanceSolution, SolveConfig, System,
    definition::{EquationDefinition, SystemDefinition},
};

use crate::cli::SolveArgs;
use crate::config::load_definition;
use crate::error::{CliError, Result};

/// One solved balance, ready to print.
#[derive(Debug)]
pub struct Report {
    pub left: String,
    pub right: String,
    pub solution: BalanceSolution,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {}: pH {:.4} ({:.3e} mol/L, {} iterations)",
            self.left, self.right, self.solution.ph, self.solution.first, self.solution.iters
        )
    }
}

pub fn run(args: &SolveArgs) -> Result<()> {
    let definition = load_definition(&args.definition)?;
    let system = definition.build()?;

    for report in solve(&definition, &system, args)? {
        println!("{report}");
    }
    Ok(())
}

/// Solves either the balance named on the command line or every equation
/// of the definition.
pub fn solve(
    definition: &SystemDefinition,
    system: &System,
    args: &SolveArgs,
) -> Result<Vec<Report>> {
    equations(definition, args)?
        .into_iter()
        .map(|equation| {
            let solution = equation.solve(system)?;
            info!(
                "`{}` = `{}` at pH {:.6}",
                equation.left, equation.right, solution.ph
            );
            Ok(Report {
                left: equation.left,
                right: equation.right,
                solution,
            })
        })
        .collect()
}

fn equations(definition: &SystemDefinition, args: &SolveArgs) -> Result<Vec<EquationDefinition>> {
    if let (Some(left), Some(right)) = (&args.left, &args.right) {
        return Ok(vec![EquationDefinition {
            left: left.clone(),
            right: right.clone(),
            range: [args.from, args.to],
            eabs: args.eabs.unwrap_or_else(|| SolveConfig::default().eabs()),
        }]);
    }

    if definition.equations.is_empty() {
        return Err(CliError::Argument(format!(
            "{} defines no equations; name a balance with --left and --right",
            args.definition.display()
        )));
    }

    Ok(definition
        .equations
        .iter()
        .cloned()
        .map(|mut equation| {
            if let Some(eabs) = args.eabs {
                equation.eabs = eabs;
            }
            equation
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use approx::assert_relative_eq;

    const WEAK_ACID: &str = r#"
        [[acids]]
        pka = [4.0]
        concentration = 0.1

        [[auxiliaries]]
        name = "acid"
        terms = [{ species = { acid = 0, index = 0 } }]

        [[auxiliaries]]
        name = "base"
        terms = [{ species = { acid = 0, index = 1 } }]

        [[auxiliaries]]
        name = "protons"
        terms = [{ species = "hydronium" }]

        [[auxiliaries]]
        name = "acceptors"
        terms = [
            { species = { acid = 0, index = 1 } },
            { species = "hydroxide" },
        ]

        [[equations]]
        left = "acid"
        right = "base"

        [[equations]]
        left = "protons"
        right = "acceptors"
    "#;

    fn args() -> SolveArgs {
        SolveArgs {
            definition: PathBuf::from("weak-acid.toml"),
            left: None,
            right: None,
            from: 0.0,
            to: 14.0,
            eabs: None,
        }
    }

    fn setup(text: &str) -> (SystemDefinition, System) {
        let definition: SystemDefinition = toml::from_str(text).unwrap();
        let system = definition.build().unwrap();
        (definition, system)
    }

    #[test]
    fn solves_every_equation_in_order() {
        let (definition, system) = setup(WEAK_ACID);

        let reports = solve(&definition, &system, &args()).unwrap();

        assert_eq!(reports.len(), 2);
        assert_relative_eq!(reports[0].solution.ph, 4.0, epsilon = 1e-5);
        assert_relative_eq!(reports[1].solution.ph, 2.51, epsilon = 0.01);
    }

    #[test]
    fn command_line_balance_replaces_the_file_equations() {
        let (definition, system) = setup(WEAK_ACID);
        let args = SolveArgs {
            left: Some("base".into()),
            right: Some("acid".into()),
            from: 3.0,
            to: 5.0,
            eabs: Some(1e-9),
            ..args()
        };

        let reports = solve(&definition, &system, &args).unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].left, "base");
        assert_relative_eq!(reports[0].solution.ph, 4.0, epsilon = 1e-8);
    }

    #[test]
    fn needs_something_to_solve() {
        let (definition, system) = setup("[[acids]]\npka = [4.0]\nconcentration = 0.1\n");

        let result = solve(&definition, &system, &args());

        assert!(matches!(result, Err(CliError::Argument(_))));
    }

    #[test]
    fn report_mentions_both_sides_and_the_ph() {
        let (definition, system) = setup(WEAK_ACID);
        let report = solve(&definition, &system, &args()).unwrap().remove(0);

        let text = report.to_string();
        assert!(text.starts_with("acid = base: pH 4.0000"));
    }
}
