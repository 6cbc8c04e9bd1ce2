use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Solve acid-base balances and draw logarithmic concentration diagrams.",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a file in addition to the terminal
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find the pH of every balance in a system definition.
    Solve(SolveArgs),
    /// Print the concentration of every species over a range of pH values.
    Table(TableArgs),
    /// Open the logarithmic diagram of a system in a window.
    Plot(PlotArgs),
}

/// Arguments for the `solve` subcommand.
#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Path to the system definition in TOML format.
    #[arg(value_name = "PATH")]
    pub definition: PathBuf,

    /// Solve only this balance: the auxiliary on the left-hand side.
    /// Requires --right.
    #[arg(long, value_name = "NAME", requires = "right")]
    pub left: Option<String>,

    /// The auxiliary on the right-hand side of the balance given by --left.
    #[arg(long, value_name = "NAME", requires = "left")]
    pub right: Option<String>,

    /// Lower end of the pH search range for --left/--right.
    #[arg(long, value_name = "PH", default_value_t = 0.0)]
    pub from: f64,

    /// Upper end of the pH search range for --left/--right.
    #[arg(long, value_name = "PH", default_value_t = 14.0)]
    pub to: f64,

    /// Absolute pH tolerance, overriding every equation in the definition.
    #[arg(long, value_name = "FLOAT")]
    pub eabs: Option<f64>,
}

/// Arguments for the `table` subcommand.
#[derive(Args, Debug)]
pub struct TableArgs {
    /// Path to the system definition in TOML format.
    #[arg(value_name = "PATH")]
    pub definition: PathBuf,

    /// First pH value.
    #[arg(long, value_name = "PH", default_value_t = 0.0)]
    pub from: f64,

    /// Last pH value, included when it lies on the grid.
    #[arg(long, value_name = "PH", default_value_t = 14.0)]
    pub to: f64,

    /// Distance between pH values.
    #[arg(long, value_name = "PH", default_value_t = 1.0)]
    pub step: f64,

    /// Print log₁₀ of each concentration instead of the concentration.
    #[arg(long)]
    pub log: bool,
}

/// Arguments for the `plot` subcommand.
#[derive(Args, Debug)]
pub struct PlotArgs {
    /// Path to the system definition in TOML format.
    #[arg(value_name = "PATH")]
    pub definition: PathBuf,

    /// Window title. Defaults to the file name.
    #[arg(long)]
    pub title: Option<String>,

    /// Show a legend naming every curve.
    #[arg(long)]
    pub legend: bool,

    /// Lowest pH shown.
    #[arg(long, value_name = "PH", default_value_t = 0.0)]
    pub ph_min: f64,

    /// Highest pH shown.
    #[arg(long, value_name = "PH", default_value_t = 14.0)]
    pub ph_max: f64,

    /// pH sampling step.
    #[arg(long, value_name = "PH", default_value_t = 0.001)]
    pub step: f64,

    /// Lowest concentration shown, in mol/L.
    #[arg(long, value_name = "MOL_PER_L", default_value_t = 1e-14)]
    pub c_min: f64,

    /// Highest concentration shown, in mol/L.
    #[arg(long, value_name = "MOL_PER_L", default_value_t = 1.0)]
    pub c_max: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_solve_with_explicit_balance() {
        let cli = Cli::parse_from([
            "logph", "-vv", "solve", "buffer.toml", "--left", "cations", "--right", "anions",
            "--to", "10",
        ]);

        assert_eq!(cli.verbose, 2);
        let Commands::Solve(args) = cli.command else {
            panic!("expected the solve command");
        };
        assert_eq!(args.left.as_deref(), Some("cations"));
        assert_eq!(args.to, 10.0);
        assert_eq!(args.from, 0.0);
    }

    #[test]
    fn left_requires_right() {
        let result = Cli::try_parse_from(["logph", "solve", "buffer.toml", "--left", "cations"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["logph", "-q", "-v", "table", "buffer.toml"]);
        assert!(result.is_err());
    }
}
