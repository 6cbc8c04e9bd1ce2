use logph_acidbase::{Diagram, PhGrid};
use prettytable::{Cell, Row, Table, format};

use crate::cli::TableArgs;
use crate::config::load_definition;
use crate::error::{CliError, Result};

pub fn run(args: &TableArgs) -> Result<()> {
    let system = load_definition(&args.definition)?.build()?;
    let diagram = system.sample(&grid(args)?)?;

    render(&diagram, args.log).printstd();
    Ok(())
}

/// Builds a grid that includes `to` when it falls on a step.
fn grid(args: &TableArgs) -> Result<PhGrid> {
    if args.step <= 0.0 {
        return Err(CliError::Argument(format!(
            "--step must be positive, got {}",
            args.step
        )));
    }
    Ok(PhGrid::new(args.from, args.to + 0.5 * args.step, args.step)?)
}

/// Lays out one row per pH value and one column per curve.
pub fn render(diagram: &Diagram, log: bool) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);

    let mut titles = vec![Cell::new("pH")];
    titles.extend(diagram.curves.iter().map(|curve| Cell::new(&curve.label)));
    table.set_titles(Row::new(titles));

    for (row, ph) in diagram.ph.iter().enumerate() {
        let mut cells = vec![Cell::new(&format!("{ph:.2}"))];
        cells.extend(diagram.curves.iter().map(|curve| {
            let value = curve.values[row];
            let text = if log {
                format!("{:.3}", value.log10())
            } else {
                format!("{value:.3e}")
            };
            Cell::new(&text)
        }));
        table.add_row(Row::new(cells));
    }

    table
}
