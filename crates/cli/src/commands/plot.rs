use log::info;
use logph_acidbase::PhGrid;
use logph_plot::{DiagramView, ShowConfig};

use crate::cli::PlotArgs;
use crate::config::load_definition;
use crate::error::Result;

pub fn run(args: &PlotArgs) -> Result<()> {
    let system = load_definition(&args.definition)?.build()?;
    let diagram = system.sample(&PhGrid::new(args.ph_min, args.ph_max, args.step)?)?;
    info!(
        "sampled {} curve(s) at {} pH value(s)",
        diagram.curves.len(),
        diagram.ph.len()
    );

    DiagramView::new(diagram).show(show_config(args))?;
    Ok(())
}

fn show_config(args: &PlotArgs) -> ShowConfig {
    let title = args.title.clone().unwrap_or_else(|| {
        args.definition
            .file_stem()
            .map_or_else(|| "logph".to_owned(), |stem| stem.to_string_lossy().into_owned())
    });

    let config = ShowConfig::new()
        .title(title)
        .concentration_range(args.c_min, args.c_max)
        .ph_range(args.ph_min, args.ph_max);

    if args.legend { config.legend() } else { config }
}
