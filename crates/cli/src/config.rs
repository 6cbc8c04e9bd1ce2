use std::{fs, path::Path};

use log::debug;
use logph_acidbase::definition::SystemDefinition;

use crate::error::{CliError, Result};

/// Reads and parses a TOML system definition.
pub fn load_definition(path: &Path) -> Result<SystemDefinition> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let definition: SystemDefinition = toml::from_str(&text).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        "loaded {}: {} acid(s), {} spectator(s), {} auxiliary(ies), {} equation(s)",
        path.display(),
        definition.acids.len(),
        definition.spectators.len(),
        definition.auxiliaries.len(),
        definition.equations.len()
    );
    Ok(definition)
}
