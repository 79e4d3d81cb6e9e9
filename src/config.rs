//! Run-configuration loading for host drivers.

use crate::LpaParams;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Engine section of a driver's run configuration.
#[derive(Clone, Default, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub params: LpaParams,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: RuntimeConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}
