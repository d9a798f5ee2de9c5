use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Load a JSON configuration file.
pub fn load_json_config<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: T = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

/// Parse whitespace- or comma-separated numbers.
pub fn parse_values<S: AsRef<str>>(raw: &[S]) -> Result<Vec<f64>> {
    raw.iter()
        .flat_map(|s| {
            s.as_ref()
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
        .map(|t| {
            t.parse::<f64>()
                .with_context(|| format!("Not a number: {}", t))
        })
        .collect()
}
