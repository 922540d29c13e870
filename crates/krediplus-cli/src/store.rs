use std::fs;
use std::path::Path;

use krediplus_core::simulator::ConfigRegistry;

#[derive(Debug, Clone, Copy, PartialEq)]
enum StoreFormat {
    Yaml,
    Json,
}

fn format_of(path: &Path) -> StoreFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => StoreFormat::Yaml,
        _ => StoreFormat::Json,
    }
}

/// Load the configuration registry. No path, or a path that does not exist
/// yet, yields the stock registry with one active default configuration.
pub fn load_registry(path: Option<&str>) -> Result<ConfigRegistry, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        log::debug!("no store given; using the stock simulator configuration");
        return Ok(ConfigRegistry::with_default());
    };

    let p = Path::new(path);
    if !p.exists() {
        log::info!("store '{}' not found; starting from the stock configuration", p.display());
        return Ok(ConfigRegistry::with_default());
    }
    if !p.is_file() {
        return Err(format!("Not a file: {}", p.display()).into());
    }

    let contents = fs::read_to_string(p)
        .map_err(|e| format!("Failed to read '{}': {}", p.display(), e))?;
    let registry: ConfigRegistry = match format_of(p) {
        StoreFormat::Yaml => serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", p.display(), e))?,
        StoreFormat::Json => serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", p.display(), e))?,
    };
    log::debug!("loaded {} simulator config(s) from '{}'", registry.list().len(), p.display());
    Ok(registry)
}

/// Persist the registry. Without a path the change only lives for this run.
pub fn save_registry(path: Option<&str>, registry: &ConfigRegistry) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = path else {
        log::warn!("no --store given; configuration changes are not persisted");
        return Ok(());
    };

    let p = Path::new(path);
    let contents = match format_of(p) {
        StoreFormat::Yaml => serde_yaml::to_string(registry)?,
        StoreFormat::Json => serde_json::to_string_pretty(registry)?,
    };
    fs::write(p, contents).map_err(|e| format!("Failed to write '{}': {}", p.display(), e))?;
    log::info!("saved {} simulator config(s) to '{}'", registry.list().len(), p.display());
    Ok(())
}
