use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;

/// Custom error type for config loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config error: {source}")]
    Config {
        #[from]
        source: config::ConfigError,
    },
}

/// A reusable configuration loader combining file-based settings with
/// environment overrides.
///
/// Layers, lowest priority first:
/// 1. **Base file** (e.g. `server.toml`), optional — defaults apply when the
///    file is absent. Defaults to `"server"` in the working directory.
/// 2. **Environment overrides** prefixed with `RHUB__`; nested keys use double
///    underscores (`RHUB__SERVER__PORT` maps to `server.port`).
///
/// # Errors
/// Returns [`ConfigError`] when the file exists but is malformed, an override
/// cannot be parsed, or the merged tree does not deserialize into `T`.
///
/// # Example
/// ```rust
/// use rhub_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// #[serde(default)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path = path.map_or_else(|| PathBuf::from("server"), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(false))
        .add_source(
            Environment::with_prefix("RHUB").separator("__").convert_case(config::Case::Snake),
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder.build()?.try_deserialize::<T>()?;

    Ok(config)
}
