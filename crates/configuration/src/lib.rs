use crate::error::ConfigError;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{DatabaseSettings, LoggingSettings, Settings, TableSettings};

/// The environment variable prefix, e.g. `LIFTBOARD__TABLE__DEFAULT_PAGE_SIZE=500`.
pub const ENV_PREFIX: &str = "LIFTBOARD";

/// Loads the application configuration.
///
/// Reads `path` if given (it must exist), otherwise an optional `config.toml` in the
/// working directory, then overlays `LIFTBOARD__*` environment variables. The result
/// is deserialized into `Settings` and validated.
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name("config").required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(environment());

    build(builder)
}

/// `LIFTBOARD__<SECTION>__<KEY>` variables, parsed as numbers where they look like one.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn build(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    let settings = builder.build()?.try_deserialize::<Settings>()?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use core_types::PageSize;
    use std::path::PathBuf;

    fn from_toml(toml: &str) -> Result<Settings, ConfigError> {
        build(config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn empty_file_uses_defaults() {
        let settings = from_toml("").unwrap();
        assert_eq!(settings.table.default_page_size, PageSize::Hundred);
        assert_eq!(settings.table.default_name_filter, "");
        assert_eq!(settings.database.max_connections, 10);
        assert_eq!(settings.database.acquire_timeout().as_secs(), 5);
        assert_eq!(settings.logging.level, "info");
        assert!(settings.logging.directory.is_none());
    }

    #[test]
    fn sections_override_defaults() {
        let settings = from_toml(
            r#"
            [table]
            default_page_size = 500
            default_name_filter = "Jane Doe"

            [logging]
            level = "engine=debug,info"
            directory = "logs"
            "#,
        )
        .unwrap();

        let params = settings.table.initial_parameters();
        assert_eq!(params.page_size(), PageSize::FiveHundred);
        assert_eq!(params.name(), Some("Jane Doe"));
        assert_eq!(settings.logging.directory, Some(PathBuf::from("logs")));
        assert_eq!(settings.logging.file_prefix, "liftboard.log");
    }

    #[test]
    fn unknown_page_size_is_rejected() {
        let err = from_toml("[table]\ndefault_page_size = 250\n").unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    fn from_toml_and_env(toml: &str, vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        build(
            config::Config::builder()
                .add_source(File::from_str(toml, FileFormat::Toml))
                .add_source(environment().source(Some(vars))),
        )
    }

    #[test]
    fn environment_overrides_the_file() {
        let settings = from_toml_and_env(
            "[table]\ndefault_page_size = 50\n",
            &[
                ("LIFTBOARD__TABLE__DEFAULT_PAGE_SIZE", "500"),
                ("LIFTBOARD__DATABASE__MAX_CONNECTIONS", "3"),
            ],
        )
        .unwrap();
        assert_eq!(settings.table.default_page_size, PageSize::FiveHundred);
        assert_eq!(settings.database.max_connections, 3);
    }

    #[test]
    fn environment_page_size_is_validated() {
        let err = from_toml_and_env("", &[("LIFTBOARD__TABLE__DEFAULT_PAGE_SIZE", "250")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn zero_connections_fail_validation() {
        let err = from_toml("[database]\nmax_connections = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_config(Some(Path::new("does-not-exist.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }
}
