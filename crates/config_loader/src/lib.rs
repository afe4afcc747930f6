//! # Config Loader
//!
//! Loads the `lidarpub` application config (`PublisherBlueprint`): which
//! driver to start and with which SDK file, where to publish frames, and the
//! mock device settings. The SDK's own JSON config stays opaque and is only
//! passed through by path.
//!
//! Every field has a default, so running without a file is valid.
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let blueprint = ConfigLoader::load_from_path(Path::new("lidarpub.toml")).unwrap();
//! println!("Endpoint: {}", blueprint.publisher.endpoint);
//! ```

mod parser;
mod validator;

pub use contracts::PublisherBlueprint;
pub use parser::ConfigFormat;
pub use validator::{validate, validate_endpoint, MAX_POINTS_PER_PACKET, MIN_MOCK_FREQUENCY_HZ};

use contracts::ContractError;
use std::path::Path;

/// Loads and validates `PublisherBlueprint`s
pub struct ConfigLoader;

impl ConfigLoader {
    /// Read, parse and validate a `.toml` or `.json` file
    pub fn load_from_path(path: &Path) -> Result<PublisherBlueprint, ContractError> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content, format)
    }

    /// `load_from_path`, or validated defaults when no file was given
    pub fn load_or_default(path: Option<&Path>) -> Result<PublisherBlueprint, ContractError> {
        let Some(path) = path else {
            let blueprint = PublisherBlueprint::default();
            validate(&blueprint)?;
            return Ok(blueprint);
        };
        Self::load_from_path(path)
    }

    /// Parse and validate in-memory content
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<PublisherBlueprint, ContractError> {
        let blueprint = format.parse(content)?;
        validate(&blueprint)?;
        Ok(blueprint)
    }

    /// Render as TOML (`lidarpub validate` output, config templates)
    pub fn to_toml(blueprint: &PublisherBlueprint) -> Result<String, ContractError> {
        toml::to_string_pretty(blueprint)
            .map_err(|e| ContractError::config_parse(format!("cannot render TOML: {e}")))
    }

    /// Render as JSON
    pub fn to_json(blueprint: &PublisherBlueprint) -> Result<String, ContractError> {
        serde_json::to_string_pretty(blueprint)
            .map_err(|e| ContractError::config_parse(format!("cannot render JSON: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::DriverKind;
    use std::io::Write;

    const MINIMAL_TOML: &str = r#"
[driver]
kind = "mock"

[publisher]
endpoint = "tcp://0.0.0.0:8200"
"#;

    #[test]
    fn test_load_from_str_toml() {
        let result = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let bp = result.unwrap();
        assert_eq!(bp.driver.kind, DriverKind::Mock);
    }

    #[test]
    fn test_round_trip_toml() {
        let bp = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let serialized = ConfigLoader::to_toml(&bp).unwrap();
        let bp2 = ConfigLoader::load_from_str(&serialized, ConfigFormat::Toml).unwrap();
        assert_eq!(bp.driver.kind, bp2.driver.kind);
        assert_eq!(bp.publisher.endpoint, bp2.publisher.endpoint);
        assert_eq!(bp.mock.points_per_packet, bp2.mock.points_per_packet);
    }

    #[test]
    fn test_round_trip_json() {
        let bp = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let json = ConfigLoader::to_json(&bp).unwrap();
        let bp2 = ConfigLoader::load_from_str(&json, ConfigFormat::Json).unwrap();
        assert_eq!(bp.publisher.endpoint, bp2.publisher.endpoint);
    }

    #[test]
    fn test_validation_runs_after_parse() {
        let content = r#"
[publisher]
endpoint = "0.0.0.0:8200"
"#;
        let result = ConfigLoader::load_from_str(content, ConfigFormat::Toml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("tcp://"));
    }

    #[test]
    fn test_load_from_path_detects_format() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(MINIMAL_TOML.as_bytes()).unwrap();

        let bp = ConfigLoader::load_from_path(file.path()).unwrap();
        assert_eq!(bp.driver.kind, DriverKind::Mock);
    }

    #[test]
    fn test_load_from_path_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let err = ConfigLoader::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("unsupported config format"));
    }

    #[test]
    fn test_load_or_default_without_path() {
        let bp = ConfigLoader::load_or_default(None).unwrap();
        assert_eq!(bp.publisher.endpoint, contracts::DEFAULT_ENDPOINT);
    }
}
