//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::{DriverKind, PublisherBlueprint, PublisherKind};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    driver: String,
    sdk_config: String,
    publisher: String,
    endpoint: String,
    queue_capacity: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    // Check file exists
    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    version: format!("{:?}", blueprint.version),
                    driver: format!("{:?}", blueprint.driver.kind),
                    sdk_config: blueprint.driver.config_path.display().to_string(),
                    publisher: format!("{:?}", blueprint.publisher.kind),
                    endpoint: blueprint.publisher.endpoint.clone(),
                    queue_capacity: blueprint.publisher.queue_capacity,
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &PublisherBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    if blueprint.driver.kind == DriverKind::Livox {
        if cfg!(not(feature = "livox-sdk")) {
            warnings.push(
                "driver.kind = \"livox\" but this build lacks the livox-sdk feature".to_string(),
            );
        }
        if !blueprint.driver.config_path.exists() {
            warnings.push(format!(
                "SDK config '{}' does not exist",
                blueprint.driver.config_path.display()
            ));
        }
    }

    if blueprint.driver.kind == DriverKind::Mock && blueprint.mock.points_per_packet == 0 {
        warnings.push("mock.points_per_packet is 0 - every frame will be empty".to_string());
    }

    if blueprint.publisher.kind == PublisherKind::Log {
        warnings.push("publisher.kind = \"log\" - frames are not sent to subscribers".to_string());
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Driver: {} ({})", summary.driver, summary.sdk_config);
            println!("  Publisher: {}", summary.publisher);
            println!("  Endpoint: {}", summary.endpoint);
            println!("  Queue capacity: {}", summary.queue_capacity);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_valid_mock_config() {
        let file = write_config("[driver]\nkind = \"mock\"\n");
        let result = validate_config(&ValidateArgs {
            config: file.path().to_path_buf(),
            json: true,
        });

        assert!(result.valid);
        let summary = result.summary.unwrap();
        assert_eq!(summary.driver, "Mock");
        assert_eq!(summary.endpoint, "tcp://0.0.0.0:8200");
    }

    #[test]
    fn test_invalid_endpoint_reported() {
        let file = write_config("[publisher]\nendpoint = \"tcp://nohost\"\n");
        let result = validate_config(&ValidateArgs {
            config: file.path().to_path_buf(),
            json: false,
        });

        assert!(!result.valid);
        assert!(result.error.unwrap().contains("publisher.endpoint"));
    }

    #[test]
    fn test_missing_file() {
        let result = validate_config(&ValidateArgs {
            config: "nope/lidarpub.toml".into(),
            json: false,
        });
        assert!(!result.valid);
        assert!(run_validate(&ValidateArgs {
            config: "nope/lidarpub.toml".into(),
            json: true,
        })
        .is_err());
    }

    #[test]
    fn test_log_publisher_warns() {
        let mut blueprint = PublisherBlueprint::default();
        blueprint.driver.kind = DriverKind::Mock;
        blueprint.publisher.kind = PublisherKind::Log;

        let warnings = collect_warnings(&blueprint);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("log"));
    }
}
