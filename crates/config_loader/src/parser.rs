//! 发布器配置文件解析
//!
//! `lidarpub.toml` 为主格式；同一份 `PublisherBlueprint` 也可写成 JSON，
//! 便于由部署脚本生成。格式只由扩展名决定，不做内容嗅探。

use std::path::Path;

use contracts::{ContractError, PublisherBlueprint};

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// 扩展名 (大小写不敏感) -> 格式
    pub fn from_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }

    /// 由配置文件路径确定格式
    pub fn from_path(path: &Path) -> Result<Self, ContractError> {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return Err(ContractError::config_parse(format!(
                "'{}' has no .toml/.json extension",
                path.display()
            )));
        };
        Self::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    /// 解析为 `PublisherBlueprint` (未校验)
    pub fn parse(self, content: &str) -> Result<PublisherBlueprint, ContractError> {
        match self {
            Self::Toml => parse_toml(content),
            Self::Json => parse_json(content),
        }
    }
}

fn parse_toml(content: &str) -> Result<PublisherBlueprint, ContractError> {
    toml::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("invalid lidarpub TOML: {e}"),
        source: Some(Box::new(e)),
    })
}

fn parse_json(content: &str) -> Result<PublisherBlueprint, ContractError> {
    serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("invalid lidarpub JSON: {e}"),
        source: Some(Box::new(e)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{DriverKind, PointEncoding};

    #[test]
    fn test_parse_toml_full() {
        let content = r#"
[driver]
kind = "mock"
config_path = "/etc/lidarpub/mid360.json"

[publisher]
endpoint = "tcp://0.0.0.0:9100"
queue_capacity = 8

[mock]
frequency_hz = 20.0
points_per_packet = 32
default_encoding = "cartesian_low"
"#;
        let result = parse_toml(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let bp = result.unwrap();
        assert_eq!(bp.driver.kind, DriverKind::Mock);
        assert_eq!(bp.publisher.endpoint, "tcp://0.0.0.0:9100");
        assert_eq!(bp.publisher.queue_capacity, 8);
        assert_eq!(bp.mock.points_per_packet, 32);
        assert_eq!(bp.mock.default_encoding, PointEncoding::CartesianLow);
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{ "publisher": { "endpoint": "tcp://127.0.0.1:8200" } }"#;
        let result = parse_json(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        assert_eq!(result.unwrap().driver.kind, DriverKind::Livox);
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let content = "invalid toml [[[";
        let result = parse_toml(content);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ContractError::ConfigParse { .. }));
    }

    #[test]
    fn test_parse_unknown_driver_kind() {
        let content = r#"
[driver]
kind = "velodyne"
"#;
        assert!(parse_toml(content).is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("/etc/lidarpub/lidarpub.json")).unwrap(),
            ConfigFormat::Json
        );
        let err = ConfigFormat::from_path(Path::new("lidarpub")).unwrap_err();
        assert!(err.to_string().contains("no .toml/.json extension"));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_extension("toml"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("TOML"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("json"),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}
