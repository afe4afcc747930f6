//! PublisherBlueprint - Config Loader 输出
//!
//! 描述完整的运行配置：驱动、发布端点、Mock 参数。
//! 所有字段均有默认值，配置文件可省略。

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::PointEncoding;

/// 默认发布端点 (全网卡监听)
pub const DEFAULT_ENDPOINT: &str = "tcp://0.0.0.0:8200";

/// 配置版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// 完整的运行配置蓝图
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublisherBlueprint {
    /// 配置版本
    #[serde(default)]
    pub version: ConfigVersion,

    /// 驱动设置
    #[serde(default)]
    pub driver: DriverConfig,

    /// 发布端设置
    #[serde(default)]
    pub publisher: PublishConfig,

    /// Mock 驱动参数 (仅 kind = "mock" 时使用)
    #[serde(default)]
    pub mock: MockDriverSettings,
}

/// 驱动类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverKind {
    /// Livox SDK2 硬件驱动
    #[default]
    Livox,
    /// 模拟驱动 (无需硬件)
    Mock,
}

/// 驱动配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    /// 驱动类型
    #[serde(default)]
    pub kind: DriverKind,

    /// SDK 配置文件路径 (格式由驱动决定)
    #[serde(default = "default_sdk_config")]
    pub config_path: PathBuf,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            kind: DriverKind::default(),
            config_path: default_sdk_config(),
        }
    }
}

fn default_sdk_config() -> PathBuf {
    PathBuf::from("config.json")
}

/// 发布端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublisherKind {
    /// ZeroMQ PUB socket
    #[default]
    Zmq,
    /// 仅记录消息大小 (调试)
    Log,
}

/// 发布端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    /// 发布端类型
    #[serde(default)]
    pub kind: PublisherKind,

    /// ZeroMQ 端点
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// 发送队列容量，满时丢弃新消息
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            kind: PublisherKind::default(),
            endpoint: default_endpoint(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_queue_capacity() -> usize {
    64
}

/// Mock 驱动参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockDriverSettings {
    /// 发包频率 (Hz)，必须 > 0
    #[serde(default = "default_mock_frequency")]
    pub frequency_hz: f64,

    /// 每包点数
    #[serde(default = "default_points_per_packet")]
    pub points_per_packet: u16,

    /// 设备出厂编码 (收到配置命令前使用)
    #[serde(default = "default_mock_encoding")]
    pub default_encoding: PointEncoding,
}

impl Default for MockDriverSettings {
    fn default() -> Self {
        Self {
            frequency_hz: default_mock_frequency(),
            points_per_packet: default_points_per_packet(),
            default_encoding: default_mock_encoding(),
        }
    }
}

fn default_mock_frequency() -> f64 {
    10.0
}

fn default_points_per_packet() -> u16 {
    96
}

fn default_mock_encoding() -> PointEncoding {
    PointEncoding::CartesianHigh
}
