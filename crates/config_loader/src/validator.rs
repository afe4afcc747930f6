//! 配置校验模块
//!
//! 校验规则：
//! - 发布端点为 tcp://host:port 形式
//! - 发送队列容量 > 0
//! - SDK 配置路径非空
//! - Mock 频率不低于 MIN_MOCK_FREQUENCY_HZ，每包点数不超过单包上限

use contracts::{ContractError, PublisherBlueprint};

/// 单个以太网包可承载的最大点数
pub const MAX_POINTS_PER_PACKET: u16 = 1440;

/// Mock 最低发包频率 (Hz)，即最长 100 s 一包
pub const MIN_MOCK_FREQUENCY_HZ: f64 = 0.01;

/// 校验 PublisherBlueprint 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(blueprint: &PublisherBlueprint) -> Result<(), ContractError> {
    validate_driver(blueprint)?;
    validate_endpoint(&blueprint.publisher.endpoint)?;
    validate_queue_capacity(blueprint)?;
    validate_mock(blueprint)?;
    Ok(())
}

/// 校验驱动配置
fn validate_driver(blueprint: &PublisherBlueprint) -> Result<(), ContractError> {
    if blueprint.driver.config_path.as_os_str().is_empty() {
        return Err(ContractError::config_validation(
            "driver.config_path",
            "config_path cannot be empty",
        ));
    }
    Ok(())
}

/// 校验发布端点格式
pub fn validate_endpoint(endpoint: &str) -> Result<(), ContractError> {
    let address = endpoint.strip_prefix("tcp://").ok_or_else(|| {
        ContractError::config_validation(
            "publisher.endpoint",
            format!("endpoint '{endpoint}' must start with tcp://"),
        )
    })?;

    let (host, port) = address.rsplit_once(':').ok_or_else(|| {
        ContractError::config_validation(
            "publisher.endpoint",
            format!("endpoint '{endpoint}' is missing a port"),
        )
    })?;

    if host.is_empty() {
        return Err(ContractError::config_validation(
            "publisher.endpoint",
            format!("endpoint '{endpoint}' is missing a host"),
        ));
    }

    port.parse::<u16>().map_err(|e| {
        ContractError::config_validation(
            "publisher.endpoint",
            format!("invalid port '{port}' in endpoint '{endpoint}': {e}"),
        )
    })?;

    Ok(())
}

/// 校验发送队列容量
fn validate_queue_capacity(blueprint: &PublisherBlueprint) -> Result<(), ContractError> {
    if blueprint.publisher.queue_capacity == 0 {
        return Err(ContractError::config_validation(
            "publisher.queue_capacity",
            "queue_capacity must be > 0",
        ));
    }
    Ok(())
}

/// 校验 Mock 参数
fn validate_mock(blueprint: &PublisherBlueprint) -> Result<(), ContractError> {
    let mock = &blueprint.mock;

    if !(mock.frequency_hz.is_finite() && mock.frequency_hz >= MIN_MOCK_FREQUENCY_HZ) {
        return Err(ContractError::config_validation(
            "mock.frequency_hz",
            format!(
                "frequency_hz must be >= {MIN_MOCK_FREQUENCY_HZ}, got {}",
                mock.frequency_hz
            ),
        ));
    }

    if mock.points_per_packet > MAX_POINTS_PER_PACKET {
        return Err(ContractError::config_validation(
            "mock.points_per_packet",
            format!(
                "points_per_packet ({}) must be <= {}",
                mock.points_per_packet, MAX_POINTS_PER_PACKET
            ),
        ));
    }

    Ok(())
}
