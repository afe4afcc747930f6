//! # lidarpub CLI
//!
//! 命令行接口入口点。
//!
//! 提供：
//! - 配置加载与验证
//! - 驱动 -> 发布端的生命周期管理
//! - Ctrl-C 关闭处理

mod cli;
mod commands;
mod error;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_publisher, run_validate};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging based on CLI options
    init_logging(&cli)?;

    info!(version = env!("CARGO_PKG_VERSION"), "lidarpub starting");

    // Execute command
    let result = match &cli.command {
        Commands::Run(args) => run_publisher(args).await,
        Commands::Validate(args) => run_validate(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Initialize logging based on CLI options
///
/// The Prometheus exporter is installed separately by `run`.
fn init_logging(cli: &Cli) -> Result<()> {
    let config = ObservabilityConfig {
        log_format: cli.log_format.into(),
        metrics_port: None,
        ..Default::default()
    }
    .with_verbosity(cli.verbose, cli.quiet);

    observability::init_with_config(config)
}
