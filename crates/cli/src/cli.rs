//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use contracts::{DriverKind, PublisherKind};
use std::path::PathBuf;

/// lidarpub - LiDAR point-cloud publisher
#[derive(Parser, Debug)]
#[command(
    name = "lidarpub",
    author,
    version,
    about = "Publish LiDAR point clouds over ZeroMQ",
    long_about = "Receives point-cloud packets from a LiDAR driver, encodes each packet as a \n\
                  protobuf PointFrame and broadcasts it on a ZeroMQ PUB socket."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "LIDARPUB_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "LIDARPUB_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the publisher until interrupted
    Run(RunArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON); defaults are used when omitted
    #[arg(short, long, env = "LIDARPUB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override driver kind from configuration
    #[arg(long, value_enum, env = "LIDARPUB_DRIVER")]
    pub driver: Option<DriverArg>,

    /// Override the driver SDK configuration file
    #[arg(long, env = "LIDARPUB_SDK_CONFIG")]
    pub sdk_config: Option<PathBuf>,

    /// Override publisher kind from configuration
    #[arg(long, value_enum, env = "LIDARPUB_PUBLISHER")]
    pub publisher: Option<PublisherArg>,

    /// Override publish endpoint, e.g. tcp://0.0.0.0:8200
    #[arg(long, env = "LIDARPUB_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Override publish queue capacity
    #[arg(long, env = "LIDARPUB_QUEUE_CAPACITY")]
    pub queue_capacity: Option<usize>,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "LIDARPUB_METRICS_PORT")]
    pub metrics_port: u16,

    /// Resolve and print configuration, then exit without running
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "lidarpub.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Driver selection
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverArg {
    /// Livox SDK2 (requires the livox-sdk feature)
    Livox,
    /// Simulated device
    Mock,
}

impl From<DriverArg> for DriverKind {
    fn from(arg: DriverArg) -> Self {
        match arg {
            DriverArg::Livox => DriverKind::Livox,
            DriverArg::Mock => DriverKind::Mock,
        }
    }
}

/// Publisher selection
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PublisherArg {
    /// ZeroMQ PUB socket
    Zmq,
    /// Log message sizes only
    Log,
}

impl From<PublisherArg> for PublisherKind {
    fn from(arg: PublisherArg) -> Self {
        match arg {
            PublisherArg::Zmq => PublisherKind::Zmq,
            PublisherArg::Log => PublisherKind::Log,
        }
    }
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => observability::LogFormat::Json,
            LogFormat::Pretty => observability::LogFormat::Pretty,
            LogFormat::Compact => observability::LogFormat::Compact,
        }
    }
}
