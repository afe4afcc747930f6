//! # Lifecycle
//!
//! 进程级启动/关闭时序。
//!
//! Uninitialized -> Running -> Draining -> Stopped
//!
//! - 初始化驱动 (失败即致命，先清理再返回)
//! - 注册事件回调并启动驱动
//! - 阻塞等待关闭信号
//! - 拆除驱动

mod controller;
mod error;
mod shutdown;

pub use controller::{LifecycleController, LifecycleState};
pub use error::{LifecycleError, Result};
pub use shutdown::ShutdownSignal;
