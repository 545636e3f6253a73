//! Endpoint Vitals - 网络端点健康监控守护进程
//!
//! 这是一个用Rust编写的网络端点健康监控工具，支持：
//! - TCP/UDP端点的周期性可达性与延迟探测
//! - 基于延迟阈值的健康状态分类
//! - 状态记录的追加式持久化
//! - Discord状态报告的创建与原地更新
//! - 结构化日志记录

pub mod config;
pub mod error;
pub mod logging;
pub mod monitor;
pub mod probe;
pub mod report;
pub mod storage;

// 重新导出主要类型
pub use config::{Config, EndpointConfig, GlobalConfig, Protocol};
pub use error::EndpointVitalsError;
pub use monitor::MonitorScheduler;
pub use probe::{EndpointProber, HealthStatus, NetworkProber, PortCheckResult, ProbeResult};
pub use report::{StatusEntry, StatusReporter};
pub use storage::{RecordSink, StatusRecord};

/// 应用程序版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用程序名称
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// 应用程序描述
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
