//! 端点探测模块
//!
//! 提供ICMP延迟探测、端口可达性检测与健康状态分类功能

pub mod checker;
pub mod result;

pub use checker::{EndpointProber, NetworkProber};
pub use result::{classify, HealthStatus, PortCheckResult, ProbeResult};
