//! 监控编排模块
//!
//! 提供固定周期的检测循环调度功能

pub mod scheduler;

pub use scheduler::MonitorScheduler;
