//! 状态报告模块
//!
//! 提供状态聚合、报告渲染与外部通知端发布功能

pub mod discord;
pub mod reporter;
pub mod sink;

pub use discord::DiscordSink;
pub use reporter::{StatusEntry, StatusReporter};
pub use sink::{ReportField, ReportPayload, ReportSink};
