//! 存储模块
//!
//! 提供状态记录的数据结构与追加式写入功能

pub mod record;
pub mod sink;

pub use record::StatusRecord;
pub use sink::{HttpRecordSink, RecordSink};
