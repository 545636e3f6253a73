//! 报告发布trait与载荷结构
//!
//! 定义状态报告的抽象发布接口，核心只依赖create/update的区分
//! 与create返回的不透明报告ID

use crate::error::PublishError;
use async_trait::async_trait;
use serde::Serialize;

/// 状态报告载荷
///
/// 由摘要区与逐端点明细区组成的结构化文档。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportPayload {
    /// 报告标题
    pub title: String,
    /// 摘要内容（整体状态与更新时间）
    pub summary: String,
    /// 展示颜色（随整体状态变化）
    pub color: u32,
    /// 逐端点明细字段
    pub fields: Vec<ReportField>,
}

/// 报告明细字段
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportField {
    /// 字段标签（端点名称）
    pub label: String,
    /// 字段内容（状态与延迟）
    pub value: String,
    /// 是否行内展示
    pub inline: bool,
}

/// 报告发布trait
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// 创建新报告
    ///
    /// # 参数
    /// * `payload` - 报告载荷
    ///
    /// # 返回
    /// * `Result<String, PublishError>` - 新报告的不透明ID
    async fn create(&self, payload: &ReportPayload) -> Result<String, PublishError>;

    /// 原地更新已有报告
    ///
    /// # 参数
    /// * `report_id` - 报告ID
    /// * `payload` - 报告载荷
    ///
    /// # 返回
    /// * `Result<(), PublishError>` - 更新结果
    async fn update(&self, report_id: &str, payload: &ReportPayload) -> Result<(), PublishError>;
}
