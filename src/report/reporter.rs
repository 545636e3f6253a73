//! 状态报告器实现
//!
//! 聚合各端点状态、渲染报告内容，并维护已发布报告的ID：
//! 首次发布创建新报告，之后的周期对同一报告做原地更新

use crate::error::PublishError;
use crate::probe::{HealthStatus, ProbeResult};
use crate::report::sink::{ReportField, ReportPayload, ReportSink};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// 报告标题
const REPORT_TITLE: &str = "📡 服务状态监控";

/// 单个端点在报告中的展示条目
#[derive(Debug, Clone, PartialEq)]
pub struct StatusEntry {
    /// 端点名称
    pub name: String,
    /// 健康状态
    pub status: HealthStatus,
    /// 探测延迟（毫秒）
    pub latency_ms: Option<u64>,
}

impl StatusEntry {
    /// 从探测结果构建展示条目
    pub fn from_probe(result: &ProbeResult) -> Self {
        Self {
            name: result.endpoint_name.clone(),
            status: result.status(),
            latency_ms: result.latency_ms(),
        }
    }
}

/// 状态报告器
///
/// 报告ID是进程级可变状态：启动时为空，首次发布成功后保存，
/// 之后所有周期复用同一ID做更新。仅进程重启会重置，重启后
/// 总是创建新报告而非续写旧报告。
pub struct StatusReporter {
    /// 报告发布端
    sink: Arc<dyn ReportSink>,
    /// 检测周期，用于计算下次更新时间
    interval: Duration,
    /// 最近一次发布成功的报告ID
    report_id: Option<String>,
}

impl StatusReporter {
    /// 创建新的状态报告器
    ///
    /// # 参数
    /// * `sink` - 报告发布端
    /// * `interval` - 检测周期
    pub fn new(sink: Arc<dyn ReportSink>, interval: Duration) -> Self {
        Self {
            sink,
            interval,
            report_id: None,
        }
    }

    /// 计算整体状态：任一异常则异常，否则任一降级则降级，否则正常
    pub fn overall_status(entries: &[StatusEntry]) -> HealthStatus {
        entries
            .iter()
            .map(|e| e.status)
            .max()
            .unwrap_or(HealthStatus::Good)
    }

    /// 获取当前持有的报告ID
    pub fn report_id(&self) -> Option<&str> {
        self.report_id.as_deref()
    }

    /// 渲染报告载荷
    fn render(&self, entries: &[StatusEntry]) -> ReportPayload {
        let overall = Self::overall_status(entries);
        let now = Utc::now();
        let next_update =
            now + chrono::Duration::from_std(self.interval).unwrap_or_else(|_| chrono::Duration::zero());

        let summary = format!(
            "{} 整体状态: {}\n最近更新: {}\n下次更新: {}",
            overall.emoji(),
            overall,
            now.format("%Y-%m-%d %H:%M:%S UTC"),
            next_update.format("%Y-%m-%d %H:%M:%S UTC"),
        );

        let fields = entries
            .iter()
            .map(|entry| {
                let latency = entry
                    .latency_ms
                    .map(|ms| format!("{ms}ms"))
                    .unwrap_or_else(|| "N/A".to_string());
                ReportField {
                    label: entry.name.clone(),
                    value: format!("{} {} · {}", entry.status.emoji(), entry.status, latency),
                    inline: true,
                }
            })
            .collect();

        let color = match overall {
            HealthStatus::Good => 0x2ECC71,
            HealthStatus::Degraded => 0xF1C40F,
            HealthStatus::Down => 0xE74C3C,
        };

        ReportPayload {
            title: REPORT_TITLE.to_string(),
            summary,
            color,
            fields,
        }
    }

    /// 发布一次状态报告
    ///
    /// 无已知报告ID时创建新报告并保存返回的ID，否则对同一报告做
    /// 原地更新。发布失败时已保存的ID保持不变，下个周期以最后一次
    /// 成功的ID状态重试。
    ///
    /// # 参数
    /// * `entries` - 按配置顺序排列的端点状态条目
    ///
    /// # 返回
    /// * `Result<(), PublishError>` - 发布结果
    pub async fn publish(&mut self, entries: &[StatusEntry]) -> Result<(), PublishError> {
        let payload = self.render(entries);

        match &self.report_id {
            Some(id) => {
                debug!("更新状态报告: {}", id);
                self.sink.update(id, &payload).await?;
            }
            None => {
                let id = self.sink.create(&payload).await?;
                info!("已创建状态报告: {}", id);
                self.report_id = Some(id);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 记录调用序列的测试发布端
    #[derive(Default)]
    struct RecordingSink {
        creates: Mutex<Vec<ReportPayload>>,
        updates: Mutex<Vec<(String, ReportPayload)>>,
        fail_create: bool,
        fail_update: bool,
    }

    #[async_trait]
    impl ReportSink for RecordingSink {
        async fn create(&self, payload: &ReportPayload) -> Result<String, PublishError> {
            if self.fail_create {
                return Err(PublishError::Rejected {
                    status: 500,
                    message: "create失败".to_string(),
                });
            }
            self.creates.lock().unwrap().push(payload.clone());
            Ok("report-1".to_string())
        }

        async fn update(
            &self,
            report_id: &str,
            payload: &ReportPayload,
        ) -> Result<(), PublishError> {
            if self.fail_update {
                return Err(PublishError::Rejected {
                    status: 500,
                    message: "update失败".to_string(),
                });
            }
            self.updates
                .lock()
                .unwrap()
                .push((report_id.to_string(), payload.clone()));
            Ok(())
        }
    }

    fn entry(name: &str, status: HealthStatus, latency_ms: Option<u64>) -> StatusEntry {
        StatusEntry {
            name: name.to_string(),
            status,
            latency_ms,
        }
    }

    #[test]
    fn test_overall_status_worst_of() {
        use HealthStatus::*;

        let mixed = vec![entry("a", Good, Some(10)), entry("b", Degraded, Some(150))];
        assert_eq!(StatusReporter::overall_status(&mixed), Degraded);

        let with_down = vec![entry("a", Good, Some(10)), entry("b", Down, None)];
        assert_eq!(StatusReporter::overall_status(&with_down), Down);

        let all_good = vec![entry("a", Good, Some(10)), entry("b", Good, Some(20))];
        assert_eq!(StatusReporter::overall_status(&all_good), Good);

        assert_eq!(StatusReporter::overall_status(&[]), Good);
    }

    #[tokio::test]
    async fn test_publish_is_idempotent() {
        let sink = Arc::new(RecordingSink::default());
        let mut reporter = StatusReporter::new(sink.clone(), Duration::from_secs(30));
        let entries = vec![entry("网关", HealthStatus::Good, Some(12))];

        // N次发布 = 1次create + N-1次update，且指向同一ID
        for _ in 0..5 {
            reporter.publish(&entries).await.unwrap();
        }

        assert_eq!(sink.creates.lock().unwrap().len(), 1);
        let updates = sink.updates.lock().unwrap();
        assert_eq!(updates.len(), 4);
        assert!(updates.iter().all(|(id, _)| id == "report-1"));
        assert_eq!(reporter.report_id(), Some("report-1"));
    }

    #[tokio::test]
    async fn test_create_failure_keeps_handle_unset() {
        let sink = Arc::new(RecordingSink {
            fail_create: true,
            ..Default::default()
        });
        let mut reporter = StatusReporter::new(sink, Duration::from_secs(30));

        let result = reporter
            .publish(&[entry("网关", HealthStatus::Good, Some(12))])
            .await;

        assert!(result.is_err());
        assert_eq!(reporter.report_id(), None);
    }

    #[tokio::test]
    async fn test_update_failure_keeps_handle() {
        let sink = Arc::new(RecordingSink::default());
        let mut reporter = StatusReporter::new(sink.clone(), Duration::from_secs(30));
        let entries = vec![entry("网关", HealthStatus::Good, Some(12))];

        reporter.publish(&entries).await.unwrap();
        assert_eq!(reporter.report_id(), Some("report-1"));

        // 后续更新失败，已保存的ID不变，下个周期继续用它重试
        let failing = Arc::new(RecordingSink {
            fail_update: true,
            ..Default::default()
        });
        reporter.sink = failing;
        assert!(reporter.publish(&entries).await.is_err());
        assert_eq!(reporter.report_id(), Some("report-1"));
    }

    #[tokio::test]
    async fn test_render_summary_and_fields() {
        let sink = Arc::new(RecordingSink::default());
        let mut reporter = StatusReporter::new(sink.clone(), Duration::from_secs(30));

        reporter
            .publish(&[
                entry("网关", HealthStatus::Good, Some(12)),
                entry("DNS", HealthStatus::Down, None),
            ])
            .await
            .unwrap();

        let creates = sink.creates.lock().unwrap();
        let payload = &creates[0];

        assert!(payload.summary.contains("🔴 整体状态: 异常"));
        assert!(payload.summary.contains("最近更新"));
        assert!(payload.summary.contains("下次更新"));
        assert_eq!(payload.color, 0xE74C3C);

        assert_eq!(payload.fields.len(), 2);
        assert_eq!(payload.fields[0].label, "网关");
        assert!(payload.fields[0].value.contains("12ms"));
        assert_eq!(payload.fields[1].label, "DNS");
        assert!(payload.fields[1].value.contains("N/A"));
    }

    #[test]
    fn test_entry_from_probe() {
        use crate::probe::{PortCheckResult, ProbeResult};

        let result = ProbeResult::new(
            "web".to_string(),
            Some(Duration::from_millis(80)),
            PortCheckResult::Open,
        );
        let entry = StatusEntry::from_probe(&result);

        assert_eq!(entry.name, "web");
        assert_eq!(entry.status, HealthStatus::Good);
        assert_eq!(entry.latency_ms, Some(80));
    }
}
