//! 监控调度器模块
//!
//! 驱动固定周期的检测循环：并发探测全部端点，之后并行完成
//! 状态记录写入与状态报告发布

use crate::config::EndpointConfig;
use crate::probe::EndpointProber;
use crate::report::{StatusEntry, StatusReporter};
use crate::storage::{RecordSink, StatusRecord};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// 监控调度器
///
/// 每个周期保证：每个启用的端点恰好产生一条状态记录，且最多
/// 发起一次报告发布调用。组件级失败在调度边界被捕获并记录日志，
/// 检测循环不会因此终止。
pub struct MonitorScheduler {
    /// 端点探测器
    prober: Arc<dyn EndpointProber>,
    /// 状态记录写入端
    record_sink: Arc<dyn RecordSink>,
    /// 状态报告器
    reporter: StatusReporter,
    /// 启用的端点列表，启动时加载后不再变化
    endpoints: Vec<EndpointConfig>,
    /// 检测周期
    check_interval: Duration,
}

impl MonitorScheduler {
    /// 创建新的监控调度器
    ///
    /// # 参数
    /// * `prober` - 端点探测器
    /// * `record_sink` - 状态记录写入端
    /// * `reporter` - 状态报告器
    /// * `endpoints` - 端点配置列表，禁用的端点在此被过滤
    /// * `check_interval` - 检测周期
    pub fn new(
        prober: Arc<dyn EndpointProber>,
        record_sink: Arc<dyn RecordSink>,
        reporter: StatusReporter,
        endpoints: Vec<EndpointConfig>,
        check_interval: Duration,
    ) -> Self {
        let (enabled, disabled): (Vec<_>, Vec<_>) =
            endpoints.into_iter().partition(|e| e.enabled);

        for endpoint in &disabled {
            debug!("跳过已禁用的端点: {}", endpoint.name);
        }

        Self {
            prober,
            record_sink,
            reporter,
            endpoints: enabled,
            check_interval,
        }
    }

    /// 启动检测循环，永不返回
    ///
    /// 首个tick立即完成，第0个周期在启动时刻执行而非等待一个周期。
    /// 循环内等待周期执行完成后才进入下一次tick，周期耗时超过
    /// 检测间隔时只会顺延，不会产生并发的重叠周期。
    pub async fn run(mut self) {
        info!(
            "监控调度器启动，端点数量: {}, 检测周期: {}s",
            self.endpoints.len(),
            self.check_interval.as_secs()
        );

        let mut ticker = interval(self.check_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.run_cycle().await;
        }
    }

    /// 执行一个完整的检测周期
    ///
    /// 探测全部端点并等待所有结果，随后并行执行记录写入与报告发布。
    /// 本方法不返回错误，所有失败在内部记录日志后吸收。
    pub async fn run_cycle(&mut self) {
        let started = Instant::now();
        debug!("开始检测周期，端点数量: {}", self.endpoints.len());

        // 全端点并发探测，等待全部结束，端点间无顺序保证
        let probes = self
            .endpoints
            .iter()
            .map(|endpoint| self.prober.probe(endpoint));
        let results = join_all(probes).await;

        for result in &results {
            let status = result.status();
            if !status.is_healthy() {
                warn!("端点状态{}: {}", status, result.endpoint_name);
            }
        }

        let records: Vec<StatusRecord> = self
            .endpoints
            .iter()
            .zip(results.iter())
            .map(|(endpoint, result)| StatusRecord::from_probe(endpoint, result))
            .collect();
        let entries: Vec<StatusEntry> = results.iter().map(StatusEntry::from_probe).collect();

        let record_sink = Arc::clone(&self.record_sink);
        let record_all = async {
            // 各端点写入相互独立，单条失败不影响其余写入
            let writes = records.iter().map(|record| {
                let sink = Arc::clone(&record_sink);
                async move {
                    if let Err(e) = sink.insert(record).await {
                        error!("写入状态记录失败 {}: {}", record.name, e);
                    }
                }
            });
            join_all(writes).await;
        };

        let reporter = &mut self.reporter;
        let publish = async {
            if let Err(e) = reporter.publish(&entries).await {
                error!("发布状态报告失败: {}", e);
            }
        };

        // 记录写入与报告发布并行，互不阻塞
        tokio::join!(record_all, publish);

        info!(
            "检测周期完成: {} 个端点, 耗时 {:.2}s",
            self.endpoints.len(),
            started.elapsed().as_secs_f64()
        );
    }

    /// 获取启用的端点数量
    pub fn endpoint_count(&self) -> usize {
        self.endpoints.len()
    }
}
