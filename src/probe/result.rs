//! 探测结果数据结构
//!
//! 定义探测结果类型、端口检测结果和健康状态分类逻辑

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 健康状态枚举
///
/// 枚举顺序即严重程度排序，聚合时取最差值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// 端点正常
    Good,
    /// 端点降级
    Degraded,
    /// 端点异常
    Down,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Good => write!(f, "正常"),
            HealthStatus::Degraded => write!(f, "降级"),
            HealthStatus::Down => write!(f, "异常"),
        }
    }
}

impl HealthStatus {
    /// 获取状态对应的展示emoji
    pub fn emoji(&self) -> &'static str {
        match self {
            HealthStatus::Good => "🟢",
            HealthStatus::Degraded => "🟡",
            HealthStatus::Down => "🔴",
        }
    }

    /// 判断状态是否为健康
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Good)
    }
}

/// 端口检测结果
///
/// UDP检测没有握手环节，发送成功仅代表本端未报错，记为`Unknown`
/// 而非`Open`，避免被当作真实的握手结果使用。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortCheckResult {
    /// 端口开放（TCP握手成功）
    Open,
    /// 端口关闭或不可达
    Closed,
    /// 无法判定（UDP发送成功）
    Unknown,
}

impl PortCheckResult {
    /// 判断结果是否视为可达
    pub fn is_reachable(&self) -> bool {
        matches!(self, PortCheckResult::Open | PortCheckResult::Unknown)
    }
}

/// 单次探测结果
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    /// 端点名称
    pub endpoint_name: String,
    /// ICMP探测延迟，探测失败时为None
    pub latency: Option<Duration>,
    /// 端口检测结果
    pub port: PortCheckResult,
}

impl ProbeResult {
    /// 创建新的探测结果
    pub fn new(endpoint_name: String, latency: Option<Duration>, port: PortCheckResult) -> Self {
        Self {
            endpoint_name,
            latency,
            port,
        }
    }

    /// 创建探测完全失败的结果
    pub fn unreachable(endpoint_name: String) -> Self {
        Self::new(endpoint_name, None, PortCheckResult::Closed)
    }

    /// 判断端点是否可达
    pub fn is_reachable(&self) -> bool {
        self.port.is_reachable()
    }

    /// 获取延迟（毫秒）
    pub fn latency_ms(&self) -> Option<u64> {
        self.latency.map(|l| l.as_millis() as u64)
    }

    /// 根据延迟与可达性分类健康状态
    pub fn status(&self) -> HealthStatus {
        classify(self.latency, self.is_reachable())
    }
}

/// 将延迟与可达性映射为健康状态
///
/// 分类规则:
/// * 无延迟数据或不可达 → 异常
/// * 延迟 < 100ms → 正常
/// * 延迟 < 200ms → 降级
/// * 延迟 ≥ 200ms → 异常（与不可达同级，沿用线上阈值约定）
///
/// # 参数
/// * `latency` - ICMP探测延迟
/// * `reachable` - 端口检测是否可达
///
/// # 返回
/// * `HealthStatus` - 健康状态
pub fn classify(latency: Option<Duration>, reachable: bool) -> HealthStatus {
    let Some(latency) = latency else {
        return HealthStatus::Down;
    };

    if !reachable {
        return HealthStatus::Down;
    }

    let millis = latency.as_millis();
    if millis < 100 {
        HealthStatus::Good
    } else if millis < 200 {
        HealthStatus::Degraded
    } else {
        HealthStatus::Down
    }
}
