//! 状态记录数据结构
//!
//! 定义写入存储端的追加式状态记录

use crate::config::{EndpointConfig, Protocol};
use crate::probe::{HealthStatus, ProbeResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 单条状态记录
///
/// 每个检测周期、每个端点各产生一条，只追加，不更新不删除。
/// 行ID与入库时间戳由存储端生成。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// 端点名称
    pub name: String,
    /// 目标地址
    pub address: String,
    /// 目标端口
    pub port: u16,
    /// 传输协议
    pub protocol: Protocol,
    /// 健康状态
    pub status: HealthStatus,
    /// 探测延迟（毫秒），探测失败时为None
    pub latency_ms: Option<u64>,
    /// 探测时间戳
    pub timestamp: DateTime<Utc>,
}

impl StatusRecord {
    /// 根据端点配置与探测结果构建状态记录
    ///
    /// # 参数
    /// * `endpoint` - 端点配置
    /// * `result` - 探测结果
    ///
    /// # 返回
    /// * `Self` - 状态记录实例
    pub fn from_probe(endpoint: &EndpointConfig, result: &ProbeResult) -> Self {
        Self {
            name: endpoint.name.clone(),
            address: endpoint.address.clone(),
            port: endpoint.port,
            protocol: endpoint.protocol,
            status: result.status(),
            latency_ms: result.latency_ms(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::PortCheckResult;
    use std::time::Duration;

    fn test_endpoint() -> EndpointConfig {
        EndpointConfig {
            name: "网关".to_string(),
            address: "192.168.1.1".to_string(),
            port: 443,
            protocol: Protocol::Tcp,
            enabled: true,
        }
    }

    #[test]
    fn test_record_from_healthy_probe() {
        let endpoint = test_endpoint();
        let result = ProbeResult::new(
            endpoint.name.clone(),
            Some(Duration::from_millis(42)),
            PortCheckResult::Open,
        );

        let record = StatusRecord::from_probe(&endpoint, &result);
        assert_eq!(record.name, "网关");
        assert_eq!(record.port, 443);
        assert_eq!(record.status, HealthStatus::Good);
        assert_eq!(record.latency_ms, Some(42));
    }

    #[test]
    fn test_record_from_failed_probe() {
        let endpoint = test_endpoint();
        let result = ProbeResult::unreachable(endpoint.name.clone());

        let record = StatusRecord::from_probe(&endpoint, &result);
        assert_eq!(record.status, HealthStatus::Down);
        assert_eq!(record.latency_ms, None);
    }

    #[test]
    fn test_record_serialization() {
        let endpoint = test_endpoint();
        let result = ProbeResult::new(
            endpoint.name.clone(),
            Some(Duration::from_millis(150)),
            PortCheckResult::Open,
        );

        let record = StatusRecord::from_probe(&endpoint, &result);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"status\":\"degraded\""));
        assert!(json.contains("\"protocol\":\"tcp\""));
        assert!(json.contains("\"latency_ms\":150"));
    }
}
