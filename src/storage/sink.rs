//! 存储写入器实现
//!
//! 通过HTTP REST接口向存储端追加状态记录

use crate::config::StorageConfig;
use crate::error::StorageError;
use crate::storage::record::StatusRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// 状态记录写入trait
///
/// 存储端只需要提供追加写入能力，读取与去重均不在本系统职责内。
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// 追加写入一条状态记录
    ///
    /// # 参数
    /// * `record` - 状态记录
    ///
    /// # 返回
    /// * `Result<(), StorageError>` - 写入结果
    async fn insert(&self, record: &StatusRecord) -> Result<(), StorageError>;
}

/// HTTP REST存储写入器
pub struct HttpRecordSink {
    /// HTTP客户端
    client: Client,
    /// 写入接口完整URL
    insert_url: String,
    /// 访问凭证
    api_token: String,
}

impl HttpRecordSink {
    /// 创建新的HTTP存储写入器
    ///
    /// # 参数
    /// * `config` - 存储端配置
    ///
    /// # 返回
    /// * `Result<Self>` - 写入器实例
    pub fn new(config: &StorageConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("创建HTTP客户端失败")?;

        Ok(Self {
            client,
            insert_url: format!("{}/{}", config.url.trim_end_matches('/'), config.table),
            api_token: config.api_token.clone(),
        })
    }
}

#[async_trait]
impl RecordSink for HttpRecordSink {
    async fn insert(&self, record: &StatusRecord) -> Result<(), StorageError> {
        debug!("写入状态记录: {} -> {}", record.name, self.insert_url);

        let response = self
            .client
            .post(&self.insert_url)
            .bearer_auth(&self.api_token)
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(StorageError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EndpointConfig, Protocol};
    use crate::probe::{PortCheckResult, ProbeResult};

    fn test_record() -> StatusRecord {
        let endpoint = EndpointConfig {
            name: "网关".to_string(),
            address: "192.168.1.1".to_string(),
            port: 443,
            protocol: Protocol::Tcp,
            enabled: true,
        };
        let result = ProbeResult::new(
            endpoint.name.clone(),
            Some(std::time::Duration::from_millis(30)),
            PortCheckResult::Open,
        );
        StatusRecord::from_probe(&endpoint, &result)
    }

    fn sink_for(server: &mockito::ServerGuard) -> HttpRecordSink {
        HttpRecordSink::new(&StorageConfig {
            url: server.url(),
            api_token: "test-token".to_string(),
            table: "status_records".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/status_records")
            .match_header("authorization", "Bearer test-token")
            .with_status(201)
            .create_async()
            .await;

        let sink = sink_for(&server);
        let result = sink.insert(&test_record()).await;

        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_insert_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/status_records")
            .with_status(401)
            .with_body("unauthorized")
            .create_async()
            .await;

        let sink = sink_for(&server);
        let result = sink.insert(&test_record()).await;

        match result {
            Err(StorageError::Rejected { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "unauthorized");
            }
            other => panic!("期望Rejected错误，实际为 {other:?}"),
        }
    }

    #[test]
    fn test_insert_url_normalization() {
        let sink = HttpRecordSink::new(&StorageConfig {
            url: "https://storage.example.com/rest/v1/".to_string(),
            api_token: "t".to_string(),
            table: "status_records".to_string(),
        })
        .unwrap();

        assert_eq!(
            sink.insert_url,
            "https://storage.example.com/rest/v1/status_records"
        );
    }
}
