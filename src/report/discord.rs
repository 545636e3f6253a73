//! Discord报告发布器实现
//!
//! 通过Discord频道消息接口发布状态报告：创建消息得到消息ID，
//! 后续周期对同一条消息做原地编辑

use crate::config::DiscordConfig;
use crate::error::PublishError;
use crate::report::sink::{ReportPayload, ReportSink};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// Discord API基础URL
const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// 消息接口响应中需要的字段
#[derive(Debug, Deserialize)]
struct MessageResponse {
    id: String,
}

/// Discord报告发布器
pub struct DiscordSink {
    /// HTTP客户端
    client: Client,
    /// API基础URL
    base_url: String,
    /// Bot访问令牌
    bot_token: String,
    /// 目标频道ID
    channel_id: String,
}

impl DiscordSink {
    /// 创建新的Discord发布器
    ///
    /// # 参数
    /// * `config` - Discord通知端配置
    ///
    /// # 返回
    /// * `Result<Self>` - 发布器实例
    pub fn new(config: &DiscordConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("创建HTTP客户端失败")?;

        Ok(Self {
            client,
            base_url: DISCORD_API_BASE.to_string(),
            bot_token: config.bot_token.clone(),
            channel_id: config.channel_id.clone(),
        })
    }

    /// 覆盖API基础URL，用于测试
    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// 将报告载荷转换为Discord embed消息体
    fn build_message_body(&self, payload: &ReportPayload) -> Value {
        let fields: Vec<Value> = payload
            .fields
            .iter()
            .map(|f| {
                json!({
                    "name": f.label,
                    "value": f.value,
                    "inline": f.inline,
                })
            })
            .collect();

        json!({
            "embeds": [{
                "title": payload.title,
                "description": payload.summary,
                "color": payload.color,
                "fields": fields,
                "timestamp": Utc::now().to_rfc3339(),
            }]
        })
    }

    /// 检查响应状态，非2xx时转换为PublishError
    async fn check_response(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, PublishError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(PublishError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl ReportSink for DiscordSink {
    async fn create(&self, payload: &ReportPayload) -> Result<String, PublishError> {
        let url = format!("{}/channels/{}/messages", self.base_url, self.channel_id);
        debug!("创建状态报告消息: {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bot {}", self.bot_token))
            .json(&self.build_message_body(payload))
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let message: MessageResponse = response
            .json()
            .await
            .map_err(|e| PublishError::MalformedResponse(e.to_string()))?;

        Ok(message.id)
    }

    async fn update(&self, report_id: &str, payload: &ReportPayload) -> Result<(), PublishError> {
        let url = format!(
            "{}/channels/{}/messages/{}",
            self.base_url, self.channel_id, report_id
        );
        debug!("更新状态报告消息: {}", url);

        let response = self
            .client
            .patch(&url)
            .header("Authorization", format!("Bot {}", self.bot_token))
            .json(&self.build_message_body(payload))
            .send()
            .await?;

        Self::check_response(response).await?;
        Ok(())
    }
}
