//! 配置数据结构定义
//!
//! 定义应用程序的配置结构体和验证逻辑

use serde::{Deserialize, Serialize};
use std::fmt;

/// 主配置结构，包含全局配置和端点列表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 全局配置项
    pub global: GlobalConfig,
    /// 端点配置列表
    pub endpoints: Vec<EndpointConfig>,
}

/// 全局配置结构
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GlobalConfig {
    /// 检测周期（秒）
    #[serde(default = "default_check_interval")]
    pub check_interval_seconds: u64,
    /// 探测超时时间（毫秒），同时作用于ICMP探测与端口检测
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_ms: u64,
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 存储端配置
    pub storage: StorageConfig,
    /// Discord通知端配置
    pub discord: DiscordConfig,
}

/// 存储端配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// 存储服务REST接口基础URL
    pub url: String,
    /// 访问凭证
    pub api_token: String,
    /// 写入的表名
    #[serde(default = "default_table")]
    pub table: String,
}

/// Discord通知端配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscordConfig {
    /// Bot访问令牌
    pub bot_token: String,
    /// 状态报告发布的频道ID
    pub channel_id: String,
}

/// 端点配置结构
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndpointConfig {
    /// 端点名称，作为端点的唯一标识
    pub name: String,
    /// 目标地址（IP或域名）
    pub address: String,
    /// 目标端口
    pub port: u16,
    /// 传输协议
    #[serde(default)]
    pub protocol: Protocol,
    /// 是否启用
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// 端口检测使用的传输协议
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// TCP连接握手检测
    #[default]
    Tcp,
    /// UDP数据报发送检测
    Udp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => write!(f, "TCP"),
            Protocol::Udp => write!(f, "UDP"),
        }
    }
}

// 默认值函数
fn default_check_interval() -> u64 {
    30
}
fn default_probe_timeout() -> u64 {
    3000
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_table() -> String {
    "status_records".to_string()
}
fn default_enabled() -> bool {
    true
}

/// 配置验证函数
///
/// # 参数
/// * `config` - 要验证的配置
///
/// # 返回
/// * `Result<(), String>` - 验证结果，错误时返回错误信息
pub fn validate_config(config: &Config) -> Result<(), String> {
    // 验证全局配置
    if config.global.check_interval_seconds == 0 {
        return Err("检测周期不能为0".to_string());
    }

    if config.global.probe_timeout_ms == 0 {
        return Err("探测超时时间不能为0".to_string());
    }

    // 验证日志级别
    let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_log_levels.contains(&config.global.log_level.as_str()) {
        return Err(format!(
            "无效的日志级别: {}，支持的级别: {:?}",
            config.global.log_level, valid_log_levels
        ));
    }

    // 验证存储端配置
    let storage = &config.global.storage;
    if !storage.url.starts_with("http://") && !storage.url.starts_with("https://") {
        return Err(format!("存储服务URL格式无效: {}", storage.url));
    }
    if storage.table.trim().is_empty() {
        return Err("存储表名不能为空".to_string());
    }

    // 验证通知端配置
    if config.global.discord.bot_token.trim().is_empty() {
        return Err("Discord bot token不能为空".to_string());
    }
    if config.global.discord.channel_id.trim().is_empty() {
        return Err("Discord频道ID不能为空".to_string());
    }

    // 验证端点配置
    if config.endpoints.is_empty() {
        return Err("至少需要配置一个端点".to_string());
    }

    for endpoint in &config.endpoints {
        if endpoint.name.trim().is_empty() {
            return Err("端点名称不能为空".to_string());
        }

        if endpoint.address.trim().is_empty() {
            return Err(format!("端点 {} 的地址不能为空", endpoint.name));
        }

        if endpoint.port == 0 {
            return Err(format!("端点 {} 的端口不能为0", endpoint.name));
        }
    }

    Ok(())
}
