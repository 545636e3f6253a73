//! 日志系统模块
//!
//! 提供结构化日志的配置与初始化功能

use anyhow::Result;
use log::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// 日志配置结构
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 日志级别
    pub level: LevelFilter,
    /// 是否输出到控制台
    pub console: bool,
    /// 是否使用JSON格式
    pub json_format: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            console: true,
            json_format: false,
        }
    }
}

/// 解析日志级别字符串，无法识别时回退到info
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

/// 初始化全局日志订阅器
///
/// `RUST_LOG`环境变量优先于配置中的日志级别。
///
/// # 参数
/// * `config` - 日志配置
///
/// # 返回
/// * `Result<()>` - 初始化结果
pub fn setup_logging(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string().to_lowercase()));

    let fmt_layer = if !config.console {
        None
    } else if config.json_format {
        Some(fmt::layer().json().boxed())
    } else {
        Some(fmt::layer().with_target(true).boxed())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("初始化日志订阅器失败: {e}"))?;

    Ok(())
}
