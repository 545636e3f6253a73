//! Endpoint Vitals 主程序入口
//!
//! 网络端点健康监控守护进程

use anyhow::{Context, Result};
use clap::Parser;
use endpoint_vitals::config::{ConfigLoader, TomlConfigLoader};
use endpoint_vitals::logging::{parse_level, setup_logging, LogConfig};
use endpoint_vitals::monitor::MonitorScheduler;
use endpoint_vitals::probe::NetworkProber;
use endpoint_vitals::report::{DiscordSink, StatusReporter};
use endpoint_vitals::storage::HttpRecordSink;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::info;

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "endpoint-vitals", version, about = endpoint_vitals::APP_DESCRIPTION)]
struct Args {
    /// 配置文件路径
    #[arg(short, long, env = "ENDPOINT_VITALS_CONFIG", default_value = "config.toml")]
    config: PathBuf,

    /// 日志级别，覆盖配置文件中的设置
    #[arg(long)]
    log_level: Option<String>,

    /// 以JSON格式输出日志
    #[arg(long)]
    json_log: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 加载配置，启动阶段的失败直接以非零状态退出
    let loader = TomlConfigLoader::new(true);
    let config = loader
        .load_from_file(&args.config)
        .await
        .with_context(|| format!("加载配置文件失败: {}", args.config.display()))?;

    // 初始化日志系统，命令行参数优先于配置文件
    let log_config = LogConfig {
        level: parse_level(
            args.log_level
                .as_deref()
                .unwrap_or(&config.global.log_level),
        ),
        json_format: args.json_log,
        ..Default::default()
    };
    setup_logging(&log_config).context("初始化日志系统失败")?;

    info!(
        "{} v{} 启动，端点数量: {}",
        endpoint_vitals::APP_NAME,
        endpoint_vitals::VERSION,
        config.endpoints.len()
    );

    let check_interval = Duration::from_secs(config.global.check_interval_seconds);
    let probe_timeout = Duration::from_millis(config.global.probe_timeout_ms);

    // 组装探测器、存储写入端与报告发布端
    let prober = Arc::new(NetworkProber::new(probe_timeout).context("创建网络探测器失败")?);
    let record_sink = Arc::new(HttpRecordSink::new(&config.global.storage)?);
    let report_sink = Arc::new(DiscordSink::new(&config.global.discord)?);
    let reporter = StatusReporter::new(report_sink, check_interval);

    let scheduler = MonitorScheduler::new(
        prober,
        record_sink,
        reporter,
        config.endpoints,
        check_interval,
    );

    // 检测循环永不返回，收到退出信号时结束进程
    tokio::select! {
        _ = scheduler.run() => {}
        _ = signal::ctrl_c() => {
            info!("收到退出信号，停止监控");
        }
    }

    Ok(())
}
