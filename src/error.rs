//! 错误处理模块
//!
//! 定义应用程序的统一错误类型

use thiserror::Error;

/// Endpoint Vitals 应用程序的主要错误类型
#[derive(Error, Debug)]
pub enum EndpointVitalsError {
    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 探测相关错误
    #[error("探测错误: {0}")]
    Probe(#[from] ProbeError),

    /// 存储相关错误
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),

    /// 报告发布相关错误
    #[error("报告发布错误: {0}")]
    Publish(#[from] PublishError),

    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON序列化/反序列化错误
    #[error("JSON错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 其他错误
    #[error("其他错误: {0}")]
    Other(#[from] anyhow::Error),
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置文件解析错误
    #[error("配置文件解析失败: {0}")]
    ParseError(String),

    /// 配置验证错误
    #[error("配置验证失败: {0}")]
    ValidationError(String),

    /// 配置文件不存在
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    /// 环境变量替换错误
    #[error("环境变量替换失败: {var}")]
    EnvVarError { var: String },
}

/// 探测错误类型
///
/// 仅用于启动阶段的探测器初始化。运行期的探测失败不作为错误传播，
/// 统一折叠为不可达的探测结果。
#[derive(Error, Debug)]
pub enum ProbeError {
    /// ICMP套接字初始化失败
    #[error("ICMP套接字初始化失败: {0}")]
    IcmpInit(String),
}

/// 存储写入错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    /// 写入请求失败
    #[error("存储写入请求失败: {0}")]
    Request(#[from] reqwest::Error),

    /// 存储端拒绝写入
    #[error("存储端拒绝写入: HTTP {status} - {message}")]
    Rejected { status: u16, message: String },
}

/// 报告发布错误类型
#[derive(Error, Debug)]
pub enum PublishError {
    /// 发布请求失败
    #[error("报告发布请求失败: {0}")]
    Request(#[from] reqwest::Error),

    /// 通知端拒绝请求
    #[error("通知端拒绝请求: HTTP {status} - {message}")]
    Rejected { status: u16, message: String },

    /// 响应格式无效
    #[error("通知端响应格式无效: {0}")]
    MalformedResponse(String),
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, EndpointVitalsError>;
