//! 配置管理模块
//!
//! 提供配置文件的加载、解析和验证功能

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, TomlConfigLoader};
pub use types::{
    validate_config, Config, DiscordConfig, EndpointConfig, GlobalConfig, Protocol, StorageConfig,
};
