//! 核心模块 - 运行配置与环境初始化
//!
//! # 模块结构
//!
//! - [`Config`] - 运行配置
//! - [`setup_environment`] - dotenv、工作目录、日志

pub mod config;

pub use config::{Config, SeedProfile};

use crate::utils::logger::init_logger_with_file;

/// 设置运行环境
///
/// 1. 加载 `.env`
/// 2. 创建工作目录
/// 3. 初始化日志
pub fn setup_environment() -> std::io::Result<Config> {
    let _ = dotenv::dotenv();
    let config = Config::from_env();

    std::fs::create_dir_all(&config.work_dir)?;
    if let Some(dir) = &config.log_dir {
        std::fs::create_dir_all(dir)?;
    }

    init_logger_with_file(
        Some(&config.log_level),
        Some(config.is_production()),
        config.log_dir.as_deref(),
    );
    Ok(config)
}
