use std::path::PathBuf;
use std::str::FromStr;

/// Seed data used when a collection has no snapshot yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedProfile {
    /// Demo directory with sample attendance and leave
    Demo,
    /// System administrator only
    Minimal,
}

impl FromStr for SeedProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "demo" => Ok(Self::Demo),
            "minimal" => Ok(Self::Minimal),
            other => Err(format!("unknown seed profile: {}", other)),
        }
    }
}

/// 运行配置 - Dayflow 的所有配置项
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./.dayflow | 工作目录 (数据文件、日志) |
/// | DAYFLOW_DATA_FILE | dayflow.redb | 数据文件名 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 滚动日志目录 |
/// | ENVIRONMENT | development | 运行环境 |
/// | PAYROLL_BATCH_DELAY_MS | 1500 | 薪资批处理模拟延迟(毫秒) |
/// | DAYFLOW_SEED | demo | 初始数据: demo / minimal |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/tmp/dayflow DAYFLOW_SEED=minimal dayflow whoami
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// redb 数据文件名 (相对 work_dir)
    pub data_file: String,
    /// 日志级别
    pub log_level: String,
    /// 滚动日志目录
    pub log_dir: Option<String>,
    /// 运行环境: development | production
    pub environment: String,
    /// 薪资批处理延迟 (毫秒)
    pub payroll_batch_delay_ms: u64,
    /// 初始数据
    pub seed: SeedProfile,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./.dayflow".into()),
            data_file: std::env::var("DAYFLOW_DATA_FILE")
                .unwrap_or_else(|_| "dayflow.redb".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|v| !v.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            payroll_batch_delay_ms: std::env::var("PAYROLL_BATCH_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1500),
            seed: std::env::var("DAYFLOW_SEED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(SeedProfile::Demo),
        }
    }

    /// 使用指定工作目录覆盖配置
    ///
    /// 常用于测试场景
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config
    }

    /// redb 数据文件完整路径
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.data_file)
    }

    /// 薪资批处理延迟
    pub fn payroll_batch_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.payroll_batch_delay_ms)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_profile_parse() {
        assert_eq!("demo".parse::<SeedProfile>().unwrap(), SeedProfile::Demo);
        assert_eq!(
            "MINIMAL".parse::<SeedProfile>().unwrap(),
            SeedProfile::Minimal
        );
        assert!("full".parse::<SeedProfile>().is_err());
    }

    #[test]
    fn test_data_path_joins_work_dir() {
        let mut config = Config::with_work_dir("/tmp/dayflow-test");
        config.data_file = "store.redb".into();
        assert_eq!(
            config.data_path(),
            PathBuf::from("/tmp/dayflow-test/store.redb")
        );
    }

    #[test]
    fn test_environment_flags() {
        let mut config = Config::with_work_dir("/tmp");
        config.environment = "production".into();
        assert!(config.is_production());
        config.environment = "development".into();
        assert!(!config.is_production());
    }
}
