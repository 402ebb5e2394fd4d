//! Dayflow - 人力资源管理核心库
//!
//! # 架构概述
//!
//! 所有业务数据集中在一个 [`AppStore`] 中，每次变更后整表写回
//! redb 快照并广播 [`StoreEvent`]：
//!
//! - **存储** (`storage`): redb 单表 JSON 快照
//! - **Store** (`store`): 员工、考勤、请假、通知、仪表盘配置
//! - **认证** (`auth`): 登录、注册申请、找回密码、会话守卫
//! - **服务** (`services`): 各页面的读写操作
//! - **CLI** (`cli`): `dayflow` 命令行入口
//!
//! # 模块结构
//!
//! ```text
//! dayflow-core/src/
//! ├── core/          # 配置、环境初始化
//! ├── storage.rs     # redb 快照存储
//! ├── store/         # AppStore、种子数据、变更事件
//! ├── auth/          # 登录、注册、找回密码、守卫
//! ├── services/      # 目录、考勤、请假、薪资、仪表盘、通知、个人资料
//! ├── cli/           # clap 命令定义与执行
//! └── utils/         # 日志、校验、时间
//! ```

pub mod auth;
pub mod cli;
pub mod core;
pub mod services;
pub mod storage;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, SeedProfile, setup_environment};
pub use storage::{SnapshotKey, SnapshotStorage, StorageError};
pub use store::{AppStore, SharedStore, StoreEvent};
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    ____              ______
   / __ \____ ___  __/ __/ /___ _      __
  / / / / __ `/ / / / /_/ / __ \ | /| / /
 / /_/ / /_/ / /_/ / __/ / /_/ / |/ |/ /
/_____/\__,_/\__, /_/ /_/\____/|__/|__/
            /____/
"#
    );
}
