//! 认证模块
//!
//! 提供登录、注册、找回密码以及会话守卫：
//! - [`login`] / [`logout`] - 会话开启与关闭
//! - [`request_access`] - 自助申请账号 (PENDING)
//! - [`RecoveryFlow`] - 三步找回密码
//! - [`require_session`] / [`require_admin`] / [`require_employee`] - 服务层守卫

mod guard;
mod login;
mod recovery;
mod signup;

pub use guard::{require_admin, require_employee, require_session};
pub use login::{login, logout};
pub use recovery::{RecoveryFlow, RecoveryStep};
pub use signup::{DEFAULT_DEPARTMENT, request_access};
