//! 找回密码
//!
//! 三步流程，状态仅保存在内存中：
//!
//! ```text
//! RequestCode ──(邮箱存在)──▶ VerifyCode ──(验证码一致)──▶ SetPassword ──▶ Done
//! ```
//!
//! 验证码为 6 位随机数，以安全通知的形式投递给账号本人；无过期、无重试限制。

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{NotificationDraft, NotificationType, Recipient};
use shared::util::random_in;

use crate::store::AppStore;
use crate::utils::validation::{
    MAX_PASSWORD_LEN, validate_password_confirmation, validate_required_text,
};

/// 当前所处步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStep {
    RequestCode,
    VerifyCode,
    SetPassword,
    Done,
}

/// 找回密码流程
#[derive(Debug, Clone)]
pub struct RecoveryFlow {
    step: RecoveryStep,
    email: String,
    code: String,
}

impl Default for RecoveryFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl RecoveryFlow {
    pub fn new() -> Self {
        Self {
            step: RecoveryStep::RequestCode,
            email: String::new(),
            code: String::new(),
        }
    }

    pub fn step(&self) -> RecoveryStep {
        self.step
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    fn expect_step(&self, allowed: &[RecoveryStep]) -> AppResult<()> {
        if !allowed.contains(&self.step) {
            return Err(AppError::new(ErrorCode::RecoveryStepInvalid)
                .with_detail("step", format!("{:?}", self.step)));
        }
        Ok(())
    }

    /// 第一步：为邮箱生成验证码并投递。在第二步重复调用视为重新发送。
    pub fn request_code(&mut self, store: &mut AppStore, email: &str) -> AppResult<()> {
        self.expect_step(&[RecoveryStep::RequestCode, RecoveryStep::VerifyCode])?;

        let Some(user) = store.employee_by_email(email) else {
            return Err(AppError::new(ErrorCode::EmailNotFound));
        };
        let recipient = Recipient::employee(user.id.clone());

        let code = random_in(100_000, 999_999).to_string();
        store.push_notification(NotificationDraft::new(
            recipient,
            NotificationType::Security,
            "Security: Password Recovery Code",
            format!("Your verification code is {}.", code),
        ));

        self.email = email.trim().to_string();
        self.code = code;
        self.step = RecoveryStep::VerifyCode;
        tracing::info!("Recovery code issued");
        Ok(())
    }

    /// 第二步：直接比对验证码
    pub fn verify_code(&mut self, code: &str) -> AppResult<()> {
        self.expect_step(&[RecoveryStep::VerifyCode])?;
        if code.trim() != self.code {
            tracing::warn!("Recovery code mismatch");
            return Err(AppError::new(ErrorCode::VerificationCodeInvalid));
        }
        self.step = RecoveryStep::SetPassword;
        Ok(())
    }

    /// 第三步：设置新密码 (只校验非空与两次输入一致)
    pub fn set_password(
        &mut self,
        store: &mut AppStore,
        password: &str,
        confirm: &str,
    ) -> AppResult<()> {
        self.expect_step(&[RecoveryStep::SetPassword])?;
        validate_required_text(password, "password", MAX_PASSWORD_LEN)?;
        validate_password_confirmation(password, confirm, "Passwords do not match.")?;

        if !store.reset_password(&self.email, password) {
            return Err(AppError::new(ErrorCode::EmailNotFound));
        }
        self.step = RecoveryStep::Done;
        self.code.clear();
        Ok(())
    }
}
