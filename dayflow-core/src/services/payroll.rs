//! Payroll ledger and batch disbursal
//!
//! The ledger is display-only. A batch run waits a fixed delay, then sends
//! one `payroll` notification to every employee in the directory. Only one
//! batch may be in flight per [`PayrollBatch`].

use rust_decimal::Decimal;
use serde::Serialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    NotificationDraft, NotificationType, PayrollRecord, Recipient, to_decimal, to_f64,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::auth::{require_admin, require_session};
use crate::store::{AppStore, SharedStore};

/// Ledger rows visible to the session: admins see all, employees their own
pub fn visible_payroll(store: &AppStore) -> AppResult<Vec<PayrollRecord>> {
    let viewer = require_session(store)?;
    Ok(store
        .payroll()
        .iter()
        .filter(|p| viewer.is_admin() || p.employee_id == viewer.id)
        .cloned()
        .collect())
}

/// Column totals of a ledger slice
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollTotals {
    pub base_salary: f64,
    pub allowances: f64,
    pub deductions: f64,
    pub net_pay: f64,
}

pub fn totals(records: &[PayrollRecord]) -> PayrollTotals {
    let sum = |f: fn(&PayrollRecord) -> f64| -> Decimal {
        records.iter().map(|r| to_decimal(f(r))).sum()
    };
    PayrollTotals {
        base_salary: to_f64(sum(|r| r.base_salary)),
        allowances: to_f64(sum(|r| r.allowances)),
        deductions: to_f64(sum(|r| r.deductions)),
        net_pay: to_f64(sum(|r| r.net_pay)),
    }
}

/// Billing cycle label for today, e.g. `May 2024`
pub fn current_cycle() -> String {
    chrono::Local::now().format("%B %Y").to_string()
}

/// Batch runner with an in-flight guard
#[derive(Debug, Clone)]
pub struct PayrollBatch {
    delay: Duration,
    running: Arc<AtomicBool>,
}

/// Clears the in-flight flag when the run ends
struct RunningGuard(Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl PayrollBatch {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Run a disbursal for `cycle` (admin). Returns the number of employees notified.
    pub async fn run(&self, store: &SharedStore, cycle: &str) -> AppResult<usize> {
        {
            let guard = store.read();
            let viewer = require_session(&guard)?;
            require_admin(&viewer)?;
        }

        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!(cycle = %cycle, "Payroll batch refused: already running");
            return Err(AppError::new(ErrorCode::PayrollBatchInProgress));
        }
        let _running = RunningGuard(self.running.clone());

        tracing::info!(cycle = %cycle, delay_ms = self.delay.as_millis() as u64, "Payroll batch started");
        tokio::time::sleep(self.delay).await;

        let mut guard = store.write();
        let recipients: Vec<String> = guard.employees().iter().map(|e| e.id.clone()).collect();
        for id in &recipients {
            guard.push_notification(NotificationDraft::new(
                Recipient::employee(id.clone()),
                NotificationType::Payroll,
                format!("Equity Disbursal: {}", cycle),
                "System has successfully processed your equity allocation for the current billing cycle.",
            ));
        }
        tracing::info!(cycle = %cycle, notified = recipients.len(), "Payroll batch processed");
        Ok(recipients.len())
    }
}
