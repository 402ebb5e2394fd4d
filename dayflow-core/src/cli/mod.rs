//! `dayflow` command line
//!
//! Every invocation opens the data file, runs one command against the
//! persisted session and exits.

mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use shared::models::{DashboardWidget, EmployeeStatus, LeaveStatus, LeaveType, UserRole};

use crate::core::{Config, SeedProfile};
use crate::services::directory::{SortDirection, SortField};

pub use commands::execute_command;

/// Dayflow HR CLI
#[derive(Debug, Parser)]
#[command(name = "dayflow")]
#[command(about = "Dayflow HR ledger: directory, attendance, leave, payroll", long_about = None)]
pub struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open a session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Close the session
    Logout,

    /// Show the session identity
    Whoami,

    /// Request access (creates a pending account)
    Signup(SignupArgs),

    /// Reset a forgotten password (prompts for the code)
    Recover {
        #[arg(long)]
        email: String,
    },

    /// Employee directory
    #[command(subcommand)]
    Employees(EmployeeCommands),

    /// Start today's attendance session
    ClockIn,

    /// Close today's attendance session
    ClockOut,

    /// Attendance records
    Attendance {
        /// Month grid (YYYY-MM) instead of the record list
        #[arg(long)]
        month: Option<String>,
    },

    /// Leave requests
    #[command(subcommand)]
    Leave(LeaveCommands),

    /// Notification tray
    Notifications {
        /// Mark everything read after listing
        #[arg(long)]
        open: bool,
    },

    /// Dashboard and widget configuration
    #[command(subcommand)]
    Dashboard(DashboardCommands),

    /// Payroll ledger
    #[command(subcommand)]
    Payroll(PayrollCommands),

    /// Own profile
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Drop all data and reload seed data
    Reset {
        #[arg(long)]
        seed: Option<SeedProfile>,
    },
}

#[derive(Debug, Args)]
pub struct SignupArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub job_title: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
}

/// Editable employee attributes shared by `employees edit` and `profile edit`
#[derive(Debug, Args, Default)]
pub struct EmployeeFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub role: Option<UserRole>,
    #[arg(long)]
    pub badge: Option<String>,
    #[arg(long)]
    pub job_title: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub join_date: Option<String>,
    #[arg(long)]
    pub salary: Option<f64>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub status: Option<EmployeeStatus>,
}

#[derive(Debug, Subcommand)]
pub enum EmployeeCommands {
    /// Filtered, sorted, paginated directory
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        role: Option<UserRole>,
        #[arg(long)]
        status: Option<EmployeeStatus>,
        #[arg(long, default_value = "name")]
        sort: SortField,
        #[arg(long)]
        desc: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Show one employee
    Show { id: String },

    /// Provision a new employee (admin)
    Provision {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// EMP-#### (a random one is suggested when omitted)
        #[arg(long)]
        badge: Option<String>,
        #[arg(long, default_value = "employee")]
        role: UserRole,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        job_title: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        salary: Option<f64>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        status: Option<EmployeeStatus>,
    },

    /// Edit an employee (admin)
    Edit {
        id: String,
        #[command(flatten)]
        fields: EmployeeFields,
        /// Reset the employee's passkey
        #[arg(long)]
        password: Option<String>,
    },

    /// Activate a pending account (admin)
    Approve {
        id: String,
        /// EMP-#### badge replacing the signup badge
        #[arg(long)]
        badge: Option<String>,
    },

    /// Remove an employee (admin)
    Purge { id: String },
}

#[derive(Debug, Subcommand)]
pub enum LeaveCommands {
    /// File a leave request
    Apply {
        #[arg(long = "type", default_value = "paid")]
        leave_type: LeaveType,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long)]
        reason: String,
    },

    /// Visible requests, optionally only those covering a date or a month grid
    List {
        #[arg(long, conflicts_with = "month")]
        on: Option<String>,
        #[arg(long)]
        month: Option<String>,
    },

    /// Approve or reject a pending request (admin)
    Decide {
        id: String,
        /// approve | reject
        decision: LeaveStatus,
        #[arg(long)]
        comment: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum DashboardCommands {
    /// Session dashboard
    Show,

    /// Widget catalog for a role
    Widgets {
        #[arg(long)]
        role: UserRole,
    },

    /// Enable or disable a widget for a role (admin)
    Toggle {
        #[arg(long)]
        role: UserRole,
        #[arg(long)]
        widget: DashboardWidget,
    },
}

#[derive(Debug, Subcommand)]
pub enum PayrollCommands {
    /// Visible ledger rows
    Show,

    /// Run the disbursal batch (admin)
    Run {
        /// Billing cycle label, defaults to the current month
        #[arg(long)]
        cycle: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommands {
    /// Show own record
    Show,

    /// Edit own record
    Edit {
        #[command(flatten)]
        fields: EmployeeFields,
    },

    /// Rotate password
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        next: String,
        #[arg(long)]
        confirm: String,
    },

    /// Upload an avatar image, or restore the generated one
    Avatar {
        #[arg(required_unless_present = "reset")]
        path: Option<std::path::PathBuf>,
        #[arg(long)]
        reset: bool,
    },
}

/// Convert CLI sort flags to the directory query
pub(crate) fn direction(desc: bool) -> SortDirection {
    if desc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    }
}

/// Effective seed for `reset`
pub(crate) fn seed_for(config: &Config, seed: Option<SeedProfile>) -> SeedProfile {
    seed.unwrap_or(config.seed)
}
