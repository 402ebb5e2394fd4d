//! Terminal rendering for command results

use serde::Serialize;
use shared::models::{AttendanceRecord, Employee, EmployeeResponse, LeaveRequest, Notification, PayrollRecord};

use crate::services::CalendarCell;
use crate::services::dashboard::{DashboardSummary, WidgetOption};
use crate::services::directory::DirectoryPage;
use crate::services::payroll::PayrollTotals;

/// Print `value` as pretty JSON, or hand it to the text renderer
pub fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T)) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        text(value);
    }
    Ok(())
}

pub fn identity(user: &Employee) {
    println!("{} <{}>", user.name, user.email);
    println!("  id:         {}", user.id);
    println!("  badge:      {}", user.employee_id);
    println!("  role:       {}", user.role);
    println!("  status:     {}", user.status);
    println!("  title:      {} / {}", user.job_title, user.department);
    println!("  joined:     {}", user.join_date);
    println!("  phone:      {}", user.phone);
    println!("  address:    {}", user.address);
}

pub fn employee(e: &EmployeeResponse) {
    println!(
        "{:<14} {:<10} {:<24} {:<28} {:<9} {}",
        e.id, e.employee_id, e.name, e.email, e.role, e.status
    );
}

pub fn directory(page: &DirectoryPage) {
    if page.employees.is_empty() {
        println!("No employees match.");
        return;
    }
    for e in &page.employees {
        employee(e);
    }
    println!(
        "page {}/{} ({} total)",
        page.page, page.total_pages, page.total
    );
}

pub fn attendance(record: &AttendanceRecord) {
    let out = record
        .check_out
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string());
    println!(
        "{:<6} emp {:<14} {} {} - {} {}",
        record.id,
        record.employee_id,
        record.date,
        record.check_in.format("%H:%M"),
        out,
        record.status
    );
}

pub fn leave(l: &LeaveRequest) {
    println!(
        "{:<10} emp {:<14} {:<7} {} .. {} {:<8} {}",
        l.id, l.employee_id, l.leave_type, l.start_date, l.end_date, l.status, l.reason
    );
    if let Some(comment) = &l.admin_comment {
        println!("           comment: {}", comment);
    }
}

pub fn notification(n: &Notification) {
    let marker = if n.read { " " } else { "*" };
    println!(
        "{} [{}] {} -> {}",
        marker,
        n.kind,
        n.timestamp.format("%Y-%m-%d %H:%M"),
        n.recipient_id
    );
    println!("    {}", n.subject);
    println!("    {}", n.body);
}

pub fn payroll(rows: &[PayrollRecord], totals: &PayrollTotals) {
    for p in rows {
        println!(
            "{:<4} emp {:<14} {:<10} base {:>10.2} +{:>9.2} -{:>9.2} net {:>10.2} {}",
            p.id, p.employee_id, p.month, p.base_salary, p.allowances, p.deductions, p.net_pay, p.status
        );
    }
    println!(
        "total base {:.2} allowances {:.2} deductions {:.2} net {:.2}",
        totals.base_salary, totals.allowances, totals.deductions, totals.net_pay
    );
}

/// Sunday-first grid, one cell per line with its entry count
pub fn calendar<T>(cells: &[CalendarCell<T>], describe: impl Fn(&T) -> String) {
    println!("Sun Mon Tue Wed Thu Fri Sat");
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        match cell.date {
            Some(date) => {
                let mark = if cell.entries.is_empty() { ' ' } else { '*' };
                line.push_str(&format!("{:>2}{} ", date.format("%-d"), mark));
            }
            None => line.push_str("    "),
        }
        if i % 7 == 6 {
            println!("{}", line.trim_end());
            line.clear();
        }
    }
    if !line.is_empty() {
        println!("{}", line.trim_end());
    }
    for cell in cells {
        if let Some(date) = cell.date {
            for entry in &cell.entries {
                println!("{}  {}", date, describe(entry));
            }
        }
    }
}

pub fn dashboard(summary: &DashboardSummary) {
    println!("Dashboard ({})", summary.role);
    for tile in &summary.stats {
        println!("  {:<20} {}", tile.label, tile.value);
    }
    if let Some(week) = &summary.weekly_hours {
        println!("Weekly hours");
        for day in week {
            println!("  {} {} {:>5.1}h", day.day, day.date, day.hours);
        }
    }
    if let Some(b) = &summary.leave_breakdown {
        println!(
            "Leave: {} approved, {} pending, {} rejected",
            b.approved, b.pending, b.rejected
        );
    }
    if let Some(rows) = &summary.recent_provisions {
        println!("Recent provisions");
        for e in rows {
            println!("  {} ({}) {}", e.name, e.employee_id, e.created_at);
        }
    }
    if let Some(rows) = &summary.pending_approvals {
        println!("Pending approvals");
        for l in rows {
            println!("  {} emp {} {} .. {}", l.id, l.employee_id, l.start_date, l.end_date);
        }
    }
    if let Some(alerts) = &summary.alert_summary {
        println!("Alerts");
        for (kind, count) in alerts {
            println!("  {:<10} {}", kind, count);
        }
    }
    if let Some(rows) = &summary.activity {
        println!("Activity");
        for a in rows {
            print!("  ");
            attendance(a);
        }
    }
}

pub fn widgets(options: &[WidgetOption]) {
    for o in options {
        let mark = if o.enabled { "x" } else { " " };
        println!("[{}] {:<14} {}", mark, o.widget, o.label);
    }
}
