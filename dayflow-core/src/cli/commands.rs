//! Command execution against the persisted store

use std::io::{self, BufRead, Write};

use serde_json::json;
use shared::models::{AccessRequest, EmployeeCreate, EmployeeUpdate, LeaveCreate};

use super::output::{self, emit};
use super::{
    Cli, Commands, DashboardCommands, EmployeeCommands, EmployeeFields, LeaveCommands,
    PayrollCommands, ProfileCommands, direction, seed_for,
};
use crate::auth::{self, RecoveryFlow};
use crate::core::Config;
use crate::services::directory::DirectoryQuery;
use crate::services::{attendance, dashboard, directory, leave, notifications, payroll, profile};
use crate::store::{AppStore, SeedData};
use crate::utils::AppResult;
use crate::utils::time;

impl EmployeeFields {
    fn into_update(self) -> AppResult<EmployeeUpdate> {
        let join_date = self.join_date.as_deref().map(time::parse_date).transpose()?;
        Ok(EmployeeUpdate {
            name: self.name,
            email: self.email,
            password: None,
            role: self.role,
            employee_id: self.badge,
            job_title: self.job_title,
            department: self.department,
            join_date,
            salary: self.salary,
            phone: self.phone,
            address: self.address,
            profile_picture: None,
            status: self.status,
        })
    }
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Run one parsed command
pub async fn execute_command(cli: Cli, config: &Config) -> anyhow::Result<()> {
    let json = cli.json;
    let mut store = AppStore::open(config)?;
    tracing::debug!(command = ?cli.command, "Executing command");

    match cli.command {
        Commands::Login { email, password } => {
            let user = auth::login(&mut store, &email, &password)?;
            emit(json, &user, |u| println!("Signed in as {} ({})", u.name, u.role))?;
        }
        Commands::Logout => {
            auth::logout(&mut store);
            emit(json, &json!({ "signedOut": true }), |_| println!("Signed out"))?;
        }
        Commands::Whoami => {
            let user = auth::require_session(&store)?;
            emit(json, &user, output::identity)?;
        }
        Commands::Signup(args) => {
            let request = AccessRequest {
                name: args.name,
                email: args.email,
                password: args.password,
                job_title: args.job_title,
                department: args.department,
            };
            let created = auth::request_access(&mut store, request)?;
            emit(json, &created, |e| {
                println!(
                    "Access requested for {} ({}). An administrator must approve the account.",
                    e.name, e.employee_id
                )
            })?;
        }
        Commands::Recover { email } => {
            let mut flow = RecoveryFlow::new();
            flow.request_code(&mut store, &email)?;
            println!("A verification code was sent to {}'s notifications.", flow.email());
            let code = prompt("Code")?;
            flow.verify_code(&code)?;
            let password = prompt("New password")?;
            let confirm = prompt("Confirm password")?;
            flow.set_password(&mut store, &password, &confirm)?;
            println!("Password updated. Sign in with the new password.");
        }
        Commands::Employees(command) => employees(&mut store, command, json)?,
        Commands::ClockIn => {
            let record = attendance::clock_in(&mut store)?;
            emit(json, &record, output::attendance)?;
        }
        Commands::ClockOut => {
            let record = attendance::clock_out(&mut store)?;
            emit(json, &record, output::attendance)?;
        }
        Commands::Attendance { month } => match month {
            Some(month) => {
                let (year, month) = time::parse_month(&month)?;
                let cells = attendance::calendar(&store, year, month)?;
                emit(json, &cells, |c| {
                    output::calendar(c, |a| {
                        format!("{} in {}", a.employee_id, a.check_in.format("%H:%M"))
                    })
                })?;
            }
            None => {
                let records = attendance::visible_records(&store)?;
                emit(json, &records, |rows| rows.iter().for_each(output::attendance))?;
            }
        },
        Commands::Leave(command) => leaves(&mut store, command, json)?,
        Commands::Notifications { open } => {
            let unread = notifications::unread_count(&store)?;
            let rows = if open {
                notifications::open_tray(&mut store)?
            } else {
                notifications::visible(&store)?
            };
            emit(json, &rows, |rows| {
                println!("{} unread", unread);
                rows.iter().for_each(output::notification);
            })?;
        }
        Commands::Dashboard(command) => match command {
            DashboardCommands::Show => {
                let summary = dashboard::summary(&store)?;
                emit(json, &summary, output::dashboard)?;
            }
            DashboardCommands::Widgets { role } => {
                let options = dashboard::catalog(&store, role);
                emit(json, &options, |o| output::widgets(o))?;
            }
            DashboardCommands::Toggle { role, widget } => {
                let updated = dashboard::toggle_widget(&mut store, role, widget)?;
                emit(json, &updated, |c| {
                    let names: Vec<&str> = c.visible_widgets.iter().map(|w| w.as_str()).collect();
                    println!("{} widgets: {}", c.role, names.join(", "));
                })?;
            }
        },
        Commands::Payroll(command) => match command {
            PayrollCommands::Show => {
                let rows = payroll::visible_payroll(&store)?;
                let totals = payroll::totals(&rows);
                emit(json, &json!({ "records": rows, "totals": totals }), |_| {
                    output::payroll(&rows, &totals)
                })?;
            }
            PayrollCommands::Run { cycle } => {
                let cycle = cycle.unwrap_or_else(payroll::current_cycle);
                let batch = payroll::PayrollBatch::new(config.payroll_batch_delay());
                let shared = store.into_shared();
                println!("Processing payroll for {}...", cycle);
                let notified = batch.run(&shared, &cycle).await?;
                emit(json, &json!({ "cycle": cycle, "notified": notified }), |_| {
                    println!("Disbursal for {} sent to {} employees", cycle, notified)
                })?;
            }
        },
        Commands::Profile(command) => match command {
            ProfileCommands::Show => {
                let user = auth::require_session(&store)?;
                emit(json, &user, output::identity)?;
            }
            ProfileCommands::Edit { fields } => {
                let updated = profile::update_profile(&mut store, fields.into_update()?)?;
                emit(json, &updated, output::identity)?;
            }
            ProfileCommands::Password {
                current,
                next,
                confirm,
            } => {
                profile::change_password(&mut store, &current, &next, &confirm)?;
                emit(json, &json!({ "passwordChanged": true }), |_| {
                    println!("Password updated")
                })?;
            }
            ProfileCommands::Avatar { path, reset } => {
                let updated = match path {
                    Some(path) if !reset => {
                        let data = std::fs::read(&path)?;
                        let file_name = path
                            .file_name()
                            .and_then(|n| n.to_str())
                            .unwrap_or_default()
                            .to_string();
                        profile::set_avatar(&mut store, &file_name, &data)?
                    }
                    _ => profile::reset_avatar(&mut store)?,
                };
                emit(json, &updated, |u| {
                    println!("Avatar updated for {}", u.name)
                })?;
            }
        },
        Commands::Reset { seed } => {
            let profile = seed_for(config, seed);
            store.reset(SeedData::for_profile(profile))?;
            tracing::info!(seed = ?profile, "Store reset");
            emit(json, &json!({ "reset": true }), |_| {
                println!("All data replaced with the {:?} seed", profile)
            })?;
        }
    }

    Ok(())
}

fn employees(store: &mut AppStore, command: EmployeeCommands, json: bool) -> anyhow::Result<()> {
    match command {
        EmployeeCommands::List {
            search,
            role,
            status,
            sort,
            desc,
            page,
        } => {
            let query = DirectoryQuery {
                role,
                status,
                search,
                sort_by: sort,
                direction: direction(desc),
                page,
            };
            let page = directory::list(store, &query)?;
            emit(json, &page, output::directory)?;
        }
        EmployeeCommands::Show { id } => {
            let employee = directory::get_by_id(store, &id)?;
            emit(json, &employee, output::employee)?;
        }
        EmployeeCommands::Provision {
            name,
            email,
            badge,
            role,
            password,
            job_title,
            department,
            salary,
            phone,
            address,
            status,
        } => {
            let payload = EmployeeCreate {
                name,
                email,
                password,
                role,
                employee_id: badge.unwrap_or_else(directory::suggest_badge),
                job_title,
                department,
                join_date: None,
                salary,
                phone,
                address,
                status,
            };
            let created = directory::create(store, payload)?;
            emit(json, &created, output::employee)?;
        }
        EmployeeCommands::Edit {
            id,
            fields,
            password,
        } => {
            let mut payload = fields.into_update()?;
            payload.password = password;
            let updated = directory::update(store, &id, payload)?;
            emit(json, &updated, output::employee)?;
        }
        EmployeeCommands::Approve { id, badge } => {
            let approved = directory::approve(store, &id, badge)?;
            emit(json, &approved, output::employee)?;
        }
        EmployeeCommands::Purge { id } => {
            directory::delete(store, &id)?;
            emit(json, &json!({ "deleted": id }), |_| {
                println!("Employee {} removed", id)
            })?;
        }
    }
    Ok(())
}

fn leaves(store: &mut AppStore, command: LeaveCommands, json: bool) -> anyhow::Result<()> {
    match command {
        LeaveCommands::Apply {
            leave_type,
            start,
            end,
            reason,
        } => {
            let payload = LeaveCreate {
                leave_type,
                start_date: Some(time::parse_date(&start)?),
                end_date: Some(time::parse_date(&end)?),
                reason,
            };
            let filed = leave::apply(store, payload)?;
            emit(json, &filed, output::leave)?;
        }
        LeaveCommands::List { on, month } => {
            if let Some(month) = month {
                let (year, month) = time::parse_month(&month)?;
                let cells = leave::calendar(store, year, month)?;
                emit(json, &cells, |c| {
                    output::calendar(c, |l| format!("{} {} {}", l.employee_id, l.leave_type, l.status))
                })?;
            } else {
                let rows = match on {
                    Some(date) => leave::leaves_on(store, time::parse_date(&date)?)?,
                    None => leave::visible(store)?,
                };
                emit(json, &rows, |rows| rows.iter().for_each(output::leave))?;
            }
        }
        LeaveCommands::Decide {
            id,
            decision,
            comment,
        } => {
            let decided = leave::decide(store, &id, decision, comment)?;
            emit(json, &decided, output::leave)?;
        }
    }
    Ok(())
}
