//! Employee Model

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// Role assigned to an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Employee,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Employee => "EMPLOYEE",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "EMPLOYEE" => Ok(Self::Employee),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Account lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeStatus {
    Active,
    /// Self-registered, awaiting admin approval
    Pending,
    Disabled,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Pending => "PENDING",
            Self::Disabled => "DISABLED",
        }
    }
}

impl std::fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EmployeeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "PENDING" => Ok(Self::Pending),
            "DISABLED" => Ok(Self::Disabled),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

/// Employee record, also the login account
///
/// `password` is kept in plaintext; the store compares it verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Immutable unique key
    pub id: String,
    pub name: String,
    /// Login identifier, matched case-insensitively
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: UserRole,
    /// Badge code shown to humans (e.g. `EMP-0042`)
    pub employee_id: String,
    pub job_title: String,
    pub department: String,
    pub join_date: NaiveDate,
    #[serde(with = "serde_helpers::local_datetime")]
    pub created_at: NaiveDateTime,
    pub salary: f64,
    pub phone: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    pub status: EmployeeStatus,
}

impl Employee {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }

    /// Case-insensitive login match
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}

/// Generated avatar for accounts without an uploaded picture
pub fn default_avatar_url(seed: &str) -> String {
    format!(
        "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
        seed.replace(' ', "%20")
    )
}

/// Employee response (without password)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub employee_id: String,
    pub job_title: String,
    pub department: String,
    pub join_date: NaiveDate,
    #[serde(with = "serde_helpers::local_datetime")]
    pub created_at: NaiveDateTime,
    pub salary: f64,
    pub phone: String,
    pub address: String,
    pub profile_picture: Option<String>,
    pub status: EmployeeStatus,
}

impl From<&Employee> for EmployeeResponse {
    fn from(e: &Employee) -> Self {
        Self {
            id: e.id.clone(),
            name: e.name.clone(),
            email: e.email.clone(),
            role: e.role,
            employee_id: e.employee_id.clone(),
            job_title: e.job_title.clone(),
            department: e.department.clone(),
            join_date: e.join_date,
            created_at: e.created_at,
            salary: e.salary,
            phone: e.phone.clone(),
            address: e.address.clone(),
            profile_picture: e.profile_picture.clone(),
            status: e.status,
        }
    }
}

/// Admin provisioning payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreate {
    pub name: String,
    pub email: String,
    /// Defaults to `password123`
    pub password: Option<String>,
    pub role: UserRole,
    pub employee_id: String,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<EmployeeStatus>,
}

/// Self-registration payload (access request)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub job_title: Option<String>,
    pub department: Option<String>,
}

/// Partial update of an employee record
///
/// `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    /// Admin passkey reset from the directory
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub employee_id: Option<String>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub profile_picture: Option<String>,
    pub status: Option<EmployeeStatus>,
}

impl EmployeeUpdate {
    /// Names of the fields this update touches
    pub fn touched_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.email.is_some() {
            fields.push("email");
        }
        if self.password.is_some() {
            fields.push("password");
        }
        if self.role.is_some() {
            fields.push("role");
        }
        if self.employee_id.is_some() {
            fields.push("employeeId");
        }
        if self.job_title.is_some() {
            fields.push("jobTitle");
        }
        if self.department.is_some() {
            fields.push("department");
        }
        if self.join_date.is_some() {
            fields.push("joinDate");
        }
        if self.salary.is_some() {
            fields.push("salary");
        }
        if self.phone.is_some() {
            fields.push("phone");
        }
        if self.address.is_some() {
            fields.push("address");
        }
        if self.profile_picture.is_some() {
            fields.push("profilePicture");
        }
        if self.status.is_some() {
            fields.push("status");
        }
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.touched_fields().is_empty()
    }

    /// Apply the update onto a copy of `employee`
    pub fn apply(self, employee: &Employee) -> Employee {
        let mut next = employee.clone();
        if let Some(v) = self.name {
            next.name = v;
        }
        if let Some(v) = self.email {
            next.email = v;
        }
        if let Some(v) = self.password {
            next.password = v;
        }
        if let Some(v) = self.role {
            next.role = v;
        }
        if let Some(v) = self.employee_id {
            next.employee_id = v;
        }
        if let Some(v) = self.job_title {
            next.job_title = v;
        }
        if let Some(v) = self.department {
            next.department = v;
        }
        if let Some(v) = self.join_date {
            next.join_date = v;
        }
        if let Some(v) = self.salary {
            next.salary = v;
        }
        if let Some(v) = self.phone {
            next.phone = v;
        }
        if let Some(v) = self.address {
            next.address = v;
        }
        if let Some(v) = self.profile_picture {
            next.profile_picture = Some(v);
        }
        if let Some(v) = self.status {
            next.status = v;
        }
        next
    }
}
