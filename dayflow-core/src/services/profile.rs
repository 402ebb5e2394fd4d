//! Self-service profile
//!
//! Employees may only change their contact details and avatar; admins may
//! edit every attribute of their own record except the password, which
//! rotates through [`change_password`]. Avatars are stored inline as base64
//! data URLs.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Employee, EmployeeUpdate, NotificationDraft, NotificationType, Recipient, default_avatar_url,
};

use crate::auth::require_session;
use crate::store::AppStore;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_badge, validate_email,
    validate_optional_text, validate_password_confirmation, validate_password_strength,
    validate_required_text,
};

/// Maximum avatar size (2MB)
pub const MAX_AVATAR_SIZE: usize = 2 * 1024 * 1024;

/// Supported avatar formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];

/// Fields an employee may edit on their own record
const SELF_EDITABLE: &[&str] = &["phone", "address", "profilePicture"];

/// Apply an edit to the session's own record and send the profile notice
pub fn update_profile(store: &mut AppStore, payload: EmployeeUpdate) -> AppResult<Employee> {
    let viewer = require_session(store)?;

    if !viewer.is_admin()
        && let Some(field) = payload
            .touched_fields()
            .into_iter()
            .find(|f| !SELF_EDITABLE.contains(f))
    {
        tracing::warn!(user_id = %viewer.id, field, "Profile edit refused");
        return Err(AppError::new(ErrorCode::FieldNotEditable).with_detail("field", field));
    }
    // Passwords rotate through change_password only
    if payload.password.is_some() {
        return Err(AppError::new(ErrorCode::FieldNotEditable).with_detail("field", "password"));
    }

    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(email) = &payload.email {
        validate_email(email)?;
        if store
            .employee_by_email(email)
            .is_some_and(|e| e.id != viewer.id)
        {
            return Err(AppError::new(ErrorCode::EmployeeEmailExists).with_detail("email", email.as_str()));
        }
    }
    if let Some(badge) = &payload.employee_id
        && *badge != viewer.employee_id
    {
        validate_badge(badge)?;
    }
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;

    let next = payload.apply(&viewer);
    store.upsert_employee(next.clone());
    store.push_notification(NotificationDraft::new(
        Recipient::employee(next.id.clone()),
        NotificationType::System,
        "Identity Profile Updated",
        "Your institutional profile attributes have been synchronized with the central ledger.",
    ));
    Ok(next)
}

/// Rotate the session's password
pub fn change_password(store: &mut AppStore, current: &str, next: &str, confirm: &str) -> AppResult<()> {
    let viewer = require_session(store)?;

    if current != viewer.password {
        tracing::warn!(user_id = %viewer.id, "Password rotation refused: current password mismatch");
        return Err(AppError::new(ErrorCode::CurrentPasswordInvalid));
    }
    validate_password_confirmation(next, confirm, "New passkey synchronization mismatch.")?;
    validate_password_strength(next)?;

    let mut updated = viewer;
    updated.password = next.to_string();
    let id = updated.id.clone();
    store.upsert_employee(updated);
    store.push_notification(NotificationDraft::new(
        Recipient::employee(id),
        NotificationType::Security,
        "Security Protocol: Passkey Updated",
        "Your system access passkey has been successfully rotated and encrypted.",
    ));
    Ok(())
}

/// Encode an image as a data URL after size and format checks
pub fn avatar_data_url(file_name: &str, data: &[u8]) -> AppResult<String> {
    if data.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile));
    }
    if data.len() > MAX_AVATAR_SIZE {
        return Err(AppError::with_message(
            ErrorCode::FileTooLarge,
            "File protocol rejected: Size exceeds 2MB limit.",
        )
        .with_detail("size", data.len()));
    }

    let ext = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::with_message(
            ErrorCode::UnsupportedFileFormat,
            format!(
                "Unsupported file format '{}'. Supported: {}",
                ext,
                SUPPORTED_FORMATS.join(", ")
            ),
        ));
    }

    let mime = mime_guess::from_ext(&ext).first_or_octet_stream();
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(data)))
}

/// Replace the session's avatar with an uploaded image
pub fn set_avatar(store: &mut AppStore, file_name: &str, data: &[u8]) -> AppResult<Employee> {
    require_session(store)?;
    let url = avatar_data_url(file_name, data)?;
    update_profile(
        store,
        EmployeeUpdate {
            profile_picture: Some(url),
            ..Default::default()
        },
    )
}

/// Restore the generated avatar for the session
pub fn reset_avatar(store: &mut AppStore) -> AppResult<Employee> {
    let viewer = require_session(store)?;
    update_profile(
        store,
        EmployeeUpdate {
            profile_picture: Some(default_avatar_url(&viewer.name)),
            ..Default::default()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::login;

    fn store_as(email: &str) -> AppStore {
        let mut store = AppStore::open_in_memory().unwrap();
        login(&mut store, email, "password").unwrap();
        store
    }

    #[test]
    fn test_employee_edits_contact_details() {
        let mut store = store_as("sarah@dayflow.com");
        let updated = update_profile(
            &mut store,
            EmployeeUpdate {
                phone: Some("+1 555-0199".to_string()),
                address: Some("9 Elm St".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(updated.phone, "+1 555-0199");
        assert_eq!(store.current_user().unwrap().address, "9 Elm St");

        let n = &store.notifications()[0];
        assert_eq!(n.subject, "Identity Profile Updated");
        assert_eq!(n.kind, NotificationType::System);
        assert_eq!(n.recipient_id, Recipient::employee("2"));
    }

    #[test]
    fn test_employee_cannot_edit_salary() {
        let mut store = store_as("sarah@dayflow.com");
        let err = update_profile(
            &mut store,
            EmployeeUpdate {
                phone: Some("+1 555-0199".to_string()),
                salary: Some(99999.0),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::FieldNotEditable);
        assert_eq!(store.employee("2").unwrap().salary, 7200.0);
        assert!(store.notifications().is_empty());
    }

    #[test]
    fn test_admin_edits_everything() {
        let mut store = store_as("alex@dayflow.com");
        let updated = update_profile(
            &mut store,
            EmployeeUpdate {
                job_title: Some("Chief People Officer".to_string()),
                salary: Some(9000.0),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(updated.job_title, "Chief People Officer");
        assert_eq!(updated.salary, 9000.0);
    }

    #[test]
    fn test_profile_edit_never_sets_password() {
        let mut store = store_as("alex@dayflow.com");
        let err = update_profile(
            &mut store,
            EmployeeUpdate {
                password: Some("sneaky".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::FieldNotEditable);
        assert_eq!(store.employee("1").unwrap().password, "password");
    }

    #[test]
    fn test_change_password() {
        let mut store = store_as("sarah@dayflow.com");

        let err = change_password(&mut store, "wrong", "newpass", "newpass").unwrap_err();
        assert_eq!(err.message, "Current system passkey verification failed.");

        let err = change_password(&mut store, "password", "newpass", "newpasz").unwrap_err();
        assert_eq!(err.message, "New passkey synchronization mismatch.");

        let err = change_password(&mut store, "password", "abc", "abc").unwrap_err();
        assert_eq!(err.code, ErrorCode::PasswordTooShort);

        change_password(&mut store, "password", "newpass", "newpass").unwrap();
        assert_eq!(store.employee("2").unwrap().password, "newpass");
        assert_eq!(
            store.notifications()[0].subject,
            "Security Protocol: Passkey Updated"
        );
    }

    #[test]
    fn test_avatar_upload_limits() {
        let mut store = store_as("sarah@dayflow.com");

        let err = set_avatar(&mut store, "me.png", &[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyFile);

        let big = vec![0u8; MAX_AVATAR_SIZE + 1];
        let err = set_avatar(&mut store, "me.png", &big).unwrap_err();
        assert_eq!(err.code, ErrorCode::FileTooLarge);

        let err = set_avatar(&mut store, "me.txt", b"hello").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedFileFormat);

        let updated = set_avatar(&mut store, "me.PNG", b"\x89PNG").unwrap();
        assert_eq!(
            updated.profile_picture.as_deref(),
            Some("data:image/png;base64,iVBORw==")
        );
    }

    #[test]
    fn test_reset_avatar() {
        let mut store = store_as("sarah@dayflow.com");
        let updated = reset_avatar(&mut store).unwrap();
        assert_eq!(
            updated.profile_picture.as_deref(),
            Some("https://api.dicebear.com/7.x/avataaars/svg?seed=Sarah%20Chen")
        );
    }
}
