//! Notification tray

use shared::error::AppResult;
use shared::models::Notification;

use crate::auth::require_session;
use crate::store::AppStore;

/// Notifications addressed to the session, plus `ADMIN_ALL` for admins; newest first
pub fn visible(store: &AppStore) -> AppResult<Vec<Notification>> {
    let viewer = require_session(store)?;
    Ok(store
        .notifications()
        .iter()
        .filter(|n| n.is_visible_to(&viewer.id, viewer.is_admin()))
        .cloned()
        .collect())
}

/// Unread count of the visible set
pub fn unread_count(store: &AppStore) -> AppResult<usize> {
    Ok(visible(store)?.iter().filter(|n| !n.read).count())
}

/// Open the tray: returns the visible set as it was, then marks every
/// notification in the store as read.
// TODO: scope the read marker to the viewer's visible set once stored
// notifications carry per-viewer read state.
pub fn open_tray(store: &mut AppStore) -> AppResult<Vec<Notification>> {
    let shown = visible(store)?;
    let flipped = store.mark_all_read();
    tracing::debug!(shown = shown.len(), flipped, "Notification tray opened");
    Ok(shown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::login;
    use shared::models::{NotificationDraft, NotificationType, Recipient};

    fn draft(recipient: Recipient) -> NotificationDraft {
        NotificationDraft::new(recipient, NotificationType::System, "Subject", "Body")
    }

    #[test]
    fn test_visibility_rules() {
        let mut store = AppStore::open_in_memory().unwrap();
        store.push_notification(draft(Recipient::AdminAll));
        store.push_notification(draft(Recipient::employee("2")));
        store.push_notification(draft(Recipient::employee("1")));

        login(&mut store, "sarah@dayflow.com", "password").unwrap();
        let sarah = visible(&store).unwrap();
        assert_eq!(sarah.len(), 1);
        assert_eq!(sarah[0].recipient_id, Recipient::employee("2"));

        login(&mut store, "alex@dayflow.com", "password").unwrap();
        assert_eq!(visible(&store).unwrap().len(), 2);
        assert_eq!(unread_count(&store).unwrap(), 2);
    }

    #[test]
    fn test_open_tray_marks_everything_read() {
        let mut store = AppStore::open_in_memory().unwrap();
        store.push_notification(draft(Recipient::AdminAll));
        store.push_notification(draft(Recipient::employee("2")));

        login(&mut store, "sarah@dayflow.com", "password").unwrap();
        let shown = open_tray(&mut store).unwrap();
        assert_eq!(shown.len(), 1);
        assert!(!shown[0].read);

        // Store-wide: the admin notification was flipped too
        assert!(store.notifications().iter().all(|n| n.read));
        login(&mut store, "alex@dayflow.com", "password").unwrap();
        assert_eq!(unread_count(&store).unwrap(), 0);
    }
}
