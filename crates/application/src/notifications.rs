//! In-memory notification feed.
//!
//! An ordered list of user-facing alerts with synchronous subscriber
//! fan-out. Producers push, views subscribe; every mutation hands each
//! subscriber the full updated list. Nothing here is persisted and all
//! mutation happens on the caller's thread.

use std::sync::{Arc, Mutex, PoisonError};

use vitae_domain::{Notification, NotificationKind};

type Listener = Arc<dyn Fn(&[Notification]) + Send + Sync>;

/// Identifies a subscription for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct FeedInner {
    items: Vec<Notification>,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
}

/// Session-scoped feed of user-facing alerts.
#[derive(Clone, Default)]
pub struct NotificationFeed {
    inner: Arc<Mutex<FeedInner>>,
}

impl NotificationFeed {
    /// Creates an empty feed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FeedInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Prepends a notification and notifies subscribers. Returns the
    /// stored notification.
    pub fn push(&self, notification: Notification) -> Notification {
        {
            let mut inner = self.lock();
            inner.items.insert(0, notification.clone());
        }
        self.notify();
        notification
    }

    /// Snapshot of the current list, newest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.lock().items.clone()
    }

    /// Looks up one notification by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Notification> {
        self.lock().items.iter().find(|n| n.id == id).cloned()
    }

    /// Number of unread notifications.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.lock().items.iter().filter(|n| !n.read).count()
    }

    /// Marks one notification read. Subscribers are notified only when
    /// the id exists.
    pub fn mark_read(&self, id: &str) -> bool {
        let found = {
            let mut inner = self.lock();
            match inner.items.iter_mut().find(|n| n.id == id) {
                Some(notification) => {
                    notification.read = true;
                    true
                }
                None => false,
            }
        };
        if found {
            self.notify();
        }
        found
    }

    /// Marks every notification read.
    pub fn mark_all_read(&self) {
        {
            let mut inner = self.lock();
            for notification in &mut inner.items {
                notification.read = true;
            }
        }
        self.notify();
    }

    /// Removes one notification by id. Returns whether it existed.
    pub fn remove(&self, id: &str) -> bool {
        let removed = {
            let mut inner = self.lock();
            let before = inner.items.len();
            inner.items.retain(|n| n.id != id);
            inner.items.len() != before
        };
        self.notify();
        removed
    }

    /// Removes everything.
    pub fn clear(&self) {
        {
            let mut inner = self.lock();
            inner.items.clear();
        }
        self.notify();
    }

    /// Registers a listener called synchronously after every mutation
    /// with the full updated list.
    pub fn subscribe(&self, listener: impl Fn(&[Notification]) + Send + Sync + 'static) -> SubscriptionId {
        let mut inner = self.lock();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        SubscriptionId(id)
    }

    /// Removes a listener. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let before = inner.listeners.len();
        inner.listeners.retain(|(listener_id, _)| *listener_id != id.0);
        inner.listeners.len() != before
    }

    /// Calls every listener with a snapshot of the list. Listeners run
    /// outside the lock so they may mutate the feed.
    fn notify(&self) {
        let (items, listeners) = {
            let inner = self.lock();
            let listeners: Vec<Listener> =
                inner.listeners.iter().map(|(_, l)| l.clone()).collect();
            (inner.items.clone(), listeners)
        };
        for listener in listeners {
            listener(&items);
        }
    }

    /// Pushes the notices that follow a successful resume upload.
    pub fn push_upload_notices(&self, resume_id: i64, file_name: &str) {
        self.push(
            Notification::new(
                "Resume Upload Successful",
                format!("Your resume \"{file_name}\" has been uploaded and analyzed."),
                NotificationKind::Success,
            )
            .with_action(format!("/analysis?id={resume_id}"), "View Analysis"),
        );

        self.push(
            Notification::new(
                "Skills Extracted",
                "Key skills were extracted from your resume. Check the skills \
                 distribution in the dashboard.",
                NotificationKind::Info,
            )
            .with_action("/dashboard", "View Dashboard"),
        );

        self.push(
            Notification::new(
                "Job Recommendations Ready",
                "Personalized job recommendations are ready, based on your resume.",
                NotificationKind::Info,
            )
            .with_action("/dashboard", "View Recommendations"),
        );

        self.push(
            Notification::new(
                "Resume Tips Available",
                "Get suggestions to improve your resume and strengthen your applications.",
                NotificationKind::Info,
            )
            .with_action(format!("/analysis?id={resume_id}"), "View Tips"),
        );
    }
}
