use std::time::Duration;

pub const TOAST_TTL: Duration = Duration::from_secs(4);
pub const MAX_TOASTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }
}

#[derive(Debug, Clone)]
struct Toast {
    notification: Notification,
    remaining: Duration,
}

/// Short-lived notifications, newest last. Oldest drop out past [`MAX_TOASTS`].
#[derive(Debug, Clone, Default)]
pub struct Toasts {
    active: Vec<Toast>,
}

impl Toasts {
    pub fn push(&mut self, notification: Notification) {
        self.active.push(Toast {
            notification,
            remaining: TOAST_TTL,
        });
        if self.active.len() > MAX_TOASTS {
            let excess = self.active.len() - MAX_TOASTS;
            self.active.drain(..excess);
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        self.active.retain_mut(|toast| {
            toast.remaining = toast.remaining.saturating_sub(dt);
            !toast.remaining.is_zero()
        });
    }

    pub fn dismiss_all(&mut self) {
        self.active.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.active.iter().map(|t| &t.notification)
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.active.last().map(|t| &t.notification)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_ttl() {
        let mut toasts = Toasts::default();
        toasts.push(Notification::info("Camera stopped"));
        toasts.tick(Duration::from_millis(3900));
        assert_eq!(toasts.len(), 1);
        toasts.tick(Duration::from_millis(100));
        assert!(toasts.is_empty());
    }

    #[test]
    fn oldest_toast_is_dropped_when_full() {
        let mut toasts = Toasts::default();
        for i in 0..5 {
            toasts.push(Notification::info(format!("n{i}")));
        }
        let messages: Vec<&str> = toasts.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["n2", "n3", "n4"]);
        assert_eq!(toasts.latest().unwrap().message, "n4");

        toasts.dismiss_all();
        assert!(toasts.latest().is_none());
    }
}
