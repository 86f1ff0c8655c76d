use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    posted_at: Instant,
}

/// Single-slot notification surface; a new message replaces the old one.
#[derive(Debug, Clone)]
pub struct Notifier {
    current: Option<ToastState>,
    ttl: Duration,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.post(message, ToastLevel::Info, Instant::now());
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.post(message, ToastLevel::Success, Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.post(message, ToastLevel::Error, Instant::now());
    }

    pub fn post(&mut self, message: impl Into<String>, level: ToastLevel, now: Instant) {
        let message = message.into();
        tracing::debug!(?level, %message, "notification");
        self.current = Some(ToastState {
            message,
            level,
            posted_at: now,
        });
    }

    /// Drops the current message once its time-to-live has elapsed.
    pub fn expire(&mut self, now: Instant) {
        if self
            .current
            .as_ref()
            .is_some_and(|toast| now.saturating_duration_since(toast.posted_at) >= self.ttl)
        {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&ToastState> {
        self.current.as_ref()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}
