use std::time::{Duration, Instant};

/// How long a footer message stays up unless configured otherwise.
pub const DEFAULT_STATUS_TTL: Duration = Duration::from_secs(3);

/// Footer message replacing the key hints until it expires.
#[derive(Debug)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
    expires_at: Instant,
}

impl StatusMessage {
    pub fn new(level: StatusLevel, text: String, ttl: Duration) -> Self {
        Self::at(level, text, Instant::now(), ttl)
    }

    fn at(level: StatusLevel, text: String, now: Instant, ttl: Duration) -> Self {
        Self {
            level,
            text,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// `Info` confirms a user action, `Warn` reports a failed request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_expires_after_ttl() {
        let start = Instant::now();
        let msg = StatusMessage::at(
            StatusLevel::Info,
            "sorted by memory asc".to_string(),
            start,
            Duration::from_millis(500),
        );
        assert!(!msg.is_expired_at(start));
        assert!(!msg.is_expired_at(start + Duration::from_millis(499)));
        assert!(msg.is_expired_at(start + Duration::from_millis(500)));
    }
}
