use std::time::{Duration, Instant};

pub const DEFAULT_COPY_ACK: Duration = Duration::from_millis(2_000);

/// Short-lived "copied" marker for the most recently copied dork.
#[derive(Debug, Clone)]
pub struct CopyAck {
    window: Duration,
    last: Option<(String, Instant)>,
}

impl Default for CopyAck {
    fn default() -> Self {
        Self::new(DEFAULT_COPY_ACK)
    }
}

impl CopyAck {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    pub fn mark(&mut self, id: &str) {
        self.mark_at(id, Instant::now());
    }

    pub fn mark_at(&mut self, id: &str, at: Instant) {
        self.last = Some((id.to_string(), at));
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.is_active_at(id, Instant::now())
    }

    pub fn is_active_at(&self, id: &str, now: Instant) -> bool {
        match &self.last {
            Some((last_id, at)) => {
                last_id == id && now.saturating_duration_since(*at) < self.window
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ack_expires_after_window() {
        let mut ack = CopyAck::new(Duration::from_millis(2_000));
        let t0 = Instant::now();
        ack.mark_at("ef-001", t0);

        assert!(ack.is_active_at("ef-001", t0 + Duration::from_millis(1_999)));
        assert!(!ack.is_active_at("ef-001", t0 + Duration::from_millis(2_000)));
    }

    #[test]
    fn test_new_copy_replaces_previous() {
        let mut ack = CopyAck::default();
        let t0 = Instant::now();
        ack.mark_at("a", t0);
        ack.mark_at("b", t0);
        assert!(!ack.is_active_at("a", t0));
        assert!(ack.is_active_at("b", t0));
    }

    #[test]
    fn test_nothing_copied() {
        assert!(!CopyAck::default().is_active("a"));
    }
}
