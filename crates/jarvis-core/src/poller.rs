use std::time::{Duration, Instant};

/// What a poller tick decided is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollRequest {
    /// Re-request full system status over the event channel
    SystemStatus,
    /// Refresh the auxiliary health/performance reads
    Metrics,
}

/// Drives periodic re-synchronization independent of push traffic so
/// staleness stays bounded even when pushes are dropped. Pure due-time
/// bookkeeping: the owner feeds it the clock and the connection state,
/// and performs whatever it returns. While disconnected every tick is
/// a no-op; the schedule is not cancelled, so an overdue request fires
/// on the first tick after reconnecting.
pub struct StatusPoller {
    status_interval: Duration,
    metrics_interval: Duration,
    next_status: Option<Instant>,
    next_metrics: Option<Instant>,
}

impl StatusPoller {
    pub fn new(status_interval: Duration, metrics_interval: Duration) -> Self {
        Self {
            status_interval,
            metrics_interval,
            // None = fire on the first connected tick
            next_status: None,
            next_metrics: None,
        }
    }

    pub fn due(&mut self, now: Instant, connected: bool) -> Vec<PollRequest> {
        if !connected {
            return Vec::new();
        }

        let mut requests = Vec::new();
        if self.next_status.is_none_or(|t| now >= t) {
            self.next_status = Some(now + self.status_interval);
            requests.push(PollRequest::SystemStatus);
        }
        if self.next_metrics.is_none_or(|t| now >= t) {
            self.next_metrics = Some(now + self.metrics_interval);
            requests.push(PollRequest::Metrics);
        }
        requests
    }
}
