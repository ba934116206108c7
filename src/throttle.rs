use tokio::time::{sleep, Duration, Instant};
use tracing::debug;

/// Enforces a minimum spacing between successive command transmissions.
///
/// The drone sometimes ignores commands that arrive too close together, so
/// this is a transmit-side rate limiter. It knows nothing about how long the
/// drone takes to reply - that is the connection's business.
///
/// The timing state is owned by the throttle instance, so facades pointed at
/// different drones pace independently.
#[derive(Debug)]
pub struct CommandThrottle {
    interval: Duration,
    last_pace: Option<Instant>,
}

impl CommandThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_pace: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Waits out one full inter-command interval if the previous `pace` call
    /// returned less than an interval ago, otherwise returns immediately.
    /// The first call never waits. Cannot fail - it only delays.
    pub async fn pace(&mut self) {
        if let Some(last) = self.last_pace {
            if last.elapsed() < self.interval {
                debug!("[Throttle] pacing for {:?}", self.interval);
                sleep(self.interval).await;
            }
        }
        self.last_pace = Some(Instant::now());
    }
}
