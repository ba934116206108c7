use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::debug;

use crate::connection::DroneConnection;
use crate::errors::{Result, TelloError};
use crate::throttle::CommandThrottle;

/// Commands sent sooner than this after the previous one are sometimes
/// ignored by the drone.
pub const DEFAULT_INTER_COMMAND_DELAY: Duration = Duration::from_secs(1);

/// The outcome of a control action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// The drone's reply, exactly as received.
    Reply(String),
    /// No reply was waited for (fire-and-forget mode).
    Absent,
}

/// When the pacing delay runs relative to the transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PacingMode {
    /// Pace first, then transmit. Successive transmissions are always at
    /// least one inter-command delay apart.
    #[default]
    BeforeSend,
    /// Transmit first and pace while the reply is on its way. Spacing is
    /// then enforced between pacing points rather than transmissions, so a
    /// fast reply lets two commands land closer together than the delay.
    Overlapped,
}

/// High-level drone actions over a shared [`DroneConnection`].
///
/// Each action sends one command, paced by a [`CommandThrottle`], and either
/// awaits the drone's reply or abandons it, depending on the configured
/// synchrony mode. Actions take `&mut self`, so one facade has at most one
/// command in flight at a time.
pub struct DroneControl {
    connection: Arc<dyn DroneConnection>,
    synchronous: bool,
    pacing: PacingMode,
    throttle: CommandThrottle,
}

impl DroneControl {
    pub fn new(connection: Arc<dyn DroneConnection>) -> Self {
        Self {
            connection,
            synchronous: true,
            pacing: PacingMode::default(),
            throttle: CommandThrottle::new(DEFAULT_INTER_COMMAND_DELAY),
        }
    }

    /// Makes every action return [`Response::Absent`] as soon as its pacing
    /// point passes, abandoning the drone's actual reply.
    ///
    /// Connection failures are then invisible: an action on an unconnected
    /// drone appears to succeed even though nothing was sent. That silence
    /// is the documented cost of fire-and-forget mode, not a bug.
    pub fn fire_and_forget(mut self) -> Self {
        self.synchronous = false;
        self
    }

    pub fn with_inter_command_delay(mut self, delay: Duration) -> Self {
        self.throttle.set_interval(delay);
        self
    }

    pub fn with_pacing_mode(mut self, pacing: PacingMode) -> Self {
        self.pacing = pacing;
        self
    }

    pub async fn takeoff(&mut self) -> Result<Response> {
        self.execute("takeoff").await
    }

    pub async fn land(&mut self) -> Result<Response> {
        self.execute("land").await
    }

    /// Stops moving and hovers in place.
    pub async fn stop_and_hover(&mut self) -> Result<Response> {
        self.execute("stop").await
    }

    /// Stops all motors immediately.
    pub async fn emergency_stop(&mut self) -> Result<Response> {
        self.execute("emergency").await
    }

    /// Sends one control command, paced and adapted to the configured
    /// synchrony mode. The named actions all go through here, as can any
    /// other command the drone understands.
    pub async fn execute(&mut self, command: &str) -> Result<Response> {
        debug!("[Control] {command}");

        let pending = match self.pacing {
            PacingMode::BeforeSend => {
                self.throttle.pace().await;
                self.spawn_send(command)
            }
            PacingMode::Overlapped => {
                let pending = self.spawn_send(command);
                self.throttle.pace().await;
                pending
            }
        };

        if self.synchronous {
            let reply = pending
                .await
                .map_err(|e| TelloError::CommandAborted { msg: e.to_string() })??;
            Ok(Response::Reply(reply))
        } else {
            // Detached task - the send runs to completion on its own, and
            // neither its reply, its error, nor a panic reaches the caller.
            drop(pending);
            Ok(Response::Absent)
        }
    }

    fn spawn_send(&self, command: &str) -> JoinHandle<Result<String>> {
        let connection = Arc::clone(&self.connection);
        let command = command.to_string();
        tokio::spawn(async move { connection.send_command_and_await(&command).await })
    }
}
