use async_trait::async_trait;
use tokio::net::UdpSocket;
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

use crate::errors::{Result, TelloError};

const DEFAULT_DRONE_HOST: &str = "192.168.10.1";

const CONTROL_UDP_PORT: u16 = 8889;

/// The reply a connection resolves to instead of failing when silent-errors
/// mode is on.
pub const SILENT_ERROR_REPLY: &str = "error";

/// The device link. Control and telemetry talk to the drone exclusively
/// through this, so tests can swap in a mock.
#[async_trait]
pub trait DroneConnection: Send + Sync {
    /// Establishes the link, returning `true` on success.
    async fn connect(&self) -> Result<bool>;

    /// Transmits `command` and resolves with the drone's reply.
    ///
    /// Fails with [`TelloError::NotConnected`] if the link is not up, unless
    /// silent-errors mode is on, in which case it resolves to
    /// [`SILENT_ERROR_REPLY`] instead.
    async fn send_command_and_await(&self, command: &str) -> Result<String>;
}

/// The real drone link over the Tello UDP command port.
///
/// The channel carries no request ids, so a reply is correlated to its
/// command purely by ordering. The socket lock is held across the
/// send/receive pair to keep a single command in flight at a time.
pub struct UdpDroneConnection {
    drone_host: String,
    sock: Mutex<Option<UdpSocket>>,
    silent_errors: bool,
}

impl UdpDroneConnection {
    pub fn new() -> Self {
        Self::with_host(DEFAULT_DRONE_HOST)
    }

    pub fn with_host(drone_host: &str) -> Self {
        Self {
            drone_host: drone_host.to_string(),
            sock: Mutex::new(None),
            silent_errors: false,
        }
    }

    /// When on, commands sent while disconnected resolve to
    /// [`SILENT_ERROR_REPLY`] rather than failing.
    pub fn with_silent_errors(mut self, silent: bool) -> Self {
        self.silent_errors = silent;
        self
    }
}

impl Default for UdpDroneConnection {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DroneConnection for UdpDroneConnection {
    async fn connect(&self) -> Result<bool> {
        let local_address = format!("0.0.0.0:{CONTROL_UDP_PORT}");
        let drone_address = format!("{}:{CONTROL_UDP_PORT}", self.drone_host);

        info!("[Tello] CONNECT {local_address} → {drone_address}");

        let sock = UdpSocket::bind(&local_address).await?;

        let mut i = 0;
        loop {
            i += 1;
            match sock.connect(&drone_address).await {
                Ok(_) => {
                    break;
                }
                Err(err) => {
                    warn!("[Tello] connection attempt #{i} failed ({err}), retrying...");
                    sleep(Duration::from_millis(100)).await;
                }
            }
        }

        *self.sock.lock().await = Some(sock);

        // put the drone in SDK command mode
        self.send_command_and_await("command").await?;

        info!("[Tello] CONNECTED");

        Ok(true)
    }

    async fn send_command_and_await(&self, command: &str) -> Result<String> {
        let guard = self.sock.lock().await;
        let sock = match guard.as_ref() {
            Some(sock) => sock,
            None => {
                if self.silent_errors {
                    debug!("[Tello] not connected, resolving \"{command}\" silently");
                    return Ok(SILENT_ERROR_REPLY.to_string());
                }
                return Err(TelloError::NotConnected);
            }
        };

        debug!("[Tello] SEND {command}");
        sock.send(command.as_bytes()).await?;

        let mut buf = vec![0; 256];
        let n = sock.recv(&mut buf).await?;
        buf.truncate(n);
        let response = String::from_utf8(buf)?.trim().to_string();

        debug!("[Tello] RECEIVED {response}");

        Ok(response)
    }
}
