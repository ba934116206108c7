mod connection;
mod control;
mod errors;
mod telemetry;
mod throttle;

pub use connection::{DroneConnection, UdpDroneConnection, SILENT_ERROR_REPLY};
pub use control::{DroneControl, PacingMode, Response, DEFAULT_INTER_COMMAND_DELAY};
pub use errors::{Result, TelloError};
pub use telemetry::{Attitude, DroneTelemetry, Vector3};
pub use throttle::CommandThrottle;
