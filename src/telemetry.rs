use std::sync::Arc;

use crate::connection::{DroneConnection, SILENT_ERROR_REPLY};
use crate::errors::{Result, TelloError};

/// The drone's orientation in degrees.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Attitude {
    pub pitch: i16,
    pub roll: i16,
    pub yaw: i16,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

/// Telemetry queries over a shared [`DroneConnection`].
///
/// Each query sends one `...?` command and parses the reply, so unlike
/// control actions these always wait for the drone.
///
/// The drone reports a failed query with the literal reply `error`, and a
/// connection in silent-errors mode resolves to the same word, so the typed
/// queries yield `None` for it rather than failing. The raw string queries
/// pass the reply through verbatim.
pub struct DroneTelemetry {
    connection: Arc<dyn DroneConnection>,
}

impl DroneTelemetry {
    pub fn new(connection: Arc<dyn DroneConnection>) -> Self {
        Self { connection }
    }

    /// Battery charge, percent.
    pub async fn battery_level(&self) -> Result<Option<u8>> {
        self.typed_query("battery?").await
    }

    /// Temperature range as reported, eg "40-43 C".
    pub async fn temperature(&self) -> Result<String> {
        self.query("temp?").await
    }

    /// Current speed in cm/s.
    pub async fn speed(&self) -> Result<Option<f32>> {
        self.typed_query("speed?").await
    }

    /// Height above the take-off point as reported, eg "100cm".
    pub async fn height(&self) -> Result<String> {
        self.query("height?").await
    }

    /// Barometric altitude in metres.
    pub async fn barometric_altitude(&self) -> Result<Option<f32>> {
        self.typed_query("baro?").await
    }

    /// Pitch, roll and yaw.
    pub async fn attitude(&self) -> Result<Option<Attitude>> {
        let reply = self.query("attitude?").await?;
        if reply == SILENT_ERROR_REPLY {
            return Ok(None);
        }
        parse_attitude(&reply).map(Some)
    }

    /// Acceleration along each axis in milli-g.
    pub async fn acceleration(&self) -> Result<Option<Vector3<f32>>> {
        let reply = self.query("acceleration?").await?;
        if reply == SILENT_ERROR_REPLY {
            return Ok(None);
        }
        parse_acceleration(&reply).map(Some)
    }

    /// WiFi signal to noise ratio.
    pub async fn wifi_strength(&self) -> Result<Option<u8>> {
        self.typed_query("wifi?").await
    }

    /// Time-of-flight distance from the floor as reported, eg "100dm".
    pub async fn distance_from_floor(&self) -> Result<String> {
        self.query("tof?").await
    }

    async fn query(&self, command: &str) -> Result<String> {
        let reply = self.connection.send_command_and_await(command).await?;
        Ok(reply.trim().to_string())
    }

    async fn typed_query<T: std::str::FromStr>(&self, command: &str) -> Result<Option<T>> {
        let reply = self.query(command).await?;
        if reply == SILENT_ERROR_REPLY {
            return Ok(None);
        }
        value_as(&reply).map(Some)
    }
}

/// Parses an attitude reply.
///
/// Example message: "pitch:-5;roll:0;yaw:0;"
fn parse_attitude(reply: &str) -> Result<Attitude> {
    let mut attitude = Attitude::default();

    for f in reply.split(';') {
        if f.is_empty() {
            continue;
        }

        let (k, v) = split_key_value(f)?;

        match k {
            "pitch" => attitude.pitch = value_as(v)?,
            "roll" => attitude.roll = value_as(v)?,
            "yaw" => attitude.yaw = value_as(v)?,
            _ => {}
        }
    }

    Ok(attitude)
}

/// Parses an acceleration reply.
///
/// Example message: "agx:-50.00;agy:11.00;agz:-999.00;"
fn parse_acceleration(reply: &str) -> Result<Vector3<f32>> {
    let mut acceleration = Vector3::default();

    for f in reply.split(';') {
        if f.is_empty() {
            continue;
        }

        let (k, v) = split_key_value(f)?;

        match k {
            "agx" => acceleration.x = value_as(v)?,
            "agy" => acceleration.y = value_as(v)?,
            "agz" => acceleration.z = value_as(v)?,
            _ => {}
        }
    }

    Ok(acceleration)
}

fn split_key_value(kv: &str) -> Result<(&str, &str)> {
    let mut i = kv.split(':');
    let k = i.next().ok_or_else(|| TelloError::ParseError { msg: kv.to_string() })?;
    let v = i.next().ok_or_else(|| TelloError::ParseError { msg: kv.to_string() })?;
    Ok((k, v))
}

fn value_as<T: std::str::FromStr>(s: &str) -> Result<T> {
    s.parse::<T>()
        .map_err(|_| TelloError::ParseError { msg: s.to_string() })
}
