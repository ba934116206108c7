use std::sync::Arc;

use anyhow::Result;
use tokio::time::Duration;
use tracing_subscriber::EnvFilter;

use tello_control::{DroneConnection, DroneControl, UdpDroneConnection};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let connection = Arc::new(UdpDroneConnection::new());
    connection.connect().await?;

    let mut control =
        DroneControl::new(connection).with_inter_command_delay(Duration::from_secs(1));

    control.takeoff().await?;
    control.land().await?;

    Ok(())
}
