use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use tello_control::{DroneConnection, DroneTelemetry, UdpDroneConnection};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let connection = Arc::new(UdpDroneConnection::new());
    connection.connect().await?;

    let telemetry = DroneTelemetry::new(connection);

    println!("battery: {:?}", telemetry.battery_level().await?);
    println!("temperature: {}", telemetry.temperature().await?);
    println!("speed: {:?}", telemetry.speed().await?);
    println!("height: {}", telemetry.height().await?);
    println!("attitude: {:?}", telemetry.attitude().await?);
    println!("acceleration: {:?}", telemetry.acceleration().await?);
    println!("wifi: {:?}", telemetry.wifi_strength().await?);

    Ok(())
}
