use hdc2080::init_tracing;
use hdc2080_raspberry_pi::{get_config_path, load_configs, monitor, BOARD_NAME};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    init_tracing();

    // Get config path (board default or override)
    let config_path = get_config_path();
    tracing::info!("[{}] Configuration path: {}", BOARD_NAME, config_path);

    let (buses, sensors) = load_configs(&config_path)?;
    tracing::info!("[config] sensor '{}' on bus '{}'", sensors.sensor.id, sensors.sensor.bus);

    monitor::run(&buses, &sensors.sensor).await?;
    Ok(())
}
