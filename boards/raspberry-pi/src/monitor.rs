use hdc2080::config::{BusConfig, SensorEntry};
use hdc2080::hal::Delay;
use hdc2080::{BusError, BusResult, ConfigError, Hdc2080, I2CBus, InterruptStatus, SampleRate};
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tokio::task;
use tokio::time::{interval, sleep, Duration, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// Allowance for a one-shot conversion before results are read
const CONVERSION_WAIT: Duration = Duration::from_millis(20);

type Sensor = Hdc2080<I2CBus, Delay>;
type SharedSensor = Arc<Mutex<Sensor>>;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Sensor '{sensor}' not found at {address:#04x} on {bus}")]
    NotConnected {
        sensor: String,
        address: u8,
        bus: String,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Bus error: {0}")]
    Bus(#[from] BusError),

    #[error("Sensor task failed: {0}")]
    Task(#[from] task::JoinError),
}

pub type MonitorResult<T> = Result<T, MonitorError>;

/// Run one blocking driver operation on the blocking pool.
///
/// The mutex is held for the whole closure so a read-modify-write sequence
/// never interleaves with another caller's.
async fn with_sensor<T, F>(sensor: &SharedSensor, op: F) -> MonitorResult<T>
where
    T: Send + 'static,
    F: FnOnce(&mut Sensor) -> BusResult<T> + Send + 'static,
{
    let sensor = Arc::clone(sensor);
    let result = task::spawn_blocking(move || {
        let mut guard = sensor.lock().unwrap_or_else(PoisonError::into_inner);
        op(&mut guard)
    })
    .await?;
    Ok(result?)
}

/// Open the bus, check the device is there, reset it and apply the settings.
async fn bring_up(buses: &BusConfig, entry: &SensorEntry) -> MonitorResult<SharedSensor> {
    let bus_entry = buses.find(&entry.bus)?.clone();
    let address = entry.address;

    let sensor = task::spawn_blocking(move || -> BusResult<Sensor> {
        let bus = I2CBus::new(&bus_entry.path)?;
        Ok(Hdc2080::new(bus, Delay, address))
    })
    .await??;
    let sensor = Arc::new(Mutex::new(sensor));

    if !with_sensor(&sensor, |s| s.is_connected()).await? {
        return Err(MonitorError::NotConnected {
            sensor: entry.id.clone(),
            address,
            bus: entry.bus.clone(),
        });
    }
    info!("[{}] found at {:#04x} on {}", entry.id, address, entry.bus);

    if !with_sensor(&sensor, |s| s.verify_identity()).await? {
        warn!("[{}] identification registers do not match an HDC2080", entry.id);
    }

    let settings = entry.settings.clone();
    with_sensor(&sensor, move |s| {
        s.reset()?;
        s.configure(&settings)
    })
    .await?;
    debug!("[{}] configured: {:?}", entry.id, entry.settings);

    Ok(sensor)
}

/// Take one sample. In manual mode a conversion is triggered first.
async fn sample(sensor: &SharedSensor, entry: &SensorEntry) -> MonitorResult<()> {
    if entry.settings.sample_rate == SampleRate::Manual {
        with_sensor(sensor, |s| s.trigger_measurement()).await?;
        sleep(CONVERSION_WAIT).await;
    }

    let (measurement, status) = with_sensor(sensor, |s| {
        let measurement = s.read_measurement()?;
        let status = s.read_interrupt_status()?;
        Ok((measurement, status))
    })
    .await?;

    info!(
        "[{}] T = {:.2} °C, RH = {:.2} %",
        entry.id, measurement.temperature_c, measurement.humidity_percent
    );

    let status = InterruptStatus::from(status);
    if entry.settings.threshold_interrupt && status.any_threshold() {
        warn!("[{}] threshold crossed: {:?}", entry.id, status);
    }
    Ok(())
}

/// Call `tick` once per `period` until `shutdown` resolves, returning the
/// number of ticks run.
///
/// `shutdown` is created once and polled ahead of the ticker, so a shutdown
/// that fires while a tick is in progress ends the loop at the next pass.
async fn run_until<S, F, Fut>(period: Duration, shutdown: S, mut tick: F) -> u64
where
    S: Future,
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut ticks = 0;
    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                tick().await;
                ticks += 1;
            }
        }
    }
    ticks
}

/// Bring the sensor up and sample it until Ctrl-C.
pub async fn run(buses: &BusConfig, entry: &SensorEntry) -> MonitorResult<()> {
    let sensor = bring_up(buses, entry).await?;

    let mut period = Duration::from_millis(entry.interval_ms);
    if let Some(auto) = entry.settings.sample_rate.period() {
        // No point polling faster than the sensor converts
        period = period.max(auto);
    }
    info!("[{}] sampling every {:?}", entry.id, period);

    let shared = &sensor;
    let samples = run_until(period, tokio::signal::ctrl_c(), move || async move {
        if let Err(e) = sample(shared, entry).await {
            error!("[{}] sample failed: {}", entry.id, e);
        }
    })
    .await;
    info!("[{}] shutting down after {} samples", entry.id, samples);

    let (max_t, max_h) = with_sensor(&sensor, |s| {
        Ok((s.read_max_temperature()?, s.read_max_humidity()?))
    })
    .await?;
    info!("[{}] peak T = {:.1} °C, peak RH = {:.1} %", entry.id, max_t, max_h);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn shutdown_raised_during_a_tick_ends_the_loop() {
        let (tx, rx) = oneshot::channel::<()>();
        let mut tx = Some(tx);
        let mut started = 0;

        let ticks = run_until(Duration::from_millis(1), rx, || {
            started += 1;
            let fire = if started == 2 { tx.take() } else { None };
            async move {
                // The signal lands mid-tick, while the loop is not selecting
                if let Some(tx) = fire {
                    let _ = tx.send(());
                }
                sleep(Duration::from_millis(5)).await;
            }
        })
        .await;

        assert_eq!(ticks, 2);
    }

    #[tokio::test]
    async fn pending_shutdown_wins_over_a_ready_tick() {
        let ticks = run_until(Duration::from_millis(1), std::future::ready(()), || async {}).await;
        assert_eq!(ticks, 0);
    }
}
