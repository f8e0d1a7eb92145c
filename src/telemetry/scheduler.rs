//! Nested multi-rate telemetry scheduler
//!
//! Three timing tiers, outer to inner: Position (GPS), Auxiliary, and
//! Inertial/Barometer. Every tier boundary is an elapsed-time comparison
//! against the monotonic clock, never an iteration count; drift accumulates
//! but stays bounded by one inner period per outer tick.
//!
//! Failure policy per family:
//! - Barometer2 is retried inline (bounded count, fixed spacing) and logged
//!   zeroed after exhaustion.
//! - Position substitutes the last known fix and never zeroes the record.
//! - Every other family logs a zeroed sub-reading for that tick.
//!
//! Sensor failures never abort the loop; storage failures always do.

use crate::communication::sms::{CommandProtocol, SmsLink};
use crate::core::{FatalError, PayloadConfig};
use crate::devices::{
    BaroReading, BaroSensor, DofReading, DofSensor, EnvReading, GasArraySensor, GasReading,
    HumidityTempSensor, LightReading, LightSensor, PositionReading, PositionSensor, SensorError,
    SensorFamily, SensorSuite, StatusIndicator,
};
use crate::platform::{GpioInterface, StorageInterface, TimerInterface, UartInterface};
use crate::telemetry::{FailureTracker, ReadOutcome, TelemetryLog};

/// Spacing of the busy-wait poll that holds a tier open, ms
const TIER_POLL_MS: u32 = 1;

/// Multi-rate sampling scheduler
///
/// Owns all mutable sampling state: the failure counters and the last known
/// position. Sensors, storage, and the command protocol are borrowed per
/// call, keeping the single-writer model explicit.
#[derive(Debug)]
pub struct TelemetryScheduler {
    config: PayloadConfig,
    failures: FailureTracker,
    last_position: PositionReading,
}

impl TelemetryScheduler {
    /// Create a scheduler for the given configuration
    pub fn new(config: PayloadConfig) -> Self {
        Self {
            config,
            failures: FailureTracker::new(),
            last_position: PositionReading::zeroed(),
        }
    }

    /// Failure counters (observability only)
    pub fn failures(&self) -> &FailureTracker {
        &self.failures
    }

    /// Last known position fix
    pub fn last_known(&self) -> &PositionReading {
        &self.last_position
    }

    /// Probe every sensor; a missing sensor is fatal
    pub fn init_sensors<D, B, Ga, H, L, P>(
        &mut self,
        sensors: &mut SensorSuite<D, B, Ga, H, L, P>,
    ) -> Result<(), FatalError>
    where
        D: DofSensor,
        B: BaroSensor,
        Ga: GasArraySensor,
        H: HumidityTempSensor,
        L: LightSensor,
        P: PositionSensor,
    {
        sensors
            .dof
            .init()
            .map_err(|_| FatalError::SensorMissing(SensorFamily::InertialBaro))?;
        sensors
            .baro
            .init()
            .map_err(|_| FatalError::SensorMissing(SensorFamily::Barometer2))?;
        sensors
            .gas
            .init()
            .map_err(|_| FatalError::SensorMissing(SensorFamily::GasArray))?;
        sensors
            .env
            .init()
            .map_err(|_| FatalError::SensorMissing(SensorFamily::HumidityTemp))?;
        sensors
            .light
            .init()
            .map_err(|_| FatalError::SensorMissing(SensorFamily::Light))?;
        sensors
            .gps
            .init()
            .map_err(|_| FatalError::SensorMissing(SensorFamily::Position))?;
        Ok(())
    }

    /// One Inertial/Barometer tier tick: sample and log the DOF stream
    pub fn dof_tick<D, S>(
        &mut self,
        dof: &mut D,
        log: &mut TelemetryLog<S>,
    ) -> Result<(), FatalError>
    where
        D: DofSensor,
        S: StorageInterface,
    {
        let reading = match dof.read() {
            Ok(r) => {
                self.failures.record(SensorFamily::InertialBaro, ReadOutcome::Success);
                r
            }
            Err(_) => {
                self.failures.record(SensorFamily::InertialBaro, ReadOutcome::Failure);
                crate::log_warn!("inertial read failed, logging zeroed record");
                DofReading::zeroed()
            }
        };
        log.append_dof(&reading).map_err(FatalError::Storage)
    }

    /// One Auxiliary tier tick: fixed read order Barometer2, GasArray,
    /// HumidityTemp, Light, then one 13-field record
    ///
    /// A failure in any family never skips the families after it.
    pub fn aux_tick<T, B, Ga, H, L, S>(
        &mut self,
        timer: &mut T,
        baro: &mut B,
        gas: &mut Ga,
        env: &mut H,
        light: &mut L,
        log: &mut TelemetryLog<S>,
    ) -> Result<(), FatalError>
    where
        T: TimerInterface,
        B: BaroSensor,
        Ga: GasArraySensor,
        H: HumidityTempSensor,
        L: LightSensor,
        S: StorageInterface,
    {
        let baro_reading = self.read_baro_with_retry(timer, baro)?;

        let gas_reading = match gas.read() {
            Ok(r) => {
                self.failures.record(SensorFamily::GasArray, ReadOutcome::Success);
                r
            }
            Err(_) => {
                self.failures.record(SensorFamily::GasArray, ReadOutcome::Failure);
                GasReading::zeroed()
            }
        };

        let env_reading = match env.read() {
            Ok(r) if r.in_range() => {
                self.failures.record(SensorFamily::HumidityTemp, ReadOutcome::Success);
                r
            }
            Ok(_) | Err(_) => {
                self.failures.record(SensorFamily::HumidityTemp, ReadOutcome::Failure);
                EnvReading::zeroed()
            }
        };

        let light_reading = match light.read() {
            Ok(r) => {
                self.failures.record(SensorFamily::Light, ReadOutcome::Success);
                r
            }
            Err(_) => {
                self.failures.record(SensorFamily::Light, ReadOutcome::Failure);
                LightReading::zeroed()
            }
        };

        log.append_aux(&baro_reading, &gas_reading, &env_reading, &light_reading)
            .map_err(FatalError::Storage)
    }

    /// One Position tier tick: sample, gate on HDOP, fall back to the last
    /// known fix, and log a 9-field record
    pub fn position_tick<P, S>(
        &mut self,
        gps: &mut P,
        log: &mut TelemetryLog<S>,
    ) -> Result<(), FatalError>
    where
        P: PositionSensor,
        S: StorageInterface,
    {
        match gps.read() {
            Ok(fix) if fix.hdop < self.config.hdop_max => {
                self.failures.record(SensorFamily::Position, ReadOutcome::Success);
                self.update_last_known(&fix);
            }
            Ok(_) | Err(_) => {
                // Stale-data fallback: keep emitting the last known fix
                self.failures.record(SensorFamily::Position, ReadOutcome::Failure);
            }
        }
        let emitted = self.last_position;
        log.append_position(&emitted).map_err(FatalError::Storage)
    }

    /// One Auxiliary tier: Inertial ticks until the period elapses, then
    /// the Aux sample set
    pub fn run_aux_tier<T, D, B, Ga, H, L, P, S>(
        &mut self,
        timer: &mut T,
        sensors: &mut SensorSuite<D, B, Ga, H, L, P>,
        log: &mut TelemetryLog<S>,
    ) -> Result<(), FatalError>
    where
        T: TimerInterface,
        D: DofSensor,
        B: BaroSensor,
        Ga: GasArraySensor,
        H: HumidityTempSensor,
        L: LightSensor,
        P: PositionSensor,
        S: StorageInterface,
    {
        let aux_start = timer.now_ms();
        loop {
            let tick_start = timer.now_ms();
            self.dof_tick(&mut sensors.dof, log)?;
            while timer.now_ms().saturating_sub(tick_start) < self.config.dof_period_ms as u64 {
                timer.delay_ms(TIER_POLL_MS).map_err(FatalError::Platform)?;
            }
            if timer.now_ms().saturating_sub(aux_start) >= self.config.aux_period_ms as u64 {
                break;
            }
        }
        self.aux_tick(
            timer,
            &mut sensors.baro,
            &mut sensors.gas,
            &mut sensors.env,
            &mut sensors.light,
            log,
        )
    }

    /// One full outer (Position) cycle
    ///
    /// Polls the command protocol once, runs Auxiliary tiers until the
    /// Position period elapses, then takes the Position sample.
    #[allow(clippy::too_many_arguments)]
    pub fn run_cycle<T, D, B, Ga, H, L, P, S, U, G>(
        &mut self,
        timer: &mut T,
        sensors: &mut SensorSuite<D, B, Ga, H, L, P>,
        log: &mut TelemetryLog<S>,
        protocol: &mut CommandProtocol,
        link: &mut SmsLink<U>,
        indicator: &mut StatusIndicator<G>,
    ) -> Result<(), FatalError>
    where
        T: TimerInterface,
        D: DofSensor,
        B: BaroSensor,
        Ga: GasArraySensor,
        H: HumidityTempSensor,
        L: LightSensor,
        P: PositionSensor,
        S: StorageInterface,
        U: UartInterface,
        G: GpioInterface,
    {
        let latest = self.last_position;
        protocol.poll(link, timer, indicator, &latest)?;

        let outer_start = timer.now_ms();
        loop {
            self.run_aux_tier(timer, sensors, log)?;
            if timer.now_ms().saturating_sub(outer_start) >= self.config.gps_period_ms as u64 {
                break;
            }
        }
        self.position_tick(&mut sensors.gps, log)
    }

    /// Run outer cycles until a fatal condition occurs
    ///
    /// Returns the fatal error so the caller can enter the halt state.
    #[allow(clippy::too_many_arguments)]
    pub fn run<T, D, B, Ga, H, L, P, S, U, G>(
        &mut self,
        timer: &mut T,
        sensors: &mut SensorSuite<D, B, Ga, H, L, P>,
        log: &mut TelemetryLog<S>,
        protocol: &mut CommandProtocol,
        link: &mut SmsLink<U>,
        indicator: &mut StatusIndicator<G>,
    ) -> FatalError
    where
        T: TimerInterface,
        D: DofSensor,
        B: BaroSensor,
        Ga: GasArraySensor,
        H: HumidityTempSensor,
        L: LightSensor,
        P: PositionSensor,
        S: StorageInterface,
        U: UartInterface,
        G: GpioInterface,
    {
        loop {
            if let Err(e) = self.run_cycle(timer, sensors, log, protocol, link, indicator) {
                return e;
            }
        }
    }

    /// Read Barometer2 with the configured inline retry policy
    ///
    /// One initial read plus up to `baro_retries` retries, each preceded by
    /// the retry spacing delay. Exhaustion counts as one failure and yields
    /// a degraded zeroed reading.
    fn read_baro_with_retry<T, B>(
        &mut self,
        timer: &mut T,
        baro: &mut B,
    ) -> Result<BaroReading, FatalError>
    where
        T: TimerInterface,
        B: BaroSensor,
    {
        let mut outcome: Result<BaroReading, SensorError> = baro.read();
        let mut retries = 0;
        while outcome.is_err() && retries < self.config.baro_retries {
            timer
                .delay_ms(self.config.baro_retry_spacing_ms)
                .map_err(FatalError::Platform)?;
            outcome = baro.read();
            retries += 1;
        }
        match outcome {
            Ok(r) => {
                self.failures.record(SensorFamily::Barometer2, ReadOutcome::Success);
                Ok(r)
            }
            Err(_) => {
                self.failures.record(SensorFamily::Barometer2, ReadOutcome::Failure);
                crate::log_warn!("baro2 retries exhausted, logging degraded record");
                Ok(BaroReading::zeroed())
            }
        }
    }

    /// Per-field last-known update: a field is refreshed only when the new
    /// validated fix differs from the retained value
    fn update_last_known(&mut self, fix: &PositionReading) {
        if fix.date != self.last_position.date {
            self.last_position.date = fix.date;
        }
        if fix.time != self.last_position.time {
            self.last_position.time = fix.time;
        }
        if fix.latitude != self.last_position.latitude {
            self.last_position.latitude = fix.latitude;
        }
        if fix.longitude != self.last_position.longitude {
            self.last_position.longitude = fix.longitude;
        }
        if fix.satellites != self.last_position.satellites {
            self.last_position.satellites = fix.satellites;
        }
        if fix.hdop != self.last_position.hdop {
            self.last_position.hdop = fix.hdop;
        }
        if fix.altitude != self.last_position.altitude {
            self.last_position.altitude = fix.altitude;
        }
        if fix.speed != self.last_position.speed {
            self.last_position.speed = fix.speed;
        }
        if fix.course != self.last_position.course {
            self.last_position.course = fix.course;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::mock::{
        new_read_order_log, MockBaroSensor, MockDofSensor, MockEnvSensor, MockGasSensor,
        MockGpsSensor, MockLightSensor,
    };
    use crate::platform::mock::{MockStorage, MockTimer};
    use crate::telemetry::{AUX_FIELDS, DOF_FIELDS, POSITION_FIELDS};

    fn suite() -> SensorSuite<
        MockDofSensor,
        MockBaroSensor,
        MockGasSensor,
        MockEnvSensor,
        MockLightSensor,
        MockGpsSensor,
    > {
        SensorSuite {
            dof: MockDofSensor::new(),
            baro: MockBaroSensor::new(),
            gas: MockGasSensor::new(),
            env: MockEnvSensor::new(),
            light: MockLightSensor::new(),
            gps: MockGpsSensor::new(),
        }
    }

    fn log() -> TelemetryLog<MockStorage> {
        TelemetryLog::new(MockStorage::new(), &PayloadConfig::default())
    }

    fn good_fix() -> PositionReading {
        PositionReading {
            date: 230825,
            time: 14300000,
            latitude: 40.014984,
            longitude: -105.270546,
            satellites: 9,
            hdop: 1.1,
            altitude: 1624.0,
            speed: 0.2,
            course: 12.0,
        }
    }

    #[test]
    fn test_init_sensors_reports_missing_family() {
        let mut scheduler = TelemetryScheduler::new(PayloadConfig::default());
        let mut sensors = suite();
        sensors.gps.fail_init();

        assert_eq!(
            scheduler.init_sensors(&mut sensors),
            Err(FatalError::SensorMissing(SensorFamily::Position))
        );
    }

    #[test]
    fn test_dof_failure_increments_only_inertial_counter() {
        let mut scheduler = TelemetryScheduler::new(PayloadConfig::default());
        let mut log = log();
        let mut dof = MockDofSensor::new();
        dof.push_outcome(Err(SensorError::Bus));

        scheduler.dof_tick(&mut dof, &mut log).unwrap();

        assert_eq!(scheduler.failures().failures(SensorFamily::InertialBaro), 1);
        assert_eq!(scheduler.failures().total(), 1);
        // A zeroed 15-field record is still logged
        let lines = log.storage().lines("DOFDATA.CSV");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].split(',').count(), DOF_FIELDS);
    }

    #[test]
    fn test_baro_retry_bound_and_spacing() {
        let mut scheduler = TelemetryScheduler::new(PayloadConfig::default());
        let mut log = log();
        let mut timer = MockTimer::new();
        let mut baro = MockBaroSensor::with_default(BaroReading {
            pressure: 900.0,
            temperature: -10.0,
        });
        for _ in 0..6 {
            baro.push_outcome(Err(SensorError::Bus));
        }
        let mut gas = MockGasSensor::new();
        let mut env = MockEnvSensor::new();
        let mut light = MockLightSensor::new();

        scheduler
            .aux_tick(&mut timer, &mut baro, &mut gas, &mut env, &mut light, &mut log)
            .unwrap();

        // Initial read plus 5 retries, 100 ms before each retry
        assert_eq!(baro.read_count, 6);
        assert_eq!(timer.now_ms(), 500);
        assert_eq!(scheduler.failures().failures(SensorFamily::Barometer2), 1);

        // Degraded record logs zeroed pressure and temperature
        let lines = log.storage().lines("AUXDATA.CSV");
        let fields: std::vec::Vec<&str> = lines[0].split(',').collect();
        assert_eq!(fields[0], "0.00");
        assert_eq!(fields[1], "0.00");
    }

    #[test]
    fn test_baro_retry_stops_on_success() {
        let mut scheduler = TelemetryScheduler::new(PayloadConfig::default());
        let mut log = log();
        let mut timer = MockTimer::new();
        let mut baro = MockBaroSensor::with_default(BaroReading {
            pressure: 880.5,
            temperature: -21.0,
        });
        baro.push_outcome(Err(SensorError::Bus));
        baro.push_outcome(Err(SensorError::Bus));
        let mut gas = MockGasSensor::new();
        let mut env = MockEnvSensor::new();
        let mut light = MockLightSensor::new();

        scheduler
            .aux_tick(&mut timer, &mut baro, &mut gas, &mut env, &mut light, &mut log)
            .unwrap();

        assert_eq!(baro.read_count, 3);
        assert_eq!(timer.now_ms(), 200);
        assert_eq!(scheduler.failures().failures(SensorFamily::Barometer2), 0);

        let lines = log.storage().lines("AUXDATA.CSV");
        assert!(lines[0].starts_with("880.50,-21.00,"));
    }

    #[test]
    fn test_aux_read_order_is_fixed_despite_failures() {
        let mut scheduler = TelemetryScheduler::new(PayloadConfig::default());
        let mut log = log();
        let mut timer = MockTimer::new();
        let order = new_read_order_log();

        let mut baro = MockBaroSensor::new();
        let mut gas = MockGasSensor::new();
        let mut env = MockEnvSensor::new();
        let mut light = MockLightSensor::new();
        baro.attach_order_log(&order);
        gas.attach_order_log(&order);
        env.attach_order_log(&order);
        light.attach_order_log(&order);
        // Gas fails; humidity and light must still be read after it
        gas.push_outcome(Err(SensorError::Bus));

        scheduler
            .aux_tick(&mut timer, &mut baro, &mut gas, &mut env, &mut light, &mut log)
            .unwrap();

        assert_eq!(
            order.borrow().as_slice(),
            [
                SensorFamily::Barometer2,
                SensorFamily::GasArray,
                SensorFamily::HumidityTemp,
                SensorFamily::Light,
            ]
        );
        assert_eq!(scheduler.failures().failures(SensorFamily::GasArray), 1);
        assert_eq!(log.storage().lines("AUXDATA.CSV").len(), 1);
    }

    #[test]
    fn test_out_of_range_humidity_counts_as_failure() {
        let mut scheduler = TelemetryScheduler::new(PayloadConfig::default());
        let mut log = log();
        let mut timer = MockTimer::new();
        let mut baro = MockBaroSensor::new();
        let mut gas = MockGasSensor::new();
        let mut env = MockEnvSensor::new();
        env.push_outcome(Ok(EnvReading {
            temperature: 25.0,
            humidity: 140.0,
        }));
        let mut light = MockLightSensor::new();

        scheduler
            .aux_tick(&mut timer, &mut baro, &mut gas, &mut env, &mut light, &mut log)
            .unwrap();

        assert_eq!(scheduler.failures().failures(SensorFamily::HumidityTemp), 1);
        let lines = log.storage().lines("AUXDATA.CSV");
        assert_eq!(lines[0].split(',').count(), AUX_FIELDS);
    }

    #[test]
    fn test_position_failure_substitutes_last_known() {
        let mut scheduler = TelemetryScheduler::new(PayloadConfig::default());
        let mut log = log();
        let mut gps = MockGpsSensor::new();
        gps.push_outcome(Ok(good_fix()));
        gps.push_outcome(Err(SensorError::NoFix));

        scheduler.position_tick(&mut gps, &mut log).unwrap();
        scheduler.position_tick(&mut gps, &mut log).unwrap();

        let lines = log.storage().lines("GPSDATA.CSV");
        assert_eq!(lines.len(), 2);
        // Failed cycle re-emits the previous fix, not zeros
        assert_eq!(lines[0], lines[1]);
        assert!(lines[1].contains("40.014984"));
        assert_eq!(scheduler.failures().failures(SensorFamily::Position), 1);
    }

    #[test]
    fn test_position_hdop_gate() {
        let mut scheduler = TelemetryScheduler::new(PayloadConfig::default());
        let mut log = log();
        let mut gps = MockGpsSensor::new();
        let mut weak_fix = good_fix();
        weak_fix.hdop = 9.9;
        weak_fix.latitude = 41.0;
        gps.push_outcome(Ok(weak_fix));

        scheduler.position_tick(&mut gps, &mut log).unwrap();

        // Poor-quality fix is not accepted as an update
        assert_eq!(scheduler.last_known().latitude, 0.0);
        assert_eq!(scheduler.failures().failures(SensorFamily::Position), 1);
        let lines = log.storage().lines("GPSDATA.CSV");
        assert_eq!(lines[0].split(',').count(), POSITION_FIELDS);
    }

    #[test]
    fn test_aux_tier_dof_tick_count() {
        let config = PayloadConfig {
            dof_period_ms: 100,
            aux_period_ms: 500,
            ..PayloadConfig::default()
        };
        let mut scheduler = TelemetryScheduler::new(config.clone());
        let mut log = TelemetryLog::new(MockStorage::new(), &config);
        let mut timer = MockTimer::new();
        let mut sensors = suite();

        scheduler
            .run_aux_tier(&mut timer, &mut sensors, &mut log)
            .unwrap();

        // 500 ms tier at a 100 ms inner period: five DOF ticks, one Aux set
        assert_eq!(sensors.dof.read_count, 5);
        assert_eq!(sensors.baro.read_count, 1);
        assert_eq!(log.storage().lines("DOFDATA.CSV").len(), 5);
        assert_eq!(log.storage().lines("AUXDATA.CSV").len(), 1);
    }

    #[test]
    fn test_storage_failure_is_fatal() {
        let mut scheduler = TelemetryScheduler::new(PayloadConfig::default());
        let mut storage = MockStorage::new();
        storage.inject_open_failure();
        let mut log = TelemetryLog::new(storage, &PayloadConfig::default());
        let mut dof = MockDofSensor::new();

        let result = scheduler.dof_tick(&mut dof, &mut log);
        assert!(matches!(result, Err(FatalError::Storage(_))));
    }
}
