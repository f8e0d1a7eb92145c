//! Scripted mock sensors for host testing
//!
//! Each mock returns a fixed default reading unless a script of outcomes has
//! been queued. An optional shared order log records the family of every
//! read, so tests can assert the fixed Auxiliary-tier read order.

#![cfg(any(test, feature = "mock"))]

use core::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use super::traits::{
    BaroReading, BaroSensor, DofReading, DofSensor, EnvReading, GasArraySensor, GasReading,
    HumidityTempSensor, LightReading, LightSensor, PositionReading, PositionSensor, SensorError,
    SensorFamily,
};

/// Shared log of read calls in the order they happened
pub type ReadOrderLog = Rc<RefCell<Vec<SensorFamily>>>;

/// Create an empty read-order log to attach to several mocks
pub fn new_read_order_log() -> ReadOrderLog {
    Rc::new(RefCell::new(Vec::new()))
}

macro_rules! mock_sensor {
    ($name:ident, $trait:ident, $reading:ty, $family:expr) => {
        /// Scripted mock for one sensor family
        #[derive(Debug, Default)]
        pub struct $name {
            default: $reading,
            script: VecDeque<Result<$reading, SensorError>>,
            order_log: Option<ReadOrderLog>,
            fail_init: bool,
            /// Number of `read()` calls observed
            pub read_count: u32,
        }

        impl $name {
            /// Create a mock returning zeroed readings
            pub fn new() -> Self {
                Self::default()
            }

            /// Create a mock returning `default` when the script is empty
            pub fn with_default(default: $reading) -> Self {
                Self {
                    default,
                    ..Self::default()
                }
            }

            /// Queue one scripted outcome (consumed in FIFO order)
            pub fn push_outcome(&mut self, outcome: Result<$reading, SensorError>) {
                self.script.push_back(outcome);
            }

            /// Make `init()` report the sensor as absent
            pub fn fail_init(&mut self) {
                self.fail_init = true;
            }

            /// Record reads into a shared order log
            pub fn attach_order_log(&mut self, log: &ReadOrderLog) {
                self.order_log = Some(Rc::clone(log));
            }
        }

        impl $trait for $name {
            fn init(&mut self) -> Result<(), SensorError> {
                if self.fail_init {
                    Err(SensorError::NotDetected)
                } else {
                    Ok(())
                }
            }

            fn read(&mut self) -> Result<$reading, SensorError> {
                self.read_count += 1;
                if let Some(log) = &self.order_log {
                    log.borrow_mut().push($family);
                }
                match self.script.pop_front() {
                    Some(outcome) => outcome,
                    None => Ok(self.default),
                }
            }
        }
    };
}

mock_sensor!(MockDofSensor, DofSensor, DofReading, SensorFamily::InertialBaro);
mock_sensor!(MockBaroSensor, BaroSensor, BaroReading, SensorFamily::Barometer2);
mock_sensor!(MockGasSensor, GasArraySensor, GasReading, SensorFamily::GasArray);
mock_sensor!(MockEnvSensor, HumidityTempSensor, EnvReading, SensorFamily::HumidityTemp);
mock_sensor!(MockLightSensor, LightSensor, LightReading, SensorFamily::Light);
mock_sensor!(MockGpsSensor, PositionSensor, PositionReading, SensorFamily::Position);
