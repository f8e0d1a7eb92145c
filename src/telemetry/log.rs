//! Telemetry record log
//!
//! Append-only, comma-delimited stream files with a fixed field count per
//! stream. Every append opens the file, writes one line, flushes, and
//! closes before returning, so a power loss between ticks loses at most one
//! record. Storage failures propagate to the caller as fatal; a payload
//! that cannot log has no reason to keep flying.

use core::fmt::Write as _;

use heapless::String;

use crate::core::PayloadConfig;
use crate::devices::{BaroReading, DofReading, EnvReading, GasReading, LightReading, PositionReading};
use crate::platform::{
    error::StorageError, FileHandle, PlatformError, Result, StorageInterface,
};

/// Fields per DOF record
pub const DOF_FIELDS: usize = 15;

/// Fields per Aux record
pub const AUX_FIELDS: usize = 13;

/// Fields per Position record
pub const POSITION_FIELDS: usize = 9;

/// Line buffer capacity; generous for the widest record
const LINE_CAP: usize = 256;

/// Append-per-record stream writer
#[derive(Debug)]
pub struct TelemetryLog<S> {
    storage: S,
    dof_path: &'static str,
    aux_path: &'static str,
    gps_path: &'static str,
    debug_echo: bool,
}

impl<S: StorageInterface> TelemetryLog<S> {
    /// Create the log over a storage backend
    pub fn new(storage: S, config: &PayloadConfig) -> Self {
        Self {
            storage,
            dof_path: config.dof_log_path,
            aux_path: config.aux_log_path,
            gps_path: config.gps_log_path,
            debug_echo: config.debug_echo,
        }
    }

    /// Append one DOF record (15 fields)
    pub fn append_dof(&mut self, r: &DofReading) -> Result<()> {
        let mut line: String<LINE_CAP> = String::new();
        writeln!(
            line,
            "{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
            r.accel[0],
            r.accel[1],
            r.accel[2],
            r.gyro[0],
            r.gyro[1],
            r.gyro[2],
            r.mag[0],
            r.mag[1],
            r.mag[2],
            r.roll,
            r.pitch,
            r.heading,
            r.pressure,
            r.temperature,
            r.altitude,
        )
        .map_err(|_| PlatformError::Storage(StorageError::RecordTooLong))?;
        self.append_line(self.dof_path, &line)
    }

    /// Append one Aux record (13 fields)
    pub fn append_aux(
        &mut self,
        baro: &BaroReading,
        gas: &GasReading,
        env: &EnvReading,
        light: &LightReading,
    ) -> Result<()> {
        let mut line: String<LINE_CAP> = String::new();
        writeln!(
            line,
            "{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
            baro.pressure,
            baro.temperature,
            gas.channels[0],
            gas.channels[1],
            gas.channels[2],
            gas.channels[3],
            gas.channels[4],
            gas.channels[5],
            gas.channels[6],
            gas.channels[7],
            env.temperature,
            env.humidity,
            light.level,
        )
        .map_err(|_| PlatformError::Storage(StorageError::RecordTooLong))?;
        self.append_line(self.aux_path, &line)
    }

    /// Append one Position record (9 fields)
    pub fn append_position(&mut self, p: &PositionReading) -> Result<()> {
        let mut line: String<LINE_CAP> = String::new();
        writeln!(
            line,
            "{},{},{:.6},{:.6},{},{:.2},{:.2},{:.2},{:.2}",
            p.date,
            p.time,
            p.latitude,
            p.longitude,
            p.satellites,
            p.hdop,
            p.altitude,
            p.speed,
            p.course,
        )
        .map_err(|_| PlatformError::Storage(StorageError::RecordTooLong))?;
        self.append_line(self.gps_path, &line)
    }

    /// Access the storage backend (for test verification)
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn append_line(&mut self, path: &str, line: &str) -> Result<()> {
        if self.debug_echo {
            crate::log_info!("{}", line.trim_end());
            return Ok(());
        }
        let mut file = self.storage.open_append(path)?;
        file.write_all(line.as_bytes())?;
        file.flush()?;
        file.close()
    }
}
