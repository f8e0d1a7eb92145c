//! Payload configuration
//!
//! Every tunable the flight crew may adjust between flights lives here with
//! a documented default. Values are fixed for the duration of a flight; the
//! struct is built once at startup and borrowed by the subsystems.

/// Default Inertial/Barometer tier period, ms
pub const DEFAULT_DOF_PERIOD_MS: u32 = 1_000;

/// Default Auxiliary tier period, ms
pub const DEFAULT_AUX_PERIOD_MS: u32 = 5_000;

/// Default Position tier period, ms
pub const DEFAULT_GPS_PERIOD_MS: u32 = 30_000;

/// Default modem settle delay after each AT command, ms
pub const DEFAULT_SETTLE_MS: u32 = 500;

/// Default HDOP bound for accepting a position fix
pub const DEFAULT_HDOP_MAX: f32 = 5.0;

/// Default retry bound for the secondary barometer
pub const DEFAULT_BARO_RETRIES: u8 = 5;

/// Default retry spacing for the secondary barometer, ms
pub const DEFAULT_BARO_RETRY_SPACING_MS: u32 = 100;

/// Tunable payload configuration
#[derive(Debug, Clone)]
pub struct PayloadConfig {
    /// Inertial/Barometer tier period, ms
    pub dof_period_ms: u32,
    /// Auxiliary tier period, ms
    pub aux_period_ms: u32,
    /// Position tier period, ms (also the command-poll cadence)
    pub gps_period_ms: u32,
    /// Modem settle delay after each AT command, ms
    pub settle_ms: u32,
    /// Maximum HDOP for a position fix to count as an update
    pub hdop_max: f32,
    /// Inline retry bound for the secondary barometer
    pub baro_retries: u8,
    /// Spacing between secondary-barometer retries, ms
    pub baro_retry_spacing_ms: u32,
    /// Recipient number for outbound messages
    pub recipient: &'static str,
    /// First program start: run the startup handshake
    pub first_pass: bool,
    /// Echo records to the console instead of storage (bench debugging)
    pub debug_echo: bool,
    /// DOF stream file name
    pub dof_log_path: &'static str,
    /// Aux stream file name
    pub aux_log_path: &'static str,
    /// Position stream file name
    pub gps_log_path: &'static str,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            dof_period_ms: DEFAULT_DOF_PERIOD_MS,
            aux_period_ms: DEFAULT_AUX_PERIOD_MS,
            gps_period_ms: DEFAULT_GPS_PERIOD_MS,
            settle_ms: DEFAULT_SETTLE_MS,
            hdop_max: DEFAULT_HDOP_MAX,
            baro_retries: DEFAULT_BARO_RETRIES,
            baro_retry_spacing_ms: DEFAULT_BARO_RETRY_SPACING_MS,
            recipient: "+15550000000",
            first_pass: true,
            debug_echo: false,
            dof_log_path: "DOFDATA.CSV",
            aux_log_path: "AUXDATA.CSV",
            gps_log_path: "GPSDATA.CSV",
        }
    }
}
