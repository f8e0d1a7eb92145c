//! GPS receiver trait (Position stream)

use super::SensorError;

/// One position fix from the GPS receiver
///
/// Field order matches the Position log record (9 fields). Latitude and
/// longitude are `f64` so the six-decimal map links stay exact.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PositionReading {
    /// UTC date, ddmmyy
    pub date: u32,
    /// UTC time, hhmmsscc
    pub time: u32,
    /// Latitude, degrees
    pub latitude: f64,
    /// Longitude, degrees
    pub longitude: f64,
    /// Satellites used in the fix
    pub satellites: u8,
    /// Horizontal dilution of precision (lower is better)
    pub hdop: f32,
    /// Altitude above sea level, m
    pub altitude: f32,
    /// Ground speed, m/s
    pub speed: f32,
    /// Course over ground, degrees
    pub course: f32,
}

impl PositionReading {
    /// All-zero reading, the initial last-known value before the first fix
    pub const fn zeroed() -> Self {
        Self {
            date: 0,
            time: 0,
            latitude: 0.0,
            longitude: 0.0,
            satellites: 0,
            hdop: 0.0,
            altitude: 0.0,
            speed: 0.0,
            course: 0.0,
        }
    }
}

/// GPS receiver capability
///
/// `read()` returns the receiver's current fix data including its HDOP.
/// Fix-quality gating (HDOP below the configured bound) is the scheduler's
/// decision, not the driver's; a failed or stale read returns
/// `SensorError::NoFix`.
pub trait PositionSensor {
    /// Probe the receiver
    fn init(&mut self) -> Result<(), SensorError>;

    /// Read the current fix data
    fn read(&mut self) -> Result<PositionReading, SensorError>;
}
