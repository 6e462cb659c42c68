mod get;
pub use get::GetSensorReading;

use crate::storage::sdr::record::ThresholdMask;

bitflags::bitflags! {
    /// The second byte of a sensor reading response.
    pub struct ReadingAvailability: u8 {
        const EVENT_MESSAGES_ENABLED = 1 << 7;
        const SCANNING_ENABLED = 1 << 6;
        const READING_UNAVAILABLE = 1 << 5;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSensorReading {
    pub reading: u8,
    pub availability: ReadingAvailability,
    pub state_1: u8,
    /// Zero if the device did not send a second state byte.
    pub state_2: u8,
}

impl RawSensorReading {
    pub(crate) fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < 3 {
            return None;
        }

        Some(Self {
            reading: data[0],
            availability: ReadingAvailability::from_bits_truncate(data[1]),
            state_1: data[2],
            state_2: data.get(3).copied().unwrap_or(0),
        })
    }

    /// Whether the reading and state bytes hold valid data.
    pub fn is_available(&self) -> bool {
        !self.availability.contains(ReadingAvailability::READING_UNAVAILABLE)
    }

    /// The thresholds a threshold sensor is at or beyond.
    pub fn threshold_status(&self) -> ThresholdMask {
        ThresholdMask::from_bits_truncate(self.state_1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reading() {
        let reading = RawSensorReading::parse(&[0x2A, 0xC0, 0x12, 0x80]).unwrap();

        assert_eq!(0x2A, reading.reading);
        assert!(reading.is_available());
        assert!(reading
            .availability
            .contains(ReadingAvailability::SCANNING_ENABLED));
        assert_eq!(
            ThresholdMask::LOWER_CRITICAL | ThresholdMask::UPPER_CRITICAL,
            reading.threshold_status()
        );
        assert_eq!(0x80, reading.state_2);
    }

    #[test]
    fn second_state_byte_is_optional() {
        let reading = RawSensorReading::parse(&[0x00, 0x20, 0x01]).unwrap();

        assert!(!reading.is_available());
        assert_eq!(0, reading.state_2);

        assert_eq!(None, RawSensorReading::parse(&[0x00, 0x20]));
    }
}
