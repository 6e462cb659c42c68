use crate::storage::sdr::{
    event_offset::{event_offset_desc, has_event_offset_table},
    event_reading_type_code::EventReadingTypeCodes,
    record::{ThresholdKind, ThresholdMask},
    SensorType,
};

/// The status of a sensor without asserted thresholds.
pub const STATUS_OK: &str = "ok";

/// The status of a sensor whose reading could not be obtained.
pub const STATUS_NOT_AVAILABLE: &str = "ns";

/// Most severe first.
const THRESHOLD_PRIORITY: [ThresholdKind; 6] = [
    ThresholdKind::LowerNonRecoverable,
    ThresholdKind::UpperNonRecoverable,
    ThresholdKind::LowerCritical,
    ThresholdKind::UpperCritical,
    ThresholdKind::LowerNonCritical,
    ThresholdKind::UpperNonCritical,
];

#[derive(Debug, Clone, PartialEq)]
pub struct SensorStatus {
    pub status: &'static str,
    /// Descriptions of the asserted event offsets, in ascending offset order.
    /// An offset without a description is an empty string.
    pub events: Vec<&'static str>,
}

/// Describe the state bytes of a reading.
///
/// Threshold sensors get the name of their most severe asserted threshold as
/// status. Generic discrete and sensor-specific sensors with a description
/// table get one event per asserted offset. Everything else is `"ok"`.
pub fn describe(
    reading_type: EventReadingTypeCodes,
    sensor_type: SensorType,
    state_1: u8,
    state_2: u8,
) -> SensorStatus {
    if reading_type.is_threshold() {
        let asserted = ThresholdMask::from_bits_truncate(state_1);

        let status = THRESHOLD_PRIORITY
            .iter()
            .find(|kind| asserted.contains(ThresholdMask::for_kind(**kind)))
            .map(ThresholdKind::name)
            .unwrap_or(STATUS_OK);

        return SensorStatus {
            status,
            events: Vec::new(),
        };
    }

    let mut events = Vec::new();

    let described = reading_type.is_generic() || reading_type.is_sensor_specific();

    if described && has_event_offset_table(reading_type, sensor_type) {
        let state = u16::from_le_bytes([state_1, state_2]);

        for offset in 0..16u8 {
            if state & (1 << offset) == 0 {
                continue;
            }

            events.push(event_offset_desc(reading_type, sensor_type, offset).unwrap_or(""));
        }
    }

    SensorStatus {
        status: STATUS_OK,
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threshold(state_1: u8) -> &'static str {
        describe(
            EventReadingTypeCodes::Threshold,
            SensorType::Temperature,
            state_1,
            0,
        )
        .status
    }

    #[test]
    fn threshold_priority() {
        assert_eq!("ok", threshold(0));
        assert_eq!("Lower Non-Recoverable", threshold(0x04 | 0x10));
        assert_eq!("Upper Non-Recoverable", threshold(0x20 | 0x02));
        assert_eq!("Lower Critical", threshold(0x02 | 0x10 | 0x01));
        assert_eq!("Upper Critical", threshold(0x10 | 0x08));
        assert_eq!("Lower Non-Critical", threshold(0x01 | 0x08));
        assert_eq!("Upper Non-Critical", threshold(0x08));
        // Reserved bits are not thresholds.
        assert_eq!("ok", threshold(0xC0));
    }

    #[test]
    fn generic_events() {
        let status = describe(
            EventReadingTypeCodes::DiscreteGeneric(0x03),
            SensorType::Reserved(0),
            0x03,
            0x00,
        );

        assert_eq!("ok", status.status);
        assert_eq!(vec!["State Deasserted", "State Asserted"], status.events);
    }

    #[test]
    fn offsets_without_a_phrase_are_blank() {
        let status = describe(
            EventReadingTypeCodes::DiscreteGeneric(0x03),
            SensorType::Reserved(0),
            0x81,
            0x00,
        );

        assert_eq!(vec!["State Deasserted", ""], status.events);

        let status = describe(
            EventReadingTypeCodes::DiscreteGeneric(0x03),
            SensorType::Reserved(0),
            0x80,
            0xFF,
        );

        assert_eq!(vec![""; 9], status.events);
    }

    #[test]
    fn codes_without_a_table_have_no_events() {
        let generic = describe(
            EventReadingTypeCodes::DiscreteGeneric(0x0D),
            SensorType::Reserved(0),
            0xFF,
            0xFF,
        );
        assert!(generic.events.is_empty());

        let specific = describe(EventReadingTypeCodes::SensorSpecific, SensorType::Fan, 0x01, 0x00);
        assert!(specific.events.is_empty());
    }

    #[test]
    fn sensor_specific_events() {
        let status = describe(
            EventReadingTypeCodes::SensorSpecific,
            SensorType::PhysicalSecurity,
            0x01,
            0x00,
        );

        assert_eq!("ok", status.status);
        assert_eq!(1, status.events.len());
    }

    #[test]
    fn other_reading_types() {
        let status = describe(EventReadingTypeCodes::Oem(0x70), SensorType::Fan, 0xFF, 0xFF);

        assert_eq!(
            SensorStatus {
                status: "ok",
                events: Vec::new()
            },
            status
        );
    }
}
