/// The event/reading type code of a sensor. It determines how the state
/// bytes of a sensor reading are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventReadingTypeCodes {
    Unspecified,
    Threshold,
    DiscreteGeneric(u8),
    SensorSpecific,
    Oem(u8),
    Reserved(u8),
}

impl EventReadingTypeCodes {
    pub fn is_threshold(&self) -> bool {
        matches!(self, Self::Threshold)
    }

    pub fn is_generic(&self) -> bool {
        matches!(self, Self::DiscreteGeneric(_))
    }

    pub fn is_sensor_specific(&self) -> bool {
        matches!(self, Self::SensorSpecific)
    }

    pub fn is_oem(&self) -> bool {
        matches!(self, Self::Oem(_))
    }
}

impl From<u8> for EventReadingTypeCodes {
    fn from(value: u8) -> Self {
        match value {
            0x00 => Self::Unspecified,
            0x01 => Self::Threshold,
            0x02..=0x0C => Self::DiscreteGeneric(value),
            0x6F => Self::SensorSpecific,
            0x70..=0x7F => Self::Oem(value),
            v => Self::Reserved(v),
        }
    }
}

impl From<EventReadingTypeCodes> for u8 {
    fn from(value: EventReadingTypeCodes) -> Self {
        match value {
            EventReadingTypeCodes::Unspecified => 0x00,
            EventReadingTypeCodes::Threshold => 0x01,
            EventReadingTypeCodes::DiscreteGeneric(v) => v,
            EventReadingTypeCodes::SensorSpecific => 0x6F,
            EventReadingTypeCodes::Oem(v) => v,
            EventReadingTypeCodes::Reserved(v) => v,
        }
    }
}

#[test]
fn reading_type_round_trip() {
    for code in 0..=u8::MAX {
        assert_eq!(code, u8::from(EventReadingTypeCodes::from(code)));
    }

    assert!(EventReadingTypeCodes::from(0x01).is_threshold());
    assert!(EventReadingTypeCodes::from(0x0C).is_generic());
    assert!(!EventReadingTypeCodes::from(0x0D).is_generic());
    assert!(EventReadingTypeCodes::from(0x6F).is_sensor_specific());
    assert!(EventReadingTypeCodes::from(0x75).is_oem());
}
