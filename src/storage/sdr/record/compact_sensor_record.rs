use super::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IdStringModifier {
    Numeric,
    Alpha,
    Reserved(u8),
}

/// How the record is shared between several sensors with consecutive
/// sensor numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordSharing {
    pub direction: Option<Direction>,
    pub id_string_modifier: IdStringModifier,
    pub share_count: u8,
    pub entity_instance_increments: bool,
    pub modifier_offset: u8,
}

impl From<u16> for RecordSharing {
    fn from(value: u16) -> Self {
        let [sharing_1, sharing_2] = value.to_le_bytes();

        let id_string_modifier = match (sharing_1 & 0x30) >> 4 {
            0b00 => IdStringModifier::Numeric,
            0b01 => IdStringModifier::Alpha,
            v => IdStringModifier::Reserved(v),
        };

        Self {
            direction: Direction::try_from((sharing_1 & 0xC0) >> 6).ok(),
            id_string_modifier,
            share_count: sharing_1 & 0x0F,
            entity_instance_increments: (sharing_2 & 0x80) == 0x80,
            modifier_offset: sharing_2 & 0x7F,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompactSensorRecord {
    pub header: RecordHeader,
    pub common: SensorRecordCommon,
    pub record_sharing: u16,
    pub positive_hysteresis: u8,
    pub negative_hysteresis: u8,
    pub reserved: [u8; 3],
    pub oem: u8,
    pub device_id: DeviceId,
}

impl CompactSensorRecord {
    pub const BODY_LEN: usize = 26;

    pub fn new(id: RecordId, name: &str) -> Result<Self, DeviceIdTooLong> {
        Ok(Self {
            header: RecordHeader::new(id, RecordType::CompactSensor),
            common: SensorRecordCommon::default(),
            record_sharing: 0,
            positive_hysteresis: 0,
            negative_hysteresis: 0,
            reserved: [0; 3],
            oem: 0,
            device_id: DeviceId::try_from(name)?,
        })
    }

    pub(super) fn parse(header: RecordHeader, body: &[u8]) -> Result<Self, ParseError> {
        let (fixed, device_id) = split_body(body, Self::BODY_LEN)?;
        let common = SensorRecordCommon::parse(fixed).ok_or(ParseError::NotEnoughData)?;
        let d = &fixed[SensorRecordCommon::LEN..];

        Ok(Self {
            header,
            common,
            record_sharing: u16::from_le_bytes([d[0], d[1]]),
            positive_hysteresis: d[2],
            negative_hysteresis: d[3],
            reserved: [d[4], d[5], d[6]],
            oem: d[7],
            device_id,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut body = Vec::with_capacity(Self::BODY_LEN);

        self.common.write(&mut body);
        body.extend_from_slice(&self.record_sharing.to_le_bytes());
        body.push(self.positive_hysteresis);
        body.push(self.negative_hysteresis);
        body.extend_from_slice(&self.reserved);
        body.push(self.oem);

        assemble(&self.header, &body, &self.device_id)
    }

    pub fn record_sharing(&self) -> RecordSharing {
        RecordSharing::from(self.record_sharing)
    }
}

impl SensorRecord for CompactSensorRecord {
    fn common(&self) -> &SensorRecordCommon {
        &self.common
    }

    /// Compact records carry no conversion factors: the reading is only
    /// reported, as-is, when the unit byte marks it as a non-analog value.
    fn reading_value(&self, raw: u8) -> Option<f64> {
        let reading_type = self.common.event_reading_type();
        let reports_value = reading_type.is_threshold()
            || reading_type.is_generic()
            || reading_type.is_sensor_specific();

        if reports_value && (self.common.unit & 0xC0) == 0xC0 {
            Some(raw as f64)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chassis_intrusion() -> CompactSensorRecord {
        let mut record =
            CompactSensorRecord::new(RecordId::new_raw(0x0102), "Intrusion").unwrap();

        record.common.sensor_number = 0x51;
        record.common.sensor_type = 0x05;
        record.common.event_reading_type = 0x6F;
        record.common.assertion_event_mask = 0x0001;
        record.record_sharing = 0x8142;
        record.reserved = [1, 2, 3];
        record.oem = 0xEE;

        record
    }

    #[test]
    fn round_trip() {
        let record = chassis_intrusion();
        let bytes = record.encode();

        assert_eq!(HEADER_LEN + 26 + 1 + 9, bytes.len());
        assert_eq!(26 + 1 + 9, bytes[4] as usize);
        assert_eq!(&[0x42, 0x81], &bytes[HEADER_LEN + 18..HEADER_LEN + 20]);

        assert_eq!(
            Ok(Record::CompactSensor(record)),
            Record::decode(RecordType::CompactSensor, &bytes)
        );
    }

    #[test]
    fn sharing() {
        let sharing = chassis_intrusion().record_sharing();

        assert_eq!(Some(Direction::Input), sharing.direction);
        assert_eq!(IdStringModifier::Numeric, sharing.id_string_modifier);
        assert_eq!(2, sharing.share_count);
        assert!(sharing.entity_instance_increments);
        assert_eq!(1, sharing.modifier_offset);
    }

    #[test]
    fn readings() {
        let mut record = chassis_intrusion();
        assert_eq!(None, record.reading_value(7));

        record.common.unit = 0xC0;
        assert_eq!(Some(7.0), record.reading_value(7));

        record.common.event_reading_type = 0x70;
        assert_eq!(None, record.reading_value(7));
    }

    #[test]
    fn id_length_mismatch() {
        let mut bytes = chassis_intrusion().encode();
        bytes.truncate(bytes.len() - 2);

        assert_eq!(
            Err(ParseError::IdLengthMismatch {
                declared: 9,
                available: 7
            }),
            Record::decode(RecordType::CompactSensor, &bytes)
        );
    }
}
