use super::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FruDeviceType {
    DimmMemoryId,
    IpmiFruInventory,
    ProcessorCartridge,
    Oem(u8),
    Other(u8),
}

impl From<u8> for FruDeviceType {
    fn from(value: u8) -> Self {
        match value {
            0x08 => Self::DimmMemoryId,
            0x09 | 0x10 => Self::IpmiFruInventory,
            0x0A => Self::ProcessorCartridge,
            0xC0..=0xFF => Self::Oem(value),
            v => Self::Other(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FruDeviceLocatorRecord {
    pub header: RecordHeader,
    pub access_address: u8,
    /// FRU device ID for logical devices, slave address for physical ones.
    pub fru_device_id: u8,
    /// Logical/physical flag, access LUN and private bus ID.
    pub access_lun_bus: u8,
    pub channel: u8,
    pub reserved: u8,
    pub device_type: u8,
    pub device_type_modifier: u8,
    pub entity_id: u8,
    pub entity_instance: u8,
    pub oem: u8,
    pub device_id: DeviceId,
}

impl FruDeviceLocatorRecord {
    pub const BODY_LEN: usize = 10;

    pub fn new(id: RecordId, name: &str) -> Result<Self, DeviceIdTooLong> {
        Ok(Self {
            header: RecordHeader::new(id, RecordType::FruDeviceLocator),
            access_address: 0,
            fru_device_id: 0,
            access_lun_bus: 0,
            channel: 0,
            reserved: 0,
            device_type: 0,
            device_type_modifier: 0,
            entity_id: 0,
            entity_instance: 0,
            oem: 0,
            device_id: DeviceId::try_from(name)?,
        })
    }

    pub(super) fn parse(header: RecordHeader, body: &[u8]) -> Result<Self, ParseError> {
        let (d, device_id) = split_body(body, Self::BODY_LEN)?;

        Ok(Self {
            header,
            access_address: d[0],
            fru_device_id: d[1],
            access_lun_bus: d[2],
            channel: d[3],
            reserved: d[4],
            device_type: d[5],
            device_type_modifier: d[6],
            entity_id: d[7],
            entity_instance: d[8],
            oem: d[9],
            device_id,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let body = [
            self.access_address,
            self.fru_device_id,
            self.access_lun_bus,
            self.channel,
            self.reserved,
            self.device_type,
            self.device_type_modifier,
            self.entity_id,
            self.entity_instance,
            self.oem,
        ];

        assemble(&self.header, &body, &self.device_id)
    }

    /// Whether the FRU is a logical device, accessed through FRU commands
    /// on the controller at `access_address`.
    pub fn is_logical(&self) -> bool {
        (self.access_lun_bus & 0x80) == 0x80
    }

    pub fn access_lun(&self) -> LogicalUnit {
        LogicalUnit::from_low_bits(self.access_lun_bus >> 3)
    }

    pub fn private_bus_id(&self) -> u8 {
        self.access_lun_bus & 0b111
    }

    pub fn channel_number(&self) -> u8 {
        (self.channel & 0xF0) >> 4
    }

    pub fn device_type(&self) -> FruDeviceType {
        FruDeviceType::from(self.device_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_logical_fru() {
        let data = [
            0x10, 0x00, 0x51, 0x11, 0x10, // header, length
            0x20, 0x00, 0x88, 0x00, 0x00, 0x10, 0x00, 0x07, 0x01, 0x00, // body
            0xC5, b'B', b'o', b'a', b'r', b'd',
        ];

        let record = match Record::decode(RecordType::FruDeviceLocator, &data) {
            Ok(Record::FruDeviceLocator(fru)) => fru,
            other => panic!("unexpected decode result {other:?}"),
        };

        assert_eq!(RecordId::new_raw(0x0010), record.record_id());
        assert_eq!(0x20, record.access_address);
        assert!(record.is_logical());
        assert_eq!(LogicalUnit::One, record.access_lun());
        assert_eq!(0, record.private_bus_id());
        assert_eq!(FruDeviceType::IpmiFruInventory, record.device_type());
        assert_eq!("Board", record.device_id().to_string());

        assert_eq!(&data[..], &record.encode());
    }

    #[test]
    fn round_trip() {
        let mut record = FruDeviceLocatorRecord::new(RecordId::new_raw(7), "DIMM A1").unwrap();
        record.access_lun_bus = 0x03;
        record.device_type = 0x08;
        record.reserved = 0x5A;

        assert!(!record.is_logical());
        assert_eq!(FruDeviceType::DimmMemoryId, record.device_type());

        let bytes = record.encode();
        assert_eq!(HEADER_LEN + 10 + 1 + 7, bytes.len());
        assert_eq!(
            Ok(Record::FruDeviceLocator(record)),
            Record::decode(RecordType::FruDeviceLocator, &bytes)
        );
    }
}
