use super::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlobalInitialization {
    EnableEventMessageGeneration,
    DisableEventMessageGeneration,
    DoNotInitialize,
    Reserved,
}

bitflags::bitflags! {
    pub struct DeviceCapabilities: u8 {
        const CHASSIS_DEVICE = 1 << 7;
        const BRIDGE = 1 << 6;
        const EVENT_GENERATOR = 1 << 5;
        const EVENT_RECEIVER = 1 << 4;
        const FRU_INVENTORY_DEVICE = 1 << 3;
        const SEL_DEVICE = 1 << 2;
        const SDR_REPOSITORY_DEVICE = 1 << 1;
        const SENSOR_DEVICE = 1 << 0;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct McDeviceLocatorRecord {
    pub header: RecordHeader,
    /// 7-bit I2C slave address in the upper seven bits.
    pub slave_address: u8,
    /// Channel number in the low nibble.
    pub channel: u8,
    /// Power state notification and global initialization.
    pub power_state_init: u8,
    pub capabilities: u8,
    pub reserved: [u8; 3],
    pub entity_id: u8,
    pub entity_instance: u8,
    pub oem: u8,
    pub device_id: DeviceId,
}

impl McDeviceLocatorRecord {
    pub const BODY_LEN: usize = 10;

    pub fn new(id: RecordId, name: &str) -> Result<Self, DeviceIdTooLong> {
        Ok(Self {
            header: RecordHeader::new(id, RecordType::McDeviceLocator),
            slave_address: 0,
            channel: 0,
            power_state_init: 0,
            capabilities: 0,
            reserved: [0; 3],
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
            slave_address: d[0],
            channel: d[1],
            power_state_init: d[2],
            capabilities: d[3],
            reserved: [d[4], d[5], d[6]],
            entity_id: d[7],
            entity_instance: d[8],
            oem: d[9],
            device_id,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut body = Vec::with_capacity(Self::BODY_LEN);

        body.extend_from_slice(&[
            self.slave_address,
            self.channel,
            self.power_state_init,
            self.capabilities,
        ]);
        body.extend_from_slice(&self.reserved);
        body.extend_from_slice(&[self.entity_id, self.entity_instance, self.oem]);

        assemble(&self.header, &body, &self.device_id)
    }

    /// The 7-bit I2C slave address of the controller.
    pub fn slave_address(&self) -> u8 {
        self.slave_address >> 1
    }

    pub fn channel(&self) -> u8 {
        self.channel & 0x0F
    }

    pub fn acpi_system_power_notification(&self) -> bool {
        (self.power_state_init & 0x80) == 0x80
    }

    pub fn acpi_device_power_notification(&self) -> bool {
        (self.power_state_init & 0x40) == 0x40
    }

    pub fn logs_initialization_errors(&self) -> bool {
        (self.power_state_init & 0x08) == 0x08
    }

    pub fn global_initialization(&self) -> GlobalInitialization {
        match self.power_state_init & 0b11 {
            0b00 => GlobalInitialization::EnableEventMessageGeneration,
            0b01 => GlobalInitialization::DisableEventMessageGeneration,
            0b10 => GlobalInitialization::DoNotInitialize,
            _ => GlobalInitialization::Reserved,
        }
    }

    pub fn device_capabilities(&self) -> DeviceCapabilities {
        DeviceCapabilities::from_bits_truncate(self.capabilities)
    }
}
