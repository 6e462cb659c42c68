//! Binary codec for the SDR record types this crate understands.
//!
//! Every record on the wire consists of a four byte header (record ID,
//! SDR version and record type), a length byte, a fixed-size body and a
//! trailing device ID string preceded by its type/length byte. Record
//! fields are stored as they appear on the wire so that decoding and
//! re-encoding a record is lossless. Typed views are available through
//! accessor methods.

mod full_sensor_record;
pub use full_sensor_record::FullSensorRecord;

mod compact_sensor_record;
pub use compact_sensor_record::{CompactSensorRecord, RecordSharing};

mod fru_device_locator;
pub use fru_device_locator::{FruDeviceLocatorRecord, FruDeviceType};

mod mc_device_locator;
pub use mc_device_locator::{DeviceCapabilities, GlobalInitialization, McDeviceLocatorRecord};

use crate::{connection::LogicalUnit, fmt::LogItem, log_vec, Loggable};

use super::{
    event_reading_type_code::EventReadingTypeCodes, linearization::DataFormat, RecordId,
    SensorType, Unit,
};

/// The SDR version written into newly constructed records (IPMI 1.5/2.0).
pub const SDR_VERSION: u8 = 0x51;

/// The maximum length of a device ID string, in bytes.
pub const MAX_DEVICE_ID_LEN: usize = 16;

/// The size of the record header plus the record length byte.
pub const HEADER_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    FullSensor,
    CompactSensor,
    FruDeviceLocator,
    McDeviceLocator,
    Unknown(u8),
}

impl From<u8> for RecordType {
    fn from(value: u8) -> Self {
        match value {
            0x01 => Self::FullSensor,
            0x02 => Self::CompactSensor,
            0x11 => Self::FruDeviceLocator,
            0x12 => Self::McDeviceLocator,
            v => Self::Unknown(v),
        }
    }
}

impl From<RecordType> for u8 {
    fn from(value: RecordType) -> Self {
        match value {
            RecordType::FullSensor => 0x01,
            RecordType::CompactSensor => 0x02,
            RecordType::FruDeviceLocator => 0x11,
            RecordType::McDeviceLocator => 0x12,
            RecordType::Unknown(v) => v,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordHeader {
    pub id: RecordId,
    /// The SDR version, in BCD with the minor version in the high nibble.
    pub version: u8,
    pub record_type: RecordType,
}

impl RecordHeader {
    pub fn new(id: RecordId, record_type: RecordType) -> Self {
        Self {
            id,
            version: SDR_VERSION,
            record_type,
        }
    }

    /// Parse the first four bytes of `data`. The length byte is not part of
    /// the header.
    pub fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }

        Some(Self {
            id: RecordId::new_raw(u16::from_le_bytes([data[0], data[1]])),
            version: data[2],
            record_type: RecordType::from(data[3]),
        })
    }

    pub fn version_major(&self) -> u8 {
        self.version & 0x0F
    }

    pub fn version_minor(&self) -> u8 {
        (self.version & 0xF0) >> 4
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.id.value().to_le_bytes());
        out.push(self.version);
        out.push(self.record_type.into());
    }
}

/// A device ID string was longer than [`MAX_DEVICE_ID_LEN`] bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIdTooLong {
    pub len: usize,
}

impl core::fmt::Display for DeviceIdTooLong {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "device ID is {} bytes long, at most {} are allowed",
            self.len, MAX_DEVICE_ID_LEN
        )
    }
}

impl std::error::Error for DeviceIdTooLong {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    NotEnoughData,
    UnsupportedRecordType(u8),
    IdLengthMismatch { declared: usize, available: usize },
    DeviceIdTooLong(DeviceIdTooLong),
}

impl From<DeviceIdTooLong> for ParseError {
    fn from(value: DeviceIdTooLong) -> Self {
        Self::DeviceIdTooLong(value)
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::NotEnoughData => write!(f, "not enough data"),
            ParseError::UnsupportedRecordType(ty) => {
                write!(f, "unsupported record type 0x{ty:02X}")
            }
            ParseError::IdLengthMismatch {
                declared,
                available,
            } => write!(
                f,
                "device ID declares {declared} bytes, but only {available} are available"
            ),
            ParseError::DeviceIdTooLong(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// The device ID string of a record: at most 16 bytes, usually ASCII.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceId(Vec<u8>);

impl DeviceId {
    pub fn new(value: impl Into<Vec<u8>>) -> Result<Self, DeviceIdTooLong> {
        let value = value.into();

        if value.len() > MAX_DEVICE_ID_LEN {
            Err(DeviceIdTooLong { len: value.len() })
        } else {
            Ok(Self(value))
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a type/length byte followed by the ID bytes. Bytes after the ID
    /// are ignored.
    fn parse(data: &[u8]) -> Result<Self, ParseError> {
        let (type_length, rest) = data.split_first().ok_or(ParseError::NotEnoughData)?;
        let declared = (type_length & 0x1F) as usize;

        if declared > rest.len() {
            return Err(ParseError::IdLengthMismatch {
                declared,
                available: rest.len(),
            });
        }

        Ok(Self::new(&rest[..declared])?)
    }

    fn write(&self, out: &mut Vec<u8>) {
        // 8-bit ASCII + Latin 1
        out.push(0xC0 | self.0.len() as u8);
        out.extend_from_slice(&self.0);
    }
}

impl TryFrom<&str> for DeviceId {
    type Error = DeviceIdTooLong;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.as_bytes())
    }
}

impl core::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

/// Split a record body into its fixed part of `fixed_len` bytes and the
/// device ID that follows it.
fn split_body(body: &[u8], fixed_len: usize) -> Result<(&[u8], DeviceId), ParseError> {
    if body.len() < fixed_len {
        return Err(ParseError::NotEnoughData);
    }

    let (fixed, id) = body.split_at(fixed_len);
    Ok((fixed, DeviceId::parse(id)?))
}

/// Assemble header, length byte, fixed body and device ID.
fn assemble(header: &RecordHeader, body: &[u8], device_id: &DeviceId) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + body.len() + 1 + device_id.len());

    header.write(&mut out);
    out.push((body.len() + 1 + device_id.len()) as u8);
    out.extend_from_slice(body);
    device_id.write(&mut out);

    out
}

/// Functionality shared by all SDR records.
pub trait SdrRecord {
    fn header(&self) -> &RecordHeader;

    fn device_id(&self) -> &DeviceId;

    fn record_id(&self) -> RecordId {
        self.header().id
    }

    fn record_type(&self) -> RecordType {
        self.header().record_type
    }
}

/// Functionality shared by full and compact sensor records.
pub trait SensorRecord: SdrRecord {
    fn common(&self) -> &SensorRecordCommon;

    /// The value of raw reading `raw`, or `None` if this sensor does not
    /// produce analog readings.
    fn reading_value(&self, raw: u8) -> Option<f64>;

    fn sensor_number(&self) -> u8 {
        self.common().sensor_number
    }

    fn sensor_type(&self) -> SensorType {
        self.common().sensor_type()
    }

    fn event_reading_type(&self) -> EventReadingTypeCodes {
        self.common().event_reading_type()
    }

    fn units(&self) -> SensorUnits {
        self.common().units()
    }
}

macro_rules! impl_sdr_record {
    ($($ty:ty),*) => {
        $(
            impl SdrRecord for $ty {
                fn header(&self) -> &RecordHeader {
                    &self.header
                }

                fn device_id(&self) -> &DeviceId {
                    &self.device_id
                }
            }
        )*
    };
}

impl_sdr_record!(
    FullSensorRecord,
    CompactSensorRecord,
    FruDeviceLocatorRecord,
    McDeviceLocatorRecord
);

#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    FullSensor(FullSensorRecord),
    CompactSensor(CompactSensorRecord),
    FruDeviceLocator(FruDeviceLocatorRecord),
    McDeviceLocator(McDeviceLocatorRecord),
}

impl Record {
    /// Decode `data` (header, length byte, body and device ID) as a record
    /// of type `record_type`.
    ///
    /// The type byte in the header of `data` is not consulted.
    pub fn decode(record_type: RecordType, data: &[u8]) -> Result<Self, ParseError> {
        if let RecordType::Unknown(ty) = record_type {
            return Err(ParseError::UnsupportedRecordType(ty));
        }

        if data.len() < HEADER_LEN {
            return Err(ParseError::NotEnoughData);
        }

        let header = RecordHeader::parse(data).ok_or(ParseError::NotEnoughData)?;
        let body = &data[HEADER_LEN..];

        let record = match record_type {
            RecordType::FullSensor => Self::FullSensor(FullSensorRecord::parse(header, body)?),
            RecordType::CompactSensor => {
                Self::CompactSensor(CompactSensorRecord::parse(header, body)?)
            }
            RecordType::FruDeviceLocator => {
                Self::FruDeviceLocator(FruDeviceLocatorRecord::parse(header, body)?)
            }
            RecordType::McDeviceLocator => {
                Self::McDeviceLocator(McDeviceLocatorRecord::parse(header, body)?)
            }
            RecordType::Unknown(ty) => return Err(ParseError::UnsupportedRecordType(ty)),
        };

        Ok(record)
    }

    pub fn encode(&self) -> Vec<u8> {
        match self {
            Record::FullSensor(r) => r.encode(),
            Record::CompactSensor(r) => r.encode(),
            Record::FruDeviceLocator(r) => r.encode(),
            Record::McDeviceLocator(r) => r.encode(),
        }
    }

    fn inner(&self) -> &dyn SdrRecord {
        match self {
            Record::FullSensor(r) => r as &dyn SdrRecord,
            Record::CompactSensor(r) => r,
            Record::FruDeviceLocator(r) => r,
            Record::McDeviceLocator(r) => r,
        }
    }

    /// The sensor described by this record, if it describes one.
    pub fn sensor(&self) -> Option<&dyn SensorRecord> {
        match self {
            Record::FullSensor(r) => Some(r as &dyn SensorRecord),
            Record::CompactSensor(r) => Some(r as &dyn SensorRecord),
            _ => None,
        }
    }

    pub fn full_sensor(&self) -> Option<&FullSensorRecord> {
        if let Record::FullSensor(full_sensor) = self {
            Some(full_sensor)
        } else {
            None
        }
    }

    pub fn compact_sensor(&self) -> Option<&CompactSensorRecord> {
        if let Record::CompactSensor(compact_sensor) = self {
            Some(compact_sensor)
        } else {
            None
        }
    }
}

impl SdrRecord for Record {
    fn header(&self) -> &RecordHeader {
        self.inner().header()
    }

    fn device_id(&self) -> &DeviceId {
        self.inner().device_id()
    }
}

impl From<FullSensorRecord> for Record {
    fn from(value: FullSensorRecord) -> Self {
        Self::FullSensor(value)
    }
}

impl From<CompactSensorRecord> for Record {
    fn from(value: CompactSensorRecord) -> Self {
        Self::CompactSensor(value)
    }
}

impl From<FruDeviceLocatorRecord> for Record {
    fn from(value: FruDeviceLocatorRecord) -> Self {
        Self::FruDeviceLocator(value)
    }
}

impl From<McDeviceLocatorRecord> for Record {
    fn from(value: McDeviceLocatorRecord) -> Self {
        Self::McDeviceLocator(value)
    }
}

/// The first 18 body bytes, shared by full and compact sensor records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SensorRecordCommon {
    pub owner_id: u8,
    /// Owner channel in the high nibble, FRU owner LUN and sensor owner LUN
    /// in the low nibble.
    pub owner_lun: u8,
    pub sensor_number: u8,
    pub entity_id: u8,
    pub entity_instance: u8,
    pub initialization: u8,
    pub capabilities: u8,
    pub sensor_type: u8,
    pub event_reading_type: u8,
    pub assertion_event_mask: u16,
    pub deassertion_event_mask: u16,
    pub discrete_reading_mask: u16,
    /// Data format, rate unit, modifier unit and percentage flag.
    pub unit: u8,
    pub base_unit: u8,
    pub modifier_unit: u8,
}

impl SensorRecordCommon {
    pub const LEN: usize = 18;

    fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < Self::LEN {
            return None;
        }

        Some(Self {
            owner_id: data[0],
            owner_lun: data[1],
            sensor_number: data[2],
            entity_id: data[3],
            entity_instance: data[4],
            initialization: data[5],
            capabilities: data[6],
            sensor_type: data[7],
            event_reading_type: data[8],
            assertion_event_mask: u16::from_le_bytes([data[9], data[10]]),
            deassertion_event_mask: u16::from_le_bytes([data[11], data[12]]),
            discrete_reading_mask: u16::from_le_bytes([data[13], data[14]]),
            unit: data[15],
            base_unit: data[16],
            modifier_unit: data[17],
        })
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[
            self.owner_id,
            self.owner_lun,
            self.sensor_number,
            self.entity_id,
            self.entity_instance,
            self.initialization,
            self.capabilities,
            self.sensor_type,
            self.event_reading_type,
        ]);
        out.extend_from_slice(&self.assertion_event_mask.to_le_bytes());
        out.extend_from_slice(&self.deassertion_event_mask.to_le_bytes());
        out.extend_from_slice(&self.discrete_reading_mask.to_le_bytes());
        out.extend_from_slice(&[self.unit, self.base_unit, self.modifier_unit]);
    }

    pub fn owner(&self) -> SensorOwner {
        SensorOwner::from(self.owner_id)
    }

    pub fn owner_channel(&self) -> u8 {
        (self.owner_lun & 0xF0) >> 4
    }

    pub fn fru_owner_lun(&self) -> LogicalUnit {
        LogicalUnit::from_low_bits(self.owner_lun >> 2)
    }

    pub fn sensor_owner_lun(&self) -> LogicalUnit {
        LogicalUnit::from_low_bits(self.owner_lun)
    }

    pub fn entity_instance(&self) -> EntityInstance {
        EntityInstance::from(self.entity_instance)
    }

    pub fn initialization(&self) -> SensorInitialization {
        SensorInitialization::from_bits_truncate(self.initialization)
    }

    pub fn capabilities(&self) -> SensorCapabilities {
        SensorCapabilities::from(self.capabilities)
    }

    pub fn sensor_type(&self) -> SensorType {
        SensorType::from(self.sensor_type)
    }

    pub fn event_reading_type(&self) -> EventReadingTypeCodes {
        EventReadingTypeCodes::from(self.event_reading_type)
    }

    pub fn units(&self) -> SensorUnits {
        SensorUnits::from(self.unit, self.base_unit, self.modifier_unit)
    }

    pub fn data_format(&self) -> DataFormat {
        DataFormat::from_unit_byte(self.unit)
    }

    /// Thresholds whose value can be read, for threshold sensors.
    pub fn readable_thresholds(&self) -> ThresholdMask {
        ThresholdMask::from_bits_truncate(self.discrete_reading_mask as u8)
    }

    /// Thresholds whose value can be set, for threshold sensors.
    pub fn settable_thresholds(&self) -> ThresholdMask {
        ThresholdMask::from_bits_truncate((self.discrete_reading_mask >> 8) as u8)
    }

    fn log_into(&self, level: usize, log: &mut Vec<LogItem>) {
        let sensor_owner = match self.owner() {
            SensorOwner::I2C(addr) => format!("I2C @ 0x{:02X}", addr),
            SensorOwner::System(addr) => format!("System @ 0x{:02X}", addr),
        };

        let sensor_type = self
            .sensor_type()
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("0x{:02X}", self.sensor_type));

        log.push((level, "Sensor owner", sensor_owner).into());
        log.push((level, "Owner channel", self.owner_channel()).into());
        log.push((level, "Owner LUN", self.sensor_owner_lun().value()).into());
        log.push((level, "Sensor number", self.sensor_number).into());
        log.push((level, "Sensor type", sensor_type).into());
        log.push((level, "Entity ID", self.entity_id).into());
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorOwner {
    I2C(u8),
    System(u8),
}

impl From<u8> for SensorOwner {
    fn from(value: u8) -> Self {
        let id = (value & 0xFE) >> 1;

        if (value & 1) == 1 {
            Self::System(id)
        } else {
            Self::I2C(id)
        }
    }
}

impl From<SensorOwner> for u8 {
    fn from(value: SensorOwner) -> u8 {
        match value {
            SensorOwner::I2C(id) => (id << 1) & 0xFE,
            SensorOwner::System(id) => ((id << 1) & 0xFE) | 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityRelativeTo {
    System,
    Device,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityInstance {
    Physical {
        relative: EntityRelativeTo,
        instance_number: u8,
    },
    LogicalContainer {
        relative: EntityRelativeTo,
        instance_number: u8,
    },
}

impl From<u8> for EntityInstance {
    fn from(value: u8) -> Self {
        let instance_number = value & 0x7F;
        let relative = if instance_number < 0x60 {
            EntityRelativeTo::System
        } else {
            EntityRelativeTo::Device
        };

        if (value & 0x80) == 0x80 {
            Self::LogicalContainer {
                relative,
                instance_number,
            }
        } else {
            Self::Physical {
                relative,
                instance_number,
            }
        }
    }
}

bitflags::bitflags! {
    /// Sensor initialization byte.
    pub struct SensorInitialization: u8 {
        const SETTABLE = 1 << 7;
        const SCANNING = 1 << 6;
        const EVENTS = 1 << 5;
        const THRESHOLDS = 1 << 4;
        const HYSTERESIS = 1 << 3;
        const TYPE = 1 << 2;
        const EVENTGEN_ON_STARTUP = 1 << 1;
        const SCANNING_ON_STARTUP = 1 << 0;
    }
}

bitflags::bitflags! {
    /// One bit per threshold, in the order used by the readable/settable
    /// threshold masks and by the state byte of threshold sensors.
    pub struct ThresholdMask: u8 {
        const LOWER_NON_CRITICAL = 1 << 0;
        const LOWER_CRITICAL = 1 << 1;
        const LOWER_NON_RECOVERABLE = 1 << 2;
        const UPPER_NON_CRITICAL = 1 << 3;
        const UPPER_CRITICAL = 1 << 4;
        const UPPER_NON_RECOVERABLE = 1 << 5;
    }
}

impl ThresholdMask {
    pub fn for_kind(kind: ThresholdKind) -> Self {
        match kind {
            ThresholdKind::LowerNonCritical => Self::LOWER_NON_CRITICAL,
            ThresholdKind::LowerCritical => Self::LOWER_CRITICAL,
            ThresholdKind::LowerNonRecoverable => Self::LOWER_NON_RECOVERABLE,
            ThresholdKind::UpperNonCritical => Self::UPPER_NON_CRITICAL,
            ThresholdKind::UpperCritical => Self::UPPER_CRITICAL,
            ThresholdKind::UpperNonRecoverable => Self::UPPER_NON_RECOVERABLE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdKind {
    LowerNonCritical,
    LowerCritical,
    LowerNonRecoverable,
    UpperNonCritical,
    UpperCritical,
    UpperNonRecoverable,
}

impl ThresholdKind {
    pub fn variants() -> impl Iterator<Item = Self> {
        [
            Self::LowerNonCritical,
            Self::LowerCritical,
            Self::LowerNonRecoverable,
            Self::UpperNonCritical,
            Self::UpperCritical,
            Self::UpperNonRecoverable,
        ]
        .into_iter()
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThresholdKind::LowerNonCritical => "Lower Non-Critical",
            ThresholdKind::LowerCritical => "Lower Critical",
            ThresholdKind::LowerNonRecoverable => "Lower Non-Recoverable",
            ThresholdKind::UpperNonCritical => "Upper Non-Critical",
            ThresholdKind::UpperCritical => "Upper Critical",
            ThresholdKind::UpperNonRecoverable => "Upper Non-Recoverable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HysteresisCapability {
    NoneOrUnspecified,
    Readable,
    ReadableAndSettable,
    FixedAndUnreadable,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdAccessCapability {
    None,
    Readable,
    ReadableAndSettable,
    FixedAndUnreadable,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorCapabilities {
    pub ignore: bool,
    pub auto_rearm: bool,
    pub hysteresis: HysteresisCapability,
    pub threshold_access: ThresholdAccessCapability,
    pub event_message_control: u8,
}

impl From<u8> for SensorCapabilities {
    fn from(caps: u8) -> Self {
        let hysteresis = match (caps & 0x30) >> 4 {
            0b00 => HysteresisCapability::NoneOrUnspecified,
            0b01 => HysteresisCapability::Readable,
            0b10 => HysteresisCapability::ReadableAndSettable,
            _ => HysteresisCapability::FixedAndUnreadable,
        };

        let threshold_access = match (caps & 0x0C) >> 2 {
            0b00 => ThresholdAccessCapability::None,
            0b01 => ThresholdAccessCapability::Readable,
            0b10 => ThresholdAccessCapability::ReadableAndSettable,
            _ => ThresholdAccessCapability::FixedAndUnreadable,
        };

        Self {
            ignore: (caps & 0x80) == 0x80,
            auto_rearm: (caps & 0x40) == 0x40,
            hysteresis,
            threshold_access,
            event_message_control: caps & 0b11,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateUnit {
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModifierUnit {
    BaseUnitDivByModifier(Unit),
    BaseUnitMulByModifier(Unit),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorUnits {
    pub rate: Option<RateUnit>,
    pub modifier: Option<ModifierUnit>,
    pub is_percentage: bool,
    pub base_unit: Unit,
}

impl SensorUnits {
    pub fn from(sensor_units_1: u8, base_unit: u8, modifier_unit: u8) -> Self {
        let rate = match (sensor_units_1 >> 3) & 0b111 {
            0b001 => Some(RateUnit::Microsecond),
            0b010 => Some(RateUnit::Millisecond),
            0b011 => Some(RateUnit::Second),
            0b100 => Some(RateUnit::Minute),
            0b101 => Some(RateUnit::Hour),
            0b110 => Some(RateUnit::Day),
            _ => None,
        };

        let modifier_unit = Unit::from(modifier_unit);

        let modifier = match (sensor_units_1 >> 1) & 0b11 {
            0b01 => Some(ModifierUnit::BaseUnitDivByModifier(modifier_unit)),
            0b10 => Some(ModifierUnit::BaseUnitMulByModifier(modifier_unit)),
            _ => None,
        };

        Self {
            rate,
            modifier,
            is_percentage: (sensor_units_1 & 0x1) == 0x1,
            base_unit: Unit::from(base_unit),
        }
    }

    pub fn display(&self, short: bool, value: f64) -> String {
        if self.is_percentage {
            format!("{value:.2} %")
        } else {
            self.base_unit.display(short, value)
        }
    }
}

/// The linearization function selected by a full sensor record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Linearization {
    Linear,
    Ln,
    Log10,
    Log2,
    E,
    Exp10,
    Exp2,
    OneOverX,
    Sqr,
    Cube,
    Sqrt,
    CubeRoot,
    NonLinear(u8),
    Oem(u8),
    Unknown(u8),
}

impl From<u8> for Linearization {
    fn from(value: u8) -> Self {
        match value & 0x7F {
            0 => Self::Linear,
            1 => Self::Ln,
            2 => Self::Log10,
            3 => Self::Log2,
            4 => Self::E,
            5 => Self::Exp10,
            6 => Self::Exp2,
            7 => Self::OneOverX,
            8 => Self::Sqr,
            9 => Self::Cube,
            10 => Self::Sqrt,
            11 => Self::CubeRoot,
            0x70 => Self::NonLinear(value),
            0x71..=0x7F => Self::Oem(value),
            v => Self::Unknown(v),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Direction {
    UnspecifiedNotApplicable,
    Input,
    Output,
}

impl TryFrom<u8> for Direction {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let dir = match value {
            0b00 => Self::UnspecifiedNotApplicable,
            0b01 => Self::Input,
            0b10 => Self::Output,
            _ => return Err(()),
        };
        Ok(dir)
    }
}

impl Loggable for Record {
    fn as_log(&self) -> Vec<LogItem> {
        let header = self.header();

        let kind = match self {
            Record::FullSensor(_) => "SDR Record (Full)",
            Record::CompactSensor(_) => "SDR Record (Compact)",
            Record::FruDeviceLocator(_) => "SDR Record (FRU Device Locator)",
            Record::McDeviceLocator(_) => "SDR Record (MC Device Locator)",
        };

        let version = format!("{}.{}", header.version_major(), header.version_minor());

        let mut log = log_vec![
            (0, kind),
            (1, "Record ID", header.id),
            (1, "SDR Version", version),
            (1, "Device ID", self.device_id())
        ];

        match self {
            Record::FullSensor(full) => {
                full.common.log_into(1, &mut log);

                let units = full.common.units();
                let display = |v: f64| units.display(true, v);

                let nominal = full.nominal_value().map(display);
                log.push((1, "Nominal reading", nominal.unwrap_or("Unknown".into())).into());

                for kind in ThresholdKind::variants() {
                    if full.common.readable_thresholds().contains(ThresholdMask::for_kind(kind)) {
                        log.push((1, kind.name(), display(full.threshold_value(kind))).into());
                    }
                }
            }
            Record::CompactSensor(compact) => {
                compact.common.log_into(1, &mut log);
                log.push((1, "Share count", compact.record_sharing().share_count).into());
            }
            Record::FruDeviceLocator(fru) => {
                log.push((1, "Access address", format!("0x{:02X}", fru.access_address)).into());
                log.push((1, "FRU device ID", fru.fru_device_id).into());
                log.push((1, "Logical", fru.is_logical()).into());
                log.push((1, "Device type", format!("{:?}", fru.device_type())).into());
            }
            Record::McDeviceLocator(mc) => {
                log.push((1, "Slave address", format!("0x{:02X}", mc.slave_address())).into());
                log.push((1, "Channel", mc.channel()).into());
                log.push((1, "Capabilities", format!("{:?}", mc.device_capabilities())).into());
            }
        }

        log
    }
}
