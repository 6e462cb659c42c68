//! The Sensor Data Repository: commands, record codec, linearization and the
//! static tables used to describe sensors.

mod get_sdr;
pub use get_sdr::{GetDeviceSdr, SdrData};

mod reserve;
pub use reserve::ReserveSdrRepository;

mod get_info;
pub use get_info::{
    FreeSpace as SdrFreeSpace, GetRepositoryInfo as GetSdrRepositoryInfo,
    Operations as SdrOperations, RepositoryInfo as SdrRepositoryInfo, UpdateModality,
};

pub mod record;
pub use record::{ParseError as RecordParseError, Record, RecordType};

pub mod linearization;

pub mod event_reading_type_code;

pub mod event_offset;

mod sensor_type;
pub use sensor_type::{sensor_type_name, SensorType};

mod units;
pub use units::{base_unit_name, Unit};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(u16);

impl RecordId {
    pub const FIRST: Self = Self(0);
    pub const LAST: Self = Self(0xFFFF);

    pub fn new_raw(value: u16) -> Self {
        Self(value)
    }

    pub fn is_first(&self) -> bool {
        self.0 == Self::FIRST.0
    }

    pub fn is_last(&self) -> bool {
        self.0 == Self::LAST.0
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl core::fmt::Display for RecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}
