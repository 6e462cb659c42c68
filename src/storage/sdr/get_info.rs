use crate::{
    connection::{IpmiCommand, Message, NetFn, NotEnoughData},
    fmt::LogItem,
    log_vec,
    storage::Timestamp,
    Loggable,
};

/// The Get SDR Repository Info command.
pub struct GetRepositoryInfo;

impl From<GetRepositoryInfo> for Message {
    fn from(_: GetRepositoryInfo) -> Self {
        Message::new_request(NetFn::Storage, 0x20, Vec::new())
    }
}

impl IpmiCommand for GetRepositoryInfo {
    type Output = RepositoryInfo;
    type Error = NotEnoughData;

    fn parse_success_response(data: &[u8]) -> Result<Self::Output, Self::Error> {
        RepositoryInfo::parse(data).ok_or(NotEnoughData)
    }
}

/// Free space in the repository, in bytes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FreeSpace {
    Full,
    AtLeast(u16),
    Unspecified,
}

impl From<u16> for FreeSpace {
    fn from(value: u16) -> Self {
        match value {
            0 => Self::Full,
            u16::MAX => Self::Unspecified,
            bytes => Self::AtLeast(bytes),
        }
    }
}

impl core::fmt::Display for FreeSpace {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Full => f.write_str("none"),
            Self::AtLeast(bytes) => write!(f, "{bytes} bytes or more"),
            Self::Unspecified => f.write_str("unspecified"),
        }
    }
}

/// How the repository must be put into update mode before it can be
/// written to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpdateModality {
    Unspecified,
    NonModal,
    Modal,
    Both,
}

bitflags::bitflags! {
    /// The optional repository commands a device supports.
    pub struct Operations: u8 {
        const GET_ALLOCATION_INFO = 0x01;
        const RESERVE = 0x02;
        const PARTIAL_ADD = 0x04;
        const DELETE = 0x08;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RepositoryInfo {
    pub version_major: u8,
    pub version_minor: u8,
    pub record_count: u16,
    pub free_space: FreeSpace,
    pub most_recent_addition: Timestamp,
    pub most_recent_erase: Timestamp,
    /// A record could not be added because the repository was full.
    pub overflow: bool,
    pub modality: UpdateModality,
    pub operations: Operations,
}

impl RepositoryInfo {
    pub fn parse(data: &[u8]) -> Option<Self> {
        let (&version, rest) = data.split_first()?;
        let (count, rest) = rest.split_at(2.min(rest.len()));
        let (free, rest) = rest.split_at(2.min(rest.len()));
        let (addition, rest) = rest.split_at(4.min(rest.len()));
        let (erase, rest) = rest.split_at(4.min(rest.len()));
        let support = *rest.first()?;

        let le_u16 = |b: &[u8]| u16::from_le_bytes([b[0], b[1]]);
        let le_u32 = |b: &[u8]| u32::from_le_bytes([b[0], b[1], b[2], b[3]]);

        let modality = match (support >> 5) & 0b11 {
            0b00 => UpdateModality::Unspecified,
            0b01 => UpdateModality::NonModal,
            0b10 => UpdateModality::Modal,
            _ => UpdateModality::Both,
        };

        // The version is BCD, with the minor version in the high nibble.
        Some(Self {
            version_major: version & 0x0F,
            version_minor: version >> 4,
            record_count: le_u16(count),
            free_space: le_u16(free).into(),
            most_recent_addition: le_u32(addition).into(),
            most_recent_erase: le_u32(erase).into(),
            overflow: support & 0x80 != 0,
            modality,
            operations: Operations::from_bits_truncate(support),
        })
    }

    pub fn supports(&self, operations: Operations) -> bool {
        self.operations.contains(operations)
    }
}

impl Loggable for RepositoryInfo {
    fn as_log(&self) -> Vec<LogItem> {
        log_vec![
            (0, "SDR repository information"),
            (1, "Version", format!("{}.{}", self.version_major, self.version_minor)),
            (1, "Record count", self.record_count),
            (1, "Free space", self.free_space),
            (1, "Most recent add", self.most_recent_addition),
            (1, "Most recent erase", self.most_recent_erase),
            (1, "Overflow", self.overflow),
            (1, "Update modality", format!("{:?}", self.modality)),
            (1, "Operations", format!("{:?}", self.operations))
        ]
    }
}
