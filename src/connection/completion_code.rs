#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResponseUnavailableReason {
    Unknown,
    SdrInUpdate,
    DeviceInFwUpdate,
    BmcInitializing,
}

/// A completion code other than `0x00` (success).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CompletionErrorCode {
    NodeBusy,
    InvalidCommand,
    InvalidCommandForLun,
    ProcessingTimeout,
    OutOfSpace,
    ReservationCancelledOrInvalidId,
    RequestDataTruncated,
    RequestDataLenInvalid,
    RequestDataLengthLimitExceeded,
    ParameterOutOfRange,
    CannotReturnNumOfRequestedBytes,
    RequestedDatapointNotPresent,
    InvalidDataFieldInRequest,
    CommandIllegalForSensorOrRecord,
    ResponseUnavailable { reason: ResponseUnavailableReason },
    CannotExecuteDuplicateRequest,
    DestinationUnavailable,
    InsufficientPrivilege,
    CannotExecuteCommandInCurrentState,
    SubFunctionDisabled,
    Unspecified,
    Oem(u8),
    CommandSpecific(u8),
    Reserved(u8),
}

use CompletionErrorCode as Cc;
use ResponseUnavailableReason as Unavailable;

/// The completion codes with a fixed meaning, with their wire value and a
/// description.
const NAMED: [(u8, CompletionErrorCode, &str); 24] = [
    (0xC0, Cc::NodeBusy, "node busy"),
    (0xC1, Cc::InvalidCommand, "invalid command"),
    (0xC2, Cc::InvalidCommandForLun, "invalid command for LUN"),
    (0xC3, Cc::ProcessingTimeout, "timeout while processing command"),
    (0xC4, Cc::OutOfSpace, "out of space"),
    (
        0xC5,
        Cc::ReservationCancelledOrInvalidId,
        "reservation cancelled or invalid reservation ID",
    ),
    (0xC6, Cc::RequestDataTruncated, "request data truncated"),
    (0xC7, Cc::RequestDataLenInvalid, "request data length invalid"),
    (
        0xC8,
        Cc::RequestDataLengthLimitExceeded,
        "request data field length limit exceeded",
    ),
    (0xC9, Cc::ParameterOutOfRange, "parameter out of range"),
    (
        0xCA,
        Cc::CannotReturnNumOfRequestedBytes,
        "cannot return number of requested data bytes",
    ),
    (
        0xCB,
        Cc::RequestedDatapointNotPresent,
        "requested sensor, data, or record not present",
    ),
    (0xCC, Cc::InvalidDataFieldInRequest, "invalid data field in request"),
    (
        0xCD,
        Cc::CommandIllegalForSensorOrRecord,
        "command illegal for specified sensor or record type",
    ),
    (
        0xCE,
        Cc::ResponseUnavailable {
            reason: Unavailable::Unknown,
        },
        "command response could not be provided",
    ),
    (0xCF, Cc::CannotExecuteDuplicateRequest, "cannot execute duplicated request"),
    (
        0xD0,
        Cc::ResponseUnavailable {
            reason: Unavailable::SdrInUpdate,
        },
        "SDR repository in update mode",
    ),
    (
        0xD1,
        Cc::ResponseUnavailable {
            reason: Unavailable::DeviceInFwUpdate,
        },
        "device in firmware update mode",
    ),
    (
        0xD2,
        Cc::ResponseUnavailable {
            reason: Unavailable::BmcInitializing,
        },
        "BMC initialization in progress",
    ),
    (0xD3, Cc::DestinationUnavailable, "destination unavailable"),
    (0xD4, Cc::InsufficientPrivilege, "insufficient privilege level"),
    (
        0xD5,
        Cc::CannotExecuteCommandInCurrentState,
        "command cannot be executed in the present state",
    ),
    (0xD6, Cc::SubFunctionDisabled, "sub-function disabled or unavailable"),
    (0xFF, Cc::Unspecified, "unspecified error"),
];

impl TryFrom<u8> for CompletionErrorCode {
    /// The completion code was `0x00`, i.e. the command succeeded.
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value == 0x00 {
            return Err(());
        }

        if let Some((_, code, _)) = NAMED.iter().find(|(raw, ..)| *raw == value) {
            return Ok(*code);
        }

        Ok(match value {
            0x01..=0x7E => Cc::Oem(value),
            0x80..=0xBE => Cc::CommandSpecific(value),
            _ => Cc::Reserved(value),
        })
    }
}

impl From<CompletionErrorCode> for u8 {
    fn from(value: CompletionErrorCode) -> Self {
        match value {
            Cc::Oem(v) | Cc::CommandSpecific(v) | Cc::Reserved(v) => v,
            named => NAMED
                .iter()
                .find(|(_, code, _)| *code == named)
                .map(|(raw, ..)| *raw)
                .unwrap_or(0xFF),
        }
    }
}

impl CompletionErrorCode {
    /// Whether this completion code is a reserved value or not.
    pub fn is_reserved(&self) -> bool {
        matches!(self, Self::Reserved(_))
    }

    /// Whether the device rejected the request because the reservation it
    /// carried is no longer valid.
    pub fn is_reservation_lost(&self) -> bool {
        matches!(self, Self::ReservationCancelledOrInvalidId)
    }
}

impl core::fmt::Display for CompletionErrorCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let raw = u8::from(*self);

        let description = match self {
            Cc::Oem(_) => "OEM completion code",
            Cc::CommandSpecific(_) => "command-specific completion code",
            Cc::Reserved(_) => "reserved completion code",
            named => NAMED
                .iter()
                .find(|(_, code, _)| code == named)
                .map(|(_, _, description)| *description)
                .unwrap_or("unknown completion code"),
        };

        write!(f, "{description} (0x{raw:02X})")
    }
}
