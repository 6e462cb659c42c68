use crate::connection::{CommandId, CompletionErrorCode};

/// The ways sending a command with [`Ipmi::send_recv`](crate::Ipmi::send_recv)
/// can fail.
///
/// `CON` is the error type of the connection, `P` the error type the command
/// reports when it cannot parse a response.
#[derive(Clone, Debug, PartialEq)]
pub enum IpmiError<CON, P> {
    /// The response belongs to a different command than the one sent.
    UnexpectedResponse { sent: CommandId, received: CommandId },
    /// The device answered with a completion code the command has no specific
    /// error for.
    Failed {
        command: CommandId,
        completion_code: CompletionErrorCode,
        data: Vec<u8>,
    },
    /// The command rejected the response.
    Command {
        command: CommandId,
        error: P,
        completion_code: Option<CompletionErrorCode>,
        data: Vec<u8>,
    },
    Connection(CON),
}

impl<CON, P> From<CON> for IpmiError<CON, P> {
    fn from(value: CON) -> Self {
        Self::Connection(value)
    }
}

impl<CON, P> IpmiError<CON, P> {
    /// Convert the connection error with `f`, leaving all other variants as
    /// they are.
    pub fn map<CON2, F>(self, f: F) -> IpmiError<CON2, P>
    where
        F: FnOnce(CON) -> CON2,
    {
        use IpmiError::*;

        match self {
            Connection(e) => Connection(f(e)),
            UnexpectedResponse { sent, received } => UnexpectedResponse { sent, received },
            Failed {
                command,
                completion_code,
                data,
            } => Failed {
                command,
                completion_code,
                data,
            },
            Command {
                command,
                error,
                completion_code,
                data,
            } => Command {
                command,
                error,
                completion_code,
                data,
            },
        }
    }

    /// The command that failed, if a response to it was received.
    pub fn command(&self) -> Option<CommandId> {
        match self {
            Self::UnexpectedResponse { sent, .. } => Some(*sent),
            Self::Failed { command, .. } | Self::Command { command, .. } => Some(*command),
            Self::Connection(_) => None,
        }
    }

    /// The completion code of the failed response, if the device answered
    /// with one.
    pub fn completion_code(&self) -> Option<CompletionErrorCode> {
        match self {
            Self::Failed {
                completion_code, ..
            } => Some(*completion_code),
            Self::Command {
                completion_code, ..
            } => *completion_code,
            _ => None,
        }
    }
}

impl<CON, P> core::fmt::Display for IpmiError<CON, P>
where
    CON: core::fmt::Debug,
    P: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnexpectedResponse { sent, received } => {
                write!(f, "sent {sent}, received a response to {received}")
            }
            Self::Failed {
                command,
                completion_code,
                ..
            } => write!(f, "{command} failed: {completion_code}"),
            Self::Command { command, error, .. } => {
                write!(f, "could not parse response to {command}: {error:?}")
            }
            Self::Connection(e) => write!(f, "connection error: {e:?}"),
        }
    }
}

impl<CON, P> std::error::Error for IpmiError<CON, P>
where
    CON: core::fmt::Debug,
    P: core::fmt::Debug,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::NetFn;

    const GET_SDR: CommandId = CommandId::new(NetFn::Storage, 0x23);

    #[test]
    fn map_only_touches_connection_errors() {
        let error: IpmiError<u8, ()> = IpmiError::Connection(3);
        assert_eq!(IpmiError::<u16, ()>::Connection(6), error.map(|v| v as u16 * 2));

        let failed: IpmiError<u8, ()> = IpmiError::Failed {
            command: GET_SDR,
            completion_code: CompletionErrorCode::RequestedDatapointNotPresent,
            data: Vec::new(),
        };

        let mapped = failed.map(u16::from);
        assert_eq!(
            Some(CompletionErrorCode::RequestedDatapointNotPresent),
            mapped.completion_code()
        );
        assert_eq!(Some(GET_SDR), mapped.command());
    }

    #[test]
    fn display() {
        let failed: IpmiError<(), ()> = IpmiError::Failed {
            command: GET_SDR,
            completion_code: CompletionErrorCode::ReservationCancelledOrInvalidId,
            data: Vec::new(),
        };

        assert_eq!(
            "Storage command 0x23 failed: reservation cancelled or invalid reservation ID (0xC5)",
            failed.to_string()
        );

        let unexpected: IpmiError<(), ()> = IpmiError::UnexpectedResponse {
            sent: GET_SDR,
            received: CommandId::new(NetFn::SensorEvent, 0x2D),
        };

        assert_eq!(
            "sent Storage command 0x23, received a response to SensorEvent command 0x2D",
            unexpected.to_string()
        );
    }
}
