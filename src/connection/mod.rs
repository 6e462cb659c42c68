//! Request/response messages and the transport abstraction.
//!
//! Every command in this crate is expressed as an [`IpmiCommand`]: it knows how
//! to turn itself into a [`Message`] and how to parse the data of a successful
//! response. Transports implement [`IpmiConnection`] and only move bytes.

mod completion_code;
pub use completion_code::{CompletionErrorCode, ResponseUnavailableReason};

mod impls;
pub use impls::{SimulatedRepository, Simulator, SimulatorError};

mod netfn;
pub use netfn::NetFn;

mod request;
pub use request::Request;

mod response;
pub use response::Response;

/// The logical unit of the BMC a request is addressed to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LogicalUnit {
    Zero = 0,
    One = 1,
    Two = 2,
    Three = 3,
}

impl LogicalUnit {
    const ALL: [Self; 4] = [Self::Zero, Self::One, Self::Two, Self::Three];

    /// The logical unit addressed by the two lowest bits of `value`.
    pub fn from_low_bits(value: u8) -> Self {
        Self::ALL[(value & 0b11) as usize]
    }

    pub fn value(&self) -> u8 {
        *self as u8
    }
}

/// Identifies a command: its network function and command number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CommandId {
    pub netfn: NetFn,
    pub cmd: u8,
}

impl CommandId {
    pub const fn new(netfn: NetFn, cmd: u8) -> Self {
        Self { netfn, cmd }
    }
}

impl core::fmt::Display for CommandId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?} command 0x{:02X}", self.netfn, self.cmd)
    }
}

/// A blocking request/response transport.
///
/// Only one request may be in flight per connection: callers must
/// [`recv`](IpmiConnection::recv) the response to a request before sending the
/// next one. [`send_recv`](IpmiConnection::send_recv) does both.
pub trait IpmiConnection {
    type SendError: core::fmt::Debug;
    type RecvError: core::fmt::Debug;
    type Error: core::fmt::Debug + From<Self::SendError> + From<Self::RecvError>;

    fn send(&mut self, request: &mut Request) -> Result<(), Self::SendError>;
    fn recv(&mut self) -> Result<Response, Self::RecvError>;
    fn send_recv(&mut self, request: &mut Request) -> Result<Response, Self::Error>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    netfn: u8,
    cmd: u8,
    data: Vec<u8>,
}

impl Message {
    pub fn new_request(netfn: NetFn, cmd: u8, data: Vec<u8>) -> Self {
        Self {
            netfn: netfn.request_value(),
            cmd,
            data,
        }
    }

    pub fn new_response(netfn: NetFn, cmd: u8, data: Vec<u8>) -> Self {
        Self {
            netfn: netfn.response_value(),
            cmd,
            data,
        }
    }

    pub fn netfn(&self) -> NetFn {
        NetFn::from(self.netfn)
    }

    pub fn netfn_raw(&self) -> u8 {
        self.netfn
    }

    pub fn cmd(&self) -> u8 {
        self.cmd
    }

    pub fn command(&self) -> CommandId {
        CommandId::new(self.netfn(), self.cmd)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// The response did not contain enough data to be parsed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NotEnoughData;

pub trait IpmiCommand: Into<Message> {
    type Output;
    type Error;

    /// Parse the data of a response whose completion code indicated success.
    ///
    /// `data` does not include the completion code.
    fn parse_success_response(data: &[u8]) -> Result<Self::Output, Self::Error>;

    /// Turn a failed completion code into a command-specific error, if the
    /// command has one for it.
    fn handle_completion_code(
        completion_code: CompletionErrorCode,
        data: &[u8],
    ) -> Option<Self::Error> {
        let _ = (completion_code, data);
        None
    }
}
