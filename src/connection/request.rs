use super::{CommandId, LogicalUnit, Message};

/// A [`Message`] addressed to a logical unit of the BMC.
#[derive(Clone, Debug)]
pub struct Request {
    lun: LogicalUnit,
    message: Message,
}

impl Request {
    /// `message` should carry the request value of its netfn, see
    /// [`Message::new_request`].
    pub const fn new(message: Message, lun: LogicalUnit) -> Self {
        Self { lun, message }
    }

    pub fn command(&self) -> CommandId {
        self.message.command()
    }

    /// The request data, without netfn and command.
    pub fn data(&self) -> &[u8] {
        self.message.data()
    }

    pub fn lun(&self) -> LogicalUnit {
        self.lun
    }
}
