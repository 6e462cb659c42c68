//! ipmi-sdr: a pure-rust client for the IPMI Sensor Data Repository.
//!
//! This library provides the SDR record codec and linearization math (in the
//! [`storage`] module), sensor readings and their interpretation (in the
//! [`sensor_event`] module), and the request/response plumbing commands are
//! sent over (in the [`connection`] module). [`Ipmi::list_sensors`] walks the
//! repository of a device and reports every sensor it describes.

pub mod connection;

mod error;
pub use error::IpmiError;

pub mod storage;

pub mod sensor_event;

mod sensor_list;
pub use sensor_list::{SensorInfo, SensorListError};

#[macro_use]
mod fmt;
#[cfg(test)]
mod tests;

pub use fmt::{LogItem, LogOutput, Loggable, Logger};

use connection::{
    CompletionErrorCode, IpmiCommand, IpmiConnection, LogicalUnit, Message, Request,
};

/// A client for a BMC reachable over the connection `CON`.
pub struct Ipmi<CON> {
    connection: CON,
}

impl<CON> Ipmi<CON> {
    /// Give up the client and return its connection.
    pub fn release(self) -> CON {
        self.connection
    }

    pub fn connection_mut(&mut self) -> &mut CON {
        &mut self.connection
    }
}

impl<CON> From<CON> for Ipmi<CON>
where
    CON: IpmiConnection,
{
    fn from(value: CON) -> Self {
        Self::new(value)
    }
}

impl<CON> Ipmi<CON>
where
    CON: IpmiConnection,
{
    pub fn new(connection: CON) -> Self {
        Self { connection }
    }

    /// Send `command` to logical unit 0 of the BMC and parse the response.
    ///
    /// A response that belongs to another command, a response with a failed
    /// completion code, and a response the command cannot parse are all
    /// errors. Only the first of these does not carry the response data.
    pub fn send_recv<CMD>(
        &mut self,
        command: CMD,
    ) -> Result<CMD::Output, IpmiError<CON::Error, CMD::Error>>
    where
        CMD: IpmiCommand,
    {
        let message: Message = command.into();
        let sent = message.command();

        let response = self
            .connection
            .send_recv(&mut Request::new(message, LogicalUnit::Zero))?;

        let received = response.command();
        if received != sent {
            log::warn!("Sent {sent}, but received a response to {received}");
            return Err(IpmiError::UnexpectedResponse { sent, received });
        }

        let data = response.data();

        let completion_code = match CompletionErrorCode::try_from(response.cc()) {
            Ok(completion_code) => completion_code,
            Err(()) => {
                return CMD::parse_success_response(data).map_err(|error| IpmiError::Command {
                    command: received,
                    error,
                    completion_code: None,
                    data: data.to_vec(),
                })
            }
        };

        log::debug!("{received} failed: {completion_code}");

        Err(match CMD::handle_completion_code(completion_code, data) {
            Some(error) => IpmiError::Command {
                command: received,
                error,
                completion_code: Some(completion_code),
                data: data.to_vec(),
            },
            None => IpmiError::Failed {
                command: received,
                completion_code,
                data: data.to_vec(),
            },
        })
    }
}
