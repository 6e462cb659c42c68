use std::collections::HashMap;

use crate::{
    connection::{CommandId, IpmiConnection, NetFn, Request, Response},
    fmt::{LogItem, Loggable},
    log_vec,
};

type Handler = Box<dyn FnMut(&[u8]) -> Vec<u8>>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimulatorError {
    /// No handler is registered for the netfn/command pair of a request.
    NoHandler(CommandId),
    /// `recv` was called without a preceding `send`.
    NothingToReceive,
    /// A handler returned no completion code.
    EmptyResponse(CommandId),
}

impl core::fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SimulatorError::NoHandler(command) => write!(f, "no handler for {command}"),
            SimulatorError::NothingToReceive => write!(f, "no response is pending"),
            SimulatorError::EmptyResponse(command) => {
                write!(f, "handler for {command} returned no data")
            }
        }
    }
}

impl std::error::Error for SimulatorError {}

/// An in-process [`IpmiConnection`] that answers requests with registered
/// handlers.
///
/// A handler receives the request data and returns the response data,
/// starting with the completion code.
pub struct Simulator {
    handlers: HashMap<CommandId, Handler>,
    pending: Option<Response>,
    seq: i64,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Simulator")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("pending", &self.pending)
            .field("seq", &self.seq)
            .finish()
    }
}

impl Simulator {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            pending: None,
            seq: 0,
        }
    }

    /// Register `handler` for `cmd` in `netfn`, replacing any previous one.
    pub fn set_handler<F>(&mut self, netfn: NetFn, cmd: u8, handler: F)
    where
        F: FnMut(&[u8]) -> Vec<u8> + 'static,
    {
        self.handlers.insert(CommandId::new(netfn, cmd), Box::new(handler));
    }

    pub fn remove_handler(&mut self, netfn: NetFn, cmd: u8) -> bool {
        self.handlers.remove(&CommandId::new(netfn, cmd)).is_some()
    }

    /// The number of requests answered so far.
    pub fn requests_handled(&self) -> i64 {
        self.seq
    }
}

impl IpmiConnection for Simulator {
    type SendError = SimulatorError;
    type RecvError = SimulatorError;
    type Error = SimulatorError;

    fn send(&mut self, request: &mut Request) -> Result<(), SimulatorError> {
        let command = request.command();

        log::trace!(
            "Simulating {command} for LUN {}: {:02X?}",
            request.lun().value(),
            request.data()
        );

        let handler = self
            .handlers
            .get_mut(&command)
            .ok_or(SimulatorError::NoHandler(command))?;

        let data = handler(request.data());

        let response = Response::new(command.netfn.response_value(), command.cmd, data, self.seq)
            .ok_or(SimulatorError::EmptyResponse(command))?;

        self.seq += 1;
        self.pending = Some(response);

        Ok(())
    }

    fn recv(&mut self) -> Result<Response, SimulatorError> {
        self.pending.take().ok_or(SimulatorError::NothingToReceive)
    }

    fn send_recv(&mut self, request: &mut Request) -> Result<Response, SimulatorError> {
        self.send(request)?;
        self.recv()
    }
}

impl Loggable for Response {
    fn as_log(&self) -> Vec<LogItem> {
        log_vec![
            (0, "Response"),
            (1, "Command", self.command()),
            (1, "Completion code", format!("0x{:02X}", self.cc())),
            (1, "Data", format!("{:02X?}", self.data()))
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{LogicalUnit, Message};

    fn request(netfn: NetFn, cmd: u8, data: Vec<u8>) -> Request {
        Request::new(Message::new_request(netfn, cmd, data), LogicalUnit::Zero)
    }

    #[test]
    fn dispatches_to_handler() {
        let mut sim = Simulator::new();
        sim.set_handler(NetFn::App, 0x01, |data| {
            let mut response = vec![0x00];
            response.extend(data.iter().rev());
            response
        });

        let response = sim
            .send_recv(&mut request(NetFn::App, 0x01, vec![1, 2, 3]))
            .unwrap();

        assert_eq!(NetFn::App, response.netfn());
        assert_eq!(0x07, response.netfn_raw());
        assert_eq!(0x00, response.cc());
        assert_eq!(&[3, 2, 1], response.data());
        assert_eq!(1, sim.requests_handled());
    }

    #[test]
    fn missing_handler() {
        let mut sim = Simulator::new();

        assert_eq!(
            Err(SimulatorError::NoHandler(CommandId::new(NetFn::Storage, 0x23))),
            sim.send_recv(&mut request(NetFn::Storage, 0x23, Vec::new()))
        );
    }

    #[test]
    fn recv_without_send() {
        let mut sim = Simulator::new();
        assert_eq!(Err(SimulatorError::NothingToReceive), sim.recv());
    }

    #[test]
    fn empty_handler_response() {
        let mut sim = Simulator::new();
        sim.set_handler(NetFn::SensorEvent, 0x2D, |_| Vec::new());

        assert_eq!(
            Err(SimulatorError::EmptyResponse(CommandId::new(
                NetFn::SensorEvent,
                0x2D
            ))),
            sim.send_recv(&mut request(NetFn::SensorEvent, 0x2D, vec![1]))
        );

        assert!(sim.remove_handler(NetFn::SensorEvent, 0x2D));
        assert!(!sim.remove_handler(NetFn::SensorEvent, 0x2D));
    }
}
