/// The network function of a message.
///
/// Requests use the even value of a network function, responses the odd one.
/// Both map to the same `NetFn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetFn {
    Chassis,
    Bridge,
    SensorEvent,
    App,
    Firmware,
    Storage,
    Transport,
    /// Any other network function, stored as its request (even) value.
    Unknown(u8),
}

impl From<u8> for NetFn {
    fn from(value: u8) -> Self {
        match value & !1 {
            0x00 => Self::Chassis,
            0x02 => Self::Bridge,
            0x04 => Self::SensorEvent,
            0x06 => Self::App,
            0x08 => Self::Firmware,
            0x0A => Self::Storage,
            0x0C => Self::Transport,
            v => Self::Unknown(v),
        }
    }
}

impl NetFn {
    pub const fn request_value(&self) -> u8 {
        match self {
            NetFn::Chassis => 0x00,
            NetFn::Bridge => 0x02,
            NetFn::SensorEvent => 0x04,
            NetFn::App => 0x06,
            NetFn::Firmware => 0x08,
            NetFn::Storage => 0x0A,
            NetFn::Transport => 0x0C,
            NetFn::Unknown(v) => *v & !1,
        }
    }

    pub const fn response_value(&self) -> u8 {
        self.request_value() | 1
    }
}
