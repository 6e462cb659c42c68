use crate::connection::{IpmiCommand, Message, NetFn, NotEnoughData};

use super::RawSensorReading;

/// Get the current reading and state of a sensor.
#[derive(Debug, Clone, Copy)]
pub struct GetSensorReading {
    sensor_number: u8,
}

impl GetSensorReading {
    pub fn for_sensor(sensor_number: u8) -> Self {
        Self { sensor_number }
    }

    pub fn sensor_number(&self) -> u8 {
        self.sensor_number
    }
}

impl From<GetSensorReading> for Message {
    fn from(value: GetSensorReading) -> Self {
        Message::new_request(NetFn::SensorEvent, 0x2D, vec![value.sensor_number])
    }
}

impl IpmiCommand for GetSensorReading {
    type Output = RawSensorReading;

    type Error = NotEnoughData;

    fn parse_success_response(data: &[u8]) -> Result<Self::Output, Self::Error> {
        RawSensorReading::parse(data).ok_or(NotEnoughData)
    }
}
