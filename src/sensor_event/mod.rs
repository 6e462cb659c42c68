//! Sensor readings and the interpretation of sensor state bytes.

mod sensor_reading;
pub use sensor_reading::{GetSensorReading, RawSensorReading, ReadingAvailability};

mod status;
pub use status::{describe, SensorStatus, STATUS_NOT_AVAILABLE, STATUS_OK};
