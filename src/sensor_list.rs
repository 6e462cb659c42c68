use std::{collections::HashSet, num::NonZeroU16};

use crate::{
    connection::{IpmiConnection, NotEnoughData},
    fmt::LogItem,
    log_vec,
    sensor_event::{describe, GetSensorReading, SensorStatus, STATUS_NOT_AVAILABLE},
    storage::sdr::{
        base_unit_name,
        event_reading_type_code::EventReadingTypeCodes,
        record::{ParseError, SdrRecord, HEADER_LEN},
        sensor_type_name, GetDeviceSdr, Record, RecordId, RecordType,
    },
    Ipmi, IpmiError, Loggable,
};

/// A sensor described by the SDR repository, with its current reading.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorInfo {
    pub record_id: RecordId,
    pub sensor_number: u8,
    pub sensor_type: &'static str,
    pub reading_type: EventReadingTypeCodes,
    pub base_unit: &'static str,
    /// The physical value of the reading. `0.0` if the sensor has no analog
    /// reading, or if no reading was available.
    pub value: f64,
    pub device_id: String,
    pub status: &'static str,
    pub events: Vec<&'static str>,
    pub available: bool,
    pub state_1: u8,
    pub state_2: u8,
}

impl SensorInfo {
    pub fn display_value(&self) -> String {
        if self.available {
            format!("{:.2} {}", self.value, self.base_unit)
        } else {
            "na".into()
        }
    }
}

impl Loggable for SensorInfo {
    fn as_log(&self) -> Vec<LogItem> {
        let events = self
            .events
            .iter()
            .filter(|e| !e.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ");

        let mut log = log_vec![
            (0, format!("Sensor \"{}\"", self.device_id)),
            (1, "Record ID", self.record_id),
            (1, "Sensor number", format!("0x{:02X}", self.sensor_number)),
            (1, "Sensor type", self.sensor_type),
            (1, "Value", self.display_value()),
            (1, "Status", self.status)
        ];

        if !events.is_empty() {
            log.push((1, "Events", events).into());
        }

        log
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SensorListError<E> {
    /// Fetching (part of) a record failed.
    Fetch {
        record_id: RecordId,
        error: IpmiError<E, NotEnoughData>,
    },
    /// The first bytes of a record were not a complete record header.
    MalformedHeader { record_id: RecordId, data: Vec<u8> },
    Decode {
        record_id: RecordId,
        error: ParseError,
    },
    /// A record named an already visited record as its successor.
    DuplicateRecordId(RecordId),
}

impl<E> core::fmt::Display for SensorListError<E>
where
    E: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SensorListError::Fetch { record_id, error } => {
                write!(f, "failed to fetch SDR record {record_id}: {error}")
            }
            SensorListError::MalformedHeader { record_id, data } => write!(
                f,
                "SDR record {record_id} has a malformed header: {data:02X?}"
            ),
            SensorListError::Decode { record_id, error } => {
                write!(f, "failed to decode SDR record {record_id}: {error}")
            }
            SensorListError::DuplicateRecordId(record_id) => {
                write!(f, "SDR record {record_id} was visited twice")
            }
        }
    }
}

impl<E> std::error::Error for SensorListError<E> where E: core::fmt::Debug {}

impl<CON> Ipmi<CON>
where
    CON: IpmiConnection,
{
    /// Walk the SDR repository and read every sensor it describes.
    ///
    /// Records are read in two steps: the header, then the rest of the
    /// record, both with `reservation_id`. Records of unsupported types are
    /// skipped, as are sensors whose sensor type or base unit is unknown. A
    /// sensor whose reading fails or is unavailable is still listed, with
    /// status `"ns"`. Any other failure ends the walk and discards what was
    /// gathered so far. So does a record that points back at a record that
    /// was already read.
    pub fn list_sensors(
        &mut self,
        reservation_id: Option<NonZeroU16>,
    ) -> Result<Vec<SensorInfo>, SensorListError<CON::Error>> {
        let mut sensors = Vec::new();
        let mut visited = HashSet::new();
        let mut current = RecordId::FIRST;

        while !current.is_last() {
            visited.insert(current);

            let (next, decoded) = self.fetch_record(reservation_id, current)?;

            match decoded {
                Ok(record) => {
                    visited.insert(record.header().id);

                    if let Some(info) = self.sensor_info(&record) {
                        sensors.push(info);
                    }
                }
                Err(ParseError::UnsupportedRecordType(ty)) => {
                    log::debug!("Skipping SDR record {current} of unsupported type 0x{ty:02X}");
                }
                Err(error) => {
                    log::error!("Failed to decode SDR record {current}: {error}");
                    return Err(SensorListError::Decode {
                        record_id: current,
                        error,
                    });
                }
            }

            if visited.contains(&next) {
                log::error!("SDR record {current} points back at record {next}. Stopping.");
                return Err(SensorListError::DuplicateRecordId(next));
            }

            current = next;
        }

        Ok(sensors)
    }

    /// Fetch and decode record `record_id`. Returns the ID of the next record
    /// along with the decode result.
    fn fetch_record(
        &mut self,
        reservation_id: Option<NonZeroU16>,
        record_id: RecordId,
    ) -> Result<(RecordId, Result<Record, ParseError>), SensorListError<CON::Error>> {
        let fetch_error = |error: IpmiError<CON::Error, NotEnoughData>| {
            log::error!("Failed to fetch SDR record {record_id}: {error:?}");
            SensorListError::Fetch { record_id, error }
        };

        let header = self
            .send_recv(GetDeviceSdr::partial(
                reservation_id,
                record_id,
                0,
                HEADER_LEN as u8,
            ))
            .map_err(fetch_error)?;

        if header.data.len() < HEADER_LEN {
            log::error!("SDR record {record_id} has a malformed header");
            return Err(SensorListError::MalformedHeader {
                record_id,
                data: header.data,
            });
        }

        let record_type = RecordType::from(header.data[3]);
        let body_len = header.data[4];

        let body = self
            .send_recv(GetDeviceSdr::partial(
                reservation_id,
                record_id,
                HEADER_LEN as u8,
                body_len,
            ))
            .map_err(fetch_error)?;

        let mut data = header.data;
        data.truncate(HEADER_LEN);
        data.extend_from_slice(&body.data);

        Ok((body.next_entry, Record::decode(record_type, &data)))
    }

    /// Read the sensor described by `record`. `None` if the record does not
    /// describe a sensor, or if the sensor type or base unit is unknown.
    fn sensor_info(&mut self, record: &Record) -> Option<SensorInfo> {
        let sensor = record.sensor()?;
        let common = sensor.common();
        let record_id = record.header().id;
        let sensor_number = sensor.sensor_number();

        let reading = match self.send_recv(GetSensorReading::for_sensor(sensor_number)) {
            Ok(reading) if reading.is_available() => Some(reading),
            Ok(_) => {
                log::warn!("Reading of sensor 0x{sensor_number:02X} ({record_id}) is unavailable");
                None
            }
            Err(e) => {
                log::warn!("Failed to read sensor 0x{sensor_number:02X} ({record_id}): {e}");
                None
            }
        };

        let (sensor_type, base_unit) = match (
            sensor_type_name(common.sensor_type),
            base_unit_name(common.base_unit),
        ) {
            (Some(sensor_type), Some(base_unit)) => (sensor_type, base_unit),
            _ => {
                log::debug!(
                    "Skipping sensor 0x{sensor_number:02X} ({record_id}) with sensor type 0x{:02X} and base unit {}",
                    common.sensor_type,
                    common.base_unit
                );
                return None;
            }
        };

        let (value, status, state_1, state_2) = match reading {
            Some(reading) => (
                sensor.reading_value(reading.reading).unwrap_or(0.0),
                describe(
                    sensor.event_reading_type(),
                    sensor.sensor_type(),
                    reading.state_1,
                    reading.state_2,
                ),
                reading.state_1,
                reading.state_2,
            ),
            None => (
                0.0,
                SensorStatus {
                    status: STATUS_NOT_AVAILABLE,
                    events: vec![""],
                },
                0,
                0,
            ),
        };

        Some(SensorInfo {
            record_id,
            sensor_number,
            sensor_type,
            reading_type: sensor.event_reading_type(),
            base_unit,
            value,
            device_id: record.device_id().to_string(),
            status: status.status,
            events: status.events,
            available: reading.is_some(),
            state_1,
            state_2,
        })
    }
}
