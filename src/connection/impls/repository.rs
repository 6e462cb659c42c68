use std::{cell::Cell, collections::HashMap, rc::Rc};

use crate::{
    connection::{CompletionErrorCode, NetFn},
    storage::sdr::{record::SDR_VERSION, Record},
};

use super::Simulator;

const CC_SUCCESS: u8 = 0x00;

fn failure(completion_code: CompletionErrorCode) -> Vec<u8> {
    vec![completion_code.into()]
}

/// A simulated SDR repository and the sensors it describes.
///
/// [`install`](SimulatedRepository::install) registers handlers for Get SDR
/// Repository Info, Reserve SDR Repository, Get SDR and Get Sensor Reading on
/// a [`Simulator`]. Records are served in insertion order. Record ID `0x0000`
/// addresses the first record, and the last record points at `0xFFFF`.
#[derive(Debug, Clone, Default)]
pub struct SimulatedRepository {
    records: Vec<Vec<u8>>,
    readings: HashMap<u8, Result<Vec<u8>, CompletionErrorCode>>,
    most_recent_addition: u32,
}

impl SimulatedRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, record: impl Into<Record>) -> Self {
        self.records.push(record.into().encode());
        self
    }

    /// Add a record that is served exactly as given, whether or not it is
    /// well-formed.
    pub fn with_raw_record(mut self, data: Vec<u8>) -> Self {
        self.records.push(data);
        self
    }

    pub fn with_reading(
        mut self,
        sensor_number: u8,
        reading: u8,
        availability: u8,
        state_1: u8,
        state_2: Option<u8>,
    ) -> Self {
        let mut data = vec![reading, availability, state_1];
        data.extend(state_2);

        self.readings.insert(sensor_number, Ok(data));
        self
    }

    /// Make Get Sensor Reading for `sensor_number` fail with `completion_code`.
    pub fn with_reading_error(
        mut self,
        sensor_number: u8,
        completion_code: CompletionErrorCode,
    ) -> Self {
        self.readings.insert(sensor_number, Err(completion_code));
        self
    }

    pub fn with_most_recent_addition(mut self, timestamp: u32) -> Self {
        self.most_recent_addition = timestamp;
        self
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn into_simulator(self) -> Simulator {
        let mut simulator = Simulator::new();
        self.install(&mut simulator);
        simulator
    }

    pub fn install(self, simulator: &mut Simulator) {
        let reservation = Rc::new(Cell::new(0u16));
        let records = Rc::new(self.records);

        let record_count = records.len() as u16;
        let most_recent_addition = self.most_recent_addition;
        simulator.set_handler(NetFn::Storage, 0x20, move |_| {
            let mut response = vec![CC_SUCCESS, SDR_VERSION];
            response.extend_from_slice(&record_count.to_le_bytes());
            response.extend_from_slice(&0xFFFFu16.to_le_bytes());
            response.extend_from_slice(&most_recent_addition.to_le_bytes());
            response.extend_from_slice(&0u32.to_le_bytes());
            // Non-modal updates, reserve supported.
            response.push(0b0010_0010);
            response
        });

        let reserved = reservation.clone();
        simulator.set_handler(NetFn::Storage, 0x22, move |_| {
            let next = match reserved.get().wrapping_add(1) {
                0 => 1,
                v => v,
            };
            reserved.set(next);

            let [lo, hi] = next.to_le_bytes();
            vec![CC_SUCCESS, lo, hi]
        });

        simulator.set_handler(NetFn::Storage, 0x23, move |data| {
            get_sdr(&records, reservation.get(), data)
        });

        let readings = self.readings;
        simulator.set_handler(NetFn::SensorEvent, 0x2D, move |data| {
            let reading = data.first().and_then(|number| readings.get(number));

            match reading {
                Some(Ok(reading)) => {
                    let mut response = vec![CC_SUCCESS];
                    response.extend_from_slice(reading);
                    response
                }
                Some(Err(completion_code)) => failure(*completion_code),
                None => failure(CompletionErrorCode::RequestedDatapointNotPresent),
            }
        });
    }
}

fn raw_record_id(record: &[u8]) -> u16 {
    match record {
        [lo, hi, ..] => u16::from_le_bytes([*lo, *hi]),
        _ => 0,
    }
}

fn get_sdr(records: &[Vec<u8>], current_reservation: u16, data: &[u8]) -> Vec<u8> {
    if data.len() < 6 {
        return failure(CompletionErrorCode::RequestDataLenInvalid);
    }

    let reservation = u16::from_le_bytes([data[0], data[1]]);
    let record_id = u16::from_le_bytes([data[2], data[3]]);
    let offset = data[4] as usize;
    let count = data[5];

    let reservation_valid = if reservation == 0 {
        offset == 0
    } else {
        reservation == current_reservation
    };

    if !reservation_valid {
        return failure(CompletionErrorCode::ReservationCancelledOrInvalidId);
    }

    let index = if record_id == 0 && !records.is_empty() {
        Some(0)
    } else {
        records.iter().position(|r| raw_record_id(r) == record_id)
    };

    let index = match index {
        Some(index) => index,
        None => return failure(CompletionErrorCode::RequestedDatapointNotPresent),
    };

    let record = &records[index];
    let next = records.get(index + 1).map(|r| raw_record_id(r)).unwrap_or(0xFFFF);

    if offset > record.len() {
        return failure(CompletionErrorCode::ParameterOutOfRange);
    }

    let end = if count == 0xFF {
        record.len()
    } else {
        (offset + count as usize).min(record.len())
    };

    let mut response = vec![CC_SUCCESS];
    response.extend_from_slice(&next.to_le_bytes());
    response.extend_from_slice(&record[offset..end]);
    response
}
