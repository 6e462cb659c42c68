use std::{cell::Cell, rc::Rc};

use crate::{
    connection::{CompletionErrorCode, NetFn, SimulatedRepository, Simulator},
    storage::sdr::{
        event_reading_type_code::EventReadingTypeCodes,
        linearization::Coefficients,
        record::{
            CompactSensorRecord, FullSensorRecord, McDeviceLocatorRecord, ParseError,
            HEADER_LEN,
        },
        GetSdrRepositoryInfo, RecordId, ReserveSdrRepository,
    },
    Ipmi, IpmiError, SensorInfo, SensorListError,
};

type Walk = Result<Vec<SensorInfo>, SensorListError<crate::connection::SimulatorError>>;

fn temperature(id: u16, sensor_number: u8, name: &str) -> FullSensorRecord {
    let mut record = FullSensorRecord::new(RecordId::new_raw(id), name).unwrap();

    record.common.sensor_number = sensor_number;
    record.common.sensor_type = 0x01;
    record.common.event_reading_type = 0x01;
    record.common.base_unit = 1;
    record.set_coefficients(Coefficients::new(63, 0, 0, 0));

    record
}

fn intrusion(id: u16, sensor_number: u8) -> CompactSensorRecord {
    let mut record = CompactSensorRecord::new(RecordId::new_raw(id), "Intrusion").unwrap();

    record.common.sensor_number = sensor_number;
    record.common.sensor_type = 0x05;
    record.common.event_reading_type = 0x6F;

    record
}

fn walk(simulator: Simulator) -> Walk {
    let mut ipmi = Ipmi::new(simulator);
    let reservation = ipmi.send_recv(ReserveSdrRepository).unwrap();
    ipmi.list_sensors(Some(reservation))
}

#[test]
fn single_full_sensor() {
    let simulator = SimulatedRepository::new()
        .with_record(temperature(1, 0x10, "CPU Temp"))
        .with_reading(0x10, 0x2A, 0xC0, 0x00, None)
        .into_simulator();

    let sensors = walk(simulator).unwrap();

    assert_eq!(
        vec![SensorInfo {
            record_id: RecordId::new_raw(1),
            sensor_number: 0x10,
            sensor_type: "Temperature",
            reading_type: EventReadingTypeCodes::Threshold,
            base_unit: "degrees C",
            value: 2646.0,
            device_id: "CPU Temp".into(),
            status: "ok",
            events: Vec::new(),
            available: true,
            state_1: 0,
            state_2: 0,
        }],
        sensors
    );
}

#[test]
fn walk_follows_next_record_ids() {
    let simulator = SimulatedRepository::new()
        .with_record(temperature(0x0001, 0x10, "CPU0 Temp"))
        .with_record(McDeviceLocatorRecord::new(RecordId::new_raw(0x0002), "BMC").unwrap())
        .with_record(temperature(0x0040, 0x11, "CPU1 Temp"))
        .with_record(intrusion(0x0100, 0x50))
        .with_reading(0x10, 0x01, 0xC0, 0x00, None)
        .with_reading(0x11, 0x02, 0xC0, 0x00, None)
        .with_reading(0x50, 0x00, 0xC0, 0x01, Some(0x00))
        .into_simulator();

    let sensors = walk(simulator).unwrap();
    let ids: Vec<_> = sensors.iter().map(|s| s.record_id.value()).collect();

    assert_eq!(vec![0x0001, 0x0040, 0x0100], ids);
    assert_eq!(63.0, sensors[0].value);
    assert_eq!(126.0, sensors[1].value);

    let intrusion = &sensors[2];
    assert_eq!("Physical Security", intrusion.sensor_type);
    assert_eq!(0.0, intrusion.value);
    assert_eq!(vec!["General Chassis intrusion"], intrusion.events);
}

#[test]
fn two_reads_per_record() {
    let mut ipmi = Ipmi::new(
        SimulatedRepository::new()
            .with_record(temperature(1, 0x10, "CPU Temp"))
            .with_record(McDeviceLocatorRecord::new(RecordId::new_raw(2), "BMC").unwrap())
            .with_reading(0x10, 0x2A, 0xC0, 0x00, None)
            .into_simulator(),
    );

    let reservation = ipmi.send_recv(ReserveSdrRepository).unwrap();
    let sensors = ipmi.list_sensors(Some(reservation)).unwrap();
    assert_eq!(1, sensors.len());

    // The reservation, header and body of both records, and one reading.
    assert_eq!(6, ipmi.connection_mut().requests_handled());
}

#[test]
fn compact_sensor_with_raw_value() {
    let mut record = intrusion(1, 0x50);
    record.common.unit = 0xC0;

    let simulator = SimulatedRepository::new()
        .with_record(record)
        .with_reading(0x50, 0x07, 0xC0, 0x00, None)
        .into_simulator();

    let sensors = walk(simulator).unwrap();
    assert_eq!(7.0, sensors[0].value);
}

#[test]
fn unsupported_records_are_skipped() {
    let event_only = hex::decode("0200510304200030C0").unwrap();
    let oem = hex::decode("030051C0025701").unwrap();

    let simulator = SimulatedRepository::new()
        .with_raw_record(event_only)
        .with_raw_record(oem)
        .with_record(temperature(4, 0x10, "Inlet Temp"))
        .with_reading(0x10, 0x00, 0xC0, 0x00, None)
        .into_simulator();

    let sensors = walk(simulator).unwrap();

    assert_eq!(1, sensors.len());
    assert_eq!("Inlet Temp", sensors[0].device_id);
}

#[test]
fn unavailable_readings() {
    let simulator = SimulatedRepository::new()
        .with_record(temperature(1, 0x10, "Unavailable"))
        .with_record(temperature(2, 0x11, "Failing"))
        .with_reading(0x10, 0x2A, 0x20, 0x3F, None)
        .with_reading_error(0x11, CompletionErrorCode::RequestedDatapointNotPresent)
        .into_simulator();

    let sensors = walk(simulator).unwrap();
    assert_eq!(2, sensors.len());

    for sensor in sensors {
        assert!(!sensor.available);
        assert_eq!(0.0, sensor.value);
        assert_eq!("ns", sensor.status);
        assert_eq!(vec![""], sensor.events);
        assert_eq!((0, 0), (sensor.state_1, sensor.state_2));
        assert_eq!("na", sensor.display_value());
    }
}

#[test]
fn threshold_status() {
    let simulator = SimulatedRepository::new()
        .with_record(temperature(1, 0x10, "CPU Temp"))
        .with_reading(0x10, 0x64, 0xC0, 0x04 | 0x10, Some(0x80))
        .into_simulator();

    let sensors = walk(simulator).unwrap();

    assert_eq!("Lower Non-Recoverable", sensors[0].status);
    assert_eq!(0x14, sensors[0].state_1);
    assert_eq!(0x80, sensors[0].state_2);
}

#[test]
fn unknown_types_and_units_are_filtered() {
    let mut unknown_type = temperature(1, 0x10, "OEM Sensor");
    unknown_type.common.sensor_type = 0x2D;

    let mut unknown_unit = temperature(2, 0x11, "Odd Unit");
    unknown_unit.common.base_unit = 91;

    let mut last_unit = temperature(3, 0x12, "Last Unit");
    last_unit.common.base_unit = 90;
    last_unit.common.sensor_type = 0x2C;

    let simulator = SimulatedRepository::new()
        .with_record(unknown_type)
        .with_record(unknown_unit)
        .with_record(last_unit)
        .with_reading(0x10, 0x00, 0xC0, 0x00, None)
        .with_reading(0x11, 0x00, 0xC0, 0x00, None)
        .with_reading(0x12, 0x00, 0xC0, 0x00, None)
        .into_simulator();

    let sensors = walk(simulator).unwrap();

    assert_eq!(1, sensors.len());
    assert_eq!("Last Unit", sensors[0].device_id);
    assert_eq!("FRU State", sensors[0].sensor_type);
    assert_eq!("uncorrectable error", sensors[0].base_unit);
}

#[test]
fn decode_errors_are_fatal() {
    let mut truncated_id = temperature(2, 0x11, "Broken").encode();
    truncated_id.truncate(truncated_id.len() - 3);
    // Keep the length byte consistent with what is actually served.
    truncated_id[4] -= 3;

    let simulator = SimulatedRepository::new()
        .with_record(temperature(1, 0x10, "CPU Temp"))
        .with_raw_record(truncated_id)
        .with_reading(0x10, 0x00, 0xC0, 0x00, None)
        .into_simulator();

    assert_eq!(
        Err(SensorListError::Decode {
            record_id: RecordId::new_raw(2),
            error: ParseError::IdLengthMismatch {
                declared: 6,
                available: 3
            }
        }),
        walk(simulator)
    );
}

#[test]
fn empty_repository() {
    match walk(SimulatedRepository::new().into_simulator()) {
        Err(SensorListError::Fetch { record_id, error }) => {
            assert_eq!(RecordId::FIRST, record_id);
            assert_eq!(
                Some(CompletionErrorCode::RequestedDatapointNotPresent),
                error.completion_code()
            );
        }
        other => panic!("unexpected walk result {other:?}"),
    }
}

#[test]
fn partial_reads_need_a_valid_reservation() {
    let mut ipmi = Ipmi::new(
        SimulatedRepository::new()
            .with_record(temperature(1, 0x10, "CPU Temp"))
            .into_simulator(),
    );

    let stale = ipmi.send_recv(ReserveSdrRepository).unwrap();
    let current = ipmi.send_recv(ReserveSdrRepository).unwrap();
    assert_ne!(stale, current);

    for reservation in [None, Some(stale)] {
        match ipmi.list_sensors(reservation) {
            Err(SensorListError::Fetch { error, .. }) => assert_eq!(
                Some(CompletionErrorCode::ReservationCancelledOrInvalidId),
                error.completion_code()
            ),
            other => panic!("unexpected walk result {other:?}"),
        }
    }
}

#[test]
fn self_referencing_record_is_fatal() {
    let record = McDeviceLocatorRecord::new(RecordId::new_raw(0), "BMC")
        .unwrap()
        .encode();

    let mut simulator = Simulator::new();
    simulator.set_handler(NetFn::Storage, 0x23, move |data| {
        let offset = data[4] as usize;
        let end = if offset == 0 { HEADER_LEN } else { record.len() };

        let mut response = vec![0x00, 0x00, 0x00];
        response.extend_from_slice(&record[offset..end]);
        response
    });

    assert_eq!(
        Err(SensorListError::DuplicateRecordId(RecordId::FIRST)),
        Ipmi::new(simulator).list_sensors(None)
    );
}

#[test]
fn two_record_cycle_is_fatal() {
    let first = McDeviceLocatorRecord::new(RecordId::new_raw(1), "BMC")
        .unwrap()
        .encode();
    let second = McDeviceLocatorRecord::new(RecordId::new_raw(2), "ME")
        .unwrap()
        .encode();

    let requests = Rc::new(Cell::new(0));
    let counter = requests.clone();

    let mut simulator = Simulator::new();
    simulator.set_handler(NetFn::Storage, 0x23, move |data| {
        counter.set(counter.get() + 1);

        // 1 -> 2 -> 1
        let (record, next) = match u16::from_le_bytes([data[2], data[3]]) {
            2 => (&second, 1u16),
            _ => (&first, 2u16),
        };

        let offset = data[4] as usize;
        let end = if offset == 0 { HEADER_LEN } else { record.len() };

        let mut response = vec![0x00];
        response.extend_from_slice(&next.to_le_bytes());
        response.extend_from_slice(&record[offset..end]);
        response
    });

    assert_eq!(
        Err(SensorListError::DuplicateRecordId(RecordId::new_raw(1))),
        Ipmi::new(simulator).list_sensors(None)
    );
    assert_eq!(4, requests.get());
}

#[test]
fn sentinel_ends_the_walk() {
    let records = [
        temperature(5, 0x05, "Fan 5").encode(),
        temperature(6, 0x06, "Fan 6").encode(),
    ];

    let requests = Rc::new(Cell::new(0));
    let counter = requests.clone();

    let mut simulator = Simulator::new();
    simulator.set_handler(NetFn::Storage, 0x23, move |data| {
        counter.set(counter.get() + 1);

        let record = match u16::from_le_bytes([data[2], data[3]]) {
            6 => &records[1],
            _ => &records[0],
        };

        let offset = data[4] as usize;
        let end = if offset == 0 { HEADER_LEN } else { record.len() };

        let mut response = vec![0x00, 0xFF, 0xFF];
        response.extend_from_slice(&record[offset..end]);
        response
    });
    simulator.set_handler(NetFn::SensorEvent, 0x2D, |_| {
        vec![0x00, 0x2A, 0xC0, 0xC0, 0x00]
    });

    let sensors = Ipmi::new(simulator).list_sensors(None).unwrap();

    assert_eq!(1, sensors.len());
    assert_eq!(RecordId::new_raw(5), sensors[0].record_id);
    assert_eq!("Fan 5", sensors[0].device_id);
    assert_eq!("ok", sensors[0].status);
    assert_eq!(2, requests.get());
}

#[test]
fn short_header_is_fatal() {
    let mut simulator = Simulator::new();
    simulator.set_handler(NetFn::Storage, 0x23, |_| vec![0x00, 0xFF, 0xFF, 0x01, 0x00, 0x51]);

    assert_eq!(
        Err(SensorListError::MalformedHeader {
            record_id: RecordId::FIRST,
            data: vec![0x01, 0x00, 0x51],
        }),
        Ipmi::new(simulator).list_sensors(None)
    );
}

#[test]
fn connection_errors_are_fatal() {
    let result = Ipmi::new(Simulator::new()).list_sensors(None);

    match result {
        Err(SensorListError::Fetch {
            error: IpmiError::Connection(_),
            ..
        }) => {}
        other => panic!("unexpected walk result {other:?}"),
    }
}

#[test]
fn repository_info() {
    let mut ipmi = Ipmi::new(
        SimulatedRepository::new()
            .with_record(temperature(1, 0x10, "CPU Temp"))
            .with_record(intrusion(2, 0x50))
            .with_most_recent_addition(0x6000_0000)
            .into_simulator(),
    );

    let info = ipmi.send_recv(GetSdrRepositoryInfo).unwrap();

    assert_eq!((1, 5), (info.version_major, info.version_minor));
    assert_eq!(2, info.record_count);
    assert_eq!(0x6000_0000, info.most_recent_addition.value());
    assert!(info.supports(crate::storage::sdr::SdrOperations::RESERVE));
}
