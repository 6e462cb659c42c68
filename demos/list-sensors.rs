use std::num::NonZeroU16;

use clap::Parser;
use ipmi_sdr::{
    connection::{SimulatedRepository, Simulator},
    storage::sdr::{
        linearization::Coefficients,
        record::{
            CompactSensorRecord, FruDeviceLocatorRecord, FullSensorRecord, McDeviceLocatorRecord,
            ThresholdKind,
        },
        GetSdrRepositoryInfo, RecordId, ReserveSdrRepository,
    },
    Ipmi, LogOutput, Logger,
};

#[derive(Parser)]
struct CliOpts {
    /// Use this reservation ID instead of reserving the repository
    #[clap(long, short)]
    reservation_id: Option<u16>,
    /// Where to print the sensor list: `log`, `stdout`, `stderr` or a file path
    #[clap(default_value = "log", long, short)]
    output: String,
    /// The number of fans the simulated device has
    #[clap(default_value = "4", long)]
    fans: u8,
}

fn output(value: &str) -> std::io::Result<LogOutput> {
    let output = match value {
        "log" => LogOutput::LogTarget(log::Level::Info, "list_sensors".into()),
        "stdout" => LogOutput::StdOut,
        "stderr" => LogOutput::StdErr,
        #[cfg(feature = "log-to-file")]
        path => {
            let file = std::fs::File::create(path)?;
            LogOutput::File(std::sync::Arc::new(parking_lot::Mutex::new(file)))
        }
        #[cfg(not(feature = "log-to-file"))]
        path => {
            return Err(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                format!("cannot log to {path}: log-to-file is disabled"),
            ))
        }
    };

    Ok(output)
}

fn simulated_device(fans: u8) -> Simulator {
    let mut next_id = 1u16;
    let mut id = || {
        let current = RecordId::new_raw(next_id);
        next_id += 1;
        current
    };

    let mut repository = SimulatedRepository::new();

    let mut bmc = McDeviceLocatorRecord::new(id(), "BMC").unwrap();
    bmc.slave_address = 0x20;
    bmc.capabilities = 0x2B;
    bmc.entity_id = 0x2E;
    repository = repository.with_record(bmc);

    let mut cpu = FullSensorRecord::new(id(), "CPU Temp").unwrap();
    cpu.common.sensor_number = 0x01;
    cpu.common.sensor_type = 0x01;
    cpu.common.event_reading_type = 0x01;
    cpu.common.base_unit = 1;
    cpu.common.discrete_reading_mask = 0x3F3F;
    cpu.set_coefficients(Coefficients::new(1, 0, 0, 0));
    cpu.set_threshold(ThresholdKind::UpperCritical, 95.0).unwrap();
    cpu.set_threshold(ThresholdKind::UpperNonCritical, 85.0).unwrap();
    repository = repository
        .with_record(cpu)
        .with_reading(0x01, 52, 0xC0, 0x00, None);

    for fan in 0..fans {
        let sensor_number = 0x30u8.wrapping_add(fan);

        let mut record = FullSensorRecord::new(id(), &format!("FAN{}", fan + 1)).unwrap();
        record.common.sensor_number = sensor_number;
        record.common.sensor_type = 0x04;
        record.common.event_reading_type = 0x01;
        record.common.base_unit = 18;
        record.set_coefficients(Coefficients::new(100, 0, 0, 0));

        repository = if fan == fans - 1 {
            // The last fan has stopped.
            repository
                .with_record(record)
                .with_reading(sensor_number, 0, 0xC0, 0x04 | 0x02 | 0x01, None)
        } else {
            repository
                .with_record(record)
                .with_reading(sensor_number, 60u8.saturating_add(fan), 0xC0, 0x00, None)
        };
    }

    let mut intrusion = CompactSensorRecord::new(id(), "Chassis Intru").unwrap();
    intrusion.common.sensor_number = 0x50;
    intrusion.common.sensor_type = 0x05;
    intrusion.common.event_reading_type = 0x6F;
    repository = repository
        .with_record(intrusion)
        .with_reading(0x50, 0x00, 0xC0, 0x01, Some(0x00));

    let mut psu = CompactSensorRecord::new(id(), "PSU2 Status").unwrap();
    psu.common.sensor_number = 0x61;
    psu.common.sensor_type = 0x08;
    psu.common.event_reading_type = 0x6F;
    repository = repository.with_record(psu).with_reading(0x61, 0, 0x20, 0, None);

    let mut fru = FruDeviceLocatorRecord::new(id(), "Mainboard").unwrap();
    fru.access_address = 0x20;
    fru.access_lun_bus = 0x80;
    fru.device_type = 0x10;
    repository = repository.with_record(fru);

    repository.into_simulator()
}

fn main() -> std::io::Result<()> {
    pretty_env_logger::formatted_builder()
        .parse_filters(&std::env::var("RUST_LOG").unwrap_or("info".to_string()))
        .init();

    let opts = CliOpts::parse();
    let log_output = output(&opts.output)?;

    let mut ipmi = Ipmi::new(simulated_device(opts.fans));

    match ipmi.send_recv(GetSdrRepositoryInfo) {
        Ok(info) => Logger::log(&log_output, &info),
        Err(e) => log::warn!("Could not get SDR repository info: {e}"),
    }

    let reservation_id = match opts.reservation_id {
        Some(id) => NonZeroU16::new(id),
        None => match ipmi.send_recv(ReserveSdrRepository) {
            Ok(id) => Some(id),
            Err(e) => {
                log::error!("Could not reserve the SDR repository: {e}");
                None
            }
        },
    };

    log::info!("Listing sensors");

    let sensors = ipmi
        .list_sensors(reservation_id)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    for sensor in &sensors {
        Logger::log(&log_output, sensor);
    }

    log::info!("Found {} sensors", sensors.len());

    Ok(())
}
