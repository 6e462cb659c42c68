//! Event offset descriptions.
//!
//! An event offset is the number of an asserted bit in the state bytes of a
//! sensor reading: bits 0 through 7 of the first state byte are offsets 0
//! through 7, bits 0 through 6 of the second state byte are offsets 8
//! through 14. What an offset means depends on the event/reading type code
//! of the sensor and, for sensor-specific sensors, on its sensor type.

use super::{event_reading_type_code::EventReadingTypeCodes, SensorType};

/// Describe `offset` for a sensor with event/reading type code `reading_type`
/// and sensor type `sensor_type`.
///
/// Threshold offsets are not covered here.
pub fn event_offset_desc(
    reading_type: EventReadingTypeCodes,
    sensor_type: SensorType,
    offset: u8,
) -> Option<&'static str> {
    match reading_type {
        EventReadingTypeCodes::DiscreteGeneric(code) => generic_event_offset_desc(code, offset),
        EventReadingTypeCodes::SensorSpecific => sensor_event_offset_desc(sensor_type, offset),
        _ => None,
    }
}

/// Whether there is a description table for sensors with `reading_type` and
/// `sensor_type`, even if it does not describe every offset.
pub fn has_event_offset_table(
    reading_type: EventReadingTypeCodes,
    sensor_type: SensorType,
) -> bool {
    (0..16).any(|offset| event_offset_desc(reading_type, sensor_type, offset).is_some())
}

/// Describe `offset` for one of the generic discrete event/reading type
/// codes (`0x02` through `0x0C`).
pub fn generic_event_offset_desc(reading_type: u8, offset: u8) -> Option<&'static str> {
    let offset = offset & 0x0F;

    match reading_type {
        // Usage state
        0x02 => match offset {
            0x00 => Some("Transition to Idle"),
            0x01 => Some("Transition to Active"),
            0x02 => Some("Transition to Busy"),
            _ => None,
        },

        0x03 => match offset {
            0x00 => Some("State Deasserted"),
            0x01 => Some("State Asserted"),
            _ => None,
        },

        0x04 => match offset {
            0x00 => Some("Predictive Failure deasserted"),
            0x01 => Some("Predictive Failure asserted"),
            _ => None,
        },

        0x05 => match offset {
            0x00 => Some("Limit Not Exceeded"),
            0x01 => Some("Limit Exceeded"),
            _ => None,
        },

        0x06 => match offset {
            0x00 => Some("Performance Met"),
            0x01 => Some("Performance Lags"),
            _ => None,
        },

        // Severity
        0x07 => match offset {
            0x00 => Some("Transition to OK"),
            0x01 => Some("Transition to Non-Critical from OK"),
            0x02 => Some("Transition to Critical from less servere"),
            0x03 => Some("Transition to Non-recoverable from less servere"),
            0x04 => Some("Transition to Non-Critical from more servere"),
            0x05 => Some("Transition to Critical from Non-recoverable"),
            0x06 => Some("Transition to Non-recoverable"),
            0x07 => Some("Monitor"),
            0x08 => Some("Information"),
            _ => None,
        },

        0x08 => match offset {
            0x00 => Some("Device Removed/Device Absent"),
            0x01 => Some("Device Inserted/Device Present"),
            _ => None,
        },

        0x09 => match offset {
            0x00 => Some("Device Disabled"),
            0x01 => Some("Device Enabled"),
            _ => None,
        },

        // Availability state
        0x0A => match offset {
            0x00 => Some("transition to Running"),
            0x01 => Some("transition to In Test"),
            0x02 => Some("transition to Power Off"),
            0x03 => Some("transition to On Line"),
            0x04 => Some("transition to Off Line"),
            0x05 => Some("transition to Off Duty"),
            0x06 => Some("transition to Degraded"),
            0x07 => Some("transition to Power Saved"),
            0x08 => Some("Install Error"),
            _ => None,
        },

        // Redundancy
        0x0B => match offset {
            0x00 => Some("Fully Redundant"),
            0x01 => Some("Redundancy Lost"),
            0x02 => Some("Redundancy Degraded"),
            0x03 => Some("Non-redundant:Sufficient Resources from Redundant"),
            0x04 => Some("Non-Redundant: Sufficient from Insufficient"),
            0x05 => Some("Non-Redundant: Insufficient Resources"),
            0x06 => Some("Redundancy Degraded from  Fully Redundant"),
            0x07 => Some("redundancy Degraded from Non-redundant"),
            _ => None,
        },

        // ACPI device power state
        0x0C => match offset {
            0x00 => Some("D0 Power State"),
            0x01 => Some("D1 Power State"),
            0x02 => Some("D2 Power State"),
            0x03 => Some("D3 Power State"),
            _ => None,
        },

        _ => None,
    }
}

/// Describe `offset` for a sensor with the sensor-specific event/reading
/// type code (`0x6F`).
pub fn sensor_event_offset_desc(sensor_type: SensorType, offset: u8) -> Option<&'static str> {
    let offset = offset & 0x0F;

    match sensor_type {
        SensorType::PhysicalSecurity => match offset {
            0x00 => Some("General Chassis intrusion"),
            0x01 => Some("Drive Bay intrusion"),
            0x02 => Some("I/O Card area intrusion"),
            0x03 => Some("Processor area intrusion,"),
            0x04 => Some("System unplugged from LAN"),
            0x05 => Some("Unauthorized dock"),
            0x06 => Some("FAN area intrusion"),
            _ => None,
        },

        SensorType::PlatformSecurity => match offset {
            0x00 => Some("Front Panel Lockout Violation attempt"),
            0x01 => Some("Pre-boot Password Violation- user password"),
            0x02 => Some("Pre-boot Password Violation attempt-setup password"),
            0x03 => Some("Pre-boot Password Violation- network boot password"),
            0x04 => Some("Pre-boot Password Violation"),
            0x05 => Some("Out-of-band Access Password Violation"),
            _ => None,
        },

        SensorType::Processor => match offset {
            0x00 => Some("IERR"),
            0x01 => Some("Thermal Trip"),
            0x02 => Some("FRB1/BIST failure"),
            0x03 => Some("FRB2/Hang in POST failure"),
            0x04 => Some("FRB3/Processor startup/init failfirmure"),
            0x05 => Some("Configuration Error"),
            0x06 => Some("SM BIOS 'Uncorrectable CPU-complex Error'"),
            0x07 => Some("Processor Presence"),
            0x08 => Some("disabled"),
            0x09 => Some("Terminator Presence Detected"),
            0x0A => Some("Throttled"),
            0x0B => Some("Machine Check Exception(Uncorrectable)"),
            0x0C => Some("Correctable Machine Check Error"),
            _ => None,
        },

        SensorType::PowerSupply => match offset {
            0x00 => Some("Presence detected"),
            0x01 => Some("Failure detected"),
            0x02 => Some("Predictive Failure"),
            0x03 => Some("Power Supply AC lost"),
            0x04 => Some("AC lost or out-of-range"),
            0x05 => Some("AC out-of-range, but present"),
            0x06 => Some("Config Error: Vendor Mismatch"),
            0x07 => Some("Power Supply Inative"),
            _ => None,
        },

        SensorType::PowerUnit => match offset {
            0x00 => Some("Power Off/Down"),
            0x01 => Some("Power Cycle"),
            0x02 => Some("240V Power Down"),
            0x03 => Some("Interlock Power Down"),
            0x04 => Some("AC lost"),
            0x05 => Some("Soft Power Control Failure"),
            0x06 => Some("Failure detected"),
            0x07 => Some("Predictive Failure"),
            _ => None,
        },

        SensorType::Memory => match offset {
            0x00 => Some("Correctable ECC"),
            0x01 => Some("UnCorrectable ECC"),
            0x02 => Some("Parity"),
            0x03 => Some("Memory Scrub Failed"),
            0x04 => Some("Memory Device Disabled"),
            0x05 => Some("Correctable ECC logging limit reached"),
            0x06 => Some("Presence detected."),
            0x07 => Some("Configuration error."),
            0x08 => Some("Spare."),
            0x09 => Some("Throttled"),
            0x0A => Some("Critical Overtemperature"),
            _ => None,
        },

        SensorType::DriveSlotBay => match offset {
            0x00 => Some("Drive Presence"),
            0x01 => Some("Drive Fault"),
            0x02 => Some("Predictive Fault"),
            0x03 => Some("Hot Spare"),
            0x04 => Some("Parity Check in progress"),
            0x05 => Some("In Critical Array"),
            0x06 => Some("In Failed Array"),
            0x07 => Some("Rebuild/Remap in progress"),
            0x08 => Some("Rebuild Aborted"),
            _ => None,
        },

        SensorType::SystemFirmware => match offset {
            0x00 => Some("System Firmware Error"),
            0x01 => Some("System Firmware Hang "),
            0x02 => Some("System Firmware Progress"),
            _ => None,
        },

        SensorType::EventLoggingDisabled => match offset {
            0x00 => Some("Correctable memory error logging disabled"),
            0x01 => Some("Event logging disabled"),
            0x02 => Some("Log area reset/cleared"),
            0x03 => Some("All event logging disabled"),
            0x04 => Some("Log full"),
            0x05 => Some("Log almost full"),
            _ => None,
        },

        SensorType::Watchdog1 => match offset {
            0x00 => Some("BIOS Reset"),
            0x01 => Some("OS Reset"),
            0x02 => Some("OS Shut Down"),
            0x03 => Some("OS Power Down"),
            0x04 => Some("OS Power Cycle"),
            0x05 => Some("OS NMI/Diag Interrupt"),
            0x06 => Some("OS Expired"),
            0x07 => Some("OS pre-timeout Interrupt"),
            _ => None,
        },

        SensorType::SystemEvent => match offset {
            0x00 => Some("System Reconfigured"),
            0x01 => Some("OEM System boot event"),
            0x02 => Some("Undetermined system hardware failure"),
            0x03 => Some("Entry added to auxiliary log"),
            0x04 => Some("PEF Action"),
            0x05 => Some("Timestamp Clock Sync"),
            _ => None,
        },

        SensorType::CriticalInterrupt => match offset {
            0x00 => Some("NMI/Diag Interrupt"),
            0x01 => Some("Bus Timeout"),
            0x02 => Some("I/O Channel check NMI"),
            0x03 => Some("Software NMI"),
            0x04 => Some("PCI PERR"),
            0x05 => Some("PCI SERR"),
            0x06 => Some("EISA failsafe timeout"),
            0x07 => Some("Bus Correctable error"),
            0x08 => Some("Bus Uncorrectable error"),
            0x09 => Some("Fatal NMI"),
            0x0A => Some("Bus Fatal Error"),
            0x0B => Some("Bus Degraded"),
            _ => None,
        },

        SensorType::Button => match offset {
            0x00 => Some("Power Button pressed"),
            0x01 => Some("Sleep Button pressed"),
            0x02 => Some("Reset Button pressed"),
            0x03 => Some("FRU Latch"),
            0x04 => Some("FRU Service"),
            _ => None,
        },

        SensorType::ChipSet => match offset {
            0x00 => Some("Soft Power Control Failure"),
            0x01 => Some("Thermal Trip"),
            _ => None,
        },

        SensorType::CableOrInterconnect => match offset {
            0x00 => Some("Connected"),
            0x01 => Some("Config Error"),
            _ => None,
        },

        SensorType::SystemBootInitiated => match offset {
            0x00 => Some("Initiated by power up"),
            0x01 => Some("Initiated by hard reset"),
            0x02 => Some("Initiated by warm reset"),
            0x03 => Some("User requested PXE boot"),
            0x04 => Some("Automatic boot to diagnostic"),
            0x05 => Some("OS initiated hard reset"),
            0x06 => Some("OS initiated warm reset"),
            0x07 => Some("System Restart"),
            _ => None,
        },

        SensorType::BootError => match offset {
            0x00 => Some("No bootable media"),
            0x01 => Some("Non-bootable disk in drive"),
            0x02 => Some("PXE server not found"),
            0x03 => Some("Invalid boot sector"),
            0x04 => Some("Timeout waiting for selection"),
            _ => None,
        },

        SensorType::OsBoot => match offset {
            0x00 => Some("A: boot completed"),
            0x01 => Some("C: boot completed"),
            0x02 => Some("PXE boot completed"),
            0x03 => Some("Diagnostic boot completed"),
            0x04 => Some("CD-ROM boot completed"),
            0x05 => Some("ROM boot completed"),
            0x06 => Some("boot completed - device not specified"),
            0x07 => Some("Installation started"),
            0x08 => Some("Installation completed"),
            0x09 => Some("Installation aborted"),
            0x0A => Some("Installation failed"),
            _ => None,
        },

        SensorType::OsCriticalStop => match offset {
            0x00 => Some("Error during system startup"),
            0x01 => Some("Run-time critical stop"),
            0x02 => Some("OS graceful stop"),
            0x03 => Some("OS graceful shutdown"),
            0x04 => Some("PEF initiated soft shutdown"),
            0x05 => Some("Agent not responding"),
            _ => None,
        },

        SensorType::SlotOrConnector => match offset {
            0x00 => Some("Fault Status"),
            0x01 => Some("Identify Status"),
            0x02 => Some("Device Installed"),
            0x03 => Some("Ready for Device Installation"),
            0x04 => Some("Ready for Device Removal"),
            0x05 => Some("Slot Power is Off"),
            0x06 => Some("Device Removal Request"),
            0x07 => Some("Interlock"),
            0x08 => Some("Slot is Disabled"),
            0x09 => Some("Spare Device"),
            _ => None,
        },

        SensorType::SystemAcpiPowerState => match offset {
            0x00 => Some("S0/G0: working"),
            0x01 => Some("S1: sleeping with system hw & processor context maintained"),
            0x02 => Some("'S2: sleeping',processor context lost"),
            0x03 => Some("'S3: sleeping,processor & hw context lost',memory retained"),
            0x04 => Some("S4: non-volatile sleep/suspend-to-disk"),
            0x05 => Some("S5/G2: soft-off"),
            0x06 => Some("S4/S5: soft-off"),
            0x07 => Some("G3: mechanical off"),
            0x08 => Some("Sleeping in S1/S2/S3 state"),
            0x09 => Some("G1: sleeping"),
            0x0A => Some("S5: entered by override"),
            0x0B => Some("Legacy ON state"),
            0x0C => Some("Legacy OFF state"),
            0x0E => Some("Unknown"),
            _ => None,
        },

        SensorType::Watchdog2 => match offset {
            0x00 => Some("Timer expired"),
            0x01 => Some("Hard reset"),
            0x02 => Some("Power down"),
            0x03 => Some("Power cycle"),
            0x04..=0x07 => Some("reserved"),
            _ => None,
        },

        SensorType::PlatformAlert => match offset {
            0x00 => Some("Platform generated page"),
            0x01 => Some("Platform generated LAN alert"),
            0x02 => Some("Platform Event Trap generated"),
            0x03 => Some("Platform generated SNMP trap,OEM format"),
            _ => None,
        },

        SensorType::EntityPresence => match offset {
            0x00 => Some("Present"),
            0x01 => Some("Absent"),
            0x02 => Some("Disabled"),
            _ => None,
        },

        SensorType::Lan => match offset {
            0x00 => Some("Heartbeat Lost"),
            0x01 => Some("Heartbeat"),
            _ => None,
        },

        SensorType::ManagementSubsysHealth => match offset {
            0x00 => Some("Sensor access degraded or unavailable"),
            0x01 => Some("Controller access degraded or unavailable"),
            0x02 => Some("Management controller off-line"),
            0x03 => Some("Management controller unavailable"),
            0x04 => Some("Sensor failure"),
            0x05 => Some("FRU failure"),
            _ => None,
        },

        SensorType::Battery => match offset {
            0x00 => Some("Low"),
            0x01 => Some("Failed"),
            0x02 => Some("Presence Detected"),
            _ => None,
        },

        SensorType::SessionAudit => match offset {
            0x00 => Some("Session Activated"),
            0x01 => Some("Session Deactivated"),
            0x02 => Some("Invalid Username or Password"),
            0x03 => Some("Invalid password disable."),
            _ => None,
        },

        SensorType::VersionChange => match offset {
            0x00 => Some("Hardware change detected"),
            0x01 => Some("Hardware incompatibility detected"),
            0x03 => Some("Firmware or software incompatibility detected"),
            0x04 => Some("Invalid or unsupported hardware version"),
            0x05 => Some("Invalid or unsupported firmware or software version"),
            0x06 => Some("Hardware change success"),
            0x07 => Some("Firmware or software change success"),
            _ => None,
        },

        SensorType::FruState => match offset {
            0x00 => Some("Not Installed"),
            0x01 => Some("Inactive"),
            0x02 => Some("Activation Requested"),
            0x03 => Some("Activation in Progress"),
            0x04 => Some("Active"),
            0x05 => Some("Deactivation Requested"),
            0x06 => Some("Deactivation in Progress"),
            0x07 => Some("Communication lost"),
            _ => None,
        },

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_offsets() {
        assert_eq!(Some("State Asserted"), generic_event_offset_desc(0x03, 0x01));
        assert_eq!(Some("Information"), generic_event_offset_desc(0x07, 0x08));
        assert_eq!(Some("D3 Power State"), generic_event_offset_desc(0x0C, 0x03));
        assert_eq!(None, generic_event_offset_desc(0x0C, 0x04));
        assert_eq!(None, generic_event_offset_desc(0x01, 0x00));
        assert_eq!(None, generic_event_offset_desc(0x0D, 0x00));
    }

    #[test]
    fn sensor_specific_offsets() {
        assert_eq!(
            Some("Presence detected"),
            sensor_event_offset_desc(SensorType::PowerSupply, 0x00)
        );
        assert_eq!(
            Some("Connected"),
            sensor_event_offset_desc(SensorType::CableOrInterconnect, 0x00)
        );
        assert_eq!(
            Some("Correctable Machine Check Error"),
            sensor_event_offset_desc(SensorType::Processor, 0x0C)
        );
        assert_eq!(None, sensor_event_offset_desc(SensorType::VersionChange, 0x02));
        assert_eq!(None, sensor_event_offset_desc(SensorType::Fan, 0x00));
    }

    #[test]
    fn dispatch_on_reading_type() {
        assert_eq!(
            Some("Device Enabled"),
            event_offset_desc(
                EventReadingTypeCodes::DiscreteGeneric(0x09),
                SensorType::Processor,
                0x01
            )
        );
        assert_eq!(
            Some("Thermal Trip"),
            event_offset_desc(EventReadingTypeCodes::SensorSpecific, SensorType::Processor, 0x01)
        );
        assert_eq!(
            None,
            event_offset_desc(EventReadingTypeCodes::Threshold, SensorType::Processor, 0x01)
        );
    }

    #[test]
    fn shipped_phrases_are_kept_verbatim() {
        assert_eq!(
            Some("Transition to Critical from less servere"),
            generic_event_offset_desc(0x07, 0x02)
        );
        assert_eq!(
            Some("Redundancy Degraded from  Fully Redundant"),
            generic_event_offset_desc(0x0B, 0x06)
        );
        assert_eq!(
            Some("Processor area intrusion,"),
            sensor_event_offset_desc(SensorType::PhysicalSecurity, 0x03)
        );
        assert_eq!(
            Some("FRB3/Processor startup/init failfirmure"),
            sensor_event_offset_desc(SensorType::Processor, 0x04)
        );
        assert_eq!(
            Some("System Firmware Hang "),
            sensor_event_offset_desc(SensorType::SystemFirmware, 0x01)
        );
    }

    #[test]
    fn tables() {
        use EventReadingTypeCodes::*;

        assert!(has_event_offset_table(DiscreteGeneric(0x03), SensorType::Reserved(0)));
        assert!(has_event_offset_table(SensorSpecific, SensorType::Processor));
        assert!(!has_event_offset_table(DiscreteGeneric(0x0D), SensorType::Processor));
        assert!(!has_event_offset_table(SensorSpecific, SensorType::Fan));
        assert!(!has_event_offset_table(Threshold, SensorType::Processor));
    }
}
