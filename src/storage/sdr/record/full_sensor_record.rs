use crate::storage::sdr::linearization::{
    self, Coefficients, ConversionError, PackedCoefficients, NON_COEFFICIENT_BITS,
};

use super::*;

bitflags::bitflags! {
    /// Which of the characteristic readings of a full sensor record are
    /// specified.
    pub struct AnalogCharacteristics: u8 {
        const NOMINAL_READING = 1 << 0;
        const NORMAL_MAX = 1 << 1;
        const NORMAL_MIN = 1 << 2;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FullSensorRecord {
    pub header: RecordHeader,
    pub common: SensorRecordCommon,
    pub linearization: u8,
    /// M (10 bits) and tolerance (6 bits).
    pub m_tol: u16,
    /// B (10 bits) and the low 6 bits of the accuracy.
    pub b_acc: u16,
    /// High 4 bits of the accuracy, accuracy exponent and sensor direction.
    pub acc: u8,
    /// R (result) exponent in the high nibble, B exponent in the low nibble.
    pub rb_exp: u8,
    pub analog_flags: u8,
    pub nominal_reading: u8,
    pub normal_max: u8,
    pub normal_min: u8,
    pub sensor_max: u8,
    pub sensor_min: u8,
    pub upper_non_recoverable: u8,
    pub upper_critical: u8,
    pub upper_non_critical: u8,
    pub lower_non_recoverable: u8,
    pub lower_critical: u8,
    pub lower_non_critical: u8,
    pub positive_hysteresis: u8,
    pub negative_hysteresis: u8,
    pub reserved: [u8; 2],
    pub oem: u8,
    pub device_id: DeviceId,
}

impl FullSensorRecord {
    pub const BODY_LEN: usize = 42;

    /// Create an empty full sensor record with ID `id` and device ID `name`.
    pub fn new(id: RecordId, name: &str) -> Result<Self, DeviceIdTooLong> {
        Ok(Self {
            header: RecordHeader::new(id, RecordType::FullSensor),
            common: SensorRecordCommon::default(),
            linearization: 0,
            m_tol: 0,
            b_acc: 0,
            acc: 0,
            rb_exp: 0,
            analog_flags: 0,
            nominal_reading: 0,
            normal_max: 0,
            normal_min: 0,
            sensor_max: 0,
            sensor_min: 0,
            upper_non_recoverable: 0,
            upper_critical: 0,
            upper_non_critical: 0,
            lower_non_recoverable: 0,
            lower_critical: 0,
            lower_non_critical: 0,
            positive_hysteresis: 0,
            negative_hysteresis: 0,
            reserved: [0; 2],
            oem: 0,
            device_id: DeviceId::try_from(name)?,
        })
    }

    pub(super) fn parse(header: RecordHeader, body: &[u8]) -> Result<Self, ParseError> {
        let (fixed, device_id) = split_body(body, Self::BODY_LEN)?;
        let common = SensorRecordCommon::parse(fixed).ok_or(ParseError::NotEnoughData)?;
        let d = &fixed[SensorRecordCommon::LEN..];

        Ok(Self {
            header,
            common,
            linearization: d[0],
            m_tol: u16::from_le_bytes([d[1], d[2]]),
            b_acc: u16::from_le_bytes([d[3], d[4]]),
            acc: d[5],
            rb_exp: d[6],
            analog_flags: d[7],
            nominal_reading: d[8],
            normal_max: d[9],
            normal_min: d[10],
            sensor_max: d[11],
            sensor_min: d[12],
            upper_non_recoverable: d[13],
            upper_critical: d[14],
            upper_non_critical: d[15],
            lower_non_recoverable: d[16],
            lower_critical: d[17],
            lower_non_critical: d[18],
            positive_hysteresis: d[19],
            negative_hysteresis: d[20],
            reserved: [d[21], d[22]],
            oem: d[23],
            device_id,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut body = Vec::with_capacity(Self::BODY_LEN);

        self.common.write(&mut body);
        body.push(self.linearization);
        body.extend_from_slice(&self.m_tol.to_le_bytes());
        body.extend_from_slice(&self.b_acc.to_le_bytes());
        body.extend_from_slice(&[
            self.acc,
            self.rb_exp,
            self.analog_flags,
            self.nominal_reading,
            self.normal_max,
            self.normal_min,
            self.sensor_max,
            self.sensor_min,
            self.upper_non_recoverable,
            self.upper_critical,
            self.upper_non_critical,
            self.lower_non_recoverable,
            self.lower_critical,
            self.lower_non_critical,
            self.positive_hysteresis,
            self.negative_hysteresis,
        ]);
        body.extend_from_slice(&self.reserved);
        body.push(self.oem);

        assemble(&self.header, &body, &self.device_id)
    }

    pub fn packed_coefficients(&self) -> PackedCoefficients {
        PackedCoefficients {
            m_tol: self.m_tol & !NON_COEFFICIENT_BITS,
            b_acc: self.b_acc & !NON_COEFFICIENT_BITS,
            rb_exp: self.rb_exp,
        }
    }

    pub fn coefficients(&self) -> Coefficients {
        self.packed_coefficients().unpack()
    }

    /// Store `coefficients`, leaving tolerance and accuracy untouched.
    pub fn set_coefficients(&mut self, coefficients: Coefficients) {
        let packed = coefficients.pack();

        self.m_tol = (self.m_tol & NON_COEFFICIENT_BITS) | packed.m_tol;
        self.b_acc = (self.b_acc & NON_COEFFICIENT_BITS) | packed.b_acc;
        self.rb_exp = packed.rb_exp;
    }

    /// Tolerance, in +/- half raw counts.
    pub fn tolerance(&self) -> u8 {
        ((self.m_tol & NON_COEFFICIENT_BITS) >> 8) as u8
    }

    /// Accuracy, in 1/100 percent scaled up by [`Self::accuracy_exponent`].
    pub fn accuracy(&self) -> u16 {
        let low = (self.b_acc & NON_COEFFICIENT_BITS) >> 8;
        let high = ((self.acc & 0xF0) as u16) << 2;
        high | low
    }

    pub fn accuracy_exponent(&self) -> u8 {
        (self.acc >> 2) & 0b11
    }

    pub fn direction(&self) -> Option<Direction> {
        Direction::try_from(self.acc & 0b11).ok()
    }

    pub fn linearization(&self) -> Linearization {
        Linearization::from(self.linearization)
    }

    pub fn analog_characteristics(&self) -> AnalogCharacteristics {
        AnalogCharacteristics::from_bits_truncate(self.analog_flags)
    }

    /// Convert `raw` using this record's coefficients and data format,
    /// whether or not the sensor reports analog readings.
    pub fn raw_to_value(&self, raw: u8) -> f64 {
        linearization::raw_to_value(&self.coefficients(), self.common.data_format(), raw)
    }

    pub fn value_to_raw(&self, value: f64) -> Result<u8, ConversionError> {
        linearization::value_to_raw(&self.coefficients(), self.common.data_format(), value)
    }

    /// Whether readings of this sensor are analog values.
    pub fn is_analog(&self) -> bool {
        self.common.event_reading_type().is_threshold() && self.common.data_format().is_analog()
    }

    pub fn nominal_value(&self) -> Option<f64> {
        if self
            .analog_characteristics()
            .contains(AnalogCharacteristics::NOMINAL_READING)
        {
            Some(self.raw_to_value(self.nominal_reading))
        } else {
            None
        }
    }

    pub fn threshold(&self, kind: ThresholdKind) -> u8 {
        match kind {
            ThresholdKind::LowerNonCritical => self.lower_non_critical,
            ThresholdKind::LowerCritical => self.lower_critical,
            ThresholdKind::LowerNonRecoverable => self.lower_non_recoverable,
            ThresholdKind::UpperNonCritical => self.upper_non_critical,
            ThresholdKind::UpperCritical => self.upper_critical,
            ThresholdKind::UpperNonRecoverable => self.upper_non_recoverable,
        }
    }

    fn threshold_mut(&mut self, kind: ThresholdKind) -> &mut u8 {
        match kind {
            ThresholdKind::LowerNonCritical => &mut self.lower_non_critical,
            ThresholdKind::LowerCritical => &mut self.lower_critical,
            ThresholdKind::LowerNonRecoverable => &mut self.lower_non_recoverable,
            ThresholdKind::UpperNonCritical => &mut self.upper_non_critical,
            ThresholdKind::UpperCritical => &mut self.upper_critical,
            ThresholdKind::UpperNonRecoverable => &mut self.upper_non_recoverable,
        }
    }

    pub fn threshold_value(&self, kind: ThresholdKind) -> f64 {
        self.raw_to_value(self.threshold(kind))
    }

    /// Set threshold `kind` to the raw equivalent of `value`.
    pub fn set_threshold(&mut self, kind: ThresholdKind, value: f64) -> Result<(), ConversionError> {
        let raw = self.value_to_raw(value)?;
        *self.threshold_mut(kind) = raw;
        Ok(())
    }
}

impl SensorRecord for FullSensorRecord {
    fn common(&self) -> &SensorRecordCommon {
        &self.common
    }

    fn reading_value(&self, raw: u8) -> Option<f64> {
        if self.is_analog() {
            Some(self.raw_to_value(raw))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fan() -> FullSensorRecord {
        let mut record = FullSensorRecord::new(RecordId::new_raw(5), "Fan 5").unwrap();

        record.common.sensor_number = 4;
        record.common.sensor_type = 0x04;
        record.common.event_reading_type = 0x01;
        record.common.base_unit = 18;
        record.common.discrete_reading_mask = 0x3F3F;
        record.set_coefficients(Coefficients::new(63, 0, 0, 0));
        record.lower_critical = 10;
        record.upper_critical = 200;
        record.analog_flags = 0x01;
        record.nominal_reading = 40;

        record
    }

    #[test]
    fn encode_layout() {
        let bytes = fan().encode();

        assert_eq!(
            hex::decode("05005101").unwrap(),
            &bytes[..4],
            "header"
        );
        assert_eq!(42 + 1 + 5, bytes[4] as usize);
        assert_eq!(HEADER_LEN + 48, bytes.len());
        // Sensor number, sensor type and reading type
        assert_eq!(0x04, bytes[HEADER_LEN + 2]);
        assert_eq!(0x04, bytes[HEADER_LEN + 7]);
        assert_eq!(0x01, bytes[HEADER_LEN + 8]);
        // M LS byte
        assert_eq!(63, bytes[HEADER_LEN + 19]);
        // ID type/length byte, then the ID
        assert_eq!(0xC5, bytes[HEADER_LEN + 42]);
        assert_eq!(b"Fan 5", &bytes[HEADER_LEN + 43..]);
    }

    #[test]
    fn round_trip() {
        let mut record = fan();
        record.reserved = [0xAB, 0xCD];
        record.oem = 0x77;
        record.m_tol |= 0x1500;

        let decoded = Record::decode(RecordType::FullSensor, &record.encode()).unwrap();

        assert_eq!(Record::FullSensor(record), decoded);
    }

    #[test]
    fn decode_captured_record() {
        // Full sensor record 0x0010, "CPU Temp": degrees C, M = 1, unsigned.
        let data = hex::decode(concat!(
            "1000510133",
            "2000300301",
            "7f680101",
            "800a800a",
            "3f00",
            "000100",
            "00",
            "01000000",
            "0000",
            "07",
            "285a05ff00",
            "5f5a55000005",
            "0202",
            "0000",
            "00",
            "c8",
            "4350552054656d70"
        ))
        .unwrap();

        let record = Record::decode(RecordType::FullSensor, &data).unwrap();
        let full = record.full_sensor().unwrap();

        assert_eq!(RecordId::new_raw(0x10), record.record_id());
        assert_eq!(RecordType::FullSensor, record.record_type());
        assert_eq!("CPU Temp", record.device_id().to_string());
        assert_eq!(0x30, full.sensor_number());
        assert_eq!(SensorType::Temperature, full.sensor_type());
        assert_eq!(Unit::DegreesCelsius, full.units().base_unit);
        assert_eq!(Coefficients::new(1, 0, 0, 0), full.coefficients());
        assert_eq!(Some(40.0), full.nominal_value());
        assert_eq!(95.0, full.threshold_value(ThresholdKind::UpperNonRecoverable));
        assert_eq!(Some(55.0), full.reading_value(55));
        assert_eq!(data, record.encode());
    }

    #[test]
    fn coefficients_preserve_tolerance_and_accuracy() {
        let mut record = fan();
        record.m_tol = 0x2A00;
        record.b_acc = 0x1500;
        record.acc = 0xA4;

        record.set_coefficients(Coefficients::new(-3, 100, -2, 1));

        assert_eq!(0x2A, record.tolerance());
        assert_eq!((0xA << 6) | 0x15, record.accuracy());
        assert_eq!(1, record.accuracy_exponent());
        assert_eq!(Coefficients::new(-3, 100, -2, 1), record.coefficients());
    }

    #[test]
    fn readings() {
        let record = fan();

        assert_eq!(Some(2646.0), record.reading_value(0x2A));
        assert_eq!(Some(2520.0), record.nominal_value());
        assert_eq!(630.0, record.threshold_value(ThresholdKind::LowerCritical));

        let mut discrete = fan();
        discrete.common.event_reading_type = 0x6F;
        assert_eq!(None, discrete.reading_value(0x2A));

        let mut no_analog = fan();
        no_analog.common.unit = 0xC0;
        assert_eq!(None, no_analog.reading_value(0x2A));
    }

    #[test]
    fn set_threshold() {
        let mut record = fan();

        record
            .set_threshold(ThresholdKind::UpperNonCritical, 6300.0)
            .unwrap();
        assert_eq!(100, record.upper_non_critical);

        record.set_coefficients(Coefficients::new(0, 0, 0, 0));
        assert_eq!(
            Err(ConversionError::CoefficientZero),
            record.set_threshold(ThresholdKind::UpperNonCritical, 1.0)
        );
    }

    #[test]
    fn name_too_long() {
        assert_eq!(
            Err(DeviceIdTooLong { len: 20 }),
            FullSensorRecord::new(RecordId::new_raw(1), "a name that is long!")
        );
    }
}
