//! Conversion between raw sensor readings and real values.
//!
//! A full sensor record describes a linear conversion
//! `y = (M * x + B * 10^Bexp) * 10^Rexp` with small signed integer
//! coefficients. On the wire the coefficients are packed into bit fields
//! that share bytes with the tolerance and accuracy values.

const M_B_MAGNITUDE: u16 = 0x01FF;
const EXP_MAGNITUDE: u16 = 0x0007;

/// The bits of `m_tol` and `b_acc` that hold tolerance and accuracy.
pub const NON_COEFFICIENT_BITS: u16 = 0x3F00;

/// Encode `value` as a sign bit directly above `magnitude_mask`, followed by
/// the two's complement of the magnitude when negative.
fn pack_signed(value: i16, magnitude_mask: u16) -> u16 {
    let sign = magnitude_mask + 1;
    let magnitude = value.unsigned_abs() & magnitude_mask;

    if value < 0 {
        ((!magnitude).wrapping_add(1) & magnitude_mask) | sign
    } else {
        magnitude
    }
}

fn unpack_signed(raw: u16, magnitude_mask: u16) -> i16 {
    let sign = magnitude_mask + 1;
    let magnitude = (raw & magnitude_mask) as i16;

    if raw & sign == sign {
        magnitude - sign as i16
    } else {
        magnitude
    }
}

/// Place a 10-bit value into the coefficient bits of a `m_tol`/`b_acc` field.
fn pack_ten_bit(value: u16) -> u16 {
    (value & 0x00FF) | ((value << 6) & 0xC000)
}

fn unpack_ten_bit(field: u16) -> u16 {
    ((field & 0xC000) >> 6) | (field & 0x00FF)
}

/// The conversion coefficients of a sensor.
///
/// `m` and `b` are 10-bit signed values (`-512..=511`), the exponents are
/// 4-bit signed values (`-8..=7`). Values outside of these ranges wrap when
/// packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Coefficients {
    pub m: i16,
    pub b: i16,
    pub b_exp: i8,
    pub r_exp: i8,
}

impl Coefficients {
    pub fn new(m: i16, b: i16, b_exp: i8, r_exp: i8) -> Self {
        Self { m, b, b_exp, r_exp }
    }

    pub fn pack(&self) -> PackedCoefficients {
        let m = pack_signed(self.m, M_B_MAGNITUDE);
        let b = pack_signed(self.b, M_B_MAGNITUDE);
        let b_exp = pack_signed(self.b_exp as i16, EXP_MAGNITUDE) as u8;
        let r_exp = pack_signed(self.r_exp as i16, EXP_MAGNITUDE) as u8;

        PackedCoefficients {
            m_tol: pack_ten_bit(m),
            b_acc: pack_ten_bit(b),
            rb_exp: (b_exp & 0x0F) | ((r_exp << 4) & 0xF0),
        }
    }

    fn apply(&self, x: f64) -> f64 {
        let m = self.m as f64;
        let b = self.b as f64;
        let b_exp = 10f64.powi(self.b_exp as i32);
        let r_exp = 10f64.powi(self.r_exp as i32);

        (m * x + b * b_exp) * r_exp
    }
}

/// Coefficients as they appear in a full sensor record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackedCoefficients {
    pub m_tol: u16,
    pub b_acc: u16,
    pub rb_exp: u8,
}

impl PackedCoefficients {
    pub fn unpack(&self) -> Coefficients {
        let m = unpack_signed(unpack_ten_bit(self.m_tol), M_B_MAGNITUDE);
        let b = unpack_signed(unpack_ten_bit(self.b_acc), M_B_MAGNITUDE);
        let b_exp = unpack_signed((self.rb_exp & 0x0F) as u16, EXP_MAGNITUDE) as i8;
        let r_exp = unpack_signed(((self.rb_exp & 0xF0) >> 4) as u16, EXP_MAGNITUDE) as i8;

        Coefficients { m, b, b_exp, r_exp }
    }
}

/// The numeric format of analog readings, from bits 7..6 of the sensor
/// unit byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Unsigned,
    OnesComplement,
    TwosComplement,
    NoAnalogReading,
}

impl DataFormat {
    pub fn from_unit_byte(unit: u8) -> Self {
        match (unit >> 6) & 0b11 {
            0b00 => Self::Unsigned,
            0b01 => Self::OnesComplement,
            0b10 => Self::TwosComplement,
            _ => Self::NoAnalogReading,
        }
    }

    pub fn is_analog(&self) -> bool {
        !matches!(self, Self::NoAnalogReading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionError {
    /// `M` is zero, so the conversion cannot be inverted.
    CoefficientZero,
    /// The value cannot be expressed in the sensor's data format.
    UnsupportedUnitEncoding,
}

impl core::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConversionError::CoefficientZero => write!(f, "M coefficient is zero"),
            ConversionError::UnsupportedUnitEncoding => write!(
                f,
                "only unsigned and two's complement readings can be encoded"
            ),
        }
    }
}

impl std::error::Error for ConversionError {}

/// Convert the raw reading `raw` to a real value.
pub fn raw_to_value(coefficients: &Coefficients, format: DataFormat, raw: u8) -> f64 {
    let x = match format {
        DataFormat::Unsigned => raw as f64,
        DataFormat::OnesComplement => {
            let raw = if raw & 0x80 == 0 {
                raw.wrapping_add(1)
            } else {
                raw
            };
            raw as f64
        }
        DataFormat::TwosComplement => raw as i8 as f64,
        DataFormat::NoAnalogReading => return 0.0,
    };

    coefficients.apply(x)
}

/// Convert the real value `value` to a raw reading.
///
/// The raw value is truncated towards zero.
pub fn value_to_raw(
    coefficients: &Coefficients,
    format: DataFormat,
    value: f64,
) -> Result<u8, ConversionError> {
    if coefficients.m == 0 {
        return Err(ConversionError::CoefficientZero);
    }

    let b = coefficients.b as f64 * 10f64.powi(coefficients.b_exp as i32);
    let raw = ((value / 10f64.powi(coefficients.r_exp as i32) - b) / coefficients.m as f64).trunc();

    // Saturating float to int conversion.
    let magnitude = raw.abs() as u8;

    if raw < 0.0 {
        match format {
            DataFormat::TwosComplement => Ok(128u8.wrapping_sub(magnitude) | 0x80),
            _ => Err(ConversionError::UnsupportedUnitEncoding),
        }
    } else {
        match format {
            DataFormat::Unsigned => Ok(magnitude),
            DataFormat::TwosComplement => Ok(magnitude & 0x7F),
            _ => Err(ConversionError::UnsupportedUnitEncoding),
        }
    }
}
