//! Storage commands. Only the SDR repository is covered.

pub mod sdr;

/// A timestamp as used by the repositories: seconds since the unix epoch,
/// where `0` means "unknown".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timestamp(u32);

impl Timestamp {
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0 {
            return write!(f, "Unknown");
        }

        #[cfg(feature = "time")]
        {
            let formatted = time::OffsetDateTime::from_unix_timestamp(self.0 as i64)
                .ok()
                .and_then(|t| {
                    t.format(&time::format_description::well_known::Rfc3339)
                        .ok()
                });

            match formatted {
                Some(time) => write!(f, "{}", time),
                None => write!(f, "{}", self.0),
            }
        }

        #[cfg(not(feature = "time"))]
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Timestamp {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_unknown() {
        assert_eq!("Unknown", Timestamp::from(0).to_string());
    }

    #[cfg(feature = "time")]
    #[test]
    fn formats_as_rfc3339() {
        assert_eq!("1970-01-01T00:00:10Z", Timestamp::from(10).to_string());
    }
}
