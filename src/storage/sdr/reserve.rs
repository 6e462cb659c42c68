use std::num::NonZeroU16;

use crate::connection::{IpmiCommand, Message, NetFn, NotEnoughData};

/// Reserve the SDR repository.
///
/// The returned reservation ID must accompany every partial [`GetDeviceSdr`]
/// read. The device cancels it whenever the repository changes, after which
/// reads fail with [`CompletionErrorCode::ReservationCancelledOrInvalidId`].
///
/// [`GetDeviceSdr`]: super::GetDeviceSdr
/// [`CompletionErrorCode::ReservationCancelledOrInvalidId`]: crate::connection::CompletionErrorCode::ReservationCancelledOrInvalidId
pub struct ReserveSdrRepository;

impl IpmiCommand for ReserveSdrRepository {
    type Output = NonZeroU16;
    type Error = NotEnoughData;

    fn parse_success_response(data: &[u8]) -> Result<Self::Output, Self::Error> {
        if data.len() < 2 {
            return Err(NotEnoughData);
        }

        let reservation_id = u16::from_le_bytes([data[0], data[1]]);
        NonZeroU16::new(reservation_id).ok_or(NotEnoughData)
    }
}

impl From<ReserveSdrRepository> for Message {
    fn from(_: ReserveSdrRepository) -> Self {
        Message::new_request(NetFn::Storage, 0x22, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reservation_id() {
        assert_eq!(
            NonZeroU16::new(0xBEEF),
            ReserveSdrRepository::parse_success_response(&[0xEF, 0xBE]).ok()
        );
        assert_eq!(
            Err(NotEnoughData),
            ReserveSdrRepository::parse_success_response(&[0x00, 0x00])
        );
        assert_eq!(
            Err(NotEnoughData),
            ReserveSdrRepository::parse_success_response(&[0x01])
        );
    }
}
