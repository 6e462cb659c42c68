use std::num::NonZeroU16;

use nonmax::NonMaxU8;

use crate::connection::{IpmiCommand, Message, NetFn, NotEnoughData};

use super::RecordId;

/// Get (part of) a device SDR.
///
/// Records must be obtained sequentially, following the next record ID
/// returned with each response. A record can be read in pieces by using
/// [`GetDeviceSdr::partial`] with the same reservation ID for every piece.
#[derive(Debug, Clone, Copy)]
pub struct GetDeviceSdr {
    reservation_id: Option<NonZeroU16>,
    record_id: RecordId,
    offset: u8,
    bytes_to_read: Option<NonMaxU8>,
}

impl GetDeviceSdr {
    /// Read the entire record with ID `record_id`.
    pub fn new(reservation_id: Option<NonZeroU16>, record_id: RecordId) -> Self {
        Self {
            reservation_id,
            record_id,
            offset: 0,
            bytes_to_read: None,
        }
    }

    /// Read `bytes_to_read` bytes of record `record_id`, starting at `offset`.
    ///
    /// A length of `0xFF` is the wire encoding of "read the entire record".
    pub fn partial(
        reservation_id: Option<NonZeroU16>,
        record_id: RecordId,
        offset: u8,
        bytes_to_read: u8,
    ) -> Self {
        Self {
            reservation_id,
            record_id,
            offset,
            bytes_to_read: NonMaxU8::new(bytes_to_read),
        }
    }

    pub fn record_id(&self) -> RecordId {
        self.record_id
    }

    pub fn offset(&self) -> u8 {
        self.offset
    }
}

impl From<GetDeviceSdr> for Message {
    fn from(value: GetDeviceSdr) -> Self {
        let mut data = vec![0u8; 6];

        data[0..2].copy_from_slice(
            &value
                .reservation_id
                .map(NonZeroU16::get)
                .unwrap_or(0)
                .to_le_bytes(),
        );

        data[2..4].copy_from_slice(&value.record_id.value().to_le_bytes());
        data[4] = value.offset;
        data[5] = value.bytes_to_read.map(|v| v.get()).unwrap_or(0xFF);

        Message::new_request(NetFn::Storage, 0x23, data)
    }
}

impl IpmiCommand for GetDeviceSdr {
    type Output = SdrData;

    type Error = NotEnoughData;

    fn parse_success_response(data: &[u8]) -> Result<Self::Output, Self::Error> {
        SdrData::parse(data).ok_or(NotEnoughData)
    }
}

/// The data returned by a [`GetDeviceSdr`] request.
#[derive(Debug, Clone, PartialEq)]
pub struct SdrData {
    /// The ID of the record that follows the requested one.
    pub next_entry: RecordId,
    /// The requested bytes of the record.
    pub data: Vec<u8>,
}

impl SdrData {
    pub fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < 2 {
            return None;
        }

        let next_entry = RecordId::new_raw(u16::from_le_bytes([data[0], data[1]]));

        Some(Self {
            next_entry,
            data: data[2..].to_vec(),
        })
    }
}
