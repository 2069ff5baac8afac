use super::types::{TS_MARKER, TS_PACKET_SIZE};
use crate::error::{Result, TsError};
use bytes::Bytes;

/// A single framed transport stream packet.
///
/// Always exactly [`TS_PACKET_SIZE`] bytes long and starting with
/// [`TS_MARKER`]. The bytes are shared with the read buffer they were sliced
/// from, so holding a packet keeps that buffer alive but never copies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TSPacket {
    data: Bytes,
}

impl TSPacket {
    /// Wraps `data` after checking its length and sync byte.
    pub fn from_bytes(data: impl Into<Bytes>) -> Result<Self> {
        let data = data.into();
        if data.len() != TS_PACKET_SIZE {
            return Err(TsError::InvalidData(format!(
                "TS packet must be {} bytes, got {}",
                TS_PACKET_SIZE,
                data.len()
            )));
        }
        if data[0] != TS_MARKER {
            return Err(TsError::InvalidData("Invalid sync byte".into()));
        }
        Ok(Self { data })
    }

    // Caller has already verified the frame.
    pub(crate) fn from_framed(data: Bytes) -> Self {
        debug_assert_eq!(data.len(), TS_PACKET_SIZE);
        debug_assert_eq!(data[0], TS_MARKER);
        Self { data }
    }

    /// Raw packet bytes, sync byte included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The shared buffer backing this packet.
    pub fn bytes(&self) -> &Bytes {
        &self.data
    }

    /// Consumes the packet, returning its bytes.
    pub fn into_bytes(self) -> Bytes {
        self.data
    }

    /// Always [`TS_PACKET_SIZE`].
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`; a framed packet is never empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl AsRef<[u8]> for TSPacket {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
