/// Sync byte expected at the start of every transport stream packet
pub const TS_MARKER: u8 = 0x47;

/// Size of a transport stream packet in bytes
pub const TS_PACKET_SIZE: usize = 188;

/// Default read buffer capacity, in packets
pub const DEFAULT_BUFFER_PACKETS: usize = 1000;

/// Default read buffer capacity, in bytes
pub const DEFAULT_BUFFER_SIZE: usize = TS_PACKET_SIZE * DEFAULT_BUFFER_PACKETS;

/// Read buffer capacity in bytes for a buffer holding `packets` packets,
/// or `None` if that doesn't fit in a `usize`.
pub fn buffer_size(packets: usize) -> Option<usize> {
    TS_PACKET_SIZE.checked_mul(packets)
}
