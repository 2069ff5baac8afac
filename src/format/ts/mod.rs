//! # MPEG Transport Stream (TS) Packet Framing
//!
//! This module locates and extracts fixed-size 188-byte transport stream
//! packets from byte sources of unknown alignment:
//!
//! - **Resynchronization**: bytes before a sync byte are skipped and counted
//! - **Alignment check**: a sync byte only starts a packet when another sync
//!   byte follows one packet later, or the data ends right after the packet
//! - **Buffer management**: refills and tail compaction without losing or
//!   duplicating bytes
//! - **Reset**: seekable sources can be rewound and read again
//!
//! Packet contents are not interpreted; see [`TSPacket`] for the raw frame.
//!
//! ## Example Usage
//!
//! ```rust
//! use std::io::Cursor;
//! use tsframe::format::ts::{SeekableTSSource, TS_MARKER, TS_PACKET_SIZE};
//! use tsframe::format::{PacketSource, ResettableSource};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut data = vec![0u8; TS_PACKET_SIZE * 2];
//! data[0] = TS_MARKER;
//! data[TS_PACKET_SIZE] = TS_MARKER;
//!
//! let mut source = SeekableTSSource::builder()
//!     .byte_source(Cursor::new(data))
//!     .build()
//!     .await?;
//!
//! let mut count = 0;
//! while let Some(packet) = source.next_packet().await? {
//!     assert_eq!(packet.len(), TS_PACKET_SIZE);
//!     count += 1;
//! }
//! assert_eq!(count, 2);
//!
//! // Read everything again from the start
//! source.reset().await?;
//! assert!(source.next_packet().await?.is_some());
//! source.close().await?;
//! # Ok(())
//! # }
//! ```

/// Framed packet type
pub mod packet;

/// Packet framer over seekable byte sources
pub mod source;

/// Core TS constants
pub mod types;

pub use packet::TSPacket;
pub use source::{SeekableTSSource, SeekableTSSourceBuilder};
pub use types::{
    buffer_size,
    DEFAULT_BUFFER_PACKETS,
    DEFAULT_BUFFER_SIZE,
    TS_MARKER,
    TS_PACKET_SIZE,
};
