use crate::format::ts::TSPacket;
use crate::Result;

pub mod ts;

/// Common trait for pull-based transport stream packet sources
#[async_trait::async_trait]
pub trait PacketSource: Send {
    /// Read the next framed packet, or `None` once the source is exhausted
    async fn next_packet(&mut self) -> Result<Option<TSPacket>>;

    /// Release the underlying byte source
    async fn close(self) -> Result<()>
    where
        Self: Sized;
}

/// Packet sources that can rewind to the start of their input
#[async_trait::async_trait]
pub trait ResettableSource: PacketSource {
    /// Rewind to offset 0 so the packet sequence can be read again
    async fn reset(&mut self) -> Result<()>;
}

pub use self::ts::{SeekableTSSource, SeekableTSSourceBuilder};
