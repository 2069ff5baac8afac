use super::packet::TSPacket;
use super::types::*;
use crate::config;
use crate::error::{Result, TsError};
use crate::format::{PacketSource, ResettableSource};
use bytes::Bytes;
use futures::stream::{self, Stream};
use log::{debug, info};
use std::io::{ErrorKind, SeekFrom};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};

/// Transport stream packet source over a seekable byte source.
///
/// The source keeps a read buffer of fixed capacity and frames packets out of
/// it on demand. A candidate sync byte is only accepted when another sync byte
/// follows it one packet later, or when the packet ends exactly at the end of
/// the buffered data. Bytes that can't be framed are skipped one at a time.
///
/// Once [`next_packet`](PacketSource::next_packet) has returned `None` the
/// source stays exhausted until [`reset`](ResettableSource::reset).
pub struct SeekableTSSource<R> {
    reader: R,
    /// Valid bytes of the current read buffer; its length is the limit.
    buffer: Bytes,
    /// Next unread byte in `buffer`.
    position: usize,
    /// Capacity in bytes of every freshly allocated buffer.
    capacity: usize,
    skipped: u64,
    exhausted: bool,
}

/// Outcome of a boundary check at a sync byte.
enum Frame {
    Packet(TSPacket),
    /// No sync byte one packet later; the position moved by one byte.
    Spurious,
    /// Fewer than a packet's worth of bytes remain in the buffer.
    Short,
}

/// Reads until `buf` is full or the reader reports end of input.
async fn read_full<R: AsyncRead + Unpin>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]).await {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

impl<R> SeekableTSSource<R> {
    /// Returns a builder for a new source.
    pub fn builder() -> SeekableTSSourceBuilder<R> {
        SeekableTSSourceBuilder::new()
    }

    /// Total bytes skipped while searching for a sync byte since the source
    /// was built or last reset.
    pub fn skipped_bytes(&self) -> u64 {
        self.skipped
    }

    /// Read buffer capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Consumes the source and returns the underlying byte source.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    // A short read means nothing follows the buffered bytes.
    fn is_last_buffer(&self) -> bool {
        self.buffer.len() < self.capacity
    }

    /// Boundary check at the sync byte under the cursor.
    fn try_frame(&mut self) -> Frame {
        let remaining = self.remaining();
        if remaining < TS_PACKET_SIZE {
            return Frame::Short;
        }

        let start = self.position;
        if remaining == TS_PACKET_SIZE || self.buffer[start + TS_PACKET_SIZE] == TS_MARKER {
            let data = self.buffer.slice(start..start + TS_PACKET_SIZE);
            self.position += TS_PACKET_SIZE;
            Frame::Packet(TSPacket::from_framed(data))
        } else {
            debug!("no second marker found at buffer offset {}", start + TS_PACKET_SIZE);
            self.position += 1;
            Frame::Spurious
        }
    }
}

impl<R: AsyncRead + AsyncSeek + Unpin + Send> SeekableTSSource<R> {
    async fn new(reader: R, capacity: usize) -> Result<Self> {
        let mut source = Self {
            reader,
            buffer: Bytes::new(),
            position: 0,
            capacity,
            skipped: 0,
            exhausted: false,
        };
        source.fill_buffer().await?;
        Ok(source)
    }

    /// Replaces the buffer with a freshly filled one.
    async fn fill_buffer(&mut self) -> Result<usize> {
        let mut buf = vec![0u8; self.capacity];
        let n = read_full(&mut self.reader, &mut buf).await?;
        buf.truncate(n);
        self.buffer = Bytes::from(buf);
        self.position = 0;
        Ok(n)
    }

    /// Moves the unread tail to the front of a new buffer and fills the rest.
    /// Returns the number of bytes read from the byte source.
    async fn compact_buffer(&mut self) -> Result<usize> {
        let tail = self.remaining();
        debug!("compacting {} byte tail into a new buffer", tail);

        let mut buf = vec![0u8; self.capacity];
        buf[..tail].copy_from_slice(&self.buffer[self.position..]);
        let n = read_full(&mut self.reader, &mut buf[tail..]).await?;
        buf.truncate(tail + n);
        self.buffer = Bytes::from(buf);
        self.position = 0;
        Ok(n)
    }

    /// Advances the cursor to the next sync byte, refilling as needed.
    /// Returns `false` when the byte source has nothing left.
    async fn find_marker(&mut self) -> Result<bool> {
        let mut skipped = 0usize;
        loop {
            if self.remaining() == 0 {
                if self.is_last_buffer() {
                    return Ok(false);
                }
                debug!("read buffer exhausted, refilling");
                if self.fill_buffer().await? == 0 {
                    return Ok(false);
                }
            }
            if self.buffer[self.position] == TS_MARKER {
                break;
            }
            self.position += 1;
            self.skipped += 1;
            skipped += 1;
        }
        if skipped > 0 {
            info!("Skipped {} bytes looking for TS marker", skipped);
        }
        Ok(true)
    }

    async fn frame_next(&mut self) -> Result<Option<TSPacket>> {
        loop {
            if !self.find_marker().await? {
                return Ok(None);
            }

            match self.try_frame() {
                Frame::Packet(packet) => return Ok(Some(packet)),
                Frame::Spurious => continue,
                Frame::Short if self.is_last_buffer() => return Ok(None),
                Frame::Short => {
                    // Only one compaction per boundary check; a packet that
                    // still doesn't fit ends the sequence.
                    if self.compact_buffer().await? == 0 {
                        return Ok(None);
                    }
                    match self.try_frame() {
                        Frame::Packet(packet) => return Ok(Some(packet)),
                        Frame::Spurious => continue,
                        Frame::Short => return Ok(None),
                    }
                }
            }
        }
    }

    async fn read_packet(&mut self) -> Result<Option<TSPacket>> {
        if self.exhausted {
            return Ok(None);
        }
        let packet = self.frame_next().await?;
        if packet.is_none() {
            debug!("transport stream exhausted, {} bytes skipped", self.skipped);
            self.exhausted = true;
        }
        Ok(packet)
    }

    /// Turns the source into a stream of packets.
    ///
    /// The stream ends at the end of the packet sequence, or right after
    /// yielding the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<TSPacket>> + Send {
        stream::unfold(Some(self), |state| async move {
            let mut source = match state {
                Some(source) => source,
                None => return None,
            };
            match source.read_packet().await {
                Ok(Some(packet)) => Some((Ok(packet), Some(source))),
                Ok(None) => None,
                Err(e) => Some((Err(e), None)),
            }
        })
    }
}

#[async_trait::async_trait]
impl<R: AsyncRead + AsyncSeek + Unpin + Send> PacketSource for SeekableTSSource<R> {
    async fn next_packet(&mut self) -> Result<Option<TSPacket>> {
        self.read_packet().await
    }

    async fn close(self) -> Result<()> {
        debug!("closing transport stream source");
        drop(self.reader);
        Ok(())
    }
}

#[async_trait::async_trait]
impl<R: AsyncRead + AsyncSeek + Unpin + Send> ResettableSource for SeekableTSSource<R> {
    async fn reset(&mut self) -> Result<()> {
        debug!("resetting transport stream source");
        self.reader.seek(SeekFrom::Start(0)).await?;
        self.fill_buffer().await?;
        self.skipped = 0;
        self.exhausted = false;
        Ok(())
    }
}

/// Builder for [`SeekableTSSource`].
pub struct SeekableTSSourceBuilder<R> {
    byte_source: Option<R>,
    buffer_packets: Option<usize>,
}

impl<R> Default for SeekableTSSourceBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> SeekableTSSourceBuilder<R> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            byte_source: None,
            buffer_packets: None,
        }
    }

    /// Sets the byte source to frame packets from. Required.
    pub fn byte_source(mut self, byte_source: R) -> Self {
        self.byte_source = Some(byte_source);
        self
    }

    /// Sets the read buffer capacity in packets.
    ///
    /// Defaults to [`config::buffer_packets`].
    pub fn buffer_packets(mut self, packets: usize) -> Self {
        self.buffer_packets = Some(packets);
        self
    }
}

impl<R: AsyncRead + AsyncSeek + Unpin + Send> SeekableTSSourceBuilder<R> {
    /// Validates the options and performs the first buffer fill.
    pub async fn build(self) -> Result<SeekableTSSource<R>> {
        let byte_source = self
            .byte_source
            .ok_or_else(|| TsError::Misconfigured("byte source cannot be empty".into()))?;
        let buffer_packets = self.buffer_packets.unwrap_or_else(config::buffer_packets);
        if buffer_packets == 0 {
            return Err(TsError::Misconfigured(
                "buffer must hold at least one packet".into(),
            ));
        }
        let capacity = buffer_size(buffer_packets)
            .ok_or_else(|| TsError::Misconfigured("buffer size overflows".into()))?;
        SeekableTSSource::new(byte_source, capacity).await
    }
}
