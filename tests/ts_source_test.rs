use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tokio::fs::File;
use tsframe::format::ts::{SeekableTSSource, TSPacket, TS_MARKER, TS_PACKET_SIZE};
use tsframe::format::{PacketSource, ResettableSource};
use tsframe::Result;

fn create_packet(index: usize) -> Vec<u8> {
    let mut packet = vec![0xFFu8; TS_PACKET_SIZE];
    packet[0] = TS_MARKER; // Sync byte
    packet[1] = 0x40; // Payload unit start
    packet[2] = index as u8; // PID low
    packet[3] = 0x10 | (index as u8 & 0x0F); // Payload only + continuity counter
    packet
}

async fn write_fixture(name: &str, data: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("tsframe_{}_{}.ts", name, std::process::id()));
    tokio::fs::write(&path, data).await.unwrap();
    path
}

async fn read_all<S: PacketSource>(source: &mut S) -> Result<Vec<TSPacket>> {
    let mut packets = Vec::new();
    while let Some(packet) = source.next_packet().await? {
        packets.push(packet);
    }
    Ok(packets)
}

#[tokio::test]
async fn test_file_with_leading_garbage() -> Result<()> {
    // Half a packet of junk, then 2500 packets: spans several buffer refills
    let mut data = vec![0x00u8; 94];
    for i in 0..2500 {
        data.extend(create_packet(i));
    }
    let path = write_fixture("garbage", &data).await;

    let file = File::open(&path).await?;
    let mut source = SeekableTSSource::builder().byte_source(file).build().await?;

    let packets = read_all(&mut source).await?;
    assert_eq!(packets.len(), 2500);
    assert_eq!(source.skipped_bytes(), 94);
    for (i, packet) in packets.iter().enumerate() {
        assert_eq!(packet.as_bytes(), &create_packet(i)[..]);
    }

    source.close().await?;
    tokio::fs::remove_file(&path).await?;
    Ok(())
}

#[tokio::test]
async fn test_file_reset_is_repeatable() -> Result<()> {
    let mut data = Vec::new();
    for i in 0..300 {
        data.extend(create_packet(i));
    }
    // Trailing partial packet
    data.extend_from_slice(&create_packet(300)[..60]);
    let path = write_fixture("reset", &data).await;

    let file = File::open(&path).await?;
    let mut source = SeekableTSSource::builder()
        .byte_source(file)
        .buffer_packets(16)
        .build()
        .await?;

    let first = read_all(&mut source).await?;
    source.reset().await?;
    let second = read_all(&mut source).await?;

    assert_eq!(first.len(), 300);
    assert_eq!(first, second);

    source.close().await?;
    tokio::fs::remove_file(&path).await?;
    Ok(())
}

#[tokio::test]
async fn test_file_as_stream() -> Result<()> {
    let mut data = Vec::new();
    for i in 0..40 {
        data.extend(create_packet(i));
    }
    let path = write_fixture("stream", &data).await;

    let file = File::open(&path).await?;
    let source = SeekableTSSource::builder()
        .byte_source(file)
        .buffer_packets(3)
        .build()
        .await?;

    let packets: Vec<TSPacket> = source.into_stream().try_collect().await?;
    assert_eq!(packets.len(), 40);
    assert_eq!(packets[39].as_bytes()[2], 39);

    tokio::fs::remove_file(&path).await?;
    Ok(())
}
