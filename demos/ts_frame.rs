use std::env;
use tokio::fs::File;
use tsframe::format::ts::SeekableTSSource;
use tsframe::format::{PacketSource, ResettableSource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args()
        .nth(1)
        .ok_or("usage: ts_frame <file.ts>")?;

    println!("Framing {}...", path);
    let file = File::open(&path).await?;
    let mut source = SeekableTSSource::builder().byte_source(file).build().await?;

    let mut first_pass = 0usize;
    while let Some(packet) = source.next_packet().await? {
        if first_pass < 5 {
            println!("packet {}: {:02x?}", first_pass, &packet.as_bytes()[..4]);
        }
        first_pass += 1;
    }
    println!(
        "{} packets, {} bytes skipped",
        first_pass,
        source.skipped_bytes()
    );

    // A second pass over the same file must give the same count
    source.reset().await?;
    let mut second_pass = 0usize;
    while source.next_packet().await?.is_some() {
        second_pass += 1;
    }
    println!("second pass: {} packets", second_pass);
    if first_pass != second_pass {
        return Err(format!("pass mismatch: {} vs {}", first_pass, second_pass).into());
    }

    source.close().await?;
    Ok(())
}
