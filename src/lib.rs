#![doc(html_root_url = "https://docs.rs/tsframe/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

//! # tsframe - MPEG Transport Stream Packet Framing
//!
//! `tsframe` pulls fixed-size MPEG transport stream packets out of seekable
//! async byte sources such as files. Input doesn't have to start on a packet
//! boundary: the framer scans for the `0x47` sync byte, confirms alignment
//! against the following packet, and skips anything that doesn't frame.
//!
//! ## Features
//!
//! - 188-byte packet framing with resynchronization
//! - Zero-copy packets sliced from a shared read buffer
//! - Rewinding seekable sources for multi-pass reads
//! - `futures::Stream` adapter
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! tsframe = "0.1.0"
//! ```
//!
//! ### Reading Packets From a File
//!
//! ```rust,no_run
//! use tsframe::format::ts::SeekableTSSource;
//! use tsframe::format::PacketSource;
//! use tokio::fs::File;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let file = File::open("input.ts").await?;
//!     let mut source = SeekableTSSource::builder()
//!         .byte_source(file)
//!         .build()
//!         .await?;
//!
//!     while let Some(packet) = source.next_packet().await? {
//!         println!("packet: {:02x?}", &packet.as_bytes()[..4]);
//!     }
//!
//!     println!("skipped {} bytes", source.skipped_bytes());
//!     source.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! - `format`: packet source traits and the transport stream framer
//! - `error`: error type and result alias
//! - `config`: process-wide defaults such as the read buffer size
//!

/// Configuration module
pub mod config;

/// Error types and utilities
pub mod error;

/// Packet sources (TS framing)
pub mod format;

pub use error::{Result, TsError};
pub use format::ts::TSPacket;
