// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Snapshot encoding.
//!
//! # Container format
//! ```text
//! magic          4 bytes  "LGSN"
//! schema         u32 LE
//! block id       32 bytes
//! height         u64 LE
//! account count  u32 LE
//! per account (identifier order):
//!   length       u32 LE
//!   account      bincode (standard config)
//! accounts root  32 bytes, checked on decode
//! ```

use byteorder::{LittleEndian, WriteBytesExt};

use crate::codec;
use crate::error::{KernelError, Result};
use crate::snapshot::{AccountSnapshot, Snapshot};

pub const MAGIC: &[u8; 4] = b"LGSN";
pub const SCHEMA_VERSION: u32 = 1;

fn io_err(e: std::io::Error) -> KernelError {
    KernelError::Codec(e.to_string())
}

fn length_prefix(len: usize, what: &str) -> Result<u32> {
    u32::try_from(len).map_err(|_| KernelError::Codec(format!("{} length {} exceeds u32", what, len)))
}

pub fn encode_snapshot(snapshot: &AccountSnapshot) -> Result<Vec<u8>> {
    let accounts = snapshot.all();
    let mut buf = Vec::with_capacity(84 + accounts.len() * 128);

    buf.extend_from_slice(MAGIC);
    buf.write_u32::<LittleEndian>(SCHEMA_VERSION).map_err(io_err)?;
    buf.extend_from_slice(snapshot.reference_block_id().bytes());
    buf.write_u64::<LittleEndian>(snapshot.reference_block_height())
        .map_err(io_err)?;
    buf.write_u32::<LittleEndian>(length_prefix(accounts.len(), "account count")?)
        .map_err(io_err)?;

    for account in accounts {
        let bytes = codec::to_bytes(account)?;
        buf.write_u32::<LittleEndian>(length_prefix(bytes.len(), "account")?)
            .map_err(io_err)?;
        buf.extend_from_slice(&bytes);
    }

    buf.extend_from_slice(&snapshot.accounts_root().to_bytes());
    Ok(buf)
}
