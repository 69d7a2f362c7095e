// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Snapshot decoding.

use std::io::{Cursor, Read};
use std::sync::Arc;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::codec;
use crate::error::{KernelError, Result};
use crate::hash::Hasher;
use crate::snapshot::encode::{MAGIC, SCHEMA_VERSION};
use crate::snapshot::{AccountSnapshot, SnapshotBuilder};
use crate::types::{Account, Identifier};

fn truncated(e: std::io::Error) -> KernelError {
    KernelError::Codec(format!("truncated snapshot: {}", e))
}

fn read_identifier(cursor: &mut Cursor<&[u8]>) -> Result<Identifier> {
    let mut raw = [0u8; 32];
    cursor.read_exact(&mut raw).map_err(truncated)?;
    Ok(Identifier::new(raw))
}

/// Rebuilds a snapshot and checks its accounts root against the trailer.
pub fn decode_snapshot(bytes: &[u8], hasher: Arc<dyn Hasher>) -> Result<AccountSnapshot> {
    let mut cursor = Cursor::new(bytes);

    let mut magic = [0u8; 4];
    cursor.read_exact(&mut magic).map_err(truncated)?;
    if &magic != MAGIC {
        return Err(KernelError::Codec("invalid magic".into()));
    }

    let schema = cursor.read_u32::<LittleEndian>().map_err(truncated)?;
    if schema != SCHEMA_VERSION {
        return Err(KernelError::Codec(format!(
            "unsupported schema version {}",
            schema
        )));
    }

    let block_id = read_identifier(&mut cursor)?;
    let height = cursor.read_u64::<LittleEndian>().map_err(truncated)?;
    let count = cursor.read_u32::<LittleEndian>().map_err(truncated)?;

    let mut builder = SnapshotBuilder::new(block_id, height);
    for _ in 0..count {
        let len = cursor.read_u32::<LittleEndian>().map_err(truncated)? as usize;
        let remaining = bytes.len() - cursor.position() as usize;
        if len > remaining {
            return Err(KernelError::Codec(format!(
                "account length {} exceeds remaining {}",
                len, remaining
            )));
        }
        let mut raw = vec![0u8; len];
        cursor.read_exact(&mut raw).map_err(truncated)?;
        let account: Account = codec::from_bytes(&raw)?;
        builder.add_account(account)?;
    }

    let expected_root = read_identifier(&mut cursor)?;
    if (cursor.position() as usize) != bytes.len() {
        return Err(KernelError::Codec("trailing bytes after snapshot".into()));
    }

    let snapshot = builder.build(hasher)?;
    if snapshot.accounts_root() != expected_root {
        return Err(KernelError::Codec(format!(
            "accounts root mismatch: stored {}, rebuilt {}",
            expected_root,
            snapshot.accounts_root()
        )));
    }
    Ok(snapshot)
}
