// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::codec::{self, BincodeCodec, Codec};
use crate::config::{BLOCK_TYPE, TRANSACTION_TYPE};
use crate::error::KernelError;
use crate::hash::{entity_id, Blake3Hasher, Hasher, Sha3Hasher};
use crate::tests::fixtures::{block_id, hasher, id, signed_transfer};
use crate::types::{Block, Entity, Transaction};

#[test]
fn test_encode_carries_type_tag() {
    let tx = signed_transfer(block_id(1), 1, 2, 10);
    let encoded = BincodeCodec.encode(&tx).unwrap();
    assert_eq!(encoded.type_tag, TRANSACTION_TYPE);

    let decoded: Transaction = BincodeCodec.decode(&encoded, TRANSACTION_TYPE).unwrap();
    assert_eq!(decoded, tx);
}

#[test]
fn test_decode_rejects_mismatched_tag() {
    let tx = signed_transfer(block_id(1), 1, 2, 10);
    let encoded = BincodeCodec.encode(&tx).unwrap();
    let err = BincodeCodec.decode::<Block>(&encoded, BLOCK_TYPE).unwrap_err();
    assert!(matches!(err, KernelError::InvalidArgument(_)));
}

#[test]
fn test_from_bytes_rejects_trailing_bytes() {
    let mut bytes = codec::to_bytes(&42u64).unwrap();
    bytes.push(0);
    assert!(matches!(codec::from_bytes::<u64>(&bytes), Err(KernelError::Codec(_))));
}

#[test]
fn test_entity_id_is_tagged() {
    let h = hasher();
    let tx = Transaction::new(block_id(1), id(1), id(2), 10);
    let payload = tx.identity_bytes().unwrap();
    let id = entity_id(h.as_ref(), &tx).unwrap();
    assert_eq!(id, h.digest(TRANSACTION_TYPE, &payload));
    assert_ne!(id, h.digest(BLOCK_TYPE, &payload), "tag must separate entity kinds");
}

#[test]
fn test_hash_variants_differ() {
    let payload = b"payload";
    let b = Blake3Hasher.digest(TRANSACTION_TYPE, payload);
    let s = Sha3Hasher.digest(TRANSACTION_TYPE, payload);
    assert_ne!(b, s);
    assert_eq!(b, Blake3Hasher.digest(TRANSACTION_TYPE, payload));
}
