// Path: crates/types/src/codec/mod.rs
//! The canonical binary codec for consensus-critical records.
//!
//! All records persisted by the staking and upgrade modules are protobuf
//! messages. `prost` writes fields in ascending tag order and repeated
//! elements in slice order, so a given in-memory value always produces the
//! same bytes. Every node rewriting state must go through these helpers.

use prost::Message;

/// Encodes a record into its canonical byte representation.
///
/// Encoding into a growable buffer cannot fail.
pub fn to_bytes_canonical<M: Message>(record: &M) -> Vec<u8> {
    record.encode_to_vec()
}

/// Decodes a record from its canonical byte representation.
pub fn from_bytes_canonical<M: Message + Default>(bytes: &[u8]) -> Result<M, prost::DecodeError> {
    M::decode(bytes)
}
