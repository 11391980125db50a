//! Hashing and virtual-node key derivation.
//!
//! Virtual-node placement and key lookup use the same CRC-32/IEEE digest
//! so that a key and the virtual node owning it land on the same 32-bit
//! circle.

/// CRC-32/IEEE digest of a byte string.
#[inline]
pub(crate) fn hash_key(bytes: &[u8]) -> u32 {
    crc32fast::hash(bytes)
}

/// Label for the `index`-th virtual node of a node: the node id followed
/// by the decimal replica index.
fn vnode_label(node_id: &str, index: usize) -> String {
    format!("{node_id}{index}")
}

/// Ring position of the `index`-th virtual node of `node_id`.
#[inline]
pub(crate) fn vnode_position(node_id: &str, index: usize) -> u32 {
    hash_key(vnode_label(node_id, index).as_bytes())
}
