//! The key and value layout a tree uses inside a [`Store`]
//!
//! Every key starts with the length-prefixed tree name, followed by a role tag, so distinct
//! trees and distinct roles never collide and all keys of one tree are contiguous in an ordered
//! store. Node and leaf positions are encoded big-endian, keeping the store ordered by position
//! within a role.
//!
//! This layout is stable: a tree reopened with the same name and depth reproduces the same keys,
//! and therefore the same root and paths, across restarts.
//!
//! [`Store`]: crate::store::Store

use borsh::{BorshDeserialize, BorshSerialize};

use crate::Digest;

const ROOT_TAG: u8 = 0;
const NODE_TAG: u8 = 1;
const LEAF_TAG: u8 = 2;

/// The value stored under the root key: the tree's depth and its current root digest
///
/// Persisting the depth is what lets [`MerkleTree::open`] reject a reopen with a different depth
/// instead of silently reinterpreting the structure.
///
/// [`MerkleTree::open`]: crate::MerkleTree::open
#[derive(Debug, Clone, BorshSerialize, BorshDeserialize)]
pub(crate) struct RootRecord {
    pub depth: u8,
    pub root: Digest,
}

fn prefix(name: &str, extra: usize) -> Vec<u8> {
    // name length is validated at `open`, so the cast is lossless
    #[allow(clippy::cast_possible_truncation)]
    let len = name.len() as u16;

    let mut key = Vec::with_capacity(2 + name.len() + 1 + extra);
    key.extend_from_slice(&len.to_be_bytes());
    key.extend_from_slice(name.as_bytes());
    key
}

/// The key holding the [`RootRecord`] for the tree called `name`
pub(crate) fn root_key(name: &str) -> Vec<u8> {
    let mut key = prefix(name, 0);
    key.push(ROOT_TAG);
    key
}

/// The key holding the digest of the node at `(depth, index)` in the tree called `name`
pub(crate) fn node_key(name: &str, depth: usize, index: u64) -> Vec<u8> {
    debug_assert!(depth <= usize::from(u8::MAX));

    #[allow(clippy::cast_possible_truncation)]
    let depth = depth as u8;

    let mut key = prefix(name, 9);
    key.push(NODE_TAG);
    key.push(depth);
    key.extend_from_slice(&index.to_be_bytes());
    key
}

/// The key holding the raw value of leaf `index` in the tree called `name`
pub(crate) fn leaf_key(name: &str, index: u64) -> Vec<u8> {
    let mut key = prefix(name, 8);
    key.push(LEAF_TAG);
    key.extend_from_slice(&index.to_be_bytes());
    key
}
