use crate::{Blake2bHasher, Error, MerkleTree};

use super::*;

#[test]
fn memory_store_point_operations() {
    let store = MemoryStore::new();
    assert!(store.is_empty());

    store.put(b"key", b"value").unwrap();
    assert_eq!(store.get(b"key").unwrap().as_deref(), Some(&b"value"[..]));
    assert_eq!(store.get(b"missing").unwrap(), None);
    assert_eq!(store.len(), 1);

    store.put(b"key", b"other").unwrap();
    assert_eq!(store.get(b"key").unwrap().as_deref(), Some(&b"other"[..]));

    store.delete(b"key").unwrap();
    assert_eq!(store.get(b"key").unwrap(), None);
    assert!(store.is_empty());
}

#[test]
fn memory_store_batches() {
    let store = MemoryStore::new();

    store
        .put_batch(vec![
            (b"a".to_vec(), b"1".to_vec()),
            (b"b".to_vec(), b"2".to_vec()),
        ])
        .unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.get(b"b").unwrap().as_deref(), Some(&b"2"[..]));
}

#[test]
fn tree_survives_a_reopen() {
    let store = MemoryStore::new();

    let mut tree = MerkleTree::<_, _>::open(&store, Blake2bHasher, "reopen", 8).unwrap();
    tree.update(0, b"first").unwrap();
    tree.update(200, b"last").unwrap();

    let root = tree.root_hash();
    let path = tree.path_for(200).unwrap();
    drop(tree);

    let tree = MerkleTree::<_, _>::open(&store, Blake2bHasher, "reopen", 8).unwrap();

    assert_eq!(tree.root_hash(), root);
    assert_eq!(tree.path_for(200).unwrap(), path);
    assert_eq!(tree.get(0).unwrap().as_deref(), Some(&b"first"[..]));
    assert_eq!(tree.get(200).unwrap().as_deref(), Some(&b"last"[..]));
    assert_eq!(tree.get(1).unwrap(), None);
}

#[test]
fn reopening_with_the_wrong_depth_fails() {
    let store = MemoryStore::new();

    let tree = MerkleTree::<_, _>::open(&store, Blake2bHasher, "strict", 8).unwrap();
    drop(tree);

    let result = MerkleTree::<_, _>::open(&store, Blake2bHasher, "strict", 9);
    assert!(matches!(
        result,
        Err(Error::DepthMismatch {
            stored: 8,
            requested: 9
        })
    ));

    // the original depth still opens fine
    MerkleTree::<_, _>::open(&store, Blake2bHasher, "strict", 8).unwrap();
}

#[test]
fn trees_with_different_names_share_a_store() {
    let store = MemoryStore::new();

    let mut a = MerkleTree::<_, _>::open(&store, Blake2bHasher, "a", 4).unwrap();
    let mut b = MerkleTree::<_, _>::open(&store, Blake2bHasher, "b", 4).unwrap();

    a.update(1, b"in a").unwrap();
    b.update(1, b"in b").unwrap();

    assert_ne!(a.root_hash(), b.root_hash());
    assert_eq!(a.get(1).unwrap().as_deref(), Some(&b"in a"[..]));
    assert_eq!(b.get(1).unwrap().as_deref(), Some(&b"in b"[..]));
}

#[cfg(feature = "storage")]
mod rocks {
    use std::path::PathBuf;

    use tempdir::TempDir;

    use crate::Hasher;

    use super::*;

    fn setup_path() -> (TempDir, PathBuf) {
        let dir = TempDir::new("timber_db_test").unwrap();
        let file = dir.path().join("db");

        (dir, file)
    }

    #[test]
    fn rocks_store_point_operations() {
        let (_dir, path) = setup_path();
        let store = RocksStore::open(&path).unwrap();

        store.put(b"key", b"value").unwrap();
        assert_eq!(store.get(b"key").unwrap().as_deref(), Some(&b"value"[..]));

        store.delete(b"key").unwrap();
        assert_eq!(store.get(b"key").unwrap(), None);
    }

    #[test]
    fn tree_survives_a_restart() {
        let (_dir, path) = setup_path();

        let store = RocksStore::open(&path).unwrap();
        let mut tree = MerkleTree::<_, _>::open(store, Blake2bHasher, "durable", 16).unwrap();

        tree.update(0, b"leftmost").unwrap();
        tree.update(65_535, b"rightmost").unwrap();
        tree.update(1_000, b"interior").unwrap();

        let root = tree.root_hash();
        let path = tree.path_for(1_000).unwrap();
        drop(tree);

        // reopen the database, simulating a process restart
        let store = RocksStore::open(&path).unwrap();
        let tree = MerkleTree::<_, _>::open(store, Blake2bHasher, "durable", 16).unwrap();

        assert_eq!(tree.root_hash(), root);
        assert_eq!(tree.path_for(1_000).unwrap(), path);
        assert_eq!(tree.get(1_000).unwrap().as_deref(), Some(&b"interior"[..]));

        let leaf_hash = Blake2bHasher.hash_leaf(b"interior");
        assert!(path.proves(&Blake2bHasher, 1_000, leaf_hash));
    }

    #[test]
    fn restart_reproduces_paths_for_untouched_leaves() {
        let (_dir, path) = setup_path();

        let store = RocksStore::open(&path).unwrap();
        let mut tree = MerkleTree::<_, _>::open(store, Blake2bHasher, "sparse", 16).unwrap();
        tree.update(42, b"answer").unwrap();

        let before = tree.path_for(9_999).unwrap();
        drop(tree);

        let store = RocksStore::open(&path).unwrap();
        let tree = MerkleTree::<_, _>::open(store, Blake2bHasher, "sparse", 16).unwrap();
        assert_eq!(tree.path_for(9_999).unwrap(), before);
    }
}
