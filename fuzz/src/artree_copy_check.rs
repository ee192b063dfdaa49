#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use artree::keys::vector_key::VectorKey;
use artree::tree::AdaptiveRadixTree;

#[derive(Arbitrary, Debug)]
enum CopyMethod {
    /// Insert into the tree currently being written.
    Insert { key: Vec<u8>, val: u32 },
    /// Freeze the current tree and keep writing to a copy of it.
    Snapshot,
    /// Drop every entry of the current tree.
    Clear,
}

fuzz_target!(|methods: Vec<CopyMethod>| {
    let mut current = AdaptiveRadixTree::<VectorKey, u32>::new();
    let mut current_oracle = BTreeMap::<Vec<u8>, u32>::new();
    let mut frozen: Vec<(AdaptiveRadixTree<VectorKey, u32>, BTreeMap<Vec<u8>, u32>)> = Vec::new();

    for m in &methods {
        match m {
            CopyMethod::Insert { key, val } => {
                let expected = current_oracle.insert(key.clone(), *val);
                assert_eq!(current.insert(key.as_slice(), *val), expected);
            }
            CopyMethod::Snapshot => {
                if frozen.len() < 16 {
                    let copy = current.copy();
                    let previous = std::mem::replace(&mut current, copy);
                    frozen.push((previous, current_oracle.clone()));
                }
            }
            CopyMethod::Clear => {
                current.clear();
                current_oracle.clear();
                assert!(current.is_empty());
            }
        }
    }

    // Nothing written after a snapshot may leak back into it.
    frozen.push((current, current_oracle));
    for (tree, oracle) in &frozen {
        assert_eq!(tree.len(), oracle.len());
        for (k, v) in oracle {
            assert_eq!(tree.search(k.as_slice()), Some(v));
        }
        for m in &methods {
            if let CopyMethod::Insert { key, .. } = m {
                assert_eq!(tree.search(key.as_slice()), oracle.get(key));
            }
        }
    }
});
