#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use artree::keys::vector_key::VectorKey;
use artree::tree::AdaptiveRadixTree;

#[derive(Arbitrary, Debug)]
enum MapMethod {
    Get { key: Vec<u8> },
    Insert { key: Vec<u8>, val: usize },
    Update { key: Vec<u8>, val: usize },
    InsertInt { key: usize, val: usize },
    GetInt { key: usize },
}

fuzz_target!(|methods: Vec<MapMethod>| {
    let capacity = 10_000_000;
    let mut art = AdaptiveRadixTree::<VectorKey, usize>::new();
    let mut bt_map = BTreeMap::<Vec<u8>, usize>::new();

    for m_c in methods.chunks(1024) {
        for m in m_c {
            match m {
                MapMethod::Get { key } => {
                    let art_v = art.search(key.as_slice()).copied();
                    let bt_v = bt_map.get(key).copied();
                    assert_eq!(art_v, bt_v);
                }
                MapMethod::Insert { key, val } => {
                    if bt_map.len() < capacity {
                        let btree_insert = bt_map.insert(key.clone(), *val);
                        let a_insert = art.insert(key.as_slice(), *val);
                        assert_eq!(a_insert, btree_insert, "Insert: {key:?} {val:?}");
                    }
                }
                MapMethod::Update { key, val } => {
                    let old_bt = bt_map.get_mut(key);
                    let old_art = art.search_mut(key.as_slice());
                    assert_eq!(old_art, old_bt);

                    if let (Some(old_bt), Some(old_art)) = (old_bt, old_art) {
                        *old_bt = *val;
                        *old_art = *val;
                    }

                    assert_eq!(art.search(key.as_slice()), bt_map.get(key));
                }
                MapMethod::InsertInt { key, val } => {
                    let art_key = VectorKey::from(*key);
                    let bytes: &[u8] = art_key.as_ref();
                    let btree_insert = bt_map.insert(bytes.to_vec(), *val);
                    let a_insert = art.insert_k(&art_key, *val);
                    assert_eq!(a_insert, btree_insert, "InsertInt: {key:?} {val:?}");
                }
                MapMethod::GetInt { key } => {
                    let art_key = VectorKey::from(*key);
                    let bytes: &[u8] = art_key.as_ref();
                    assert_eq!(art.search_k(&art_key), bt_map.get(bytes));
                }
            }
        }
    }

    assert_eq!(art.len(), bt_map.len());
    for (k, expected_value) in bt_map.iter() {
        let result = art.search(k.as_slice());
        assert_eq!(
            result,
            Some(expected_value),
            "Expected value for key {:?}: {:?} != {:?}",
            k,
            result,
            expected_value
        );
    }
});
