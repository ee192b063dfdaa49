//! Adaptive Radix Tree implementation.
//!
//! This module contains the [`AdaptiveRadixTree`] map and its insert / search descent.

use std::fmt;
use std::marker::PhantomData;

use crate::keys::KeyTrait;
use crate::node::{AddChild, InsertResult, Node};
use crate::partials::Partial;
use crate::stats::{TreeStats, TreeStatsTrait, update_tree_stats};

/// An Adaptive Radix Tree (ART): an in-memory map from byte-string keys to values.
///
/// Lookups cost O(k) in the key length, independent of how many keys are stored. Runs of bytes
/// with no branching are compressed into a single node's partial, and inner nodes switch between
/// 4, 16, 48 and 256-wide child tables as they fill up.
///
/// Keys may be prefixes of each other: `"app"`, `"apple"` and `"application"` all coexist, with
/// the shorter keys stored as terminal values on inner nodes.
///
/// ## Type Parameters
///
/// - `KeyType`: The type of keys stored in the tree, must implement [`KeyTrait`]
/// - `ValueType`: The type of values associated with keys
///
/// ## Examples
///
/// ```rust
/// use artree::{AdaptiveRadixTree, VectorKey};
///
/// let mut tree = AdaptiveRadixTree::<VectorKey, u32>::new();
/// tree.insert("app", 1);
/// tree.insert("apple", 2);
/// tree.insert("application", 3);
///
/// assert_eq!(tree.search("apple"), Some(&2));
/// assert_eq!(tree.search("appl"), None);
///
/// // Snapshots are deep copies.
/// let snapshot = tree.copy();
/// tree.insert("apple", 20);
/// assert_eq!(snapshot.search("apple"), Some(&2));
/// ```
///
/// ## Concurrency
///
/// There is no internal locking; writes need `&mut self`. Hand readers a [`copy`](Self::copy)
/// while the writer keeps mutating the original.
pub struct AdaptiveRadixTree<KeyType, ValueType>
where
    KeyType: KeyTrait,
{
    root: Option<Node<KeyType::PartialType, ValueType>>,
    num_entries: usize,
    _phantom: PhantomData<KeyType>,
}

impl<KeyType: KeyTrait, ValueType> Default for AdaptiveRadixTree<KeyType, ValueType> {
    fn default() -> Self {
        Self::new()
    }
}

impl<KeyType, ValueType> AdaptiveRadixTree<KeyType, ValueType>
where
    KeyType: KeyTrait,
{
    /// Create a new empty Adaptive Radix Tree.
    pub fn new() -> Self {
        Self {
            root: None,
            num_entries: 0,
            _phantom: PhantomData,
        }
    }

    /// Look up a value by key (generic version).
    ///
    /// This method accepts any type that can be converted into the tree's key type.
    #[inline]
    pub fn search<Key>(&self, key: Key) -> Option<&ValueType>
    where
        Key: Into<KeyType>,
    {
        self.search_k(&key.into())
    }

    /// Look up a value by key reference (direct version).
    #[inline]
    pub fn search_k(&self, key: &KeyType) -> Option<&ValueType> {
        Self::search_iterate(self.root.as_ref()?, key)
    }

    /// Get a mutable reference to a value by key (generic version).
    #[inline]
    pub fn search_mut<Key>(&mut self, key: Key) -> Option<&mut ValueType>
    where
        Key: Into<KeyType>,
    {
        self.search_mut_k(&key.into())
    }

    /// Get a mutable reference to a value by key reference (direct version).
    #[inline]
    pub fn search_mut_k(&mut self, key: &KeyType) -> Option<&mut ValueType> {
        Self::search_iterate_mut(self.root.as_mut()?, key)
    }

    #[inline]
    pub fn contains_key<Key>(&self, key: Key) -> bool
    where
        Key: Into<KeyType>,
    {
        self.search(key).is_some()
    }

    /// Insert a key-value pair (generic version).
    ///
    /// The last write for a key wins.
    ///
    /// # Returns
    ///
    /// - `Some(old_value)` if a previous value was replaced
    /// - `None` if this was a new key
    ///
    /// # Examples
    ///
    /// ```rust
    /// use artree::{AdaptiveRadixTree, VectorKey};
    ///
    /// let mut tree = AdaptiveRadixTree::<VectorKey, i32>::new();
    ///
    /// assert_eq!(tree.insert("key1", 100), None);
    /// assert_eq!(tree.insert("key1", 200), Some(100));
    /// assert_eq!(tree.search("key1"), Some(&200));
    /// ```
    #[inline]
    pub fn insert<KV>(&mut self, key: KV, value: ValueType) -> Option<ValueType>
    where
        KV: Into<KeyType>,
    {
        self.insert_k(&key.into(), value)
    }

    /// Insert a key-value pair using key reference (direct version).
    pub fn insert_k(&mut self, key: &KeyType, value: ValueType) -> Option<ValueType> {
        let Some(root) = self.root.as_mut() else {
            self.root = Some(Node::new_leaf(key.to_partial(0), value));
            self.num_entries = 1;
            return None;
        };

        match Self::insert_recurse(root, key, value, 0) {
            InsertResult::Overwritten(old) => Some(old),
            InsertResult::Inserted => {
                self.num_entries += 1;
                None
            }
            InsertResult::Replaced(new_root) => {
                *root = new_root;
                self.num_entries += 1;
                None
            }
        }
    }

    /// Drop every entry. The tree behaves like a freshly created one afterwards.
    pub fn clear(&mut self) {
        debug_log!(entries = self.num_entries, "clearing tree");
        self.root = None;
        self.num_entries = 0;
    }

    /// Number of keys holding a value.
    pub fn len(&self) -> usize {
        self.num_entries
    }

    /// Check if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

impl<KeyType, ValueType> AdaptiveRadixTree<KeyType, ValueType>
where
    KeyType: KeyTrait,
    ValueType: Clone,
{
    /// A fully independent deep copy: every node is cloned, so inserts into either tree are
    /// never visible in the other.
    pub fn copy(&self) -> Self {
        debug_log!(entries = self.num_entries, "copying tree");
        self.clone()
    }
}

impl<KeyType, ValueType> Clone for AdaptiveRadixTree<KeyType, ValueType>
where
    KeyType: KeyTrait,
    ValueType: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            num_entries: self.num_entries,
            _phantom: PhantomData,
        }
    }
}

impl<KeyType, ValueType> fmt::Debug for AdaptiveRadixTree<KeyType, ValueType>
where
    KeyType: KeyTrait,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdaptiveRadixTree")
            .field("len", &self.num_entries)
            .finish_non_exhaustive()
    }
}

impl<KeyType, ValueType, KV> Extend<(KV, ValueType)> for AdaptiveRadixTree<KeyType, ValueType>
where
    KeyType: KeyTrait,
    KV: Into<KeyType>,
{
    fn extend<I: IntoIterator<Item = (KV, ValueType)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<KeyType, ValueType, KV> FromIterator<(KV, ValueType)> for AdaptiveRadixTree<KeyType, ValueType>
where
    KeyType: KeyTrait,
    KV: Into<KeyType>,
{
    fn from_iter<I: IntoIterator<Item = (KV, ValueType)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<KeyType, ValueType> TreeStatsTrait for AdaptiveRadixTree<KeyType, ValueType>
where
    KeyType: KeyTrait,
{
    fn get_tree_stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();

        if let Some(root) = &self.root {
            Self::get_tree_stats_recurse(root, &mut stats, 1);
        }
        stats.finalize();
        stats
    }
}

// Internals implementation
impl<KeyType, ValueType> AdaptiveRadixTree<KeyType, ValueType>
where
    KeyType: KeyTrait,
{
    fn search_iterate<'a>(
        cur_node: &'a Node<KeyType::PartialType, ValueType>,
        key: &KeyType,
    ) -> Option<&'a ValueType> {
        let mut cur_node = cur_node;
        let mut depth = 0;
        loop {
            let prefix_len = cur_node.prefix.len();
            if cur_node.prefix.prefix_length_key(key, depth) != prefix_len {
                return None;
            }

            // A leaf only answers for the exact key it was created with, never a longer one.
            if cur_node.is_leaf() {
                if key.length_at(depth) != prefix_len {
                    return None;
                }
                return cur_node.value();
            }

            depth += prefix_len;
            if key.length_at(depth) == 0 {
                return cur_node.value();
            }
            cur_node = cur_node.seek_child(key.at(depth))?;
            depth += 1;
        }
    }

    fn search_iterate_mut<'a>(
        cur_node: &'a mut Node<KeyType::PartialType, ValueType>,
        key: &KeyType,
    ) -> Option<&'a mut ValueType> {
        let mut cur_node = cur_node;
        let mut depth = 0;
        loop {
            let prefix_len = cur_node.prefix.len();
            if cur_node.prefix.prefix_length_key(key, depth) != prefix_len {
                return None;
            }

            if cur_node.is_leaf() {
                if key.length_at(depth) != prefix_len {
                    return None;
                }
                return cur_node.value_mut();
            }

            depth += prefix_len;
            if key.length_at(depth) == 0 {
                return cur_node.value_mut();
            }
            cur_node = cur_node.seek_child_mut(key.at(depth))?;
            depth += 1;
        }
    }

    /// Insert below `cur_node`, which sits at `depth` in `key`. A `Replaced` result means
    /// `cur_node` is now a stale shell and the caller must put the replacement in its slot.
    fn insert_recurse(
        cur_node: &mut Node<KeyType::PartialType, ValueType>,
        key: &KeyType,
        value: ValueType,
        depth: usize,
    ) -> InsertResult<KeyType::PartialType, ValueType> {
        let prefix_len = cur_node.prefix.len();
        let longest_common_prefix = cur_node.prefix.prefix_length_key(key, depth);

        // Divergence inside the prefix, or a leaf that the key runs past: a new Node4 takes
        // over at the common prefix.
        if longest_common_prefix != prefix_len
            || (cur_node.is_leaf() && key.length_at(depth) != prefix_len)
        {
            let n4 = cur_node.split(key, depth, longest_common_prefix, value);
            return InsertResult::Replaced(n4);
        }

        if cur_node.is_leaf() {
            let Some(slot) = cur_node.value_mut() else {
                unreachable!("leaves always hold a value")
            };
            return InsertResult::Overwritten(std::mem::replace(slot, value));
        }

        let depth = depth + prefix_len;
        if key.length_at(depth) == 0 {
            return match cur_node.replace_value(value) {
                Some(old) => InsertResult::Overwritten(old),
                None => InsertResult::Inserted,
            };
        }

        let k = key.at(depth);
        let Some(child) = cur_node.seek_child_mut(k) else {
            let new_leaf = Node::new_leaf(key.to_partial(depth + 1), value);
            return Self::install_child(cur_node, k, new_leaf);
        };

        match Self::insert_recurse(child, key, value, depth + 1) {
            InsertResult::Replaced(new_child) => Self::install_child(cur_node, k, new_child),
            result => result,
        }
    }

    // A new entry landed under `cur_node`; its growth, if any, becomes our caller's problem.
    fn install_child(
        cur_node: &mut Node<KeyType::PartialType, ValueType>,
        k: u8,
        child: Node<KeyType::PartialType, ValueType>,
    ) -> InsertResult<KeyType::PartialType, ValueType> {
        match cur_node.add_child(k, child) {
            AddChild::Installed => InsertResult::Inserted,
            AddChild::Promoted(promoted) => InsertResult::Replaced(promoted),
        }
    }

    fn get_tree_stats_recurse(
        node: &Node<KeyType::PartialType, ValueType>,
        tree_stats: &mut TreeStats,
        height: usize,
    ) {
        if height > tree_stats.max_height {
            tree_stats.max_height = height;
        }
        if node.value().is_some() {
            tree_stats.num_values += 1;
        }
        if node.is_leaf() {
            tree_stats.num_leaves += 1;
        } else {
            update_tree_stats(tree_stats, node);
        }
        for (_k, child) in node.iter() {
            Self::get_tree_stats_recurse(child, tree_stats, height + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rand::seq::SliceRandom;
    use rand::{Rng, rng};

    use crate::keys::vector_key::VectorKey;
    use crate::stats::TreeStatsTrait;
    use crate::tree::AdaptiveRadixTree;

    type Tree<V> = AdaptiveRadixTree<VectorKey, V>;

    #[test]
    fn test_root_set_get() {
        let mut q = Tree::<i32>::new();
        let key: VectorKey = "abc".into();
        assert!(q.insert("abc", 1).is_none());
        assert_eq!(q.search_k(&key), Some(&1));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_empty_and_cleared_tree() {
        let mut q = Tree::<i32>::new();
        assert!(q.is_empty());
        assert_eq!(q.search("anything"), None);
        assert_eq!(q.search(""), None);

        q.insert("a", 1);
        q.insert("b", 2);
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
        assert_eq!(q.search("a"), None);
        assert_eq!(q.search("b"), None);

        assert_eq!(q.insert("a", 3), None);
        assert_eq!(q.search("a"), Some(&3));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_example_scenario() {
        let mut q = Tree::<i32>::new();
        q.insert("a", 1);
        q.insert("ab", 2);
        q.insert("abc", 3);
        q.insert("abd", 4);
        assert_eq!(q.search("a"), Some(&1));
        assert_eq!(q.search("ab"), Some(&2));
        assert_eq!(q.search("abc"), Some(&3));
        assert_eq!(q.search("abd"), Some(&4));
        assert_eq!(q.search("abe"), None);
        assert_eq!(q.search("b"), None);
        assert_eq!(q.search(""), None);
        assert_eq!(q.len(), 4);
    }

    #[test]
    fn test_prefix_coexistence() {
        let mut q = Tree::<i32>::new();
        q.insert("app", 1);
        q.insert("apple", 2);
        q.insert("application", 3);
        assert_eq!(q.search("app"), Some(&1));
        assert_eq!(q.search("apple"), Some(&2));
        assert_eq!(q.search("application"), Some(&3));
        assert_eq!(q.search("appl"), None);
        assert_eq!(q.search("ap"), None);
        assert_eq!(q.search("apples"), None);
        assert_eq!(q.search("applicatio"), None);
    }

    #[test]
    fn test_prefix_coexistence_reverse_order() {
        let mut q = Tree::<i32>::new();
        q.insert("application", 3);
        q.insert("apple", 2);
        q.insert("app", 1);
        assert_eq!(q.search("app"), Some(&1));
        assert_eq!(q.search("apple"), Some(&2));
        assert_eq!(q.search("application"), Some(&3));
        assert_eq!(q.search("appl"), None);
    }

    #[test]
    fn test_empty_key() {
        let mut q = Tree::<i32>::new();
        q.insert("", 0);
        assert_eq!(q.search(""), Some(&0));
        q.insert("x", 1);
        assert_eq!(q.search(""), Some(&0));
        assert_eq!(q.search("x"), Some(&1));
        assert_eq!(q.insert("", 10), Some(0));
        assert_eq!(q.search(""), Some(&10));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_string_keys_get_set() {
        let mut q = Tree::<i32>::new();
        q.insert("abcd", 1);
        q.insert("abc", 2);
        q.insert("abcde", 3);
        q.insert("xyz", 4);
        q.insert("xyz", 5);
        q.insert("axyz", 6);
        q.insert("1245zzz", 6);

        assert_eq!(*q.search("abcd").unwrap(), 1);
        assert_eq!(*q.search("abc").unwrap(), 2);
        assert_eq!(*q.search("abcde").unwrap(), 3);
        assert_eq!(*q.search("axyz").unwrap(), 6);
        assert_eq!(*q.search("xyz").unwrap(), 5);
        assert_eq!(*q.search("1245zzz").unwrap(), 6);
        assert_eq!(q.len(), 6);
    }

    #[test]
    fn test_insert_returns_replaced_value() {
        let mut tree = Tree::<i32>::new();

        assert_eq!(tree.insert("key1", 100), None);
        assert_eq!(tree.search("key1"), Some(&100));

        assert_eq!(tree.insert("key1", 200), Some(100));
        assert_eq!(tree.search("key1"), Some(&200));

        assert_eq!(tree.insert("key1", 300), Some(200));
        assert_eq!(tree.search("key1"), Some(&300));

        assert_eq!(tree.insert("key2", 400), None);
        assert_eq!(tree.search("key2"), Some(&400));
        assert_eq!(tree.search("key1"), Some(&300));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_search_mut() {
        let mut tree = Tree::<String>::new();
        tree.insert("ab", "x".to_string());
        tree.insert("abc", "y".to_string());
        tree.search_mut("ab").unwrap().push('!');
        tree.search_mut("abc").unwrap().push('?');
        assert!(tree.search_mut("a").is_none());
        assert_eq!(tree.search("ab").map(String::as_str), Some("x!"));
        assert_eq!(tree.search("abc").map(String::as_str), Some("y?"));
    }

    #[test]
    fn test_int_keys_get_set() {
        let mut q = Tree::<i32>::new();
        q.insert(500i32, 3);
        assert_eq!(q.search(500i32), Some(&3));
        q.insert(666i32, 2);
        assert_eq!(q.search(666i32), Some(&2));
        q.insert(1i32, 1);
        assert_eq!(q.search(1i32), Some(&1));
        q.insert(-1i32, 0);
        assert_eq!(q.search(-1i32), Some(&0));
        assert_eq!(q.search(2i32), None);
    }

    #[test]
    fn test_byte_keys() {
        let mut q = Tree::<u8>::new();
        q.insert(vec![0u8, 255, 128], 1);
        q.insert(&[0u8, 255][..], 2);
        q.insert([0u8, 255, 127], 3);
        assert_eq!(q.search(vec![0u8, 255, 128]), Some(&1));
        assert_eq!(q.search([0u8, 255]), Some(&2));
        assert_eq!(q.search(&[0u8, 255, 127]), Some(&3));
        assert_eq!(q.search([0u8]), None);
    }

    // Sibling leaves under one shared prefix, forcing each promotion in turn.
    #[test]
    fn test_growth_correctness() {
        let mut tree = Tree::<usize>::new();
        let key = |i: usize| format!("shared/{}", (b'!' + i as u8) as char);

        let checkpoints = [(5, "Node16"), (17, "Node48"), (49, "Node256")];
        let mut inserted = 0;
        for (count, expected_type) in checkpoints {
            while inserted < count {
                tree.insert(key(inserted), inserted);
                inserted += 1;
            }
            let stats = tree.get_tree_stats();
            assert_eq!(stats.nodes_of_type(expected_type), 1, "{stats:?}");
            assert_eq!(stats.num_inner_nodes, 1);
            for i in 0..inserted {
                assert_eq!(tree.search(key(i)), Some(&i), "sibling {i} lost after promotion");
            }
            assert_eq!(tree.search(key(inserted)), None);
        }
        assert_eq!(tree.len(), 49);
    }

    // Promotion in a node that also stores a terminal value, below another inner node.
    #[test]
    fn test_growth_below_root_keeps_terminal_value() {
        let mut tree = Tree::<usize>::new();
        tree.insert("root-a", 1000);
        tree.insert("root-b", 1001);
        tree.insert("root-a/", 2000);
        for i in 0..60usize {
            tree.insert(format!("root-a/{i:02}"), i);
        }
        assert_eq!(tree.search("root-a"), Some(&1000));
        assert_eq!(tree.search("root-b"), Some(&1001));
        assert_eq!(tree.search("root-a/"), Some(&2000));
        for i in 0..60usize {
            assert_eq!(tree.search(format!("root-a/{i:02}")), Some(&i));
        }
        let stats = tree.get_tree_stats();
        assert_eq!(stats.num_values, tree.len());
    }

    #[test]
    fn test_full_fanout_node256() {
        let mut tree = Tree::<u16>::new();
        for b in 0..=255u8 {
            tree.insert([7u8, b], b as u16);
        }
        for b in 0..=255u8 {
            tree.insert([7u8, b], b as u16 + 1);
        }
        let stats = tree.get_tree_stats();
        assert_eq!(stats.nodes_of_type("Node256"), 1);
        assert_eq!(stats.num_leaves, 256);
        for b in 0..=255u8 {
            assert_eq!(tree.search([7u8, b]), Some(&(b as u16 + 1)));
        }
        assert_eq!(tree.len(), 256);
    }

    #[test]
    fn test_copy_isolation() {
        let mut original = Tree::<i32>::new();
        for (i, k) in ["a", "ab", "abc", "abd", "b", "bcd"].iter().enumerate() {
            original.insert(*k, i as i32);
        }

        let mut copy = original.copy();
        copy.insert("abc", 100);
        copy.insert("abe", 101);
        copy.insert("z", 102);
        for i in 0..20 {
            copy.insert(format!("a{i}"), i);
        }

        assert_eq!(original.search("abc"), Some(&2));
        assert_eq!(original.search("abe"), None);
        assert_eq!(original.search("z"), None);
        assert_eq!(original.search("a5"), None);
        assert_eq!(original.len(), 6);

        original.insert("b", 200);
        original.clear();
        assert_eq!(copy.search("b"), Some(&4));
        assert_eq!(copy.search("abc"), Some(&100));
        assert_eq!(copy.search("a19"), Some(&19));
    }

    #[test]
    fn test_collect_and_extend() {
        let mut tree: Tree<usize> = ["one", "two", "three"]
            .into_iter()
            .enumerate()
            .map(|(i, k)| (k, i))
            .collect();
        tree.extend([("four", 3), ("two", 10)]);
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.search("two"), Some(&10));
        assert!(tree.contains_key("four"));
        assert!(!tree.contains_key("five"));
        assert_eq!(format!("{tree:?}"), "AdaptiveRadixTree { len: 4, .. }");
    }

    fn gen_random_string_keys(l1_prefix: usize, l2_prefix: usize, suffix: usize) -> Vec<String> {
        let mut keys = Vec::new();
        let chars: Vec<char> = ('a'..='z').collect();
        for c1 in chars.iter() {
            let level1_prefix = c1.to_string().repeat(l1_prefix);
            for c2 in chars.iter() {
                let level2_prefix = c2.to_string().repeat(l2_prefix);
                let key_prefix = level1_prefix.clone() + &level2_prefix;
                for _ in 0..10 {
                    let suffix: String = (0..suffix)
                        .map(|_| chars[rng().random_range(0..chars.len())])
                        .collect();
                    keys.push(key_prefix.clone() + &suffix);
                }
            }
        }

        keys.shuffle(&mut rng());
        keys
    }

    #[test]
    fn test_bulk_random_string_query() {
        let mut tree = Tree::<String>::new();
        let mut btree = BTreeMap::new();
        let keys = gen_random_string_keys(3, 2, 3);
        for key in keys.iter() {
            let expected = btree.insert(key.clone(), key.clone());
            assert_eq!(tree.insert(key, key.clone()), expected);
            assert!(tree.search(key).is_some());
        }
        let mut rng = rng();
        for _i in 0..10_000 {
            let entry = &keys[rng.random_range(0..keys.len())];
            assert_eq!(tree.search(entry), Some(entry));
        }

        let stats = tree.get_tree_stats();
        assert_eq!(stats.num_values, btree.len());
        assert_eq!(tree.len(), btree.len());
    }

    #[test]
    fn test_random_numeric_insert_get() {
        let mut tree = Tree::<u64>::new();
        let mut btree = BTreeMap::new();
        let count = 10_000;
        let mut rng = rng();
        for i in 0..count {
            let rnd_key = rng.random_range(0..count);
            assert_eq!(tree.insert(rnd_key, i), btree.insert(rnd_key, i));
            assert_eq!(tree.search(rnd_key), Some(&i));
        }

        let stats = tree.get_tree_stats();
        assert_eq!(stats.num_values, btree.len());

        for key in 0..count {
            assert_eq!(tree.search(key), btree.get(&key));
        }
    }

    #[test]
    fn test_order_independence() {
        let mut rng = rng();
        let mut pairs: Vec<(String, usize)> = gen_random_string_keys(1, 1, 2)
            .into_iter()
            .enumerate()
            .map(|(i, k)| (k, i))
            .collect();
        // Dedupe so the last-write-wins rule does not depend on order.
        pairs.sort();
        pairs.dedup_by(|a, b| a.0 == b.0);

        let forward: Tree<usize> = pairs.iter().cloned().collect();
        pairs.shuffle(&mut rng);
        let shuffled: Tree<usize> = pairs.iter().cloned().collect();
        pairs.reverse();
        let reversed: Tree<usize> = pairs.iter().cloned().collect();

        for (key, value) in pairs.iter() {
            assert_eq!(forward.search(key), Some(value));
            assert_eq!(shuffled.search(key), Some(value));
            assert_eq!(reversed.search(key), Some(value));
        }
        for probe in ["", "a", "zz", "qqqqqq", "aa"] {
            assert_eq!(forward.search(probe), shuffled.search(probe));
            assert_eq!(forward.search(probe), reversed.search(probe));
        }
    }
}
