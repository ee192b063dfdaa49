use crate::keys::KeyTrait;
use crate::mapping::NodeMapping;
use crate::mapping::direct_mapping::DirectMapping;
use crate::mapping::indexed_mapping::IndexedMapping;
use crate::mapping::sorted_keyed_mapping::SortedKeyedMapping;
use crate::partials::Partial;
use crate::utils::bitset::Bitset64;

#[derive(Clone)]
pub(crate) struct Node<P: Partial, V> {
    /// Bytes consumed below the parent's dispatch byte. Never includes the dispatch byte.
    pub(crate) prefix: P,
    pub(crate) content: Content<P, V>,
}

#[derive(Clone)]
pub(crate) enum Content<P: Partial, V> {
    Leaf(V),
    Node4(Inner<SortedKeyedMapping<Node<P, V>, 4>, V>),
    Node16(Inner<SortedKeyedMapping<Node<P, V>, 16>, V>),
    Node48(Inner<IndexedMapping<Node<P, V>, 48, Bitset64<1>>, V>),
    Node256(Inner<DirectMapping<Node<P, V>>, V>),
}

/// Shared shape of every inner node: an optional value for a key that ends exactly here, plus
/// the child table.
#[derive(Clone)]
pub(crate) struct Inner<M, V> {
    pub(crate) value: Option<V>,
    pub(crate) children: M,
}

impl<M, V> Inner<M, V> {
    fn with_value(value: Option<V>, children: M) -> Self {
        Self { value, children }
    }
}

/// Outcome of installing a child into an inner node.
#[must_use]
pub(crate) enum AddChild<P: Partial, V> {
    /// Stored in this node, either in a free slot or over the child with the same key byte.
    Installed,
    /// This node was full. The returned node is its promoted replacement and already holds the
    /// new child; this node is left as an empty shell and must not stay reachable.
    Promoted(Node<P, V>),
}

/// Outcome of an insert below some node.
#[must_use]
pub(crate) enum InsertResult<P: Partial, V> {
    /// The key was already present; no node changed shape. Carries the previous value.
    Overwritten(V),
    /// A new entry was attached somewhere below this node, which is still valid.
    Inserted,
    /// This node was split or promoted. Whoever holds it must install the replacement.
    Replaced(Node<P, V>),
}

impl<P: Partial, V> Node<P, V> {
    #[inline]
    pub(crate) fn new_leaf(partial: P, value: V) -> Node<P, V> {
        Self {
            prefix: partial,
            content: Content::Leaf(value),
        }
    }

    #[inline]
    pub(crate) fn new_inner(prefix: P) -> Self {
        Self {
            prefix,
            content: Content::Node4(Inner::with_value(None, SortedKeyedMapping::new())),
        }
    }

    #[inline]
    #[cfg(test)]
    pub(crate) fn new_16(prefix: P) -> Self {
        Self {
            prefix,
            content: Content::Node16(Inner::with_value(None, SortedKeyedMapping::new())),
        }
    }

    #[inline]
    #[cfg(test)]
    pub(crate) fn new_48(prefix: P) -> Self {
        Self {
            prefix,
            content: Content::Node48(Inner::with_value(None, IndexedMapping::new())),
        }
    }

    /// The same subtree, re-homed under a different (shorter) partial. Used when a split moves an
    /// existing node one level down.
    #[inline]
    pub(crate) fn with_new_prefix(self, prefix: P) -> Self {
        Self {
            prefix,
            content: self.content,
        }
    }

    /// Move this node out, leaving an empty inner node in its place.
    fn take(&mut self) -> Self {
        std::mem::replace(self, Node::new_inner(P::default()))
    }

    /// The value for a key ending at this node: a leaf's value, or an inner node's terminal value.
    pub(crate) fn value(&self) -> Option<&V> {
        match &self.content {
            Content::Leaf(value) => Some(value),
            Content::Node4(n) => n.value.as_ref(),
            Content::Node16(n) => n.value.as_ref(),
            Content::Node48(n) => n.value.as_ref(),
            Content::Node256(n) => n.value.as_ref(),
        }
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut V> {
        match &mut self.content {
            Content::Leaf(value) => Some(value),
            Content::Node4(n) => n.value.as_mut(),
            Content::Node16(n) => n.value.as_mut(),
            Content::Node48(n) => n.value.as_mut(),
            Content::Node256(n) => n.value.as_mut(),
        }
    }

    /// Store the terminal value of an inner node, handing back the one it replaces.
    pub(crate) fn replace_value(&mut self, value: V) -> Option<V> {
        match &mut self.content {
            Content::Node4(n) => n.value.replace(value),
            Content::Node16(n) => n.value.replace(value),
            Content::Node48(n) => n.value.replace(value),
            Content::Node256(n) => n.value.replace(value),
            Content::Leaf(_) => unreachable!("leaf values are replaced through insert"),
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        matches!(&self.content, Content::Leaf(_))
    }

    pub(crate) fn num_children(&self) -> usize {
        match &self.content {
            Content::Node4(n) => n.children.num_children(),
            Content::Node16(n) => n.children.num_children(),
            Content::Node48(n) => n.children.num_children(),
            Content::Node256(n) => n.children.num_children(),
            Content::Leaf(_) => 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        match &self.content {
            Content::Node4(_) => 4,
            Content::Node16(_) => 16,
            Content::Node48(_) => 48,
            Content::Node256(_) => 256,
            Content::Leaf(_) => 0,
        }
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match &self.content {
            Content::Node4(_) => "Node4",
            Content::Node16(_) => "Node16",
            Content::Node48(_) => "Node48",
            Content::Node256(_) => "Node256",
            Content::Leaf(_) => "Leaf",
        }
    }

    #[inline]
    pub(crate) fn seek_child(&self, key: u8) -> Option<&Node<P, V>> {
        match &self.content {
            Content::Node4(n) => n.children.seek_child(key),
            Content::Node16(n) => n.children.seek_child(key),
            Content::Node48(n) => n.children.seek_child(key),
            Content::Node256(n) => n.children.seek_child(key),
            Content::Leaf(_) => None,
        }
    }

    #[inline]
    pub(crate) fn seek_child_mut(&mut self, key: u8) -> Option<&mut Node<P, V>> {
        match &mut self.content {
            Content::Node4(n) => n.children.seek_child_mut(key),
            Content::Node16(n) => n.children.seek_child_mut(key),
            Content::Node48(n) => n.children.seek_child_mut(key),
            Content::Node256(n) => n.children.seek_child_mut(key),
            Content::Leaf(_) => None,
        }
    }

    /// Install `node` under `key`. A child already stored under `key` is overwritten in place;
    /// a new key byte on a full node promotes it, and the caller must swap in the returned node.
    pub(crate) fn add_child(&mut self, key: u8, node: Node<P, V>) -> AddChild<P, V> {
        if let Some(existing) = self.seek_child_mut(key) {
            *existing = node;
            return AddChild::Installed;
        }

        if self.is_full() {
            let mut promoted = self.grow();
            promoted.add_new_child(key, node);
            return AddChild::Promoted(promoted);
        }

        self.add_new_child(key, node);
        AddChild::Installed
    }

    // `key` must be absent and there must be room.
    fn add_new_child(&mut self, key: u8, node: Node<P, V>) {
        match &mut self.content {
            Content::Node4(n) => n.children.add_child(key, node),
            Content::Node16(n) => n.children.add_child(key, node),
            Content::Node48(n) => n.children.add_child(key, node),
            Content::Node256(n) => n.children.add_child(key, node),
            Content::Leaf(_) => unreachable!("Should not be possible."),
        }
    }

    #[inline]
    fn is_full(&self) -> bool {
        match &self.content {
            Content::Node4(n) => n.children.is_full(),
            Content::Node16(n) => n.children.is_full(),
            Content::Node48(n) => n.children.is_full(),
            // 256 distinct key bytes is the whole alphabet; any add is an overwrite.
            Content::Node256(_) => false,
            Content::Leaf(_) => unreachable!("Should not be possible."),
        }
    }

    /// Build the next wider node with this node's prefix, value and children moved across.
    /// `self` is left as an empty shell.
    fn grow(&mut self) -> Node<P, V> {
        let prefix = std::mem::take(&mut self.prefix);
        let content = match &mut self.content {
            Content::Node4(n) => Content::Node16(Inner::with_value(
                n.value.take(),
                SortedKeyedMapping::from_resized(&mut n.children),
            )),
            Content::Node16(n) => Content::Node48(Inner::with_value(
                n.value.take(),
                IndexedMapping::from_sorted_keyed(&mut n.children),
            )),
            Content::Node48(n) => Content::Node256(Inner::with_value(
                n.value.take(),
                DirectMapping::from_indexed(&mut n.children),
            )),
            Content::Node256(_) => unreachable!("Should never grow a node256"),
            Content::Leaf(_) => unreachable!("Should not be possible."),
        };
        let promoted = Node { prefix, content };
        debug_log!(
            from = self.type_name(),
            to = promoted.type_name(),
            children = promoted.num_children(),
            "promoting full node"
        );
        promoted
    }

    /// Build the Node4 that replaces this node when `key` (from `depth`) diverges from its prefix
    /// after `common` bytes, or runs past the end of a leaf. The Node4 takes the common prefix;
    /// this node and the new entry hang off it, or become its terminal value if they have no
    /// bytes left. `self` is left as an empty shell.
    pub(crate) fn split<K>(&mut self, key: &K, depth: usize, common: usize, value: V) -> Node<P, V>
    where
        K: KeyTrait<PartialType = P>,
    {
        trace_log!(depth, common, prefix_len = self.prefix.len(), "splitting node");

        let old = self.take();
        let mut n4 = Node::new_inner(old.prefix.partial_before(common));

        if common == old.prefix.len() {
            // Only a leaf can be fully matched and still need a split: the key continues past it.
            let Content::Leaf(old_value) = old.content else {
                unreachable!("inner nodes only split on a prefix mismatch")
            };
            let _ = n4.replace_value(old_value);
        } else {
            let k1 = old.prefix.at(common);
            let new_prefix = old.prefix.partial_after(common + 1);
            n4.add_new_child(k1, old.with_new_prefix(new_prefix));
        }

        if key.length_at(depth) == common {
            let _ = n4.replace_value(value);
        } else {
            let k2 = key.at(depth + common);
            n4.add_new_child(k2, Node::new_leaf(key.to_partial(depth + common + 1), value));
        }

        n4
    }

    pub(crate) fn iter(&self) -> Box<dyn Iterator<Item = (u8, &Self)> + '_> {
        match &self.content {
            Content::Node4(n) => Box::new(n.children.iter()),
            Content::Node16(n) => Box::new(n.children.iter()),
            Content::Node48(n) => Box::new(n.children.iter()),
            Content::Node256(n) => Box::new(n.children.iter()),
            Content::Leaf(_) => Box::new(std::iter::empty()),
        }
    }
}
