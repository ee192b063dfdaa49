//! # artree
//!
//! An in-memory Adaptive Radix Tree (ART) keyed by byte strings.
//!
//! Each inner node picks the smallest of four child tables (4, 16, 48 or 256 slots) that fits its
//! fan-out, and runs of non-branching bytes are compressed into a per-node partial. Keys may be
//! prefixes of one another.
//!
//! ```rust
//! use artree::{AdaptiveRadixTree, VectorKey};
//!
//! let mut tree = AdaptiveRadixTree::<VectorKey, &str>::new();
//! tree.insert("a", "first");
//! tree.insert("ab", "second");
//! tree.insert("abc", "third");
//! tree.insert("abd", "fourth");
//!
//! assert_eq!(tree.search("ab"), Some(&"second"));
//! assert_eq!(tree.search("abe"), None);
//! assert_eq!(tree.len(), 4);
//! ```
//!
//! ## Features
//!
//! - `simd_keys` (default): SSE2 / NEON key search in the 16-wide nodes.
//! - `tracing`: emit `tracing` events for node splits, promotions, copies and clears.

#[macro_use]
mod tracing_helpers;

pub mod keys;
pub mod mapping;
mod node;
pub mod partials;
pub mod stats;
pub mod tree;
pub mod utils;

pub use keys::KeyTrait;
pub use keys::vector_key::VectorKey;
pub use stats::{NodeStats, TreeStats, TreeStatsTrait};
pub use tree::AdaptiveRadixTree;
