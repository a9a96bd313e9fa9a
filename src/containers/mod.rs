//! Instrumented data structures
//!
//! Each container exposes its mutating operations as [`Engine`](crate::engine::Engine)s
//! rather than plain methods. Calling `list.insert(7, 2)` validates the
//! arguments and returns a [`ListInsert`] that borrows the list mutably; the
//! mutation happens inside its `step` calls, interleaved with checkpoints.
//!
//! Because the returned engine holds the borrow, a second operation on the
//! same container cannot start until the first one is dropped.
//!
//! - [`arena`]: generational node storage backing the linked lists
//! - [`linked_list`]: singly and doubly linked lists
//! - [`stack`]: array-backed stack
//! - [`hash_table`]: chained hash table with a fixed bucket count
//! - [`graph`]: adjacency-list graph, weighted or not, directed or not

pub mod arena;
pub mod graph;
pub mod hash_table;
pub mod linked_list;
pub mod stack;

pub use graph::{Graph, GraphKind, Position, TraversalOrder, VertexId};
pub use hash_table::HashTable;
pub use linked_list::{LinkedList, ListInsert, ListKind, ListRemove, ListSearch};
pub use stack::Stack;
