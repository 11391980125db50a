//! Weighted consistent hashing for request routing.
//!
//! `rudder` maps arbitrary string keys onto a dynamic set of weighted
//! nodes. The mapping is deterministic, load is distributed roughly
//! proportional to declared weight, and adding or removing a node only
//! remaps the keys adjacent to that node's positions on the ring.
//!
//! Each member is placed on a 32-bit hash circle as
//! `virtual_number × weight` virtual nodes; a key belongs to the first
//! virtual node clockwise from the key's own hash position.
//!
//! ```
//! use rudder::HashRouter;
//!
//! let router = HashRouter::default();
//! router.add("cache-a", 1).unwrap();
//! router.add("cache-b", 2).unwrap();
//!
//! let owner = router.get("user:42").expect("ring is non-empty");
//! assert!(owner == "cache-a" || owner == "cache-b");
//! ```

mod error;
mod hash;
mod ring;
mod router;

pub use error::RouterError;
pub use router::{DEFAULT_VIRTUAL_NUMBER, HashRouter};
