//! # bitlayout
//!
//! Declarative layouts for bit-addressable memory.
//!
//! Describe a memory region as a tree of named fields (scalars, fixed-size
//! arrays, structures and overlapping unions), lay it out once to assign every
//! field a bit offset, then read and write field values as integers or
//! tri-state bit strings through a [store::BitStore].
//!
//! An array materialises a single element subtree. Moving its cursor with
//! [memory::Memory::set_index] re-places that subtree over the selected slot,
//! so only one slot is reachable by name at a time.
//!
//! ## Example
//!
//! ```
//! use bitlayout::field::{array, scalar, structure};
//! use bitlayout::memory::Memory;
//! use bitlayout::store::TriStateBuffer;
//!
//! let memory = Memory::build("mem", || {
//!     let element = structure("T", [scalar("a", 2).ok()?, scalar("b", 6).ok()?]).ok()?;
//!     structure("S", [scalar("d", 4).ok()?, array("A", element, 3).ok()?]).ok()
//! });
//! let mut memory = memory.with_store(TriStateBuffer::new(28)).unwrap();
//!
//! let a = memory.get("S.A").unwrap();
//! let b = memory.get("S.A.T.b").unwrap();
//! memory.set_index(a, 2).unwrap();
//! assert_eq!(memory.node(b).offset(), 22);
//!
//! memory.set_integer(b, 42);
//! assert_eq!(memory.as_integer(b), Some(42));
//! ```

pub mod bits;
pub mod codec;
pub mod errors;
pub mod field;
pub mod memory;
pub mod node;
#[cfg(feature = "serde")]
pub mod serde;
pub mod store;
