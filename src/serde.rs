//! JSON‑deserializable layout description.
//!
//! These types describe the *shape* of a memory: the same tree the
//! [crate::field] factory functions build, in a form that can ship as a
//! layout file. Convert with [crate::memory::Memory::from_def], or field by
//! field with `Field::try_from`.
//!
//! ```json
//! {
//!   "name": "mem",
//!   "top": {
//!     "name": "S",
//!     "kind": {
//!       "type": "Structure",
//!       "fields": [
//!         { "name": "d", "kind": { "type": "Variable", "width": 4 } },
//!         {
//!           "name": "A",
//!           "kind": {
//!             "type": "Array",
//!             "count": 3,
//!             "element": { "name": "v", "kind": { "type": "Variable", "width": 8 } }
//!           }
//!         }
//!       ]
//!     }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Top‑level layout: memory name and optional top field.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LayoutDef {
    pub name: String,
    /// Absent for an empty memory.
    #[serde(default)]
    pub top: Option<FieldDef>,
}

/// Description of a single field.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FieldDef {
    /// Must be non‑empty and must not contain `.`.
    pub name: String,
    pub kind: FieldKindDef,
}

/// Shape of a field.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "type")]
pub enum FieldKindDef {
    /// Leaf of `width` bits.
    Variable { width: usize },
    /// `count` slots of `element`.
    Array { count: usize, element: Box<FieldDef> },
    /// Fields concatenated in order.
    Structure { fields: Vec<FieldDef> },
    /// Fields overlaid at the same offset.
    Union { fields: Vec<FieldDef> },
}
