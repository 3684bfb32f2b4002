//! Laid-out fields stored in a [crate::memory::Memory] arena.

use crate::codec::BitWindow;

/// Stable handle of a laid-out field inside one [crate::memory::Memory].
///
/// Handles are assigned in pre-order, so a duplicated memory hands out the
/// same handle for the corresponding field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(u32);

impl FieldId {
    /// # Panics
    /// Panics if a memory holds more than `u32::MAX` fields.
    pub(crate) fn new(index: usize) -> Self {
        FieldId(u32::try_from(index).expect("field arena exceeds u32::MAX entries"))
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Shape of a laid-out field, with children referenced by handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Variable,
    /// One materialised element subtree placed at slot `index`.
    Array {
        element: FieldId,
        size: usize,
        index: usize,
    },
    Structure(Vec<FieldId>),
    Union(Vec<FieldId>),
}

/// A field with its assigned position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) offset: usize,
    pub(crate) width: usize,
    pub(crate) depth: usize,
    pub(crate) parent: Option<FieldId>,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First bit of the field in the flat address space.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Nesting level; the top field is at depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn parent(&self) -> Option<FieldId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn window(&self) -> BitWindow {
        BitWindow::new(self.offset, self.width)
    }

    /// Element count and active slot, for arrays.
    pub fn cursor(&self) -> Option<(usize, usize)> {
        match self.kind {
            NodeKind::Array { size, index, .. } => Some((size, index)),
            _ => None,
        }
    }

    /// Direct children: the element for an array, members for containers.
    pub fn children(&self) -> &[FieldId] {
        match &self.kind {
            NodeKind::Variable => &[],
            NodeKind::Array { element, .. } => std::slice::from_ref(element),
            NodeKind::Structure(children) | NodeKind::Union(children) => children,
        }
    }

    /// Single-letter kind tag used in memory dumps.
    pub fn tag(&self) -> char {
        match self.kind {
            NodeKind::Variable => 'V',
            NodeKind::Array { .. } => 'A',
            NodeKind::Structure(_) => 'S',
            NodeKind::Union(_) => 'U',
        }
    }
}
