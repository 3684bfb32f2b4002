//! Memory: a laid-out field tree bound to a bit store.
//!
//! Building a [Memory] flattens a declarative [Field] tree into an arena of
//! [Node]s and runs the layout pass once, assigning every field its offset,
//! width and depth and recording the pre-order traversal. Moving an array's
//! cursor with [Memory::set_index] runs the position pass over that array's
//! subtree only.

use std::{collections::HashMap, fmt};

use crate::{
    errors::LayoutError,
    field::{Field, FieldKind, PATH_SEPARATOR},
    node::{FieldId, Node, NodeKind},
    store::{BitStore, NoStore},
};

const LOG_TARGET: &str = "bitlayout";

/// A named field tree with assigned bit offsets, backed by a [BitStore].
#[derive(Debug)]
pub struct Memory<S = NoStore> {
    name: String,
    nodes: Vec<Node>,
    top: Option<FieldId>,
    /// Pre-order traversal: containers before their children.
    order: Vec<FieldId>,
    /// Full dotted path to field. Rebuilt whenever `order` is.
    names: HashMap<String, FieldId>,
    store: S,
}

impl Memory {
    /// Obtains the top field from `factory` and lays it out. A factory
    /// returning `None` yields an empty memory.
    ///
    /// The result is bound to [NoStore]; use [Memory::with_store] to attach
    /// real storage.
    pub fn build<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: FnOnce() -> Option<Field>,
    {
        let mut memory = Self::empty(name.into());

        if let Some(field) = factory() {
            let top = memory.insert(field, None);
            memory.top = Some(top);
            memory.layout(top, 0, 0);
            memory.rebuild_names();

            log::debug!(
                target: LOG_TARGET,
                "laid out memory `{}`: {} fields, {} bits",
                memory.name,
                memory.order.len(),
                memory.size()
            );
        }

        memory
    }

    /// Builds a memory from a JSON-deserializable layout description.
    #[cfg(feature = "serde")]
    pub fn from_def(def: &crate::serde::LayoutDef) -> Result<Self, LayoutError> {
        let top = def.top.clone().map(Field::try_from).transpose()?;
        Ok(Memory::build(def.name.clone(), || top))
    }

    fn empty(name: String) -> Self {
        Memory {
            name,
            nodes: Vec::new(),
            top: None,
            order: Vec::new(),
            names: HashMap::new(),
            store: NoStore,
        }
    }

    /// Moves `field` into the arena in pre-order. Container widths are left
    /// at 0 for the layout pass to fill in.
    fn insert(&mut self, field: Field, parent: Option<FieldId>) -> FieldId {
        let id = FieldId::new(self.nodes.len());
        let (name, kind) = field.into_parts();
        self.nodes.push(Node {
            name,
            offset: 0,
            width: 0,
            depth: 0,
            parent,
            kind: NodeKind::Variable,
        });

        let kind = match kind {
            FieldKind::Variable { width } => {
                self.node_mut(id).width = width;
                NodeKind::Variable
            }
            FieldKind::Array { element, count } => NodeKind::Array {
                element: self.insert(*element, Some(id)),
                size: count,
                index: 0,
            },
            FieldKind::Structure(children) => NodeKind::Structure(
                children
                    .into_iter()
                    .map(|child| self.insert(child, Some(id)))
                    .collect(),
            ),
            FieldKind::Union(children) => NodeKind::Union(
                children
                    .into_iter()
                    .map(|child| self.insert(child, Some(id)))
                    .collect(),
            ),
        };
        self.node_mut(id).kind = kind;

        id
    }

    /// Duplicates the subtree of `source` rooted at `id` into this arena.
    fn duplicate_from<T>(
        &mut self,
        source: &Memory<T>,
        id: FieldId,
        parent: Option<FieldId>,
    ) -> FieldId {
        let original = source.node(id);
        let copy = FieldId::new(self.nodes.len());
        self.nodes.push(Node {
            kind: NodeKind::Variable,
            parent,
            ..original.clone()
        });

        let kind = match &original.kind {
            NodeKind::Variable => NodeKind::Variable,
            NodeKind::Array {
                element,
                size,
                index,
            } => NodeKind::Array {
                element: self.duplicate_from(source, *element, Some(copy)),
                size: *size,
                index: *index,
            },
            NodeKind::Structure(children) => NodeKind::Structure(
                children
                    .iter()
                    .map(|child| self.duplicate_from(source, *child, Some(copy)))
                    .collect(),
            ),
            NodeKind::Union(children) => NodeKind::Union(
                children
                    .iter()
                    .map(|child| self.duplicate_from(source, *child, Some(copy)))
                    .collect(),
            ),
        };
        self.node_mut(copy).kind = kind;

        copy
    }
}

impl<S> Memory<S> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The top field, or `None` for an empty memory.
    pub fn top(&self) -> Option<FieldId> {
        self.top
    }

    /// # Panics
    /// Panics if `id` was not issued by this memory or one it was duplicated from.
    pub fn node(&self, id: FieldId) -> &Node {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: FieldId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Total width of the top field in bits; 0 when empty.
    pub fn size(&self) -> usize {
        self.top.map_or(0, |top| self.node(top).width)
    }

    /// All fields in pre-order.
    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.order.iter().copied()
    }

    pub fn store(&self) -> &S {
        &self.store
    }


    /// Swaps in `store` of the same type, returning the previous one.
    ///
    /// Fails, leaving the current binding in place, if `store` cannot hold
    /// [Memory::size] bits.
    pub fn replace_store(&mut self, store: S) -> Result<S, LayoutError>
    where
        S: BitStore,
    {
        let required = self.size();
        if store.len() < required {
            return Err(LayoutError::StoreTooSmall {
                required,
                available: store.len(),
            });
        }

        Ok(std::mem::replace(&mut self.store, store))
    }

    /// Binds this layout to `store`, replacing the current binding.
    ///
    /// Fails if `store` cannot hold [Memory::size] bits.
    pub fn with_store<T: BitStore>(self, store: T) -> Result<Memory<T>, LayoutError> {
        let required = self.size();
        if store.len() < required {
            return Err(LayoutError::StoreTooSmall {
                required,
                available: store.len(),
            });
        }

        log::debug!(
            target: LOG_TARGET,
            "bound memory `{}` to a store of {} bits",
            self.name,
            store.len()
        );

        Ok(Memory {
            name: self.name,
            nodes: self.nodes,
            top: self.top,
            order: self.order,
            names: self.names,
            store,
        })
    }

    /// Assigns offsets and depth to the subtree at `id`, appends it to the
    /// traversal and computes container widths.
    fn layout(&mut self, id: FieldId, offset: usize, depth: usize) {
        let node = self.node_mut(id);
        node.offset = offset;
        node.depth = depth;
        self.order.push(id);

        let width = match self.node(id).kind.clone() {
            NodeKind::Variable => self.node(id).width,
            NodeKind::Array { element, size, .. } => {
                self.layout(element, offset, depth + 1);
                size * self.node(element).width
            }
            NodeKind::Structure(children) => {
                let mut cursor = offset;
                for child in children {
                    self.layout(child, cursor, depth + 1);
                    cursor += self.node(child).width;
                }
                cursor - offset
            }
            NodeKind::Union(children) => {
                let mut width = 0;
                for child in children {
                    self.layout(child, offset, depth + 1);
                    width = width.max(self.node(child).width);
                }
                width
            }
        };
        self.node_mut(id).width = width;
    }

    /// Re-places the subtree at `id` starting from `offset`. Widths, the
    /// traversal and the name index are left alone.
    fn position(&mut self, id: FieldId, offset: usize) {
        self.node_mut(id).offset = offset;

        match self.node(id).kind.clone() {
            NodeKind::Variable => {}
            NodeKind::Array { element, index, .. } => {
                let stride = self.node(element).width;
                self.position(element, offset + index * stride);
            }
            NodeKind::Structure(children) => {
                let mut cursor = offset;
                for child in children {
                    self.position(child, cursor);
                    cursor += self.node(child).width;
                }
            }
            NodeKind::Union(children) => {
                for child in children {
                    self.position(child, offset);
                }
            }
        }
    }

    /// Appends the subtree at `id` to the traversal, in the same order as
    /// the layout pass.
    fn order(&mut self, id: FieldId) {
        self.order.push(id);

        let children = self.node(id).children().to_vec();
        for child in children {
            self.order(child);
        }
    }

    fn rebuild_names(&mut self) {
        self.names = self
            .order
            .iter()
            .map(|&id| (self.full_name(id), id))
            .collect();
    }

    /// Moves the cursor of the array at `id` to slot `index`, repositioning
    /// its element subtree. Moving to the current slot does nothing.
    pub fn set_index(&mut self, id: FieldId, index: usize) -> Result<(), LayoutError> {
        let node = self.node(id);
        let &NodeKind::Array {
            size,
            index: current,
            ..
        } = &node.kind
        else {
            return Err(LayoutError::InvalidFieldKind(self.full_name(id)));
        };

        if index >= size {
            return Err(LayoutError::IndexRange { index, size });
        }
        if index == current {
            return Ok(());
        }

        let offset = node.offset;
        if let NodeKind::Array { index: cursor, .. } = &mut self.node_mut(id).kind {
            *cursor = index;
        }
        self.position(id, offset);

        log::trace!(
            target: LOG_TARGET,
            "moved `{}` from slot {} to slot {}",
            self.full_name(id),
            current,
            index
        );

        Ok(())
    }

    /// Name of `id` prefixed by all its ancestors, top field first.
    pub fn full_name(&self, id: FieldId) -> String {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(c) = current {
            let node = self.node(c);
            segments.push(node.name.as_str());
            current = node.parent;
        }
        segments.reverse();

        segments.join(PATH_SEPARATOR)
    }

    /// Exact lookup by full path, top field name included.
    pub fn get(&self, full_path: &str) -> Option<FieldId> {
        self.names.get(full_path).copied()
    }

    /// Finds the first field, in pre-order, whose trailing path segments
    /// equal `path`.
    pub fn find_by_suffix(&self, path: &str) -> Option<FieldId> {
        let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
        self.fields().find(|&id| self.ends_with(id, &segments))
    }

    fn ends_with(&self, id: FieldId, segments: &[&str]) -> bool {
        let mut current = Some(id);
        for segment in segments.iter().rev() {
            match current {
                Some(c) if self.node(c).name == *segment => current = self.node(c).parent,
                _ => return false,
            }
        }

        true
    }

    /// Shape-only copy: same fields, offsets and array cursors, with no
    /// object shared with `self`. The copy is bound to [NoStore] and never
    /// sees this memory's bits.
    pub fn duplicate(&self) -> Memory<NoStore> {
        let mut copy = Memory::empty(self.name.clone());

        if let Some(top) = self.top {
            copy.nodes.reserve(self.nodes.len());
            let top = copy.duplicate_from(self, top, None);
            copy.top = Some(top);
            copy.order(top);
            copy.rebuild_names();
        }

        log::debug!(
            target: LOG_TARGET,
            "duplicated memory `{}` ({} fields)",
            self.name,
            copy.order.len()
        );

        copy
    }
}

impl<S: BitStore> Memory<S> {
    pub fn as_integer(&self, id: FieldId) -> Option<u64> {
        self.node(id).window().as_integer(&self.store)
    }

    pub fn as_signed(&self, id: FieldId) -> Option<i64> {
        self.node(id).window().as_signed(&self.store)
    }

    pub fn as_bit_string(&self, id: FieldId) -> String {
        self.node(id).window().as_bit_string(&self.store)
    }

    pub fn set_integer(&mut self, id: FieldId, value: u64) {
        let window = self.node(id).window();
        window.from_integer(&mut self.store, value);
    }

    pub fn set_bit_string(&mut self, id: FieldId, bits: &str) {
        let window = self.node(id).window();
        window.from_bit_string(&mut self.store, bits);
    }

    pub fn clear(&mut self, id: FieldId) {
        let window = self.node(id).window();
        window.clear(&mut self.store);
    }

    /// One header line, then one line per field in pre-order: kind tag,
    /// offset, width, array size and cursor, decoded value (blank when
    /// undecidable) and the full name indented by depth.
    pub fn to_display_string(&self) -> String {
        let mut out = format!(
            "{:<4} {:>6} {:>6} {:>8} {:>20}  {}\n",
            "kind", "offset", "width", "size", "decoded value", "name"
        );

        for id in self.fields() {
            let node = self.node(id);
            let size = node
                .cursor()
                .map(|(size, index)| format!("{size}[{index}]"))
                .unwrap_or_default();
            let value = self
                .as_integer(id)
                .map(|v| v.to_string())
                .unwrap_or_default();

            out.push_str(&format!(
                "{:<4} {:>6} {:>6} {:>8} {:>20}  {}{}\n",
                node.tag(),
                node.offset,
                node.width,
                size,
                value,
                "  ".repeat(node.depth),
                self.full_name(id)
            ));
        }

        out
    }
}

impl<S: BitStore> fmt::Display for Memory<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        codec::BitWindow,
        field::{array, scalar, structure, union},
        store::TriStateBuffer,
    };

    use super::*;

    /// `S { d: 4, A: [T { a: 2, b: 2, c: 4 }; 3], e: 4 }`
    fn reference() -> Memory {
        Memory::build("mem", || {
            let element = structure(
                "T",
                [
                    scalar("a", 2).unwrap(),
                    scalar("b", 2).unwrap(),
                    scalar("c", 4).unwrap(),
                ],
            )
            .unwrap();

            Some(
                structure(
                    "S",
                    [
                        scalar("d", 4).unwrap(),
                        array("A", element, 3).unwrap(),
                        scalar("e", 4).unwrap(),
                    ],
                )
                .unwrap(),
            )
        })
    }

    fn offset_of<S>(memory: &Memory<S>, path: &str) -> usize {
        memory.node(memory.get(path).unwrap()).offset()
    }

    #[test]
    fn test_empty_memory() {
        let memory = Memory::build("empty", || None);
        assert_eq!(memory.size(), 0);
        assert_eq!(memory.top(), None);
        assert_eq!(memory.fields().count(), 0);
        assert_eq!(memory.get("anything"), None);
        assert_eq!(memory.duplicate().size(), 0);
    }

    #[test]
    fn test_reference_layout() {
        let memory = reference();
        assert_eq!(memory.size(), 32);
        assert_eq!(offset_of(&memory, "S.d"), 0);
        assert_eq!(offset_of(&memory, "S.A"), 4);
        assert_eq!(memory.node(memory.get("S.A").unwrap()).width(), 24);
        assert_eq!(offset_of(&memory, "S.e"), 28);
        assert_eq!(offset_of(&memory, "S.A.T.a"), 4);
        assert_eq!(offset_of(&memory, "S.A.T.b"), 6);
        assert_eq!(offset_of(&memory, "S.A.T.c"), 8);
    }

    #[test]
    fn test_traversal_is_pre_order() {
        let memory = reference();
        let names: Vec<String> = memory.fields().map(|id| memory.full_name(id)).collect();
        assert_eq!(
            names,
            [
                "S", "S.d", "S.A", "S.A.T", "S.A.T.a", "S.A.T.b", "S.A.T.c", "S.e"
            ]
        );
    }

    #[test]
    fn test_depths() {
        let memory = reference();
        let depths: Vec<usize> = memory.fields().map(|id| memory.node(id).depth()).collect();
        assert_eq!(depths, [0, 1, 1, 2, 3, 3, 3, 1]);
    }

    #[test]
    fn test_set_index_moves_element() {
        let mut memory = reference();
        let a = memory.get("S.A").unwrap();

        memory.set_index(a, 1).unwrap();
        assert_eq!(offset_of(&memory, "S.A.T.a"), 12);
        assert_eq!(offset_of(&memory, "S.A.T.b"), 14);
        assert_eq!(offset_of(&memory, "S.A.T.c"), 16);
        assert_eq!(memory.node(a).offset(), 4);
        assert_eq!(memory.node(a).width(), 24);

        memory.set_index(a, 2).unwrap();
        assert_eq!(offset_of(&memory, "S.A.T.a"), 20);
        assert_eq!(offset_of(&memory, "S.A.T.b"), 22);
        assert_eq!(offset_of(&memory, "S.A.T.c"), 24);
        assert_eq!(offset_of(&memory, "S.e"), 28);
    }

    #[test]
    fn test_set_index_out_of_range() {
        let mut memory = reference();
        let a = memory.get("S.A").unwrap();
        memory.set_index(a, 1).unwrap();

        assert_eq!(
            memory.set_index(a, 3).unwrap_err(),
            LayoutError::IndexRange { index: 3, size: 3 }
        );
        assert_eq!(memory.node(a).cursor(), Some((3, 1)));
        assert_eq!(offset_of(&memory, "S.A.T.a"), 12);
    }

    #[test]
    fn test_set_index_on_non_array() {
        let mut memory = reference();
        let d = memory.get("S.d").unwrap();
        assert_eq!(
            memory.set_index(d, 0).unwrap_err(),
            LayoutError::InvalidFieldKind("S.d".to_string())
        );
    }

    #[test]
    fn test_nested_array_cascade() {
        let mut memory = Memory::build("nested", || {
            let row = array("row", scalar("cell", 2).unwrap(), 4).unwrap();
            let grid = array("grid", row, 3).unwrap();
            Some(structure("top", [scalar("pad", 1).unwrap(), grid]).unwrap())
        });
        let grid = memory.get("top.grid").unwrap();
        let row = memory.get("top.grid.row").unwrap();
        let cell = memory.get("top.grid.row.cell").unwrap();
        assert_eq!(memory.size(), 25);

        memory.set_index(row, 3).unwrap();
        assert_eq!(memory.node(cell).offset(), 1 + 6);

        memory.set_index(grid, 2).unwrap();
        assert_eq!(memory.node(row).offset(), 1 + 16);
        assert_eq!(memory.node(cell).offset(), 1 + 16 + 6);

        memory.set_index(row, 0).unwrap();
        assert_eq!(memory.node(cell).offset(), 17);
    }

    #[test]
    fn test_union_children_share_offset() {
        let memory = Memory::build("u", || {
            let overlay = union(
                "U",
                [
                    scalar("byte", 8).unwrap(),
                    structure("pair", [scalar("lo", 4).unwrap(), scalar("hi", 4).unwrap()])
                        .unwrap(),
                    scalar("wide", 12).unwrap(),
                ],
            )
            .unwrap();
            Some(structure("top", [scalar("tag", 3).unwrap(), overlay]).unwrap())
        });

        assert_eq!(memory.size(), 15);
        assert_eq!(offset_of(&memory, "top.U.byte"), 3);
        assert_eq!(offset_of(&memory, "top.U.pair"), 3);
        assert_eq!(offset_of(&memory, "top.U.pair.hi"), 7);
        assert_eq!(offset_of(&memory, "top.U.wide"), 3);
        assert_eq!(memory.node(memory.get("top.U").unwrap()).width(), 12);
    }

    #[test]
    fn test_find_by_suffix() {
        let memory = reference();
        assert_eq!(memory.find_by_suffix("c"), memory.get("S.A.T.c"));
        assert_eq!(memory.find_by_suffix("T.c"), memory.get("S.A.T.c"));
        assert_eq!(memory.find_by_suffix("S.A.T.c"), memory.get("S.A.T.c"));
        assert_eq!(memory.find_by_suffix("A.c"), None);
        assert_eq!(memory.find_by_suffix("X.S.d"), None);
        assert_eq!(memory.find_by_suffix(""), None);
    }

    #[test]
    fn test_find_by_suffix_first_in_pre_order() {
        let memory = Memory::build("m", || {
            let first = structure("p", [scalar("x", 1).unwrap()]).unwrap();
            let second = structure("q", [scalar("x", 1).unwrap()]).unwrap();
            Some(structure("top", [first, second]).unwrap())
        });
        assert_eq!(memory.find_by_suffix("x"), memory.get("top.p.x"));
        assert_eq!(memory.find_by_suffix("q.x"), memory.get("top.q.x"));
    }

    #[test]
    fn test_get_requires_full_path() {
        let memory = reference();
        assert_eq!(memory.get("A.T.a"), None);
        assert!(memory.get("S").is_some());
    }

    #[test]
    fn test_duplicate_is_independent() {
        let mut memory = reference();
        let a = memory.get("S.A").unwrap();
        memory.set_index(a, 1).unwrap();

        let mut copy = memory.duplicate();
        let copy_a = copy.get("S.A").unwrap();
        assert_eq!(copy.node(copy_a).cursor(), Some((3, 1)));
        assert_eq!(offset_of(&copy, "S.A.T.a"), 12);

        copy.set_index(copy_a, 2).unwrap();
        assert_eq!(offset_of(&copy, "S.A.T.a"), 20);
        assert_eq!(offset_of(&memory, "S.A.T.a"), 12);

        memory.set_index(a, 0).unwrap();
        assert_eq!(offset_of(&copy, "S.A.T.a"), 20);
        assert_eq!(offset_of(&memory, "S.A.T.a"), 4);
    }

    #[test]
    fn test_duplicate_preserves_shape() {
        let memory = reference();
        let copy = memory.duplicate();
        assert_eq!(copy.name(), "mem");
        assert_eq!(copy.size(), memory.size());

        for (original, duplicated) in memory.fields().zip(copy.fields()) {
            assert_eq!(memory.full_name(original), copy.full_name(duplicated));
            assert_eq!(memory.node(original), copy.node(duplicated));
        }
    }

    #[test]
    fn test_duplicate_drops_store() {
        let mut memory = reference().with_store(TriStateBuffer::new(32)).unwrap();
        let d = memory.get("S.d").unwrap();
        memory.set_integer(d, 5);
        assert_eq!(memory.as_integer(d), Some(5));

        let copy = memory.duplicate();
        assert_eq!(copy.as_integer(d), None);

        let mut copy = copy.with_store(TriStateBuffer::new(32)).unwrap();
        copy.set_integer(d, 9);
        assert_eq!(memory.as_integer(d), Some(5));
        assert_eq!(copy.as_integer(d), Some(9));
    }

    #[test]
    fn test_store_too_small() {
        let err = reference().with_store(TriStateBuffer::new(31)).unwrap_err();
        assert_eq!(
            err,
            LayoutError::StoreTooSmall {
                required: 32,
                available: 31
            }
        );
    }

    #[test]
    fn test_replace_store_rejects_smaller_store() {
        let mut memory = reference().with_store(TriStateBuffer::new(32)).unwrap();
        let e = memory.get("S.e").unwrap();
        memory.set_integer(e, 7);

        let err = memory.replace_store(TriStateBuffer::new(4)).unwrap_err();
        assert_eq!(
            err,
            LayoutError::StoreTooSmall {
                required: 32,
                available: 4
            }
        );
        assert_eq!(memory.store().len(), 32);
        assert_eq!(memory.as_integer(e), Some(7));
    }

    #[test]
    fn test_replace_store_returns_previous() {
        let mut memory = reference().with_store(TriStateBuffer::new(32)).unwrap();
        let e = memory.get("S.e").unwrap();
        memory.set_integer(e, 7);

        let previous = memory.replace_store(TriStateBuffer::new(40)).unwrap();
        assert_eq!(BitWindow::new(28, 4).as_integer(&previous), Some(7));
        assert_eq!(memory.as_integer(e), None);
    }

    #[test]
    fn test_element_values_follow_cursor() {
        let mut memory = reference().with_store(TriStateBuffer::new(32)).unwrap();
        let a = memory.get("S.A").unwrap();
        let b = memory.get("S.A.T.b").unwrap();

        for slot in 0..3 {
            memory.set_index(a, slot).unwrap();
            memory.set_integer(b, slot as u64 + 1);
        }
        for slot in 0..3 {
            memory.set_index(a, slot).unwrap();
            assert_eq!(memory.as_integer(b), Some(slot as u64 + 1));
        }
        assert_eq!(memory.as_bit_string(b), "11");
    }

    #[test]
    fn test_display() {
        let mut memory = reference().with_store(TriStateBuffer::new(32)).unwrap();
        let d = memory.get("S.d").unwrap();
        let a = memory.get("S.A.T.a").unwrap();
        let b = memory.get("S.A.T.b").unwrap();
        let c = memory.get("S.A.T.c").unwrap();
        memory.set_integer(d, 5);
        memory.set_integer(a, 1);
        memory.set_integer(b, 2);
        memory.set_integer(c, 9);

        let expected = "\
kind offset  width     size        decoded value  name
S         0     32                                S
V         0      4                             5    S.d
A         4     24     3[0]                         S.A
S         4      8                           153      S.A.T
V         4      2                             1        S.A.T.a
V         6      2                             2        S.A.T.b
V         8      4                             9        S.A.T.c
V        28      4                                  S.e
";
        assert_eq!(memory.to_display_string(), expected);
        assert_eq!(memory.to_string(), expected);
    }

    #[test]
    fn test_display_union_and_moved_cursor() {
        let memory = Memory::build("mem", || {
            let element = structure(
                "T",
                [
                    scalar("a", 2).unwrap(),
                    scalar("b", 2).unwrap(),
                    scalar("c", 4).unwrap(),
                ],
            )
            .unwrap();
            let overlay = union(
                "V",
                [
                    scalar("raw", 4).unwrap(),
                    structure("n", [scalar("lo", 2).unwrap(), scalar("hi", 2).unwrap()])
                        .unwrap(),
                ],
            )
            .unwrap();

            Some(
                structure(
                    "S",
                    [
                        scalar("d", 4).unwrap(),
                        array("A", element, 3).unwrap(),
                        overlay,
                    ],
                )
                .unwrap(),
            )
        });
        let mut memory = memory.with_store(TriStateBuffer::new(32)).unwrap();

        let a = memory.get("S.A").unwrap();
        memory.set_index(a, 2).unwrap();
        for (path, value) in [
            ("S.d", 5),
            ("S.A.T.a", 1),
            ("S.A.T.b", 2),
            ("S.A.T.c", 9),
            ("S.V.raw", 0b1101),
        ] {
            let id = memory.get(path).unwrap();
            memory.set_integer(id, value);
        }

        let expected = "\
kind offset  width     size        decoded value  name
S         0     32                                S
V         0      4                             5    S.d
A         4     24     3[2]                         S.A
S        20      8                           153      S.A.T
V        20      2                             1        S.A.T.a
V        22      2                             2        S.A.T.b
V        24      4                             9        S.A.T.c
U        28      4                            13    S.V
V        28      4                            13      S.V.raw
S        28      4                            13      S.V.n
V        28      2                             1        S.V.n.lo
V        30      2                             3        S.V.n.hi
";
        assert_eq!(memory.to_display_string(), expected);
    }
}
