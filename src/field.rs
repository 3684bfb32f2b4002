//! Declarative field descriptions used to build a [crate::memory::Memory].
//!
//! Fields are composed bottom-up with [scalar], [array], [structure] and
//! [union], then handed to [crate::memory::Memory::build] which lays them out.

use crate::errors::LayoutError;

/// Separator between segments of a full field path.
pub const PATH_SEPARATOR: &str = ".";

/// A named, unplaced field: a shape without offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    kind: FieldKind,
}

/// The four field shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Leaf with a fixed width in bits.
    Variable { width: usize },
    /// `count` repetitions of a single element shape.
    Array { element: Box<Field>, count: usize },
    /// Children laid out one after another in declaration order.
    Structure(Vec<Field>),
    /// Children sharing the union's base offset.
    Union(Vec<Field>),
}

/// Leaf field of `width` bits.
pub fn scalar(name: impl Into<String>, width: usize) -> Result<Field, LayoutError> {
    let name = checked_name(name.into())?;
    if width == 0 {
        return Err(LayoutError::InvalidFieldSize);
    }

    Ok(Field {
        name,
        kind: FieldKind::Variable { width },
    })
}

/// `count` slots of `element`.
pub fn array(name: impl Into<String>, element: Field, count: usize) -> Result<Field, LayoutError> {
    let name = checked_name(name.into())?;
    if count == 0 {
        return Err(LayoutError::InvalidArrayCount);
    }

    Ok(Field {
        name,
        kind: FieldKind::Array {
            element: Box::new(element),
            count,
        },
    })
}

/// Concatenation of `children` in order. Fails on duplicate child names.
pub fn structure(
    name: impl Into<String>,
    children: impl IntoIterator<Item = Field>,
) -> Result<Field, LayoutError> {
    let mut field = Field {
        name: checked_name(name.into())?,
        kind: FieldKind::Structure(Vec::new()),
    };
    for child in children {
        field.add(child)?;
    }

    Ok(field)
}

/// Overlay of `children` at a shared offset. Fails on duplicate child names.
pub fn union(
    name: impl Into<String>,
    children: impl IntoIterator<Item = Field>,
) -> Result<Field, LayoutError> {
    let mut field = Field {
        name: checked_name(name.into())?,
        kind: FieldKind::Union(Vec::new()),
    };
    for child in children {
        field.add(child)?;
    }

    Ok(field)
}

fn checked_name(name: String) -> Result<String, LayoutError> {
    if name.is_empty() || name.contains(PATH_SEPARATOR) {
        return Err(LayoutError::InvalidFieldName(name));
    }

    Ok(name)
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub(crate) fn into_parts(self) -> (String, FieldKind) {
        (self.name, self.kind)
    }

    /// Appends `child` to a Structure or Union.
    ///
    /// On a name conflict the container keeps the children added so far and
    /// `child` is dropped.
    pub fn add(&mut self, child: Field) -> Result<(), LayoutError> {
        let children = match &mut self.kind {
            FieldKind::Structure(children) | FieldKind::Union(children) => children,
            FieldKind::Variable { .. } | FieldKind::Array { .. } => {
                return Err(LayoutError::InvalidFieldKind(self.name.clone()));
            }
        };

        if children.iter().any(|c| c.name == child.name) {
            return Err(LayoutError::NamingConflict(child.name));
        }
        children.push(child);

        Ok(())
    }

    /// Children of a container, in declaration order. Empty for leaves and
    /// arrays.
    pub fn children(&self) -> &[Field] {
        match &self.kind {
            FieldKind::Structure(children) | FieldKind::Union(children) => children,
            FieldKind::Variable { .. } | FieldKind::Array { .. } => &[],
        }
    }

    /// Total width in bits this field will occupy once laid out.
    pub fn width(&self) -> usize {
        match &self.kind {
            FieldKind::Variable { width } => *width,
            FieldKind::Array { element, count } => element.width() * count,
            FieldKind::Structure(children) => children.iter().map(Field::width).sum(),
            FieldKind::Union(children) => children.iter().map(Field::width).max().unwrap_or(0),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<crate::serde::FieldDef> for Field {
    type Error = LayoutError;

    fn try_from(value: crate::serde::FieldDef) -> Result<Self, Self::Error> {
        use crate::serde::FieldKindDef;

        match value.kind {
            FieldKindDef::Variable { width } => scalar(value.name, width),
            FieldKindDef::Array { count, element } => {
                array(value.name, Field::try_from(*element)?, count)
            }
            FieldKindDef::Structure { fields } => structure(
                value.name,
                fields
                    .into_iter()
                    .map(Field::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            FieldKindDef::Union { fields } => union(
                value.name,
                fields
                    .into_iter()
                    .map(Field::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        }
    }
}
