// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime type descriptions and classification.
//!
//! [`ValueType`] describes the declared type of a member or a mapping target.
//! Classification is a pure function of the type:
//!
//! - *value-like*: enums, primitives, strings, byte sequences, date/time and
//!   arrays of value-like elements. Content-compared and copied.
//! - *object-like*: anything not value-like and not void. Has named members.
//! - *list-like*: any sequence type with a single element type.

mod class;

pub use class::{
    ClassBuilder, ClassDescriptor, ClassType, Describe, Getter, Mappable, MemberDecl, MemberKind,
    Setter, Visibility, BACKING_FIELD_SUFFIX, GETTER_METHOD_PREFIX,
};

use std::fmt;
use std::sync::Arc;

/// Sequence container shapes.
///
/// `Array`, `List` and `Set` are concrete containers. The remaining shapes
/// are abstractions satisfied by several concrete containers; they
/// materialize as `List`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeqShape {
    /// Fixed-length array.
    Array,
    /// Growable list.
    List,
    /// Unordered set of distinct values (insertion order kept).
    Set,
    /// Indexed-list abstraction (Array, List).
    Indexed,
    /// Collection abstraction (Array, List, Set).
    Collection,
    /// Any sequence.
    Iterable,
}

impl SeqShape {
    /// True for Array, List and Set.
    pub fn is_concrete(self) -> bool {
        matches!(self, Self::Array | Self::List | Self::Set)
    }

    /// Shape to instantiate when materializing a container of this shape.
    pub fn concrete(self) -> SeqShape {
        if self.is_concrete() {
            self
        } else {
            Self::List
        }
    }

    /// Whether a container of concrete shape `source` satisfies this shape.
    pub fn accepts(self, source: SeqShape) -> bool {
        match self {
            Self::Array | Self::List | Self::Set => self == source,
            Self::Indexed => matches!(source, Self::Array | Self::List),
            Self::Collection => matches!(source, Self::Array | Self::List | Self::Set),
            Self::Iterable => true,
        }
    }
}

/// Enumeration type with named integral variants.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct EnumType {
    name: String,
    variants: Vec<(String, i64)>,
}

impl EnumType {
    pub fn new<'a>(
        name: impl Into<String>,
        variants: impl IntoIterator<Item = (&'a str, i64)>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            variants: variants
                .into_iter()
                .map(|(n, v)| (n.to_string(), v))
                .collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variants(&self) -> &[(String, i64)] {
        &self.variants
    }

    /// Variant value by name, ignoring case.
    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.variants
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| *v)
    }

    /// Variant name for a numeric value.
    pub fn name_of(&self, value: i64) -> Option<&str> {
        self.variants
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(n, _)| n.as_str())
    }
}

/// Declared type of a member or mapping target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// No value at all.
    Void,
    /// Generic object placeholder; accepts anything.
    Any,
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    String,
    /// Byte sequence (value semantics).
    Bytes,
    /// Naive date/time.
    DateTime,
    Enum(Arc<EnumType>),
    /// Value type that also accepts null.
    Nullable(Box<ValueType>),
    /// Homogeneous sequence.
    Sequence(SeqShape, Box<ValueType>),
    /// Dictionary-shaped dynamic object.
    Dictionary,
    /// Registered structured type.
    Class(ClassType),
}

impl ValueType {
    pub fn nullable(inner: ValueType) -> Self {
        match inner {
            Self::Nullable(_) => inner,
            other => Self::Nullable(Box::new(other)),
        }
    }

    pub fn sequence(shape: SeqShape, element: ValueType) -> Self {
        Self::Sequence(shape, Box::new(element))
    }

    pub fn array(element: ValueType) -> Self {
        Self::sequence(SeqShape::Array, element)
    }

    pub fn list(element: ValueType) -> Self {
        Self::sequence(SeqShape::List, element)
    }

    pub fn set(element: ValueType) -> Self {
        Self::sequence(SeqShape::Set, element)
    }

    /// Class type of a registered Rust type.
    pub fn class_of<T: Describe>() -> Self {
        Self::Class(T::describe())
    }

    /// Strip a nullable wrapper.
    pub fn underlying(&self) -> &ValueType {
        match self {
            Self::Nullable(inner) => inner,
            other => other,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self.underlying(),
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::U8 | Self::U16 | Self::U32 | Self::U64
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self.underlying(), Self::F32 | Self::F64)
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    pub fn is_value_like(&self) -> bool {
        match self {
            Self::Bool
            | Self::Char
            | Self::I8
            | Self::I16
            | Self::I32
            | Self::I64
            | Self::U8
            | Self::U16
            | Self::U32
            | Self::U64
            | Self::F32
            | Self::F64
            | Self::String
            | Self::Bytes
            | Self::DateTime
            | Self::Enum(_) => true,
            Self::Nullable(inner) => inner.is_value_like(),
            Self::Sequence(SeqShape::Array, element) => element.is_value_like(),
            Self::Void | Self::Any | Self::Sequence(..) | Self::Dictionary | Self::Class(_) => false,
        }
    }

    pub fn is_object_like(&self) -> bool {
        !self.is_value_like() && *self != Self::Void
    }

    pub fn is_list_like(&self) -> bool {
        matches!(self, Self::Sequence(..))
    }

    /// Dictionary targets and the placeholder materialize as dynamic objects.
    pub fn is_dictionary_shaped(&self) -> bool {
        matches!(self, Self::Dictionary | Self::Any)
    }

    /// Whether null is a legal value of this type.
    pub fn accepts_null(&self) -> bool {
        matches!(
            self,
            Self::Any
                | Self::String
                | Self::Bytes
                | Self::Nullable(_)
                | Self::Sequence(..)
                | Self::Dictionary
                | Self::Class(_)
        )
    }

    /// Element type of a sequence type.
    pub fn element_type(&self) -> Option<&ValueType> {
        match self {
            Self::Sequence(_, element) => Some(element),
            _ => None,
        }
    }

    /// Whether a value whose runtime type is `source` can be stored as-is.
    ///
    /// Sequence element types are invariant; nullable targets accept their
    /// underlying type; class targets accept registered subclasses.
    pub fn is_assignable_from(&self, source: &ValueType) -> bool {
        match (self, source) {
            (_, Self::Void) => false,
            (Self::Any, _) => true,
            (Self::Nullable(target), Self::Nullable(inner)) => target == inner,
            (Self::Nullable(target), other) => target.as_ref() == other,
            (Self::Sequence(shape, element), Self::Sequence(source_shape, source_element)) => {
                shape.accepts(*source_shape) && element == source_element
            }
            (Self::Class(target), Self::Class(source)) => source.is_subclass_of(target),
            (target, source) => target == source,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => write!(f, "void"),
            Self::Any => write!(f, "any"),
            Self::Bool => write!(f, "bool"),
            Self::Char => write!(f, "char"),
            Self::I8 => write!(f, "i8"),
            Self::I16 => write!(f, "i16"),
            Self::I32 => write!(f, "i32"),
            Self::I64 => write!(f, "i64"),
            Self::U8 => write!(f, "u8"),
            Self::U16 => write!(f, "u16"),
            Self::U32 => write!(f, "u32"),
            Self::U64 => write!(f, "u64"),
            Self::F32 => write!(f, "f32"),
            Self::F64 => write!(f, "f64"),
            Self::String => write!(f, "string"),
            Self::Bytes => write!(f, "bytes"),
            Self::DateTime => write!(f, "datetime"),
            Self::Enum(e) => write!(f, "enum {}", e.name()),
            Self::Nullable(inner) => write!(f, "{}?", inner),
            Self::Sequence(shape, element) => write!(f, "{:?}<{}>", shape, element),
            Self::Dictionary => write!(f, "dictionary"),
            Self::Class(class) => write!(f, "class {}", class.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_like_classification() {
        assert!(ValueType::I32.is_value_like());
        assert!(ValueType::String.is_value_like());
        assert!(ValueType::Bytes.is_value_like());
        assert!(ValueType::nullable(ValueType::I64).is_value_like());
        assert!(ValueType::array(ValueType::I32).is_value_like());
        assert!(!ValueType::list(ValueType::I32).is_value_like());
        assert!(!ValueType::array(ValueType::Any).is_value_like());
        assert!(!ValueType::Any.is_value_like());
        assert!(!ValueType::Void.is_object_like());
        assert!(ValueType::Dictionary.is_object_like());
    }

    #[test]
    fn test_list_like_classification() {
        assert!(ValueType::array(ValueType::I32).is_list_like());
        assert!(ValueType::sequence(SeqShape::Iterable, ValueType::Any).is_list_like());
        assert!(!ValueType::String.is_list_like());
        assert!(!ValueType::Bytes.is_list_like());
    }

    #[test]
    fn test_nullability() {
        assert!(ValueType::String.accepts_null());
        assert!(ValueType::nullable(ValueType::I64).accepts_null());
        assert!(!ValueType::I64.accepts_null());
        assert!(!ValueType::Bool.accepts_null());
    }

    #[test]
    fn test_assignability() {
        let indexed = ValueType::sequence(SeqShape::Indexed, ValueType::I32);
        assert!(indexed.is_assignable_from(&ValueType::list(ValueType::I32)));
        assert!(indexed.is_assignable_from(&ValueType::array(ValueType::I32)));
        assert!(!indexed.is_assignable_from(&ValueType::set(ValueType::I32)));
        assert!(!indexed.is_assignable_from(&ValueType::list(ValueType::I64)));
        assert!(ValueType::nullable(ValueType::I64).is_assignable_from(&ValueType::I64));
        assert!(!ValueType::I64.is_assignable_from(&ValueType::I32));
        assert!(ValueType::Any.is_assignable_from(&ValueType::Bool));
    }

    #[test]
    fn test_abstract_shapes_materialize_as_list() {
        assert_eq!(SeqShape::Indexed.concrete(), SeqShape::List);
        assert_eq!(SeqShape::Iterable.concrete(), SeqShape::List);
        assert_eq!(SeqShape::Set.concrete(), SeqShape::Set);
    }

    #[test]
    fn test_enum_lookup_ignores_case() {
        let e = EnumType::new("Color", [("Red", 1), ("Green", 2)]);
        assert_eq!(e.value_of("green"), Some(2));
        assert_eq!(e.name_of(1), Some("Red"));
        assert_eq!(e.value_of("blue"), None);
    }
}
