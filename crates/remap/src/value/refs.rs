// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shared reference cells: sequences, dynamic objects and typed instances.
//!
//! Each cell is an `Arc<RwLock<..>>`. Cloning a handle shares the cell;
//! identity is pointer identity.

use crate::error::{MapError, Result};
use crate::types::{ClassType, Describe, Mappable, SeqShape, ValueType};
use crate::value::{DynamicObject, EnumValue, Value};
use chrono::NaiveDateTime;
use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Homogeneous sequence storage.
#[derive(Debug, Clone)]
pub struct Sequence {
    shape: SeqShape,
    element: ValueType,
    items: Vec<Value>,
}

impl Sequence {
    pub fn shape(&self) -> SeqShape {
        self.shape
    }

    pub fn element_type(&self) -> &ValueType {
        &self.element
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }
}

/// Shared handle to a [`Sequence`].
#[derive(Clone)]
pub struct SeqRef(Arc<RwLock<Sequence>>);

impl SeqRef {
    /// Create a sequence. Abstract shapes become lists; sets drop duplicates.
    pub fn new(shape: SeqShape, element: ValueType, items: Vec<Value>) -> Self {
        let shape = shape.concrete();
        let items = if shape == SeqShape::Set {
            dedup(items)
        } else {
            items
        };
        Self(Arc::new(RwLock::new(Sequence {
            shape,
            element,
            items,
        })))
    }

    pub fn array(element: ValueType, items: Vec<Value>) -> Self {
        Self::new(SeqShape::Array, element, items)
    }

    pub fn list(element: ValueType, items: Vec<Value>) -> Self {
        Self::new(SeqShape::List, element, items)
    }

    pub fn set(element: ValueType, items: Vec<Value>) -> Self {
        Self::new(SeqShape::Set, element, items)
    }

    pub fn shape(&self) -> SeqShape {
        self.0.read().shape
    }

    pub fn element_type(&self) -> ValueType {
        self.0.read().element.clone()
    }

    /// Declared type of this container.
    pub fn value_type(&self) -> ValueType {
        let seq = self.0.read();
        ValueType::sequence(seq.shape, seq.element.clone())
    }

    pub fn len(&self) -> usize {
        self.0.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.read().items.get(index).cloned()
    }

    /// Snapshot of the elements.
    pub fn items(&self) -> Vec<Value> {
        self.0.read().items.clone()
    }

    /// Replace the element at `index`.
    pub fn set_item(&self, index: usize, value: Value) -> Result<()> {
        let mut seq = self.0.write();
        let len = seq.items.len();
        match seq.items.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(MapError::KeyNotFound(format!("index {} of {}", index, len))),
        }
    }

    /// Append an element. Arrays are fixed-length; sets ignore duplicates.
    pub fn push(&self, value: Value) -> Result<bool> {
        let mut seq = self.0.write();
        match seq.shape {
            SeqShape::Array => Err(MapError::Configuration(
                "cannot append to a fixed-length array".into(),
            )),
            SeqShape::Set if seq.items.contains(&value) => Ok(false),
            _ => {
                seq.items.push(value);
                Ok(true)
            }
        }
    }

    pub fn ptr_eq(&self, other: &SeqRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Identity of the underlying cell.
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for SeqRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seq = self.0.read();
        write!(
            f,
            "{:?}<{}>[{} items]@{:#x}",
            seq.shape,
            seq.element,
            seq.items.len(),
            self.id()
        )
    }
}

/// Hashable stand-in for a [`Value`] with the same equality.
///
/// `None` for NaN, which equals nothing.
#[derive(PartialEq, Eq, Hash)]
enum SetKey<'a> {
    Null,
    Undefined,
    Bool(bool),
    Char(char),
    Signed(u8, i64),
    Unsigned(u8, u64),
    F32(u32),
    F64(u64),
    String(&'a str),
    Bytes(&'a [u8]),
    DateTime(&'a NaiveDateTime),
    Enum(&'a EnumValue),
    Seq(usize),
    Map(usize),
    Object(usize),
}

impl<'a> SetKey<'a> {
    fn of(value: &'a Value) -> Option<Self> {
        Some(match value {
            Value::Null => Self::Null,
            Value::Undefined => Self::Undefined,
            Value::Bool(b) => Self::Bool(*b),
            Value::Char(c) => Self::Char(*c),
            Value::I8(n) => Self::Signed(8, i64::from(*n)),
            Value::I16(n) => Self::Signed(16, i64::from(*n)),
            Value::I32(n) => Self::Signed(32, i64::from(*n)),
            Value::I64(n) => Self::Signed(64, *n),
            Value::U8(n) => Self::Unsigned(8, u64::from(*n)),
            Value::U16(n) => Self::Unsigned(16, u64::from(*n)),
            Value::U32(n) => Self::Unsigned(32, u64::from(*n)),
            Value::U64(n) => Self::Unsigned(64, *n),
            Value::F32(f) if f.is_nan() => return None,
            // 0.0 and -0.0 compare equal.
            Value::F32(f) => Self::F32(if *f == 0.0 { 0 } else { f.to_bits() }),
            Value::F64(f) if f.is_nan() => return None,
            Value::F64(f) => Self::F64(if *f == 0.0 { 0 } else { f.to_bits() }),
            Value::String(s) => Self::String(s),
            Value::Bytes(b) => Self::Bytes(b),
            Value::DateTime(d) => Self::DateTime(d),
            Value::Enum(e) => Self::Enum(e),
            Value::Seq(seq) => Self::Seq(seq.id()),
            Value::Map(map) => Self::Map(map.id()),
            Value::Object(object) => Self::Object(object.id()),
        })
    }
}

/// Drop repeated items, keeping the first of each.
fn dedup(items: Vec<Value>) -> Vec<Value> {
    let keep: Vec<bool> = {
        let mut seen = HashSet::with_capacity(items.len());
        items
            .iter()
            .map(|item| SetKey::of(item).map_or(true, |key| seen.insert(key)))
            .collect()
    };
    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, keep)| keep.then_some(item))
        .collect()
}

/// Shared handle to a [`DynamicObject`].
#[derive(Clone)]
pub struct MapRef(Arc<RwLock<DynamicObject>>);

impl MapRef {
    pub fn new(object: DynamicObject) -> Self {
        Self(Arc::new(RwLock::new(object)))
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.read().get(key).cloned()
    }

    pub fn insert(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.write().insert(key, value)
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.write().remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.read().keys().map(str::to_string).collect()
    }

    /// Snapshot of the entries in insertion order.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .read()
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    /// Copy of the whole object.
    pub fn snapshot(&self) -> DynamicObject {
        self.0.read().clone()
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.0.read().is_case_sensitive()
    }

    pub fn ptr_eq(&self, other: &MapRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for MapRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let map = self.0.read();
        let keys: Vec<&str> = map.keys().collect();
        write!(f, "Map{:?}[{} entries]@{:#x}", keys, map.len(), self.id())
    }
}

/// Shared handle to a registered typed instance.
#[derive(Clone)]
pub struct ObjectRef(Arc<RwLock<Box<dyn Mappable>>>);

impl ObjectRef {
    pub fn new<T: Describe>(value: T) -> Self {
        Self::from_boxed(Box::new(value))
    }

    pub fn from_boxed(value: Box<dyn Mappable>) -> Self {
        Self(Arc::new(RwLock::new(value)))
    }

    /// Runtime class of the instance.
    pub fn class(&self) -> ClassType {
        self.0.read().class_type()
    }

    /// True if the instance is a `T`.
    pub fn is<T: 'static>(&self) -> bool {
        (**self.0.read()).as_any().is::<T>()
    }

    /// Borrow the instance as `T`.
    pub fn read<T: 'static, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let guard = self.0.read();
        (**guard).as_any().downcast_ref::<T>().map(f)
    }

    /// Mutably borrow the instance as `T`.
    pub fn write<T: 'static, R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut guard = self.0.write();
        (**guard).as_any_mut().downcast_mut::<T>().map(f)
    }

    /// Clone the instance out as `T`.
    pub fn get<T: Clone + 'static>(&self) -> Option<T> {
        self.read(|value: &T| value.clone())
    }

    /// Take the instance out. `None` if other handles exist or it is not a `T`.
    pub fn into_inner<T: 'static>(self) -> Option<T> {
        if !self.is::<T>() {
            return None;
        }
        let cell = Arc::try_unwrap(self.0).ok()?;
        cell.into_inner()
            .into_any()
            .downcast::<T>()
            .ok()
            .map(|value| *value)
    }

    pub(crate) fn with_any<R>(&self, f: impl FnOnce(&dyn Any) -> R) -> R {
        let guard = self.0.read();
        f((**guard).as_any())
    }

    pub(crate) fn with_any_mut<R>(&self, f: impl FnOnce(&mut dyn Any) -> R) -> R {
        let mut guard = self.0.write();
        f((**guard).as_any_mut())
    }

    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({}@{:#x})", self.class().name(), self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_drops_duplicates() {
        let set = SeqRef::set(
            ValueType::I32,
            vec![Value::I32(1), Value::I32(2), Value::I32(1)],
        );
        assert_eq!(set.len(), 2);
        assert_eq!(set.push(Value::I32(2)), Ok(false));
        assert_eq!(set.push(Value::I32(3)), Ok(true));
    }

    #[test]
    fn test_set_equality_follows_values() {
        let shared = MapRef::new(DynamicObject::default());
        let set = SeqRef::set(
            ValueType::Any,
            vec![
                Value::I32(1),
                Value::I64(1),
                Value::F64(0.0),
                Value::F64(-0.0),
                Value::F64(f64::NAN),
                Value::F64(f64::NAN),
                Value::from("a"),
                Value::from("a"),
                Value::Map(shared.clone()),
                Value::Map(shared.clone()),
                Value::Map(MapRef::new(DynamicObject::default())),
            ],
        );
        let items = set.items();
        assert_eq!(items.len(), 8);
        assert_eq!(items[0], Value::I32(1));
        assert_eq!(items[1], Value::I64(1));
        assert!(items[4].as_f64().is_some_and(f64::is_nan));
        assert!(items[6].as_map().is_some_and(|m| m.ptr_eq(&shared)));
    }

    #[test]
    fn test_large_set_keeps_first_seen_order() {
        let items: Vec<Value> = (0..50_000).map(|i| Value::I64(i % 1_000)).collect();
        let set = SeqRef::set(ValueType::I64, items);
        assert_eq!(set.len(), 1_000);
        assert_eq!(set.get(0), Some(Value::I64(0)));
        assert_eq!(set.get(999), Some(Value::I64(999)));
    }

    #[test]
    fn test_self_containing_list_debug() {
        let list = SeqRef::list(ValueType::Any, vec![Value::I32(1)]);
        list.push(Value::Seq(list.clone())).expect("list");
        let text = format!("{:?}", Value::Seq(list.clone()));
        assert!(text.contains("[2 items]"), "{}", text);

        let map = MapRef::new(DynamicObject::default());
        map.insert("Me", Value::Map(map.clone()));
        let text = format!("{:?}", map);
        assert!(text.contains("1 entries"), "{}", text);
        map.remove("Me");
        list.set_item(1, Value::Null).expect("in bounds");
    }

    #[test]
    fn test_array_is_fixed_length() {
        let array = SeqRef::array(ValueType::I32, vec![Value::I32(1)]);
        assert!(array.push(Value::I32(2)).is_err());
        array.set_item(0, Value::I32(7)).expect("in bounds");
        assert_eq!(array.get(0), Some(Value::I32(7)));
        assert!(array.set_item(3, Value::I32(0)).is_err());
    }

    #[test]
    fn test_abstract_shape_becomes_list() {
        let seq = SeqRef::new(SeqShape::Collection, ValueType::String, Vec::new());
        assert_eq!(seq.shape(), SeqShape::List);
        assert!(seq.is_empty());
    }

    #[test]
    fn test_map_handles_share_storage() {
        let map = MapRef::new(DynamicObject::new(false));
        let alias = map.clone();
        alias.insert("Key", Value::I32(1));
        assert_eq!(map.get("key"), Some(Value::I32(1)));
        assert!(map.ptr_eq(&alias));
        assert_eq!(map.id(), alias.id());
    }
}
