// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Class descriptors: the member metadata a type publishes for mapping.
//!
//! Rust has no runtime reflection, so each mappable type registers its
//! members explicitly through a [`ClassBuilder`]: name, kind, declared value
//! type, visibility, declaring class and a getter/setter function pair. The
//! model builder in [`crate::model`] applies the reflection rules (indexed
//! properties, backing fields, overrides, anonymous records) to these
//! declarations.
//!
//! # Example
//!
//! ```rust
//! use remap::types::{ClassBuilder, ClassType, Describe, ValueType};
//! use std::sync::OnceLock;
//!
//! #[derive(Default)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Describe for Point {
//!     fn describe() -> ClassType {
//!         static CLASS: OnceLock<ClassType> = OnceLock::new();
//!         CLASS
//!             .get_or_init(|| {
//!                 ClassBuilder::<Point>::new("Point")
//!                     .typed("X", |p| p.x, |p, v| p.x = v)
//!                     .typed("Y", |p| p.y, |p, v| p.y = v)
//!                     .constructible()
//!                     .build()
//!             })
//!             .clone()
//!     }
//! }
//!
//! assert_eq!(Point::describe().members().len(), 2);
//! assert_eq!(ValueType::class_of::<Point>(), ValueType::Class(Point::describe()));
//! ```

use crate::error::{MapError, Result};
use crate::types::ValueType;
use crate::value::{FromValue, ObjectRef, Value, ValueKind};
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

/// Name suffix marking synthesized backing storage of a property.
pub const BACKING_FIELD_SUFFIX: &str = "__backing";

/// Name prefix of generated accessor methods on anonymous records.
pub const GETTER_METHOD_PREFIX: &str = "get_";

/// Bound getter: reads a member from an instance of the declaring type.
pub type Getter = Arc<dyn Fn(&dyn Any) -> Result<Value> + Send + Sync>;

/// Bound setter: writes an already-coerced value into an instance.
pub type Setter = Arc<dyn Fn(&mut dyn Any, Value) -> Result<()> + Send + Sync>;

type Constructor = Arc<dyn Fn() -> ObjectRef + Send + Sync>;

/// Object-safe view of a registered instance.
///
/// Implemented for every [`Describe`] type; an [`ObjectRef`] stores instances
/// behind this trait.
pub trait Mappable: Any + Send + Sync {
    /// Runtime class of the instance.
    fn class_type(&self) -> ClassType;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// Types that publish a class descriptor.
///
/// Implementations usually keep the descriptor in a `OnceLock` static so that
/// repeated calls return the same `ClassType`. A member typed as the class
/// being described cannot use [`ValueType::class_of`] inside `describe`
/// (the static is still initializing); declare it as [`ValueType::Any`].
pub trait Describe: Sized + Send + Sync + 'static {
    fn describe() -> ClassType;
}

impl<T: Describe> Mappable for T {
    fn class_type(&self) -> ClassType {
        T::describe()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Member kinds a class can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Plain storage.
    Field,
    /// Accessor pair, possibly indexed.
    Property,
    /// Generated getter method (anonymous records only).
    Method,
}

/// Member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Private,
}

/// One declared member of a class.
#[derive(Clone)]
pub struct MemberDecl {
    pub(crate) name: String,
    pub(crate) kind: MemberKind,
    pub(crate) value_type: ValueType,
    pub(crate) visibility: Visibility,
    pub(crate) declaring: String,
    pub(crate) declaring_id: TypeId,
    pub(crate) index_arity: usize,
    pub(crate) getter: Option<Getter>,
    pub(crate) setter: Option<Setter>,
}

impl MemberDecl {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Name of the class that declares this member.
    pub fn declaring_class(&self) -> &str {
        &self.declaring
    }

    pub fn declaring_type_id(&self) -> TypeId {
        self.declaring_id
    }

    /// Number of index parameters (properties only).
    pub fn index_arity(&self) -> usize {
        self.index_arity
    }

    pub fn has_getter(&self) -> bool {
        self.getter.is_some()
    }

    pub fn has_setter(&self) -> bool {
        self.setter.is_some()
    }
}

impl fmt::Debug for MemberDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDecl")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("value_type", &self.value_type)
            .field("visibility", &self.visibility)
            .field("declaring", &self.declaring)
            .field("index_arity", &self.index_arity)
            .field("getter", &self.getter.is_some())
            .field("setter", &self.setter.is_some())
            .finish()
    }
}

/// Registered class metadata.
pub struct ClassDescriptor {
    name: String,
    type_id: TypeId,
    members: Vec<MemberDecl>,
    base: Option<ClassType>,
    anonymous: bool,
    constructor: Option<Constructor>,
}

/// Shared handle to a [`ClassDescriptor`]. Compared and hashed by Rust type.
#[derive(Clone)]
pub struct ClassType(Arc<ClassDescriptor>);

impl ClassType {
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn type_id(&self) -> TypeId {
        self.0.type_id
    }

    /// Member declarations in discovery order, inherited ones included.
    pub fn members(&self) -> &[MemberDecl] {
        &self.0.members
    }

    pub fn base(&self) -> Option<&ClassType> {
        self.0.base.as_ref()
    }

    /// Structurally-anonymous record types are never cached.
    pub fn is_anonymous(&self) -> bool {
        self.0.anonymous
    }

    pub fn is_constructible(&self) -> bool {
        self.0.constructor.is_some()
    }

    /// True if `self` is `other` or derives from it.
    pub fn is_subclass_of(&self, other: &ClassType) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class == other {
                return true;
            }
            current = class.base();
        }
        false
    }

    /// Create a default instance.
    pub fn instantiate(&self) -> Result<ObjectRef> {
        match &self.0.constructor {
            Some(ctor) => Ok(ctor()),
            None => Err(MapError::Configuration(format!(
                "class {} has no default constructor",
                self.name()
            ))),
        }
    }
}

impl PartialEq for ClassType {
    fn eq(&self, other: &Self) -> bool {
        self.0.type_id == other.0.type_id
    }
}

impl Eq for ClassType {}

impl Hash for ClassType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.type_id.hash(state);
    }
}

impl fmt::Debug for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassType")
            .field("name", &self.0.name)
            .field("members", &self.0.members.len())
            .field("anonymous", &self.0.anonymous)
            .finish()
    }
}

/// Fluent builder for class descriptors of `T`.
pub struct ClassBuilder<T> {
    name: String,
    members: Vec<MemberDecl>,
    base: Option<ClassType>,
    anonymous: bool,
    constructor: Option<Constructor>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Describe> ClassBuilder<T> {
    /// Create a builder for a named class.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            base: None,
            anonymous: false,
            constructor: None,
            _marker: PhantomData,
        }
    }

    /// Create a builder for a structurally-anonymous record type.
    ///
    /// Anonymous records expose their values through `get_<Name>` methods
    /// declared with [`ClassBuilder::method`].
    pub fn anonymous(name: impl Into<String>) -> Self {
        let mut builder = Self::new(name);
        builder.anonymous = true;
        builder
    }

    fn push(
        mut self,
        name: &str,
        kind: MemberKind,
        value_type: ValueType,
        visibility: Visibility,
        getter: Option<Getter>,
        setter: Option<Setter>,
    ) -> Self {
        self.members.push(MemberDecl {
            name: name.to_string(),
            kind,
            value_type,
            visibility,
            declaring: self.name.clone(),
            declaring_id: TypeId::of::<T>(),
            index_arity: 0,
            getter,
            setter,
        });
        self
    }

    /// Add a public property with a getter and setter.
    pub fn property<G, S>(self, name: &str, value_type: ValueType, get: G, set: S) -> Self
    where
        G: Fn(&T) -> Value + Send + Sync + 'static,
        S: Fn(&mut T, Value) -> Result<()> + Send + Sync + 'static,
    {
        let getter = bind_getter::<T, _>(get);
        let setter = bind_setter::<T, _>(set);
        self.push(
            name,
            MemberKind::Property,
            value_type,
            Visibility::Public,
            Some(getter),
            Some(setter),
        )
    }

    /// Add a public property without a setter.
    pub fn read_only_property<G>(self, name: &str, value_type: ValueType, get: G) -> Self
    where
        G: Fn(&T) -> Value + Send + Sync + 'static,
    {
        let getter = bind_getter::<T, _>(get);
        self.push(
            name,
            MemberKind::Property,
            value_type,
            Visibility::Public,
            Some(getter),
            None,
        )
    }

    /// Add a property whose getter is private.
    pub fn private_property<G, S>(self, name: &str, value_type: ValueType, get: G, set: S) -> Self
    where
        G: Fn(&T) -> Value + Send + Sync + 'static,
        S: Fn(&mut T, Value) -> Result<()> + Send + Sync + 'static,
    {
        let getter = bind_getter::<T, _>(get);
        let setter = bind_setter::<T, _>(set);
        self.push(
            name,
            MemberKind::Property,
            value_type,
            Visibility::Private,
            Some(getter),
            Some(setter),
        )
    }

    /// Add a write-only property. Reflection skips it.
    pub fn write_only_property<S>(self, name: &str, value_type: ValueType, set: S) -> Self
    where
        S: Fn(&mut T, Value) -> Result<()> + Send + Sync + 'static,
    {
        let setter = bind_setter::<T, _>(set);
        self.push(
            name,
            MemberKind::Property,
            value_type,
            Visibility::Public,
            None,
            Some(setter),
        )
    }

    /// Add an indexed property (`this[i]`-style). Reflection skips it.
    pub fn indexed_property(mut self, name: &str, value_type: ValueType, arity: usize) -> Self {
        self = self.push(
            name,
            MemberKind::Property,
            value_type,
            Visibility::Public,
            None,
            None,
        );
        if let Some(last) = self.members.last_mut() {
            last.index_arity = arity;
        }
        self
    }

    /// Add a public field.
    pub fn field<G, S>(self, name: &str, value_type: ValueType, get: G, set: S) -> Self
    where
        G: Fn(&T) -> Value + Send + Sync + 'static,
        S: Fn(&mut T, Value) -> Result<()> + Send + Sync + 'static,
    {
        let getter = bind_getter::<T, _>(get);
        let setter = bind_setter::<T, _>(set);
        self.push(
            name,
            MemberKind::Field,
            value_type,
            Visibility::Public,
            Some(getter),
            Some(setter),
        )
    }

    /// Add a private field.
    pub fn private_field<G, S>(self, name: &str, value_type: ValueType, get: G, set: S) -> Self
    where
        G: Fn(&T) -> Value + Send + Sync + 'static,
        S: Fn(&mut T, Value) -> Result<()> + Send + Sync + 'static,
    {
        let getter = bind_getter::<T, _>(get);
        let setter = bind_setter::<T, _>(set);
        self.push(
            name,
            MemberKind::Field,
            value_type,
            Visibility::Private,
            Some(getter),
            Some(setter),
        )
    }

    /// Add a generated getter method, e.g. `get_Name`.
    pub fn method<G>(self, name: &str, value_type: ValueType, get: G) -> Self
    where
        G: Fn(&T) -> Value + Send + Sync + 'static,
    {
        let getter = bind_getter::<T, _>(get);
        self.push(
            name,
            MemberKind::Method,
            value_type,
            Visibility::Public,
            Some(getter),
            None,
        )
    }

    /// Add a public property backed by a Rust value with a static value type.
    pub fn typed<V, G, S>(self, name: &str, get: G, set: S) -> Self
    where
        V: ValueKind + FromValue + Into<Value>,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.property(
            name,
            V::value_type(),
            move |target| get(target).into(),
            move |target, value| {
                set(target, V::from_value(value)?);
                Ok(())
            },
        )
    }

    /// Add a public field backed by a Rust value with a static value type.
    pub fn typed_field<V, G, S>(self, name: &str, get: G, set: S) -> Self
    where
        V: ValueKind + FromValue + Into<Value>,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.field(
            name,
            V::value_type(),
            move |target| get(target).into(),
            move |target, value| {
                set(target, V::from_value(value)?);
                Ok(())
            },
        )
    }

    /// Inherit every member of `B`, reached through an embedded base value.
    ///
    /// Inherited members keep their declaring class, so they are reported as
    /// non-declared in models of `T`.
    pub fn inherit<B: Describe>(
        mut self,
        project: fn(&T) -> &B,
        project_mut: fn(&mut T) -> &mut B,
    ) -> Self {
        let base = B::describe();
        for decl in base.members() {
            let getter = decl.getter.clone().map(|inner| -> Getter {
                Arc::new(move |target: &dyn Any| {
                    let derived = downcast_ref::<T>(target)?;
                    inner(project(derived))
                })
            });
            let setter = decl.setter.clone().map(|inner| -> Setter {
                Arc::new(move |target: &mut dyn Any, value: Value| {
                    let derived = downcast_mut::<T>(target)?;
                    inner(project_mut(derived), value)
                })
            });
            self.members.push(MemberDecl {
                getter,
                setter,
                ..decl.clone()
            });
        }
        self.base = Some(base);
        self
    }

    /// Build the descriptor.
    pub fn build(self) -> ClassType {
        ClassType(Arc::new(ClassDescriptor {
            name: self.name,
            type_id: TypeId::of::<T>(),
            members: self.members,
            base: self.base,
            anonymous: self.anonymous,
            constructor: self.constructor,
        }))
    }
}

impl<T: Describe + Default> ClassBuilder<T> {
    /// Allow the mapper to create new instances with `T::default()`.
    pub fn constructible(mut self) -> Self {
        self.constructor = Some(Arc::new(|| ObjectRef::new(T::default())));
        self
    }
}

fn downcast_ref<T: 'static>(target: &dyn Any) -> Result<&T> {
    target.downcast_ref::<T>().ok_or_else(|| {
        MapError::Configuration(format!(
            "accessor bound to {} used on another type",
            std::any::type_name::<T>()
        ))
    })
}

fn downcast_mut<T: 'static>(target: &mut dyn Any) -> Result<&mut T> {
    target.downcast_mut::<T>().ok_or_else(|| {
        MapError::Configuration(format!(
            "accessor bound to {} used on another type",
            std::any::type_name::<T>()
        ))
    })
}

fn bind_getter<T: 'static, G>(get: G) -> Getter
where
    G: Fn(&T) -> Value + Send + Sync + 'static,
{
    Arc::new(move |target: &dyn Any| Ok(get(downcast_ref::<T>(target)?)))
}

fn bind_setter<T: 'static, S>(set: S) -> Setter
where
    S: Fn(&mut T, Value) -> Result<()> + Send + Sync + 'static,
{
    Arc::new(move |target: &mut dyn Any, value: Value| set(downcast_mut::<T>(target)?, value))
}
