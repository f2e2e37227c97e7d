// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Class models: the ordered accessors of a type under a selection policy.

use super::accessor::{AccessorSpec, MemberAccessor};
use crate::error::{MapError, Result};
use crate::options::ReflectionOptions;
use crate::types::{
    ClassType, MemberDecl, MemberKind, Visibility, BACKING_FIELD_SUFFIX, GETTER_METHOD_PREFIX,
};
use indexmap::map::Entry;
use indexmap::IndexMap;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Ordered name→accessor mapping for one type.
///
/// The full-detail model is built once from the class descriptor; every other
/// model is a filtered clone sharing the same accessors.
pub struct ClassModel {
    class: ClassType,
    options: ReflectionOptions,
    members: IndexMap<String, Arc<MemberAccessor>>,
}

impl ClassModel {
    /// Reflect every member of `class` (full detail).
    pub fn reflect(class: &ClassType) -> Result<Self> {
        let anonymous = class.is_anonymous();
        let mut found: IndexMap<String, AccessorSpec> = IndexMap::new();

        for decl in class.members() {
            let Some(spec) = accessor_spec(class, decl, anonymous) else {
                continue;
            };
            match found.entry(spec.name.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(spec);
                }
                Entry::Occupied(mut slot) => {
                    // An override replaces the inherited accessor in place.
                    if spec.declared && !slot.get().declared {
                        log::trace!(
                            "[model] {}.{} overrides {}",
                            class.name(),
                            spec.name,
                            slot.get().declaring
                        );
                        slot.insert(spec);
                    }
                }
            }
        }

        if found.is_empty() {
            return Err(MapError::Configuration(format!(
                "class {} exposes no mappable members",
                class.name()
            )));
        }

        let members = found
            .into_values()
            .enumerate()
            .map(|(index, spec)| (spec.name.clone(), Arc::new(MemberAccessor::new(spec, index))))
            .collect();

        Ok(Self {
            class: class.clone(),
            options: ReflectionOptions::FULL_DETAIL,
            members,
        })
    }

    /// Derive a model restricted to `options`, sharing accessors.
    pub fn filtered(&self, options: ReflectionOptions) -> Result<Self> {
        let mut members: IndexMap<String, Arc<MemberAccessor>> =
            IndexMap::with_capacity(self.members.len());
        for accessor in self.members.values() {
            let keep = (options.include_private || !accessor.is_private())
                && (accessor.is_declared() || !options.declared_only)
                && ((options.include_fields && accessor.is_field())
                    || (options.include_properties && accessor.is_property()));
            if !keep {
                continue;
            }
            let key = fold(accessor.name(), options.case_sensitive).into_owned();
            if let Some(existing) = members.get(&key) {
                return Err(MapError::Configuration(format!(
                    "members '{}' and '{}' of {} collide when case is ignored",
                    existing.name(),
                    accessor.name(),
                    self.class.name()
                )));
            }
            members.insert(key, Arc::clone(accessor));
        }
        Ok(Self {
            class: self.class.clone(),
            options,
            members,
        })
    }

    pub fn class(&self) -> &ClassType {
        &self.class
    }

    pub fn options(&self) -> ReflectionOptions {
        self.options
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.options.case_sensitive
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Accessor by name under the model's case policy.
    pub fn get(&self, name: &str) -> Option<&Arc<MemberAccessor>> {
        self.members.get(fold(name, self.options.case_sensitive).as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Accessors in model order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<MemberAccessor>> {
        self.members.values()
    }

    pub fn names(&self) -> Vec<&str> {
        self.members.values().map(|a| a.name()).collect()
    }
}

impl fmt::Debug for ClassModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassModel")
            .field("class", &self.class.name())
            .field("options", &self.options)
            .field("members", &self.names())
            .finish()
    }
}

pub(crate) fn fold(name: &str, case_sensitive: bool) -> Cow<'_, str> {
    if case_sensitive {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(name.to_lowercase())
    }
}

/// Apply the reflection rules to one declaration.
fn accessor_spec(class: &ClassType, decl: &MemberDecl, anonymous: bool) -> Option<AccessorSpec> {
    let declared = decl.declaring_id == class.type_id();
    let private = decl.visibility == Visibility::Private;

    if anonymous {
        // Anonymous records expose generated getter methods only.
        let name = decl.name.strip_prefix(GETTER_METHOD_PREFIX)?;
        if decl.kind != MemberKind::Method || name.is_empty() {
            return None;
        }
        return Some(AccessorSpec {
            name: name.to_string(),
            kind: MemberKind::Property,
            value_type: decl.value_type.clone(),
            declaring: decl.declaring.clone(),
            declaring_id: decl.declaring_id,
            declared: true,
            private,
            getter: decl.getter.clone()?,
            setter: None,
        });
    }

    match decl.kind {
        MemberKind::Method => return None,
        MemberKind::Property if decl.index_arity > 0 => {
            log::trace!("[model] {}.{}: indexed property skipped", class.name(), decl.name);
            return None;
        }
        MemberKind::Field if decl.name.ends_with(BACKING_FIELD_SUFFIX) => return None,
        MemberKind::Field | MemberKind::Property => {}
    }
    // Write-only properties cannot be read back.
    let getter = decl.getter.clone()?;

    Some(AccessorSpec {
        name: decl.name.clone(),
        kind: decl.kind,
        value_type: decl.value_type.clone(),
        declaring: decl.declaring.clone(),
        declaring_id: decl.declaring_id,
        declared,
        private,
        getter,
        setter: decl.setter.clone(),
    })
}
