// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Mapping options and process-wide defaults.
//!
//! [`MappingOptions`] is the entire configuration surface of the engine. It
//! is passed per call, or snapshotted from the process-wide defaults held in
//! an `ArcSwap` (atomic swap, lock-free reads).
//!
//! # Example
//!
//! ```rust
//! use remap::options::{self, MappingOptions};
//!
//! let strict = MappingOptions::default().with_case_sensitive(true);
//! assert_ne!(strict, MappingOptions::default());
//!
//! options::set_defaults(strict.clone());
//! assert_eq!(MappingOptions::inherited(), strict);
//! options::reset_defaults();
//! ```

#[cfg(feature = "profiles")]
mod profile;

#[cfg(feature = "profiles")]
pub use profile::{OptionsProfile, ProfileDocument, ProfileLoader, UndefinedSetting};

use crate::value::{Value, UNDEFINED};
use arc_swap::ArcSwap;
use std::sync::{Arc, OnceLock};

/// Default nesting ceiling for deep copies.
pub const DEFAULT_MAX_DEPTH: usize = 64;

static DEFAULTS: OnceLock<ArcSwap<MappingOptions>> = OnceLock::new();

/// Kind of dynamic object materialized for dictionary-shaped targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DynamicObjectType {
    /// Ordered object following the options' case policy.
    #[default]
    Expando,
    /// Ordered object with an explicit case policy.
    Dictionary { case_sensitive: bool },
}

/// Configuration bundle for mapping and property views.
///
/// Value semantics: two bundles are equal iff every field matches.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingOptions {
    /// Expose fields.
    pub include_fields: bool,
    /// Expose properties.
    pub include_properties: bool,
    /// Expose private members.
    pub include_private: bool,
    /// Expose only members declared by the type itself.
    pub declared_only: bool,
    /// Match keys case-sensitively.
    pub case_sensitive: bool,
    /// Coerce with the lenient parser instead of strict conversion.
    pub parse_values: bool,
    /// Raise on mismatched types instead of returning the undefined marker.
    pub fail_on_mismatched_types: bool,
    /// Allow adding and removing keys on property views.
    pub can_alter_properties: bool,
    /// Return `undefined_value` when reading a missing key.
    pub can_access_missing_properties: bool,
    /// Property views reject every write.
    pub is_read_only: bool,
    /// Property view writes to bound keys reach the source object.
    pub update_source: bool,
    /// Dynamic object materialized for dictionary-shaped targets.
    pub dynamic_object_type: DynamicObjectType,
    /// Value returned for missing keys.
    pub undefined_value: Value,
    /// Nesting ceiling for deep copies.
    pub max_depth: usize,
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self {
            include_fields: true,
            include_properties: true,
            include_private: false,
            declared_only: false,
            case_sensitive: false,
            parse_values: false,
            fail_on_mismatched_types: true,
            can_alter_properties: true,
            can_access_missing_properties: true,
            is_read_only: false,
            update_source: true,
            dynamic_object_type: DynamicObjectType::Expando,
            undefined_value: UNDEFINED,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl MappingOptions {
    /// Snapshot of the process-wide defaults.
    pub fn inherited() -> Self {
        (*defaults()).clone()
    }

    /// Reflection-relevant subset, used as the filtered-model cache key.
    pub fn reflection(&self) -> ReflectionOptions {
        ReflectionOptions {
            include_fields: self.include_fields,
            include_properties: self.include_properties,
            include_private: self.include_private,
            declared_only: self.declared_only,
            case_sensitive: self.case_sensitive,
        }
    }

    /// Case policy of dynamic objects created under these options.
    pub fn dynamic_case_sensitive(&self) -> bool {
        match self.dynamic_object_type {
            DynamicObjectType::Expando => self.case_sensitive,
            DynamicObjectType::Dictionary { case_sensitive } => case_sensitive,
        }
    }

    #[must_use]
    pub fn with_fields(mut self, include: bool) -> Self {
        self.include_fields = include;
        self
    }

    #[must_use]
    pub fn with_properties(mut self, include: bool) -> Self {
        self.include_properties = include;
        self
    }

    #[must_use]
    pub fn with_private(mut self, include: bool) -> Self {
        self.include_private = include;
        self
    }

    #[must_use]
    pub fn with_declared_only(mut self, declared_only: bool) -> Self {
        self.declared_only = declared_only;
        self
    }

    #[must_use]
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    #[must_use]
    pub fn with_parse_values(mut self, parse: bool) -> Self {
        self.parse_values = parse;
        self
    }

    #[must_use]
    pub fn with_fail_on_mismatch(mut self, fail: bool) -> Self {
        self.fail_on_mismatched_types = fail;
        self
    }

    #[must_use]
    pub fn with_alterable(mut self, can_alter: bool) -> Self {
        self.can_alter_properties = can_alter;
        self
    }

    #[must_use]
    pub fn with_missing_access(mut self, allowed: bool) -> Self {
        self.can_access_missing_properties = allowed;
        self
    }

    #[must_use]
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.is_read_only = read_only;
        self
    }

    #[must_use]
    pub fn with_update_source(mut self, update: bool) -> Self {
        self.update_source = update;
        self
    }

    #[must_use]
    pub fn with_dynamic_object_type(mut self, kind: DynamicObjectType) -> Self {
        self.dynamic_object_type = kind;
        self
    }

    #[must_use]
    pub fn with_undefined_value(mut self, value: Value) -> Self {
        self.undefined_value = value;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

/// Member-selection policy of a class model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReflectionOptions {
    pub include_fields: bool,
    pub include_properties: bool,
    pub include_private: bool,
    pub declared_only: bool,
    pub case_sensitive: bool,
}

impl ReflectionOptions {
    /// Every field and property, every visibility, case-sensitive.
    pub const FULL_DETAIL: ReflectionOptions = ReflectionOptions {
        include_fields: true,
        include_properties: true,
        include_private: true,
        declared_only: false,
        case_sensitive: true,
    };

    pub fn is_full_detail(&self) -> bool {
        *self == Self::FULL_DETAIL
    }
}

impl Default for ReflectionOptions {
    fn default() -> Self {
        MappingOptions::default().reflection()
    }
}

fn store() -> &'static ArcSwap<MappingOptions> {
    DEFAULTS.get_or_init(|| ArcSwap::from_pointee(MappingOptions::default()))
}

/// Current process-wide defaults (atomic load).
pub fn defaults() -> Arc<MappingOptions> {
    store().load_full()
}

/// Replace the process-wide defaults.
pub fn set_defaults(options: MappingOptions) {
    log::debug!("[options] process defaults replaced");
    store().store(Arc::new(options));
}

/// Restore the built-in defaults.
pub fn reset_defaults() {
    store().store(Arc::new(MappingOptions::default()));
}
