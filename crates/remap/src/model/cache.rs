// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Model cache.
//!
//! Holds the full-detail model of each type plus its filtered views.
//!
//! - `DashMap`: sharded concurrent map, lock-free reads on distinct shards.
//! - Insert-if-absent under the entry lock: a type is reflected at most
//!   once even when many threads ask for it first at the same time.
//! - Filtered views are derived from the cached base model and cached by
//!   (type, reflection options).
//!
//! Build one cache and share it (`Arc<ModelCache>`) between mappers and
//! views.

use super::class_model::ClassModel;
use crate::error::Result;
use crate::options::{MappingOptions, ReflectionOptions};
use crate::types::ClassType;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::any::TypeId;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Cached full-detail models.
    pub models: usize,
    /// Cached filtered views.
    pub views: usize,
    /// Reflections performed since creation.
    pub reflections: u64,
}

/// Shared cache of class models.
pub struct ModelCache {
    models: DashMap<TypeId, Arc<ClassModel>>,
    views: DashMap<(TypeId, ReflectionOptions), Arc<ClassModel>>,
    reflections: AtomicU64,
}

impl ModelCache {
    pub fn new() -> Self {
        Self {
            models: DashMap::new(),
            views: DashMap::new(),
            reflections: AtomicU64::new(0),
        }
    }

    /// Model of `class` as seen under `options`.
    pub fn model(&self, class: &ClassType, options: &MappingOptions) -> Result<Arc<ClassModel>> {
        self.model_with(class, options.reflection())
    }

    /// Model of `class` under an explicit reflection policy.
    pub fn model_with(
        &self,
        class: &ClassType,
        reflection: ReflectionOptions,
    ) -> Result<Arc<ClassModel>> {
        let base = self.base_model(class)?;
        if reflection.is_full_detail() {
            return Ok(base);
        }
        if class.is_anonymous() {
            return Ok(Arc::new(base.filtered(reflection)?));
        }

        let key = (class.type_id(), reflection);
        if let Some(view) = self.views.get(&key) {
            return Ok(Arc::clone(view.value()));
        }
        match self.views.entry(key) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let view = Arc::new(base.filtered(reflection)?);
                log::trace!(
                    "[cache] view of {} with {} of {} members",
                    class.name(),
                    view.len(),
                    base.len()
                );
                entry.insert(Arc::clone(&view));
                Ok(view)
            }
        }
    }

    /// Full-detail model of `class`, reflected on first use.
    pub fn base_model(&self, class: &ClassType) -> Result<Arc<ClassModel>> {
        if class.is_anonymous() {
            self.reflections.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::new(ClassModel::reflect(class)?));
        }

        let type_id = class.type_id();
        if let Some(model) = self.models.get(&type_id) {
            return Ok(Arc::clone(model.value()));
        }
        match self.models.entry(type_id) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let model = Arc::new(ClassModel::reflect(class)?);
                self.reflections.fetch_add(1, Ordering::Relaxed);
                log::debug!(
                    "[cache] reflected {} ({} members)",
                    class.name(),
                    model.len()
                );
                entry.insert(Arc::clone(&model));
                Ok(model)
            }
        }
    }

    /// Evict the base model of `class` and all its views.
    pub fn forget(&self, class: &ClassType) -> bool {
        let type_id = class.type_id();
        let removed = self.models.remove(&type_id).is_some();
        self.views.retain(|(id, _), _| *id != type_id);
        if removed {
            log::debug!("[cache] forgot {}", class.name());
        }
        removed
    }

    /// Evict everything.
    pub fn clear(&self) {
        self.models.clear();
        self.views.clear();
    }

    /// True if the base model of `class` is cached.
    pub fn contains(&self, class: &ClassType) -> bool {
        self.models.contains_key(&class.type_id())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            models: self.models.len(),
            views: self.views.len(),
            reflections: self.reflections.load(Ordering::Relaxed),
        }
    }
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ModelCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelCache")
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassBuilder, Describe, ValueType};
    use crate::value::{FromValue, Value};
    use std::sync::OnceLock;

    #[derive(Default)]
    struct Sample {
        name: String,
        secret: i32,
    }

    impl Describe for Sample {
        fn describe() -> ClassType {
            static CLASS: OnceLock<ClassType> = OnceLock::new();
            CLASS
                .get_or_init(|| {
                    ClassBuilder::<Sample>::new("Sample")
                        .typed("Name", |s| s.name.clone(), |s, v| s.name = v)
                        .private_field(
                            "secret",
                            ValueType::I32,
                            |s| Value::I32(s.secret),
                            |s, v| {
                                s.secret = i32::from_value(v)?;
                                Ok(())
                            },
                        )
                        .constructible()
                        .build()
                })
                .clone()
        }
    }

    #[test]
    fn test_base_model_reflected_once() {
        let cache = ModelCache::new();
        let class = Sample::describe();
        let a = cache.base_model(&class).expect("model");
        let b = cache.base_model(&class).expect("model");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.stats().reflections, 1);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_views_cached_by_options() {
        let cache = ModelCache::new();
        let class = Sample::describe();
        let opts = MappingOptions::default();
        let a = cache.model(&class, &opts).expect("view");
        let b = cache
            .model(&class, &opts.clone().with_parse_values(true))
            .expect("view");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.names(), vec!["Name"]);

        let full = cache
            .model(&class, &opts.with_private(true).with_case_sensitive(true))
            .expect("full");
        assert_eq!(full.len(), 2);
        assert_eq!(cache.stats(), CacheStats { models: 1, views: 1, reflections: 1 });
    }

    #[test]
    fn test_forget_evicts_views() {
        let cache = ModelCache::new();
        let class = Sample::describe();
        cache.model(&class, &MappingOptions::default()).expect("view");
        assert!(cache.contains(&class));
        assert!(cache.forget(&class));
        assert!(!cache.contains(&class));
        assert_eq!(cache.stats().views, 0);
        assert!(!cache.forget(&class));

        cache.base_model(&class).expect("model");
        assert_eq!(cache.stats().reflections, 2);
    }
}
