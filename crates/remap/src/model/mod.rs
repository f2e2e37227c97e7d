// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Member metadata: accessors, class models and the model cache.

mod accessor;
mod cache;
mod class_model;

pub use accessor::MemberAccessor;
pub use cache::{CacheStats, ModelCache};
pub use class_model::ClassModel;

pub(crate) use class_model::fold;
