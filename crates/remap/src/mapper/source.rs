// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Key/value sources accepted by dictionary-to-object mapping.

use crate::value::{DynamicObject, MapRef, Value};

/// Anything that can be read as a sequence of key/value pairs.
pub trait KeyValues {
    fn key_values(&self) -> Vec<(String, Value)>;
}

impl KeyValues for DynamicObject {
    fn key_values(&self) -> Vec<(String, Value)> {
        self.iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

impl KeyValues for MapRef {
    fn key_values(&self) -> Vec<(String, Value)> {
        self.entries()
    }
}

impl KeyValues for [(String, Value)] {
    fn key_values(&self) -> Vec<(String, Value)> {
        self.to_vec()
    }
}

impl KeyValues for Vec<(String, Value)> {
    fn key_values(&self) -> Vec<(String, Value)> {
        self.clone()
    }
}

impl<const N: usize> KeyValues for [(&str, Value); N] {
    fn key_values(&self) -> Vec<(String, Value)> {
        self.iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }
}

impl<T: KeyValues + ?Sized> KeyValues for &T {
    fn key_values(&self) -> Vec<(String, Value)> {
        (**self).key_values()
    }
}
