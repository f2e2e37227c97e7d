// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Recursion guard for graph walks.

use crate::error::{MapError, Result};
use std::collections::HashSet;

/// Identities of the containers on the current recursion path.
///
/// Entering a container already on the path is a cycle; a path longer than
/// the ceiling is rejected before the stack is at risk.
#[derive(Debug)]
pub(crate) struct Walk {
    path: HashSet<usize>,
    max_depth: usize,
}

impl Walk {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            path: HashSet::new(),
            max_depth,
        }
    }

    pub(crate) fn enter(&mut self, id: usize, label: impl FnOnce() -> String) -> Result<()> {
        if self.path.len() >= self.max_depth {
            return Err(MapError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        if !self.path.insert(id) {
            return Err(MapError::GraphCycle(label()));
        }
        Ok(())
    }

    pub(crate) fn leave(&mut self, id: usize) {
        self.path.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revisit_on_path_is_cycle() {
        let mut walk = Walk::new(8);
        walk.enter(1, || "a".into()).expect("first");
        walk.enter(2, || "b".into()).expect("second");
        assert_eq!(
            walk.enter(1, || "a".into()),
            Err(MapError::GraphCycle("a".into()))
        );
    }

    #[test]
    fn test_sibling_revisit_is_allowed() {
        let mut walk = Walk::new(8);
        walk.enter(1, String::new).expect("enter");
        walk.leave(1);
        walk.enter(1, String::new).expect("re-enter after leave");
    }

    #[test]
    fn test_depth_ceiling() {
        let mut walk = Walk::new(2);
        walk.enter(1, String::new).expect("1");
        walk.enter(2, String::new).expect("2");
        assert_eq!(
            walk.enter(3, String::new),
            Err(MapError::DepthExceeded { limit: 2 })
        );
    }
}
