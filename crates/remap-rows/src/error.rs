// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use remap::MapError;
use std::path::PathBuf;
use thiserror::Error;

/// Row source errors.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Mapping error: {0}")]
    Map(#[from] MapError),

    #[error("Invalid row source: {0}")]
    InvalidFormat(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Row source is closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, RowError>;
