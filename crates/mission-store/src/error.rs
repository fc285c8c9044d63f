// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no {kind} found for id {id:?}")]
    NotFound { kind: &'static str, id: String },
    #[error("id {id:?} matches more than one {kind}")]
    AmbiguousPrefix { kind: &'static str, id: String },
}
