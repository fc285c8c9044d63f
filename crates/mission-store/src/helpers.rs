// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lookup-by-id-or-unique-prefix, so a caller can address a record by its
//! short displayed form without carrying the full id around.

use crate::error::StoreError;
use std::collections::HashMap;

pub(crate) fn find_by_prefix<'a, V>(map: &'a HashMap<String, V>, id: &str, kind: &'static str) -> Result<&'a V, StoreError> {
    if let Some(value) = map.get(id) {
        return Ok(value);
    }
    let mut matches = map.iter().filter(|(key, _)| key.as_str().ends_with(id));
    let Some((_, first)) = matches.next() else {
        return Err(StoreError::NotFound { kind, id: id.to_string() });
    };
    if matches.next().is_some() {
        return Err(StoreError::AmbiguousPrefix { kind, id: id.to_string() });
    }
    Ok(first)
}

#[cfg(test)]
#[path = "helpers_tests.rs"]
mod tests;
