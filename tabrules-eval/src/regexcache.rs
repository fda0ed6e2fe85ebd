//! Compiled-pattern cache for the `matches` rule shape.
//!
//! Keyed by pattern text, read-dominated (a ruleset's patterns rarely
//! change once it starts validating rows), so a `DashMap` gives lock-free
//! concurrent reads without a single coarse `RwLock` becoming a bottleneck
//! under the parallel row driver.

use dashmap::DashMap;
use once_cell::sync::Lazy;
use regex::Regex;

static CACHE: Lazy<DashMap<String, Regex>> = Lazy::new(DashMap::new);

/// Returns a compiled, start-anchored regex for `pattern`, compiling and
/// caching it on first use. `matches` is defined as a prefix match, so the
/// pattern is anchored with `^` unless it already starts with one.
pub fn anchored(pattern: &str) -> Result<Regex, regex::Error> {
    if let Some(re) = CACHE.get(pattern) {
        return Ok(re.clone());
    }
    let anchored_source = if pattern.starts_with('^') {
        pattern.to_string()
    } else {
        format!("^(?:{})", pattern)
    };
    let re = Regex::new(&anchored_source)?;
    CACHE.insert(pattern.to_string(), re.clone());
    Ok(re)
}
