//! Parsing of request form values into search parameters
//!
//! These helpers never fail: malformed input falls back to a default.

use super::models::SearchOptions;
use crate::backends::BackendRegistry;
use crate::config::SearchSettings;
use std::collections::HashMap;

/// Bit size accepted by [`parse_as_uint_value`]
const UINT_VALUE_BITS: u32 = 54;

/// Parse a flag. `true`, `1` and `fosho` are truthy, anything else is false.
pub fn parse_as_bool(v: &str) -> bool {
    let v = v.to_lowercase();
    v == "true" || v == "1" || v == "fosho"
}

/// Parse a comma separated repository list.
///
/// `*` selects every registered repository. Unknown names are dropped.
pub fn parse_as_repo_list(v: &str, registry: &BackendRegistry) -> Vec<String> {
    let v = v.trim();
    if v == "*" {
        return registry.names().into_iter().map(str::to_string).collect();
    }

    v.split(',')
        .filter(|repo| registry.contains(repo))
        .map(str::to_string)
        .collect()
}

/// Parse an unsigned value bounded to `[min, max]`.
///
/// A bound of 0 disables that side. Unparseable input gives `default`.
pub fn parse_as_uint_value(sv: &str, min: u32, max: u32, default: u32) -> u32 {
    let iv = match sv.parse::<u64>() {
        Ok(iv) if iv < (1u64 << UINT_VALUE_BITS) => iv,
        _ => return default,
    };

    if max != 0 && iv > u64::from(max) {
        return max;
    }
    if min != 0 && iv < u64::from(min) {
        return min;
    }
    u32::try_from(iv).unwrap_or(u32::MAX)
}

/// Parse one side of a range; empty or invalid input is 0
fn parse_range_int(v: &str) -> usize {
    if v.is_empty() {
        return 0;
    }
    v.parse::<u64>().map(|v| v as usize).unwrap_or(0)
}

/// Parse an `offset:limit` range. Without a colon both are 0.
pub fn parse_range_value(rv: &str) -> (usize, usize) {
    match rv.split_once(':') {
        Some((b, e)) => (parse_range_int(b), parse_range_int(e)),
        None => (0, 0),
    }
}

/// Build search options from the form values of a search request
pub fn parse_search_options(
    form: &HashMap<String, String>,
    settings: &SearchSettings,
) -> SearchOptions {
    let value = |key: &str| form.get(key).map(String::as_str).unwrap_or("");

    let (offset, limit) = parse_range_value(value("rng"));

    SearchOptions {
        offset,
        limit,
        file_regexp: value("files").to_string(),
        exclude_file_regexp: value("excludeFiles").to_string(),
        ignore_case: parse_as_bool(value("i")),
        order_results: parse_as_bool(value("order")),
        lines_of_context: parse_as_uint_value(
            value("ctx"),
            0,
            settings.max_lines_of_context,
            settings.default_lines_of_context,
        ),
        search_in_titles: false,
    }
}
