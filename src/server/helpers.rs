/// Convert an empty or whitespace-only string to `None`.
pub fn nonblank(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// `Some(list)` when the caller asked to replace a repeated field.
///
/// proto3 cannot tell an empty repeated field from an absent one, so updates
/// carry an explicit `replace_*` flag.
pub fn replacement(replace: bool, values: Vec<String>) -> Option<Vec<String>> {
    replace.then_some(values)
}

/// Views range from a create request; `0/0` means "use the default".
pub fn views_range(min: u64, max: u64) -> Option<[u64; 2]> {
    if min == 0 && max == 0 {
        None
    } else {
        Some([min, max])
    }
}
