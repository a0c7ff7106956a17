//! Change detection

/// Decide whether the provider must be told about `current`
///
/// An empty `current` means the address could not be determined and never
/// triggers an update. An empty `last` means nothing was recorded yet, so any
/// real address is sent.
pub fn has_changed(current: &str, last: &str) -> bool {
    !current.is_empty() && (last.is_empty() || last != current)
}
