#[inline(always)]
#[cold]
pub(crate) fn cold_path() {}

/// Joins displayable parts with `separator`.
pub(crate) fn join_display<T: std::fmt::Display>(
    parts: impl IntoIterator<Item = T>,
    separator: &str,
) -> String {
    let mut out = String::new();
    for (i, part) in parts.into_iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        out.push_str(&part.to_string());
    }
    out
}
