//! Display names for composed callables.

/// Join non-empty names with `;`, the way composed guards and actions are labelled.
pub(crate) fn combine_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(";")
}
