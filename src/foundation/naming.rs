/// Fold a property name into its lookup key.
///
/// `aspectRatio`, `aspect_ratio` and `ASPECT_RATIO` all fold to `aspectratio`. Hyphens are kept,
/// so `data-testid` can never collide with a recognized name.
pub(crate) fn fold_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Look up `name` in a table of canonical names by folded key.
pub(crate) fn lookup_folded<'a>(table: &'a [&'a str], name: &str) -> Option<&'a str> {
    let key = fold_name(name);
    table.iter().copied().find(|canon| fold_name(canon) == key)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/naming.rs"]
mod tests;
