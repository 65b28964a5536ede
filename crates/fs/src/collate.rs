use std::cmp::Ordering;

use folio_runtime::DOCUMENT_EXTENSION;

/// Order display names the way a locale-aware collator does for plain
/// names: letters compare case-insensitively first, and on a tie the
/// lowercase spelling sorts before the uppercase one ("a" < "A" < "b").
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    primary.then_with(|| {
        // Reversed code-point order puts lowercase ahead of uppercase.
        b.cmp(a)
    })
}

/// Whether `name` carries the document extension, in any case.
pub fn is_document_name(name: &str) -> bool {
    let suffix_len = DOCUMENT_EXTENSION.len() + 1;
    if name.len() < suffix_len || !name.is_char_boundary(name.len() - suffix_len) {
        return false;
    }
    let suffix = &name[name.len() - suffix_len..];
    suffix.starts_with('.') && suffix[1..].eq_ignore_ascii_case(DOCUMENT_EXTENSION)
}

/// Case-insensitive substring test. `needle_lower` must already be
/// lowercased; an empty needle matches everything.
#[inline]
pub fn name_contains(name: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || name.to_lowercase().contains(needle_lower)
}

#[cfg(test)]
#[path = "collate_tests.rs"]
mod tests;
