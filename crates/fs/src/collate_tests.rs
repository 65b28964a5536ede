use super::*;

#[test]
fn compare_names_orders_case_insensitively_with_lowercase_first() {
    let mut names = vec!["beta", "Alpha", "alpha", "B", "a", "A", "Zeta", "éclair"];
    names.sort_by(|a, b| compare_names(a, b));
    assert_eq!(
        names,
        vec!["a", "A", "alpha", "Alpha", "B", "beta", "Zeta", "éclair"]
    );
}

#[test]
fn compare_names_is_equal_only_for_identical_names() {
    assert_eq!(compare_names("Doc", "Doc"), Ordering::Equal);
    assert_ne!(compare_names("Doc", "doc"), Ordering::Equal);
}

#[test]
fn is_document_name_cases() {
    let cases = [
        ("doc.pdf", true),
        ("DOC.PDF", true),
        ("report.Pdf", true),
        (".pdf", true),
        ("pdf", false),
        ("doc.pdf.txt", false),
        ("docpdf", false),
        ("Image.png", false),
        ("", false),
        ("ação.pdf", true),
        ("€pdf", false),
    ];

    for (name, expected) in cases {
        assert_eq!(is_document_name(name), expected, "{name:?}");
    }
}

#[test]
fn name_contains_is_case_insensitive() {
    assert!(name_contains("Annual-REPORT.pdf", "report"));
    assert!(name_contains("anything.pdf", ""));
    assert!(!name_contains("readme.pdf", "report"));
}
