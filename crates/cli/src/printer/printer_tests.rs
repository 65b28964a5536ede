use super::*;

fn cfg(limit: usize, show_summary: bool) -> PrinterConfig {
    PrinterConfig {
        format: OutputFormat::Human,
        color: ColorChoice::Never,
        limit,
        show_summary,
    }
}

fn row<'a>(rank: usize, location: &'a str, name: &'a str, is_folder: bool) -> Row<'a> {
    Row {
        rank,
        location,
        name,
        is_folder,
        timestamp: None,
        group: None,
    }
}

fn as_text(buf: Vec<u8>) -> String {
    String::from_utf8(buf).expect("utf8 output")
}

#[test]
fn color_choice_parse_defaults_to_auto() {
    assert_eq!(ColorChoice::parse("always"), ColorChoice::Always);
    assert_eq!(ColorChoice::parse("never"), ColorChoice::Never);
    assert_eq!(ColorChoice::parse("sometimes"), ColorChoice::Auto);
}

#[test]
fn human_printer_marks_folders_and_reports_overflow() {
    let mut p = HumanPrinter::new(Vec::new(), Vec::new(), cfg(2, false));
    let ctx = PrintContext {
        kind: "browse",
        total: 3,
        ..PrintContext::default()
    };

    p.begin(&ctx).unwrap();
    p.print_row(&row(1, "/s/A", "A", true), &ctx).unwrap();
    p.print_row(&row(2, "/s/doc.pdf", "doc.pdf", false), &ctx).unwrap();
    p.print_row(&row(3, "/s/z.pdf", "z.pdf", false), &ctx).unwrap();
    p.finish(&ctx).unwrap();

    let (out, err) = p.into_inner();
    assert_eq!(as_text(out), "/s/A/\n/s/doc.pdf\n... and 1 more\n");
    assert!(err.is_empty());
}

#[test]
fn human_printer_groups_rows_under_headings() {
    let mut p = HumanPrinter::new(Vec::new(), Vec::new(), cfg(usize::MAX, false));
    let ctx = PrintContext {
        kind: "search",
        total: 3,
        ..PrintContext::default()
    };

    let rows = [
        ("/s/a", "/s/a/one.pdf", "one.pdf"),
        ("/s/a", "/s/a/two.pdf", "two.pdf"),
        ("/s/b", "/s/b/three.pdf", "three.pdf"),
    ];
    for (i, (group, location, name)) in rows.iter().enumerate() {
        let mut r = row(i + 1, location, name, false);
        r.group = Some(*group);
        p.print_row(&r, &ctx).unwrap();
    }

    let (out, _) = p.into_inner();
    assert_eq!(
        as_text(out),
        "/s/a:\n  one.pdf\n  two.pdf\n\n/s/b:\n  three.pdf\n"
    );
}

#[test]
fn human_summary_mentions_budget_and_cancellation() {
    let mut p = HumanPrinter::new(Vec::new(), Vec::new(), cfg(usize::MAX, true));
    let ctx = PrintContext {
        kind: "search",
        total: 0,
        visited_dirs: Some(200),
        truncated: true,
        ..PrintContext::default()
    };
    p.finish(&ctx).unwrap();
    let (_, err) = p.into_inner();
    let err = as_text(err);
    assert!(err.contains("[search] 0 results, 200 dirs"), "{err}");
    assert!(err.contains("directory budget reached"), "{err}");

    let mut p = HumanPrinter::new(Vec::new(), Vec::new(), cfg(usize::MAX, true));
    let ctx = PrintContext {
        kind: "search",
        cancelled: true,
        truncated: false,
        ..PrintContext::default()
    };
    p.finish(&ctx).unwrap();
    let (_, err) = p.into_inner();
    assert!(as_text(err).contains("cancelled, partial"));
}

#[test]
fn json_printer_emits_one_object_per_row_and_summary() {
    let mut p = JsonPrinter::new(
        Vec::new(),
        Vec::new(),
        PrinterConfig {
            format: OutputFormat::Json,
            ..cfg(usize::MAX, true)
        },
    );
    let ctx = PrintContext {
        kind: "search",
        query: Some("report"),
        total: 1,
        visited_dirs: Some(3),
        ..PrintContext::default()
    };

    p.begin(&ctx).unwrap();
    p.print_row(&row(1, "/r/sub/report.pdf", "report.pdf", false), &ctx)
        .unwrap();
    p.finish(&ctx).unwrap();

    let (out, err) = p.into_inner();
    let line: serde_json::Value =
        serde_json::from_str(as_text(out).trim()).expect("row is json");
    assert_eq!(line["name"], "report.pdf");
    assert_eq!(line["query"], "report");
    assert_eq!(line["rank"], 1);
    assert_eq!(line["is_folder"], false);

    let summary: serde_json::Value =
        serde_json::from_str(as_text(err).trim()).expect("summary is json");
    assert_eq!(summary["type"], "summary");
    assert_eq!(summary["visited_dirs"], 3);
    assert_eq!(summary["cancelled"], false);
}
