use super::*;

const ORIGIN: &str = "https://www.lidl-hellas.gr";

#[test]
fn parses_relative_path_entry() {
    let products = parse_catalog("/p/A123456 4.99", ORIGIN).unwrap();
    assert_eq!(
        products,
        vec![ProductSpec {
            identifier: "123456".to_string(),
            source_url: "https://www.lidl-hellas.gr/p/A123456".to_string(),
            alert_threshold_minor: 499,
        }]
    );
}

#[test]
fn keeps_absolute_urls_untouched() {
    let products = parse_catalog(
        "https://www.lidl-hellas.gr/p/giaourti-straggisto/p10012345 2.49",
        ORIGIN,
    )
    .unwrap();
    assert_eq!(
        products[0].source_url,
        "https://www.lidl-hellas.gr/p/giaourti-straggisto/p10012345"
    );
    assert_eq!(products[0].identifier, "10012345");
    assert_eq!(products[0].alert_threshold_minor, 249);
}

#[test]
fn skips_blank_and_comment_lines() {
    let text = "\n-- dairy\n/p/A1 1.00\n\n   # snacks\n/p/B2 2\n  \n";
    let products = parse_catalog(text, ORIGIN).unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].identifier, "1");
    assert_eq!(products[1].identifier, "2");
    assert_eq!(products[1].alert_threshold_minor, 200);
}

#[test]
fn preserves_line_order() {
    let text = "/p/A3 1\n/p/A1 1\n/p/A2 1";
    let codes: Vec<String> = parse_catalog(text, ORIGIN)
        .unwrap()
        .into_iter()
        .map(|p| p.identifier)
        .collect();
    assert_eq!(codes, ["3", "1", "2"]);
}

#[test]
fn threshold_is_truncated_to_cents() {
    let products = parse_catalog("/p/A1 1.239", ORIGIN).unwrap();
    assert_eq!(products[0].alert_threshold_minor, 123);
}

#[test]
fn zero_threshold_is_allowed() {
    let products = parse_catalog("/p/A1 0", ORIGIN).unwrap();
    assert_eq!(products[0].alert_threshold_minor, 0);
}

#[test]
fn query_string_is_ignored_for_identifier() {
    let products = parse_catalog("/p/yogurt/p555?utm=x 1", ORIGIN).unwrap();
    assert_eq!(products[0].identifier, "555");
}

#[test]
fn trailing_slash_is_tolerated() {
    let products = parse_catalog("/p/yogurt/p555/ 1", ORIGIN).unwrap();
    assert_eq!(products[0].identifier, "555");
}

#[test]
fn origin_trailing_slash_does_not_double_up() {
    let products = parse_catalog("p/A1 1", "https://shop.example/").unwrap();
    assert_eq!(products[0].source_url, "https://shop.example/p/A1");
}

#[test]
fn single_field_line_is_format_error() {
    let err = parse_catalog("/p/A1 1\n/p/A2", ORIGIN).unwrap_err();
    assert!(
        matches!(err, CatalogError::Format { line_number: 2, .. }),
        "expected Format on line 2, got: {err:?}"
    );
}

#[test]
fn three_field_line_is_format_error() {
    let err = parse_catalog("/p/A1 1 extra", ORIGIN).unwrap_err();
    assert!(matches!(err, CatalogError::Format { line_number: 1, .. }));
}

#[test]
fn non_numeric_threshold_is_format_error() {
    let err = parse_catalog("/p/A1 cheap", ORIGIN).unwrap_err();
    match err {
        CatalogError::Format { line, reason, .. } => {
            assert_eq!(line, "/p/A1 cheap");
            assert!(reason.contains("numeric"), "unexpected reason: {reason}");
        }
        other => panic!("expected Format, got: {other:?}"),
    }
}

#[test]
fn negative_threshold_is_format_error() {
    let err = parse_catalog("/p/A1 -2.00", ORIGIN).unwrap_err();
    assert!(matches!(err, CatalogError::Format { .. }));
}

#[test]
fn url_without_code_is_format_error() {
    let err = parse_catalog("/p/A 1", ORIGIN).unwrap_err();
    assert!(matches!(err, CatalogError::Format { .. }));
}

#[test]
fn malformed_line_yields_no_partial_result() {
    let result = parse_catalog("/p/A1 1\n/p/A2 1\nbroken", ORIGIN);
    assert!(result.is_err());
}

#[test]
fn only_comments_is_empty_error() {
    let err = parse_catalog("-- nothing here\n\n# still nothing", ORIGIN).unwrap_err();
    assert!(matches!(err, CatalogError::Empty));
}

#[test]
fn empty_text_is_empty_error() {
    assert!(matches!(
        parse_catalog("", ORIGIN).unwrap_err(),
        CatalogError::Empty
    ));
}

#[test]
fn load_catalog_reports_missing_file() {
    let err = load_catalog(Path::new("/nonexistent/lidlwatch/products.txt"), ORIGIN).unwrap_err();
    match err {
        CatalogError::Io { path, .. } => assert!(path.ends_with("products.txt")),
        other => panic!("expected Io, got: {other:?}"),
    }
}

#[test]
fn load_catalog_reads_file_from_disk() {
    let path = std::env::temp_dir().join(format!(
        "lidlwatch-catalog-test-{}.txt",
        std::process::id()
    ));
    std::fs::write(&path, "-- test\n/p/A123456 4.99\n").unwrap();
    let result = load_catalog(&path, ORIGIN);
    std::fs::remove_file(&path).ok();

    let products = result.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].identifier, "123456");
}
