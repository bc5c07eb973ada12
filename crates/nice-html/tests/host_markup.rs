//! Host markup tests for nice-html

use nice_dom::SourceKind;
use nice_html::{ParseError, parse_children, parse_host};

#[test]
fn test_host_attributes_in_order() {
    let host = parse_host(
        r#"<nice-select name="fruit" data-search placeholder="Pick"></nice-select>"#,
        "nice-select",
    )
    .unwrap();

    let names: Vec<&str> = host.attributes.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["name", "data-search", "placeholder"]);
    assert_eq!(host.attribute("data-search"), Some(""));
    assert_eq!(host.attribute("missing"), None);
}

#[test]
fn test_host_children() {
    let host = parse_host(
        r#"<nice-select>
            <option value="">Choose...</option>
            <optgroup label="Citrus">
                <option>Lemon</option>
                <option disabled>Lime</option>
            </optgroup>
        </nice-select>"#,
        "nice-select",
    )
    .unwrap();

    let options: Vec<_> = host.children.iter().filter_map(|n| n.as_option()).collect();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].value.as_deref(), Some(""));
    assert_eq!(options[0].value(), "");

    let group = host.children.iter().find_map(|n| n.as_optgroup()).unwrap();
    assert_eq!(group.label, "Citrus");
    let citrus: Vec<_> = group.children.iter().filter_map(|n| n.as_option()).collect();
    assert_eq!(citrus.len(), 2);
    assert!(citrus[1].disabled);

    assert!(host.children.iter().any(|n| matches!(n.kind, SourceKind::Text(_))));
}

#[test]
fn test_first_host_wins() {
    let host = parse_host(
        r#"<nice-select name="a"></nice-select><nice-select name="b"></nice-select>"#,
        "nice-select",
    )
    .unwrap();
    assert_eq!(host.attribute("name"), Some("a"));
}

#[test]
fn test_missing_host() {
    let err = parse_host("<select></select>", "nice-select").unwrap_err();
    assert_eq!(err, ParseError::HostNotFound { tag: "nice-select".to_string() });
    assert_eq!(err.to_string(), "No <nice-select> element in markup");
}

#[test]
fn test_children_of_empty_document() {
    assert!(parse_children("").is_empty());
}
