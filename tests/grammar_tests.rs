use annotini::line::{classify, Line};
use annotini::{from_str, to_string};

#[test]
fn test_headers_and_footers() {
    assert_eq!(classify("###--Top--###"), Line::Header("Top".into()));
    assert_eq!(classify("  ##--Bottom--##  "), Line::Footer("Bottom".into()));
    assert_eq!(classify("###--a=b--###"), Line::Header("a=b".into()));
    assert_eq!(classify("##--[x]--##"), Line::Footer("x".into()));
}

#[test]
fn test_comments() {
    assert_eq!(classify(";plain"), Line::Comment("plain".into()));
    assert_eq!(classify("# hash"), Line::Comment("hash".into()));
    assert_eq!(classify(";;twice"), Line::Comment("twice".into()));
}

#[test]
fn test_comment_exclusions() {
    assert_eq!(classify(";a=b"), Line::Unrecognized);
    assert_eq!(classify("#--note--#"), Line::Unrecognized);
    assert_eq!(classify(";looks like]"), Line::Unrecognized);
}

#[test]
fn test_sections() {
    assert_eq!(classify("[Person]"), Line::Section { name: "Person", enabled: true });
    assert_eq!(classify("#--[Robot]--#"), Line::Section { name: "Robot", enabled: false });
    assert_eq!(classify("[My Section]"), Line::Section { name: "My Section", enabled: true });
    assert_eq!(classify("[ ]"), Line::Unrecognized);
    assert_eq!(classify("[]"), Line::Unrecognized);
}

#[test]
fn test_half_disabled_wrapper_reads_as_enabled() {
    assert_eq!(classify("[Robot]--#"), Line::Section { name: "Robot", enabled: true });
    assert_eq!(classify("#--[Robot]"), Line::Section { name: "Robot", enabled: true });
}

#[test]
fn test_properties() {
    assert_eq!(
        classify("Name=Jon"),
        Line::Property { key: "Name", value: "Jon", enabled: true }
    );
    assert_eq!(
        classify("#--Age=30--#"),
        Line::Property { key: "Age", value: "30", enabled: false }
    );
    assert_eq!(
        classify("Empty="),
        Line::Property { key: "Empty", value: "", enabled: true }
    );
    assert_eq!(
        classify("Url=https://x.org/?a=b"),
        Line::Property { key: "Url", value: "https://x.org/?a=b", enabled: true }
    );
}

#[test]
fn test_property_key_rules() {
    assert_eq!(classify("=value"), Line::Unrecognized);
    assert_eq!(classify("two words=x"), Line::Unrecognized);
    assert_eq!(classify("[a=b"), Line::Unrecognized);
}

#[test]
fn test_blank_and_noise() {
    assert_eq!(classify(""), Line::Blank);
    assert_eq!(classify(" \t "), Line::Blank);
    assert!(classify("just words").is_ignored());
    assert!(classify("   ").is_ignored());
    assert!(!classify("[a]").is_ignored());
}

#[test]
fn test_comment_collects_until_next_element() {
    let doc = from_str(";one\n;two\n\n;one\n[a]\n;three\nk=v");
    assert_eq!(doc.section("a").comment().lines(), ["one", "two"]);
    assert_eq!(doc.section("a").property_at(0).comment().lines(), ["three"]);
}

#[test]
fn test_header_lines_anywhere_join_header() {
    let doc = from_str("[a]\n###--late--###\nk=v");
    assert_eq!(doc.header().lines(), ["late"]);
    assert_eq!(to_string(&doc), "###--late--###\n[a]\nk=v");
}

#[test]
fn test_trailing_comment_is_dropped() {
    let doc = from_str("[a]\nk=v\n;orphan");
    assert_eq!(to_string(&doc), "[a]\nk=v");
}
