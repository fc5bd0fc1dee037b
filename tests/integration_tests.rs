use annotini::{
    from_slice, from_str, to_string, to_string_with_filters, Comment, CommentKind, Document,
    Error, Filters, Property, Section, Status,
};
use pretty_assertions::assert_eq;

const PEOPLE: &str = "[Person]\nFirstName=Jon\nLastName=Doe\n[Animal]\nKind=Cat";

const ANNOTATED: &str = "\
###--Settings for the zoo--###
###--Do not edit by hand--###
;People working here
[Person]
;Given name
FirstName=Jon
LastName=Doe
#--Age=30--#
;Animals we keep
[Animal]
Kind=Cat
#--[Robot]--#
;Serial model
#--Model=3000--#
##--end of file--##";

fn section(name: &str, props: &[(&str, &str)]) -> Section {
    props
        .iter()
        .fold(Section::builder().with_name(name).unwrap(), |b, (k, v)| {
            b.append_property(Property::new(k, v).unwrap())
        })
        .build()
}

#[test]
fn test_two_section_round_trip() {
    let doc = from_str(PEOPLE);
    assert_eq!(doc.section_count(), 2);
    assert_eq!(to_string(&doc), PEOPLE);
}

#[test]
fn test_annotated_round_trip() {
    let doc = from_str(ANNOTATED);
    println!("Parsed: {:#?}", doc);
    assert_eq!(doc.to_string(), ANNOTATED);
}

#[test]
fn test_parse_tolerates_noise() {
    let noisy = "  [Person]  \r\n\r\nFirstName=Jon\n???\n\n  LastName=Doe\n[Animal]\nKind=Cat\n";
    assert_eq!(to_string(&from_str(noisy)), PEOPLE);
}

#[test]
fn test_annotated_structure() {
    let doc = from_str(ANNOTATED);

    assert_eq!(doc.header().lines(), ["Settings for the zoo", "Do not edit by hand"]);
    assert_eq!(doc.header().kind(), CommentKind::Header);
    assert_eq!(doc.footer().lines(), ["end of file"]);

    let person = doc.section("Person");
    assert_eq!(person.comment().lines(), ["People working here"]);
    assert_eq!(person.property("FirstName", None).comment().lines(), ["Given name"]);
    assert!(!person.property("Age", None).is_enabled());

    let robot = doc.section("Robot");
    assert!(!robot.is_enabled());
    assert_eq!(robot.property_at(0).comment().lines(), ["Serial model"]);
}

#[test]
fn test_status_filters() {
    let doc = from_str(ANNOTATED);

    let enabled: Vec<_> = doc.sections_by(Status::Enabled).map(Section::name).collect();
    assert_eq!(enabled, ["Person", "Animal"]);
    let disabled: Vec<_> = doc.sections_by(Status::Disabled).map(Section::name).collect();
    assert_eq!(disabled, ["Robot"]);

    let person = doc.section("Person");
    let keys: Vec<_> = person.properties_by(Status::Enabled).map(Property::key).collect();
    assert_eq!(keys, ["FirstName", "LastName"]);
    assert_eq!(person.properties_by(Status::All).count(), 3);
}

#[test]
fn test_filter_presets() {
    let doc = from_str(ANNOTATED);

    assert_eq!(
        to_string_with_filters(&doc, &Filters::TRIM_COMMENT_HEADER_FOOTER_DISABLED),
        "[Person]\nFirstName=Jon\nLastName=Doe\n[Animal]\nKind=Cat"
    );
    assert_eq!(
        to_string_with_filters(&doc, &Filters::TRIM_COMMENT_HEADER_FOOTER_DISABLED_FORMATTED),
        "[Person]\nFirstName=Jon\nLastName=Doe\n\n[Animal]\nKind=Cat"
    );
    assert_eq!(
        to_string_with_filters(&doc, &(Filters::TRIM_HEADER | Filters::TRIM_FOOTER | Filters::TRIM_COMMENT)),
        "[Person]\nFirstName=Jon\nLastName=Doe\n#--Age=30--#\n[Animal]\nKind=Cat\n#--[Robot]--#\n#--Model=3000--#"
    );
}

#[test]
fn test_disabled_section_cascades_to_properties() {
    let robot = section("Robot", &[("Model", "3000"), ("Color", "Red")])
        .to_builder()
        .enabled(false)
        .build();

    assert_eq!(robot.to_string(), "#--[Robot]--#\n#--Model=3000--#\n#--Color=Red--#");
    assert!(robot.properties().iter().all(Property::is_enabled));
    assert_eq!(robot.to_string_with_filters(&Filters::TRIM_DISABLED), "");
}

#[test]
fn test_remove_section_at_out_of_range() {
    let doc = from_str(PEOPLE);
    let same = doc
        .to_builder()
        .remove_section_at(999)
        .remove_section_at(usize::MAX)
        .build();
    assert_eq!(same.section_count(), 2);
    assert_eq!(same, doc);

    let trimmed = doc.to_builder().remove_section_at(0).build();
    assert_eq!(trimmed.section_at(0).name(), "Animal");
}

#[test]
fn test_builder_never_touches_source() {
    let doc = from_str(PEOPLE);
    let changed = doc
        .to_builder()
        .remove_section("Person")
        .append_property("Animal", Property::new("Name", "Tom").unwrap())
        .build();

    assert_eq!(doc.to_string(), PEOPLE);
    assert_eq!(changed.to_string(), "[Animal]\nKind=Cat\nName=Tom");
}

#[test]
fn test_append_section_merges_by_name() {
    let doc = Document::builder()
        .append_section(section("Person", &[("FirstName", "Jon")]))
        .append_section(section("Animal", &[("Kind", "Cat")]))
        .append_section(section("Person", &[("FirstName", "Jon"), ("LastName", "Doe")]))
        .build();

    assert_eq!(doc.section_count(), 2);
    assert_eq!(doc.to_string(), PEOPLE);
}

#[test]
fn test_duplicate_keys_with_different_values_are_kept() {
    let s = Section::builder()
        .with_name("Person")
        .unwrap()
        .append_property(Property::new("Age", "30").unwrap())
        .append_property(Property::new("Age", "30").unwrap())
        .append_property(Property::new("Age", "90").unwrap())
        .build();

    assert_eq!(s.property_count(), 2);
    assert_eq!(s.property("Age", None).value(), "30");
    assert_eq!(s.property("Age", Some("90")).value(), "90");
    assert!(s.contains_property("Age", Some("90")));
    assert!(!s.contains_property("Age", Some("10")));
}

#[test]
fn test_property_removal() {
    let doc = from_str(PEOPLE)
        .to_builder()
        .remove_property("Person", "FirstName", "Jon")
        .remove_property("Person", "LastName", "Smith")
        .remove_property_at("Animal", 5)
        .build();
    assert_eq!(doc.to_string(), "[Person]\nLastName=Doe\n[Animal]\nKind=Cat");
}

#[test]
fn test_missing_lookups_return_empty_values() {
    let doc = from_str(PEOPLE);

    assert!(doc.section("Insect").is_empty());
    assert!(doc.section_at(42).is_empty());
    assert!(!doc.contains_section("Insect"));

    let person = doc.section("Person");
    assert!(person.property("Age", None).is_empty());
    assert!(person.property_at(9).is_empty());
    assert_eq!(person.property_at(9).to_string(), "");
}

#[test]
fn test_validation_errors() {
    assert_eq!(Property::new("", "v").unwrap_err(), Error::InvalidKey);
    assert_eq!(Property::builder().with_key(" \t").unwrap_err(), Error::InvalidKey);
    assert_eq!(Section::builder().with_name("  ").unwrap_err(), Error::InvalidSectionName);
}

#[test]
fn test_comment_builder() {
    let comment = Comment::builder()
        .append_line(";first")
        .append_line("   ")
        .append_line("second")
        .append_line("#first")
        .build();
    assert_eq!(comment.lines(), ["first", "second"]);
    assert_eq!(comment.to_string(), ";first\n;second");

    let header = comment.to_builder().kind(CommentKind::Header).remove_line_at(0).build();
    assert_eq!(header.to_string(), "###--second--###");
}

#[test]
fn test_header_and_footer_replacement() {
    let doc = from_str(ANNOTATED)
        .to_builder()
        .with_header(None)
        .with_footer_lines(["bye"])
        .build();
    assert!(doc.header().is_empty());
    assert!(doc.to_string().ends_with("##--bye--##"));
    assert!(doc.to_string().starts_with(";People working here"));
}

#[test]
fn test_document_merge() {
    let people = from_str("###--a--###\n[Person]\nFirstName=Jon");
    let more = from_str("###--b--###\n[Person]\nLastName=Doe\n[Animal]\nKind=Cat");
    let merged = people.to_builder().merge(&more).build();

    assert_eq!(merged.header().lines(), ["a", "b"]);
    assert_eq!(merged.to_string(), format!("###--a--###\n###--b--###\n{}", PEOPLE));
}

#[test]
fn test_parse_per_builder() {
    let property = Property::builder().parse(";about\n#--Age=30--#\nOther=1").build();
    assert_eq!(property.key(), "Age");
    assert!(!property.is_enabled());
    assert_eq!(property.comment().lines(), ["about"]);

    let s = Section::builder().parse("[Person]\nFirstName=Jon\n[Animal]\nKind=Cat").build();
    assert_eq!(s.name(), "Person");
    assert_eq!(s.property_count(), 1);
}

#[test]
fn test_from_slice_rejects_invalid_utf8() {
    assert!(matches!(from_slice(b"[a]\n\xc3\x28=1"), Err(Error::Utf8(_))));
}

#[test]
fn test_json_snapshot() {
    let doc = from_str("[Person]\n;Given name\nFirstName=Jon");
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(
        json["sections"][0]["properties"][0]["comment"]["lines"][0],
        "Given name"
    );
    assert_eq!(json["sections"][0]["enabled"], true);
}
