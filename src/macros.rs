/// Builds a [`Document`](crate::Document) from section and property literals.
///
/// Section names and keys can be anything that is `AsRef<str>`; values can be
/// anything `Display`. Sections with a blank name and properties with a blank
/// key are skipped, and repeated section names are merged.
///
/// ```rust
/// use annotini::ini;
///
/// let doc = ini! {
///     "Person" => { "FirstName" => "Jon", "Age" => 30 },
///     "Empty" => {},
/// };
/// assert_eq!(doc.section("Person").property("Age", None).value(), "30");
/// assert_eq!(doc.section_count(), 2);
/// ```
#[macro_export]
macro_rules! ini {
    () => {
        $crate::Document::default()
    };

    ( $( $section:expr => { $( $key:expr => $value:expr ),* $(,)? } ),* $(,)? ) => {{
        let mut builder = $crate::Document::builder();
        $(
            if let Ok(mut section) = $crate::Section::builder()
                .with_name(::std::convert::AsRef::<str>::as_ref(&$section))
            {
                $(
                    if let Ok(property) = $crate::Property::new(
                        ::std::convert::AsRef::<str>::as_ref(&$key),
                        &::std::string::ToString::to_string(&$value),
                    ) {
                        section = section.append_property(property);
                    }
                )*
                builder = builder.append_section(section.build());
            }
        )*
        builder.build()
    }};
}

#[cfg(test)]
mod tests {
    use crate::Document;

    #[test]
    fn test_empty() {
        let doc: Document = ini!();
        assert!(doc.is_empty());
        assert_eq!(doc.section_count(), 0);
    }

    #[test]
    fn test_sections_and_values() {
        let doc = ini! {
            "Person" => { "FirstName" => "Jon", "Age" => 30, "Tall" => true },
            "Animal" => { "Kind" => "Cat" },
        };
        assert_eq!(
            doc.to_string(),
            "[Person]\nFirstName=Jon\nAge=30\nTall=true\n[Animal]\nKind=Cat"
        );
    }

    #[test]
    fn test_blank_names_are_skipped() {
        let doc = ini! {
            " " => { "k" => "v" },
            "a" => { "" => "v", "k" => "v" },
        };
        assert_eq!(doc.section_count(), 1);
        assert_eq!(doc.section("a").property_count(), 1);
    }

    #[test]
    fn test_runtime_names() {
        let name = String::from("Dynamic");
        let key = format!("key{}", 1);
        let doc = ini! { name => { key => 1.5 } };
        assert_eq!(doc.section("Dynamic").property("key1", None).value(), "1.5");
    }

    #[test]
    fn test_repeated_sections_merge() {
        let doc = ini! {
            "a" => { "x" => 1 },
            "a" => { "y" => 2 },
        };
        assert_eq!(doc.section_count(), 1);
        assert_eq!(doc.section("a").property_count(), 2);
    }
}
