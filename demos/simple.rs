//! Parse an annotated INI file, look things up, and render it back.
//!
//! Run with: cargo run --example simple

use annotini::{from_str, to_string, Status};

const SETTINGS: &str = "\
###--Zoo settings--###
;People working here
[Person]
;Given name
FirstName=Jon
LastName=Doe
#--Age=30--#
[Animal]
Kind=Cat
#--[Robot]--#
#--Model=3000--#
##--end of file--##";

fn main() {
    let doc = from_str(SETTINGS);

    println!("Header: {:?}", doc.header().lines());
    for section in doc.sections() {
        let state = if section.is_enabled() { "enabled" } else { "disabled" };
        println!("[{}] ({}, {} properties)", section.name(), state, section.property_count());
    }

    let person = doc.section("Person");
    println!("FirstName = {}", person.property("FirstName", None).value());
    println!(
        "Enabled keys in Person: {:?}",
        person.properties_by(Status::Enabled).map(|p| p.key()).collect::<Vec<_>>()
    );

    // Nothing is lost on the way back.
    assert_eq!(to_string(&doc), SETTINGS);
    println!("✓ Round-trip successful");
}
