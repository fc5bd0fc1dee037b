//! Update single values in place without loading the whole file.
//!
//! Run with: cargo run --example point_write

use annotini::{read_section, read_value, write_value, WriterOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let file = dir.path().join("people.ini");
    std::fs::write(
        &file,
        "###--People--###\n[Person]\nFirstName=Jon\nAge=30\n[Animal]\nKind=Cat\n##--end--##",
    )?;

    let replace = WriterOptions::new().with_update_existing(true);
    write_value(&file, "Person", "Age", "31", &replace)?;

    // Without update_existing the new line goes right after the old one.
    write_value(&file, "Animal", "Kind", "Dog", &WriterOptions::new())?;

    // Missing keys and sections are added; the footer stays last.
    write_value(&file, "Person", "LastName", "Doe", &replace)?;
    write_value(&file, "Insect", "Kind", "Fly", &replace)?;

    println!("{}", std::fs::read_to_string(&file)?);
    println!("Person.Age = {}", read_value(&file, "Person", "Age"));

    if let Some(animal) = read_section(&file, "Animal") {
        println!("Animal has {} properties", animal.property_count());
    }

    Ok(())
}
