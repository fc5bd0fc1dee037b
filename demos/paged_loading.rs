//! Walk a large file a few sections at a time.
//!
//! Run with: cargo run --example paged_loading

use annotini::{load, load_next};
use std::error::Error;
use std::fmt::Write as _;

fn main() -> Result<(), Box<dyn Error>> {
    let mut text = String::from("###--Device inventory--###\n");
    for i in 0..10 {
        writeln!(text, ";Device {}", i)?;
        writeln!(text, "[Device{}]", i)?;
        writeln!(text, "Serial=SN-{:04}", i * 37)?;
    }
    text.push_str("##--end--##");

    let dir = tempfile::tempdir()?;
    let file = dir.path().join("inventory.ini");
    std::fs::write(&file, text)?;

    let mut page = load(&file, 3);
    let mut number = 1;
    loop {
        let names: Vec<_> = page.sections().names().cloned().collect();
        println!("Page {}: {:?} (resume at {:?})", number, names, page.resume_cursor());

        if page.resume_cursor().is_none() {
            break;
        }
        page = load_next(&page, 3);
        number += 1;
    }
    println!("Footer after the last page: {:?}", page.footer().lines());

    Ok(())
}
