//! Render the same document under different filters.
//!
//! Run with: cargo run --example custom_filters

use annotini::{from_str, Filters};

fn main() {
    let doc = from_str(
        "###--Build config--###\n\
         ;Compiler flags\n\
         [Build]\n\
         Opt=3\n\
         #--Lto=fat--#\n\
         #--[Experimental]--#\n\
         Sanitizer=address\n\
         [Test]\n\
         ;Run in parallel\n\
         Threads=8\n\
         ##--end--##",
    );

    let presets = [
        ("none", Filters::none()),
        ("trim comments", Filters::TRIM_COMMENT),
        ("trim header and footer", Filters::TRIM_HEADER_FOOTER),
        ("only what is active", Filters::TRIM_COMMENT_HEADER_FOOTER_DISABLED),
        (
            "active, spaced out",
            Filters::TRIM_COMMENT_HEADER_FOOTER_DISABLED_FORMATTED,
        ),
        (
            "custom",
            Filters::new().with_trim_disabled(true).with_formatted(true),
        ),
        ("composed", Filters::TRIM_COMMENT | Filters::FORMATTED),
    ];

    for (name, filters) in presets {
        println!("--- {} ---", name);
        println!("{}\n", doc.to_string_with_filters(&filters));
    }
}
