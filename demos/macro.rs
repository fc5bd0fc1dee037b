//! Building documents with the ini! macro and the builders.
//!
//! Run with: cargo run --example macro

use annotini::{ini, Comment, CommentKind, Property};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let workers = 4;
    let doc = ini! {
        "Server" => {
            "Host" => "127.0.0.1",
            "Port" => 8080,
            "Workers" => workers,
        },
        "Logging" => {
            "Level" => "info",
        },
    };
    println!("From the macro:\n{}\n", doc);

    // Attach comments, a header and a switched-off option.
    let doc = doc
        .to_builder()
        .with_header_lines(["Generated by the deploy script"])
        .append_property(
            "Logging",
            Property::builder()
                .with_key("File")?
                .with_value("/var/log/app.log")
                .with_comment(Comment::from_lines(CommentKind::Plain, ["Uncomment to log to disk"]))
                .enabled(false)
                .build(),
        )
        .build();
    println!("After editing:\n{}", doc);

    Ok(())
}
