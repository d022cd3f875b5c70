use brainys_render::{render, render_html, View};
use brainys_sdk::ModuleType;
use std::io::Read;

/// Reads a generation payload from stdin and prints it as HTML.
///
/// `cargo run --example render -- hint 42 < payload.json`
fn main() {
    let mut args = std::env::args().skip(1);
    let module: ModuleType = args
        .next()
        .unwrap_or_else(|| "hint".to_string())
        .parse()
        .unwrap();
    let artifact_id = args.next();

    let mut json = String::new();
    std::io::stdin().read_to_string(&mut json).unwrap();

    let view = render(module, &json, artifact_id.as_deref());
    if let View::Document(document) = &view {
        eprintln!("{} sections", document.sections.len());
    }
    println!("{}", render_html(&view));
}
