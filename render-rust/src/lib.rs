//! Display side of Brainys generation output.
//!
//! [`render`] turns the pretty-printed JSON payload of a generation into a
//! [`View`]: labelled sections laid out per module type, plus the export
//! buttons allowed for that module. [`render_html`] turns a view into static
//! HTML.

mod html;
mod label;
pub mod layout;
mod renderer;
mod view;

pub use html::{render_html, render_html_with};
pub use label::format_label;
pub use renderer::{render, render_value, PLACEHOLDER_TEXT};
pub use view::{Choice, Document, ExportPanel, Grid, GridRow, Node, Row, Section, View};
