use brainys_sdk::{ExportFormat, ModuleType};
use serde::Serialize;

/// What the output panel shows for one payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum View {
    /// Nothing has been generated yet.
    Placeholder(String),
    /// The payload could not be read as a JSON object and is shown verbatim.
    Raw(String),
    Document(Document),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub module: ModuleType,
    pub sections: Vec<Section>,
    /// Present when the payload has an artifact id to export.
    pub export: Option<ExportPanel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Dotted path of the payload value this section shows.
    pub path: String,
    pub title: String,
    pub body: Node,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum Node {
    Text(String),
    /// Ordered list.
    List(Vec<Node>),
    /// Label/value table.
    Table(Vec<Row>),
    Grid(Grid),
    /// One block per object of an array of objects.
    Blocks(Vec<Node>),
    /// "Label: value" lines of an object inside a mixed array.
    Pairs(Vec<Row>),
    Choice(Choice),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub label: String,
    pub value: Node,
}

impl Row {
    pub fn new(label: impl Into<String>, value: Node) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A table with fixed column headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    pub headers: Vec<String>,
    pub rows: Vec<GridRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum GridRow {
    /// One cell per header.
    Cells(Vec<Node>),
    /// A single cell spanning every column.
    Span(Node),
}

/// A numbered multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub number: usize,
    pub question: Box<Node>,
    /// Option key (`a`, `b`, ...) and its text.
    pub options: Vec<Row>,
    /// Any other keys of the question object.
    pub details: Vec<Row>,
}

/// The export buttons offered for an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportPanel {
    pub artifact_id: String,
    pub module: ModuleType,
    pub formats: Vec<ExportFormat>,
}
