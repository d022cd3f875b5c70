use crate::{
    label::format_label,
    layout::{claimed_keys, module_layout, Field, Layout, SectionSpec},
    view::{Choice, Document, ExportPanel, Grid, GridRow, Node, Row, Section, View},
};
use brainys_sdk::ModuleType;
use serde_json::{Map, Value};

pub const PLACEHOLDER_TEXT: &str =
    "Belum ada hasil. Silakan isi form di samping dan klik Generate.";

/// Render a generation payload for display.
///
/// Never fails: an empty payload gives the placeholder and anything that is
/// not a JSON object is shown verbatim. Unknown keys and unexpected value
/// shapes are rendered by shape instead of being rejected. The export panel
/// is included only when `artifact_id` is a non-empty id.
#[must_use]
pub fn render(module: ModuleType, json: &str, artifact_id: Option<&str>) -> View {
    if json.trim().is_empty() {
        return View::Placeholder(PLACEHOLDER_TEXT.to_string());
    }

    let root = match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(root)) => root,
        Ok(_) => {
            tracing::debug!(%module, "payload is not an object, showing it raw");
            return View::Raw(json.to_string());
        }
        Err(error) => {
            tracing::debug!(%module, %error, "payload is not JSON, showing it raw");
            return View::Raw(json.to_string());
        }
    };

    let sections = match module_layout(module) {
        Some(layout) => curated_sections(layout, &root),
        None => generic_sections(&root),
    };

    let export = artifact_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| ExportPanel {
            artifact_id: id.to_string(),
            module,
            formats: module.export_formats().to_vec(),
        });

    View::Document(Document {
        module,
        sections,
        export,
    })
}

fn curated_sections(layout: &[SectionSpec], root: &Map<String, Value>) -> Vec<Section> {
    layout
        .iter()
        .filter_map(|spec| {
            let value = lookup(root, spec.path)?;
            let claimed: Vec<&str> = claimed_keys(layout, spec.path).collect();
            let body = match spec.layout {
                Layout::Auto => render_unclaimed(value, &claimed),
                Layout::Fields(fields) => render_fields(value, fields, &claimed),
                Layout::Rows { numbered, columns } => render_rows(value, numbered, columns),
                Layout::Choices { question, options } => render_choices(value, question, options),
            }?;
            Some(Section {
                path: spec.path.to_string(),
                title: spec.title.to_string(),
                body,
            })
        })
        .collect()
}

/// Every top-level key except `id`, in document order.
fn generic_sections(root: &Map<String, Value>) -> Vec<Section> {
    root.iter()
        .filter(|(key, _)| key.as_str() != "id")
        .filter_map(|(key, value)| {
            Some(Section {
                path: key.clone(),
                title: format_label(key),
                body: render_value(value)?,
            })
        })
        .collect()
}

fn lookup<'a>(root: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut value = root.get(segments.next()?)?;
    for segment in segments {
        value = value.get(segment)?;
    }
    Some(value)
}

/// `null`, `""`, `[]` and `{}` are not worth showing. Zero and `false` are.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Render any value by its shape. Returns `None` for blank values.
pub fn render_value(value: &Value) -> Option<Node> {
    if is_blank(value) {
        return None;
    }
    match value {
        Value::Array(items) => Some(render_array(items)).filter(non_empty),
        Value::Object(map) => Some(Node::Table(object_rows(map, &[]))).filter(non_empty),
        scalar => scalar_text(scalar).map(Node::Text),
    }
}

fn render_array(items: &[Value]) -> Node {
    let objects = items.iter().filter(|item| item.is_object()).count();

    if objects == items.len() {
        return Node::Blocks(items.iter().filter_map(render_value).collect());
    }

    let nodes = items
        .iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(Node::Pairs(object_rows(map, &[]))).filter(non_empty),
            other => render_value(other),
        })
        .collect();
    Node::List(nodes)
}

fn object_rows(map: &Map<String, Value>, skip: &[&str]) -> Vec<Row> {
    map.iter()
        .filter(|(key, _)| !skip.contains(&key.as_str()))
        .filter_map(|(key, value)| Some(Row::new(format_label(key), render_value(value)?)))
        .collect()
}

fn non_empty(node: &Node) -> bool {
    match node {
        Node::Text(_) | Node::Grid(_) | Node::Choice(_) => true,
        Node::List(items) | Node::Blocks(items) => !items.is_empty(),
        Node::Table(rows) | Node::Pairs(rows) => !rows.is_empty(),
    }
}

fn render_unclaimed(value: &Value, claimed: &[&str]) -> Option<Node> {
    match value {
        Value::Object(map) if !claimed.is_empty() => {
            Some(Node::Table(object_rows(map, claimed))).filter(non_empty)
        }
        other => render_value(other),
    }
}

/// Explicit labels first, in their order, then any other keys in document
/// order with derived labels.
fn render_fields(value: &Value, fields: &[Field], claimed: &[&str]) -> Option<Node> {
    let Value::Object(map) = value else {
        return render_value(value);
    };

    let mut rows: Vec<Row> = fields
        .iter()
        .filter(|(key, _)| !claimed.contains(key))
        .filter_map(|(key, label)| Some(Row::new(*label, render_value(map.get(*key)?)?)))
        .collect();

    let known: Vec<&str> = fields
        .iter()
        .map(|(key, _)| *key)
        .chain(claimed.iter().copied())
        .collect();
    rows.extend(object_rows(map, &known));

    Some(Node::Table(rows)).filter(non_empty)
}

fn render_rows(value: &Value, numbered: bool, columns: &[Field]) -> Option<Node> {
    let Value::Array(items) = value else {
        return render_value(value);
    };

    let headers = numbered
        .then(|| "No.".to_string())
        .into_iter()
        .chain(columns.iter().map(|(_, label)| (*label).to_string()))
        .collect();

    let mut rows = Vec::new();
    for item in items.iter().filter(|item| !is_blank(item)) {
        let row = match item {
            Value::Object(map) => {
                let number = numbered.then(|| Node::text((rows.len() + 1).to_string()));
                let cells = number
                    .into_iter()
                    .chain(columns.iter().map(|(key, _)| {
                        map.get(*key)
                            .and_then(render_value)
                            .unwrap_or_else(|| Node::text(""))
                    }))
                    .collect();
                GridRow::Cells(cells)
            }
            other => match render_value(other) {
                Some(node) => GridRow::Span(node),
                None => continue,
            },
        };
        rows.push(row);
    }

    if rows.is_empty() {
        return None;
    }
    Some(Node::Grid(Grid { headers, rows }))
}

/// One numbered block per question object. Items that are not objects are
/// rendered by shape and do not take a number.
fn render_choices(value: &Value, question_key: &str, options_key: &str) -> Option<Node> {
    let Value::Array(items) = value else {
        return render_value(value);
    };

    let mut number = 0;
    let blocks: Vec<Node> = items
        .iter()
        .filter_map(|item| {
            let Value::Object(map) = item else {
                return render_value(item);
            };
            let question = map.get(question_key).and_then(render_value);
            let options = map.get(options_key).map(option_rows).unwrap_or_default();
            let details = object_rows(map, &[question_key, options_key]);
            if question.is_none() && options.is_empty() && details.is_empty() {
                return None;
            }
            number += 1;
            Some(Node::Choice(Choice {
                number,
                question: Box::new(question.unwrap_or_else(|| Node::text(""))),
                options,
                details,
            }))
        })
        .collect();

    Some(Node::Blocks(blocks)).filter(non_empty)
}

/// Options keyed by letter. Arrays are lettered in order.
fn option_rows(options: &Value) -> Vec<Row> {
    match options {
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, value)| Some(Row::new(key.as_str(), render_value(value)?)))
            .collect(),
        Value::Array(items) => (b'a'..=b'z')
            .map(char::from)
            .zip(items)
            .filter_map(|(letter, value)| Some(Row::new(letter.to_string(), render_value(value)?)))
            .collect(),
        other => render_value(other)
            .map(|node| vec![Row::new("", node)])
            .unwrap_or_default(),
    }
}
