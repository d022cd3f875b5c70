//! Static HTML for a rendered [`View`], produced with Leptos SSR.

use crate::view::{Choice, Document, ExportPanel, Grid, GridRow, Node, Row, Section, View};
use brainys_sdk::ExportLoading;
use leptos::prelude::*;
use leptos::tachys::view::RenderHtml;

/// Render `view` to an HTML fragment with every export button enabled.
#[must_use]
pub fn render_html(view: &View) -> String {
    render_html_with(view, &ExportLoading::default())
}

/// Render `view` to an HTML fragment. Buttons of formats that are in
/// flight according to `loading` are disabled and read "Loading...".
#[must_use]
pub fn render_html_with(view: &View, loading: &ExportLoading) -> String {
    let output = view.clone();
    let loading = *loading;
    let fragment = view! { <OutputView output=output loading=loading /> };
    fragment.to_html()
}

#[component]
fn OutputView(output: View, loading: ExportLoading) -> impl IntoView {
    match output {
        View::Placeholder(text) => view! { <div class="output-placeholder">{text}</div> }.into_any(),
        View::Raw(raw) => view! { <pre class="output-raw">{raw}</pre> }.into_any(),
        View::Document(document) => {
            view! { <DocumentView document=document loading=loading /> }.into_any()
        }
    }
}

#[component]
fn DocumentView(document: Document, loading: ExportLoading) -> impl IntoView {
    view! {
        <article class="output" data-module=document.module.slug()>
            {document.sections.into_iter().map(|section| {
                view! { <SectionView section=section /> }
            }).collect::<Vec<_>>()}
            {document.export.map(|panel| view! { <ExportButtons panel=panel loading=loading /> })}
        </article>
    }
}

#[component]
fn SectionView(section: Section) -> impl IntoView {
    view! {
        <section class="output-section" data-path=section.path>
            <h3>{section.title}</h3>
            {node_view(section.body)}
        </section>
    }
}

/// Type-erased so that nodes can nest.
fn node_view(node: Node) -> AnyView {
    match node {
        Node::Text(text) => text.into_any(),
        Node::List(items) => view! {
            <ol>
                {items.into_iter().map(|item| view! { <li>{node_view(item)}</li> }).collect::<Vec<_>>()}
            </ol>
        }
        .into_any(),
        Node::Table(rows) => view! {
            <table class="fields">
                <tbody>
                    {rows.into_iter().map(|row| view! {
                        <tr>
                            <th scope="row">{row.label}</th>
                            <td>{node_view(row.value)}</td>
                        </tr>
                    }).collect::<Vec<_>>()}
                </tbody>
            </table>
        }
        .into_any(),
        Node::Grid(grid) => grid_view(grid),
        Node::Blocks(blocks) => view! {
            <div class="blocks">
                {blocks.into_iter().map(|block| view! {
                    <div class="block">{node_view(block)}</div>
                }).collect::<Vec<_>>()}
            </div>
        }
        .into_any(),
        Node::Pairs(rows) => view! {
            <div class="pairs">
                {rows.into_iter().map(pair_view).collect::<Vec<_>>()}
            </div>
        }
        .into_any(),
        Node::Choice(choice) => choice_view(choice),
    }
}

fn choice_view(choice: Choice) -> AnyView {
    view! {
        <div class="choice">
            <p>
                <strong>{format!("{}.", choice.number)}</strong>
                " "
                {node_view(*choice.question)}
            </p>
            <ul>
                {choice.options.into_iter().map(|option| view! {
                    <li>
                        {(!option.label.is_empty()).then(|| format!("{}. ", option.label))}
                        {node_view(option.value)}
                    </li>
                }).collect::<Vec<_>>()}
            </ul>
            {choice.details.into_iter().map(pair_view).collect::<Vec<_>>()}
        </div>
    }
    .into_any()
}

fn pair_view(row: Row) -> impl IntoView {
    view! {
        <p>
            <strong>{format!("{}: ", row.label)}</strong>
            {node_view(row.value)}
        </p>
    }
}

fn grid_view(grid: Grid) -> AnyView {
    let width = grid.headers.len().max(1).to_string();
    view! {
        <table class="grid">
            <thead>
                <tr>
                    {grid.headers.into_iter().map(|header| view! { <th>{header}</th> }).collect::<Vec<_>>()}
                </tr>
            </thead>
            <tbody>
                {grid.rows.into_iter().map(|row| match row {
                    GridRow::Cells(cells) => view! {
                        <tr>
                            {cells.into_iter().map(|cell| view! { <td>{node_view(cell)}</td> }).collect::<Vec<_>>()}
                        </tr>
                    }
                    .into_any(),
                    GridRow::Span(cell) => view! {
                        <tr>
                            <td colspan=width.clone()>{node_view(cell)}</td>
                        </tr>
                    }
                    .into_any(),
                }).collect::<Vec<_>>()}
            </tbody>
        </table>
    }
    .into_any()
}

#[component]
fn ExportButtons(panel: ExportPanel, loading: ExportLoading) -> impl IntoView {
    let artifact_id = panel.artifact_id;
    view! {
        <div class="export-buttons" data-module=panel.module.slug()>
            {panel.formats.into_iter().map(|format| {
                let busy = loading.get(format);
                let label = if busy { "Loading..." } else { format.label() };
                view! {
                    <button
                        class="export-button"
                        data-format=format.as_str()
                        data-artifact-id=artifact_id.clone()
                        disabled=busy
                    >
                        {label}
                    </button>
                }
            }).collect::<Vec<_>>()}
        </div>
    }
}
