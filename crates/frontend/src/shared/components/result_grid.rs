//! Result grid for query rows of arbitrary shape.
//!
//! When `column_defs` is unset the columns are derived from the rows: the
//! union of their keys, in the order they first appear.

use std::collections::HashSet;

use contracts::system::sql_console::Row;
use leptos::prelude::*;
use serde_json::Value;
use thaw::*;

use crate::shared::export::{export_rows_to_csv, CsvExportable};

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub field: String,
    pub display_name: String,
}

impl ColumnDef {
    pub fn new(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            display_name: field.clone(),
            field,
        }
    }
}

/// Bindable grid configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GridOptions {
    pub enable_grid_menu: bool,
    pub data: Option<Vec<Row>>,
    pub column_defs: Option<Vec<ColumnDef>>,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            enable_grid_menu: true,
            data: None,
            column_defs: None,
        }
    }
}

impl GridOptions {
    /// Explicit column defs if set, otherwise derived from the data
    pub fn effective_columns(&self) -> Vec<ColumnDef> {
        match (&self.column_defs, &self.data) {
            (Some(defs), _) => defs.clone(),
            (None, Some(rows)) => derive_column_defs(rows),
            (None, None) => Vec::new(),
        }
    }
}

pub fn derive_column_defs(rows: &[Row]) -> Vec<ColumnDef> {
    let mut seen = HashSet::new();
    let mut defs = Vec::new();
    for row in rows {
        for key in row.keys() {
            if seen.insert(key.as_str()) {
                defs.push(ColumnDef::new(key.as_str()));
            }
        }
    }
    defs
}

/// Display text of a cell; missing and null cells are blank
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

struct GridRow<'a> {
    row: &'a Row,
    columns: &'a [ColumnDef],
}

impl CsvExportable for GridRow<'_> {
    fn to_csv_row(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| cell_text(self.row.get(&c.field)))
            .collect()
    }
}

#[component]
pub fn ResultGrid(
    /// Grid options signal
    #[prop(into)]
    options: Signal<GridOptions>,
) -> impl IntoView {
    let hidden: RwSignal<HashSet<String>> = RwSignal::new(HashSet::new());
    let (menu_open, set_menu_open) = signal(false);
    let (export_error, set_export_error) = signal::<Option<String>>(None);

    let all_columns = Signal::derive(move || options.with(|o| o.effective_columns()));
    let visible_columns = Signal::derive(move || {
        let hidden = hidden.get();
        all_columns
            .get()
            .into_iter()
            .filter(|c| !hidden.contains(&c.field))
            .collect::<Vec<_>>()
    });

    let export_csv = move |_: leptos::ev::MouseEvent| {
        let columns = visible_columns.get_untracked();
        let result = options.with_untracked(|o| {
            let rows = o.data.as_deref().unwrap_or(&[]);
            let headers: Vec<String> = columns.iter().map(|c| c.display_name.clone()).collect();
            let grid_rows: Vec<GridRow> = rows
                .iter()
                .map(|row| GridRow {
                    row,
                    columns: &columns,
                })
                .collect();
            export_rows_to_csv(&headers, &grid_rows, "query_result.csv")
        });
        if let Err(e) = &result {
            log::warn!("CSV export failed: {}", e);
        }
        set_export_error.set(result.err());
    };

    view! {
        <div class="result-grid">
            <Show when=move || options.with(|o| o.enable_grid_menu)>
                <div class="result-grid__menu">
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| set_menu_open.update(|open| *open = !*open)
                    >
                        "☰"
                    </Button>
                    <Show when=move || menu_open.get()>
                        <div class="result-grid__menu-panel">
                            <Button
                                size=ButtonSize::Small
                                appearance=ButtonAppearance::Secondary
                                on_click=export_csv
                            >
                                "Export CSV"
                            </Button>
                            <For
                                each=move || all_columns.get()
                                key=|c| c.field.clone()
                                children=move |column| {
                                    let field = column.field.clone();
                                    let field_for_toggle = column.field.clone();
                                    view! {
                                        <label class="result-grid__column-toggle">
                                            <input
                                                type="checkbox"
                                                prop:checked=move || !hidden.get().contains(&field)
                                                on:change=move |ev| {
                                                    let visible = event_target_checked(&ev);
                                                    let field = field_for_toggle.clone();
                                                    hidden.update(|h| {
                                                        if visible {
                                                            h.remove(&field);
                                                        } else {
                                                            h.insert(field);
                                                        }
                                                    });
                                                }
                                            />
                                            {column.display_name}
                                        </label>
                                    }
                                }
                            />
                        </div>
                    </Show>
                </div>
            </Show>

            {move || export_error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <Show
                when=move || options.with(|o| o.data.is_some())
                fallback=|| view! { <div class="result-grid__empty"></div> }
            >
                <Table>
                    <TableHeader>
                        <TableRow>
                            {move || {
                                visible_columns
                                    .get()
                                    .into_iter()
                                    .map(|c| view! {
                                        <TableHeaderCell resizable=true min_width=80.0>
                                            {c.display_name}
                                        </TableHeaderCell>
                                    })
                                    .collect_view()
                            }}
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let columns = visible_columns.get();
                            options.with(|o| {
                                o.data
                                    .as_deref()
                                    .unwrap_or(&[])
                                    .iter()
                                    .map(|row| {
                                        let cells = columns
                                            .iter()
                                            .map(|c| {
                                                let text = cell_text(row.get(&c.field));
                                                view! {
                                                    <TableCell>
                                                        <TableCellLayout>{text}</TableCellLayout>
                                                    </TableCell>
                                                }
                                            })
                                            .collect_view();
                                        view! { <TableRow>{cells}</TableRow> }
                                    })
                                    .collect_view()
                            })
                        }}
                    </TableBody>
                </Table>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(value: Value) -> Vec<Row> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_derive_columns_in_first_appearance_order() {
        let data = rows(json!([
            { "id": 1, "name": "a" },
            { "id": 2, "total": 9.5 },
            { "note": null, "name": "b" }
        ]));
        let fields: Vec<String> = derive_column_defs(&data)
            .into_iter()
            .map(|c| c.field)
            .collect();
        assert_eq!(fields, vec!["id", "name", "total", "note"]);
    }

    #[test]
    fn test_effective_columns_prefers_explicit_defs() {
        let mut options = GridOptions {
            data: Some(rows(json!([{ "id": 1, "name": "a" }]))),
            ..GridOptions::default()
        };
        assert_eq!(options.effective_columns().len(), 2);

        options.column_defs = Some(vec![ColumnDef::new("name")]);
        assert_eq!(options.effective_columns(), vec![ColumnDef::new("name")]);

        assert!(GridOptions::default().effective_columns().is_empty());
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(None), "");
        assert_eq!(cell_text(Some(&Value::Null)), "");
        assert_eq!(cell_text(Some(&json!("plain"))), "plain");
        assert_eq!(cell_text(Some(&json!(42))), "42");
        assert_eq!(cell_text(Some(&json!(true))), "true");
        assert_eq!(cell_text(Some(&json!({ "k": [1] }))), "{\"k\":[1]}");
    }

    #[test]
    fn test_grid_row_follows_column_order() {
        let data = rows(json!([{ "id": 7, "name": "x" }]));
        let columns = vec![ColumnDef::new("name"), ColumnDef::new("missing"), ColumnDef::new("id")];
        let grid_row = GridRow {
            row: &data[0],
            columns: &columns,
        };
        assert_eq!(grid_row.to_csv_row(), vec!["x", "", "7"]);
    }
}
