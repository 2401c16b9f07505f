use leptos::prelude::*;
use thaw::*;

use super::view_model::SqlConsoleVm;
use crate::shared::components::ui::{Checkbox, Select};

/// Table list and column checklist of the selected data source.
///
/// Picks are appended to the SQL buffer with the two "add" buttons.
#[component]
pub fn SchemaPicker(vm: SqlConsoleVm) -> impl IntoView {
    let state = vm.state;

    let table_options = Signal::derive(move || {
        state.with(|s| {
            s.tables
                .iter()
                .map(|t| (t.name.clone(), t.name.clone()))
                .collect::<Vec<_>>()
        })
    });
    let selected_table = Signal::derive(move || {
        state.with(|s| s.selected_table.as_ref().map(|t| t.name.clone()).unwrap_or_default())
    });
    let columns = Signal::derive(move || state.with(|s| s.columns.clone()));

    let vm_select = vm.clone();
    let vm_table = vm.clone();
    let vm_columns = vm.clone();
    let vm_toggle = vm.clone();

    view! {
        <div class="schema-picker">
            <div class="schema-picker__row">
                <Select
                    label="Table"
                    value=selected_table
                    options=table_options
                    placeholder="Select a table"
                    disabled=Signal::derive(move || state.with(|s| s.tables.is_empty()))
                    on_change=Callback::new(move |name: String| vm_select.select_table(name))
                />
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || state.with(|s| s.selected_table.is_none()))
                    on_click=move |_| vm_table.add_table()
                >
                    "Add table"
                </Button>
            </div>

            <div class="schema-picker__columns">
                <For
                    each=move || columns.get()
                    key=|c| c.name.clone()
                    children=move |column| {
                        let name = column.name.clone();
                        let name_for_toggle = column.name.clone();
                        let hint = column.data_type().map(str::to_string);
                        let vm_toggle = vm_toggle.clone();
                        view! {
                            <Checkbox
                                label=column.name.clone()
                                checked=Signal::derive(move || {
                                    state.with(|s| s.selected_columns.iter().any(|c| c.name == name))
                                })
                                hint=hint
                                on_change=Callback::new(move |checked: bool| {
                                    vm_toggle.toggle_column(name_for_toggle.clone(), checked)
                                })
                            />
                        }
                    }
                />
            </div>

            <Button
                size=ButtonSize::Small
                appearance=ButtonAppearance::Secondary
                disabled=Signal::derive(move || state.with(|s| s.selected_columns.is_empty()))
                on_click=move |_| vm_columns.add_columns()
            >
                "Add columns"
            </Button>
        </div>
    }
}
