mod schema_picker;
pub mod view_model;

use std::sync::Arc;

use leptos::prelude::*;
use thaw::*;

use crate::shared::components::result_grid::ResultGrid;
use crate::shared::components::ui::{Select, Textarea};
use crate::shared::config::ConsoleConfig;
use crate::system::sql_console::api::HttpSqlConsoleApi;
use schema_picker::SchemaPicker;
use view_model::SqlConsoleVm;

#[component]
pub fn SqlConsolePage() -> impl IntoView {
    let config = use_context::<ConsoleConfig>().unwrap_or_default();
    let vm = SqlConsoleVm::new(Arc::new(HttpSqlConsoleApi::new(config.api_base)));
    vm.init();

    let state = vm.state;

    let data_source_options = Signal::derive(move || {
        state.with(|s| {
            s.data_sources
                .iter()
                .map(|ds| (ds.name.clone(), ds.name.clone()))
                .collect::<Vec<_>>()
        })
    });
    let selected_data_source = Signal::derive(move || {
        state.with(|s| {
            s.selected_data_source
                .as_ref()
                .map(|ds| ds.name.clone())
                .unwrap_or_default()
        })
    });
    let sql_text = Signal::derive(move || state.with(|s| s.sql_text.clone()));
    let message = Signal::derive(move || state.with(|s| s.message.clone()));
    let grid_options = Signal::derive(move || state.with(|s| s.grid_options.clone()));

    let vm_source = vm.clone();
    let vm_sql = vm.clone();
    let vm_submit = vm.clone();

    view! {
        <div id="sql_console--system" class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"SQL console"</h1>
                </div>
            </div>

            <div class="page__content sql-console">
                <div class="sql-console__sidebar">
                    <Select
                        label="Data source"
                        value=selected_data_source
                        options=data_source_options
                        placeholder="No data sources"
                        disabled=Signal::derive(move || state.with(|s| s.data_sources.is_empty()))
                        on_change=Callback::new(move |name: String| vm_source.select_data_source(name))
                    />
                    <SchemaPicker vm=vm.clone() />
                </div>

                <div class="sql-console__main">
                    <Textarea
                        label="SQL"
                        value=sql_text
                        rows=8
                        placeholder="SELECT * FROM ..."
                        on_input=Callback::new(move |text: String| vm_sql.set_sql_text(text))
                    />
                    <div class="sql-console__actions">
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| vm_submit.submit_query()
                        >
                            "Submit"
                        </Button>
                        <span class="sql-console__message">{message}</span>
                    </div>
                    <ResultGrid options=grid_options />
                </div>
            </div>
        </div>
    }
}
