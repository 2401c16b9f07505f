//! ViewModel for the SQL console page

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::system::sql_console::api::SqlConsoleApi;
use crate::system::sql_console::controller;
use crate::system::sql_console::state::ConsoleState;

#[derive(Clone)]
pub struct SqlConsoleVm {
    /// Everything the page renders
    pub state: RwSignal<ConsoleState>,
    api: Arc<dyn SqlConsoleApi + Send + Sync>,
}

impl SqlConsoleVm {
    pub fn new(api: Arc<dyn SqlConsoleApi + Send + Sync>) -> Self {
        Self {
            state: RwSignal::new(ConsoleState::default()),
            api,
        }
    }

    /// Fetch data sources once, when the page is mounted
    pub fn init(&self) {
        let api = self.api.clone();
        let state = self.state;
        spawn_local(async move {
            controller::load_data_sources(api.as_ref(), &state).await;
        });
    }

    pub fn select_data_source(&self, name: String) {
        let changed = self.state.try_update(|s| s.select_data_source(&name));
        if changed == Some(true) {
            let api = self.api.clone();
            let state = self.state;
            spawn_local(async move {
                controller::load_tables(api.as_ref(), &state).await;
            });
        }
    }

    pub fn select_table(&self, name: String) {
        let changed = self.state.try_update(|s| s.select_table(&name));
        if changed == Some(true) {
            let api = self.api.clone();
            let state = self.state;
            spawn_local(async move {
                controller::load_columns(api.as_ref(), &state).await;
            });
        }
    }

    pub fn toggle_column(&self, name: String, checked: bool) {
        self.state.update(|s| s.toggle_column(&name, checked));
    }

    pub fn set_sql_text(&self, text: String) {
        self.state.update(|s| s.sql_text = text);
    }

    pub fn add_table(&self) {
        self.state.update(|s| s.add_table());
    }

    pub fn add_columns(&self) {
        self.state.update(|s| s.add_columns());
    }

    /// Overlapping submissions are allowed; only the latest one commits
    pub fn submit_query(&self) {
        let api = self.api.clone();
        let state = self.state;
        spawn_local(async move {
            controller::submit_query(api.as_ref(), &state).await;
        });
    }
}
