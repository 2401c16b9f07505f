//! Async flows of the console: each one opens a request on the state,
//! awaits the API and commits the result back.
//!
//! Flows are generic over [`StateCell`] so they run against a reactive
//! signal in the browser and a plain `RefCell` in tests.

use leptos::prelude::*;
use log::{debug, info, warn};

use super::api::SqlConsoleApi;
use super::error::QueryExecutionFailure;
use super::state::ConsoleState;

/// Shared, mutable holder of the console state
pub trait StateCell {
    /// Returns `None` if the state is gone (e.g. the page was unmounted)
    fn update_state<R>(&self, f: impl FnOnce(&mut ConsoleState) -> R) -> Option<R>;
}

impl StateCell for RwSignal<ConsoleState> {
    fn update_state<R>(&self, f: impl FnOnce(&mut ConsoleState) -> R) -> Option<R> {
        self.try_update(f)
    }
}

#[cfg(test)]
impl StateCell for std::cell::RefCell<ConsoleState> {
    fn update_state<R>(&self, f: impl FnOnce(&mut ConsoleState) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// Initial load: data sources, then tables of the default selection
pub async fn load_data_sources<S: StateCell>(api: &dyn SqlConsoleApi, state: &S) {
    let result = api.list_data_sources().await;
    match &result {
        Ok(list) => info!("loaded {} data sources", list.len()),
        Err(e) => warn!("failed to load data sources: {}", e),
    }

    let has_selection = state.update_state(|s| {
        s.apply_data_sources(result);
        s.selected_data_source.is_some()
    });
    if has_selection == Some(true) {
        load_tables(api, state).await;
    }
}

pub async fn load_tables<S: StateCell>(api: &dyn SqlConsoleApi, state: &S) {
    let Some(pending) = state.update_state(|s| s.begin_table_listing()).flatten() else {
        return;
    };

    let result = api.list_tables(&pending.data_source).await;
    if let Err(e) = &result {
        warn!("failed to load tables of {}: {}", pending.data_source, e);
    }
    if state.update_state(|s| s.apply_tables(pending.token, result)) == Some(false) {
        debug!("dropped stale table listing of {}", pending.data_source);
    }
}

pub async fn load_columns<S: StateCell>(api: &dyn SqlConsoleApi, state: &S) {
    let Some(pending) = state.update_state(|s| s.begin_column_listing()).flatten() else {
        return;
    };
    let table = pending.table.clone().unwrap_or_default();

    let result = api.list_columns(&pending.data_source, &table).await;
    if let Err(e) = &result {
        warn!("failed to load columns of {}.{}: {}", pending.data_source, table, e);
    }
    if state.update_state(|s| s.apply_columns(pending.token, result)) == Some(false) {
        debug!("dropped stale column listing of {}.{}", pending.data_source, table);
    }
}

/// Runs the SQL buffer against the selected data source
pub async fn submit_query<S: StateCell>(api: &dyn SqlConsoleApi, state: &S) {
    let Some(pending) = state.update_state(|s| s.begin_submission()).flatten() else {
        warn!("query not submitted: no data source selected");
        return;
    };
    info!(
        "submitting query #{} to {}",
        pending.token.value(),
        pending.data_source
    );

    let result = api
        .execute_sql(&pending.data_source, &pending.sql)
        .await
        .map_err(QueryExecutionFailure::from);
    if let Err(failure) = &result {
        warn!("{}", failure);
    }

    if state.update_state(|s| s.finish_submission(pending.token, result)) == Some(false) {
        debug!("dropped stale response of query #{}", pending.token.value());
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use contracts::system::sql_console::{ColumnRef, DataSourceRef, QueryOutcome, TableRef};
    use serde_json::json;

    use super::*;
    use crate::system::sql_console::error::ApiError;
    use std::cell::RefCell;

    struct FakeApi {
        data_sources: Result<Vec<DataSourceRef>, ApiError>,
        tables: HashMap<String, Vec<TableRef>>,
        columns: HashMap<(String, String), Vec<ColumnRef>>,
        query_result: Result<QueryOutcome, ApiError>,
        executed: Mutex<Vec<(String, String)>>,
    }

    impl FakeApi {
        fn new(data_sources: &[&str]) -> Self {
            Self {
                data_sources: Ok(data_sources.iter().map(|n| DataSourceRef::new(*n)).collect()),
                tables: HashMap::new(),
                columns: HashMap::new(),
                query_result: Ok(QueryOutcome::Mutated { row_count: 0 }),
                executed: Mutex::new(Vec::new()),
            }
        }

        fn executed(&self) -> Vec<(String, String)> {
            self.executed.lock().unwrap().clone()
        }
    }

    #[async_trait(?Send)]
    impl SqlConsoleApi for FakeApi {
        async fn list_data_sources(&self) -> Result<Vec<DataSourceRef>, ApiError> {
            self.data_sources.clone()
        }

        async fn list_tables(&self, data_source: &str) -> Result<Vec<TableRef>, ApiError> {
            Ok(self.tables.get(data_source).cloned().unwrap_or_default())
        }

        async fn list_columns(
            &self,
            data_source: &str,
            table: &str,
        ) -> Result<Vec<ColumnRef>, ApiError> {
            Ok(self
                .columns
                .get(&(data_source.to_string(), table.to_string()))
                .cloned()
                .unwrap_or_default())
        }

        async fn execute_sql(
            &self,
            data_source: &str,
            sql: &str,
        ) -> Result<QueryOutcome, ApiError> {
            self.executed
                .lock()
                .unwrap()
                .push((data_source.to_string(), sql.to_string()));
            self.query_result.clone()
        }
    }

    #[tokio::test]
    async fn test_init_selects_first_and_loads_its_tables() {
        let mut api = FakeApi::new(&["main", "audit"]);
        api.tables
            .insert("main".to_string(), vec![TableRef::new("orders")]);
        let state = RefCell::new(ConsoleState::default());

        load_data_sources(&api, &state).await;

        let state = state.into_inner();
        assert_eq!(state.selected_data_source, Some(DataSourceRef::new("main")));
        assert_eq!(state.tables, vec![TableRef::new("orders")]);
    }

    #[tokio::test]
    async fn test_init_failure_leaves_nothing_selected() {
        let mut api = FakeApi::new(&[]);
        api.data_sources = Err(ApiError::Http {
            status: 503,
            status_text: "Service Unavailable".to_string(),
            body: "down".to_string(),
        });
        let state = RefCell::new(ConsoleState::default());

        load_data_sources(&api, &state).await;

        let state = state.into_inner();
        assert_eq!(state.selected_data_source, None);
        assert_eq!(
            state.message,
            "failed to load data sources: 503 Service Unavailable down"
        );
    }

    #[tokio::test]
    async fn test_submit_select_sends_buffer_to_selected_source() {
        let mut api = FakeApi::new(&["main"]);
        api.query_result = Ok(QueryOutcome::Selected {
            rows: vec![serde_json::from_value(json!({ "id": 1 })).unwrap()],
            row_count: 1,
        });
        let state = RefCell::new(ConsoleState::default());
        load_data_sources(&api, &state).await;
        state.borrow_mut().sql_text = "SELECT id FROM orders".to_string();

        submit_query(&api, &state).await;

        assert_eq!(
            api.executed(),
            vec![("main".to_string(), "SELECT id FROM orders".to_string())]
        );
        let state = state.into_inner();
        assert_eq!(state.message, "selected 1 rows");
        assert_eq!(state.grid_options.data.map(|rows| rows.len()), Some(1));
    }

    #[tokio::test]
    async fn test_submit_failure_reports_status() {
        let mut api = FakeApi::new(&["main"]);
        api.query_result = Err(ApiError::Http {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: "syntax error".to_string(),
        });
        let state = RefCell::new(ConsoleState::default());
        load_data_sources(&api, &state).await;

        submit_query(&api, &state).await;

        assert_eq!(
            state.borrow().message,
            "query failed: 500 Internal Server Error syntax error"
        );
    }

    #[tokio::test]
    async fn test_submit_without_data_source_sends_nothing() {
        let api = FakeApi::new(&[]);
        let state = RefCell::new(ConsoleState::default());
        load_data_sources(&api, &state).await;

        submit_query(&api, &state).await;

        assert!(api.executed().is_empty());
        assert_eq!(state.borrow().message, "no data source selected");
    }

    #[tokio::test]
    async fn test_load_columns_of_selected_table() {
        let mut api = FakeApi::new(&["main"]);
        api.tables
            .insert("main".to_string(), vec![TableRef::new("orders")]);
        api.columns.insert(
            ("main".to_string(), "orders".to_string()),
            vec![ColumnRef::new("id"), ColumnRef::new("total")],
        );
        let state = RefCell::new(ConsoleState::default());
        load_data_sources(&api, &state).await;
        state.borrow_mut().select_table("orders");

        load_columns(&api, &state).await;

        let mut state = state.into_inner();
        assert_eq!(state.columns.len(), 2);
        state.toggle_column("total", true);
        state.toggle_column("id", true);
        state.sql_text = "SELECT".to_string();
        state.add_columns();
        assert_eq!(state.sql_text, "SELECT total id");
    }
}
