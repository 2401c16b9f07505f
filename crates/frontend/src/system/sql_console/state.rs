//! Console state and the transitions the page drives through it.
//!
//! Nothing here touches the network or the reactive runtime; the view model
//! performs the calls and commits their results with the `apply_*` /
//! `finish_*` methods.

use contracts::system::sql_console::{ColumnRef, DataSourceRef, QueryOutcome, TableRef};

use super::error::{ApiError, QueryExecutionFailure};
use crate::shared::components::result_grid::GridOptions;

pub const SUBMITTING_MESSAGE: &str = "submitting query ";
pub const NO_DATA_SOURCE_MESSAGE: &str = "no data source selected";

/// Sequence number of an issued request; only the latest one may commit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    fn next(self) -> Self {
        RequestToken(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// A submission that has been started and awaits the server
#[derive(Debug, Clone, PartialEq)]
pub struct PendingQuery {
    pub token: RequestToken,
    pub data_source: String,
    pub sql: String,
}

/// A table or column listing that has been started
#[derive(Debug, Clone, PartialEq)]
pub struct PendingListing {
    pub token: RequestToken,
    pub data_source: String,
    pub table: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleState {
    pub data_sources: Vec<DataSourceRef>,
    pub selected_data_source: Option<DataSourceRef>,
    pub tables: Vec<TableRef>,
    pub selected_table: Option<TableRef>,
    pub columns: Vec<ColumnRef>,
    /// Ordered by the order the user picked them
    pub selected_columns: Vec<ColumnRef>,
    pub sql_text: String,
    pub message: String,
    pub grid_options: GridOptions,
    query_token: RequestToken,
    tables_token: RequestToken,
    columns_token: RequestToken,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self {
            data_sources: Vec::new(),
            selected_data_source: None,
            tables: Vec::new(),
            selected_table: None,
            columns: Vec::new(),
            selected_columns: Vec::new(),
            sql_text: String::new(),
            message: String::new(),
            grid_options: GridOptions::default(),
            query_token: RequestToken::default(),
            tables_token: RequestToken::default(),
            columns_token: RequestToken::default(),
        }
    }
}

impl ConsoleState {
    /// Commits the initial data source listing.
    ///
    /// Selects the first entry when there is one. A failed listing leaves the
    /// list empty and reports the error in `message`.
    pub fn apply_data_sources(&mut self, result: Result<Vec<DataSourceRef>, ApiError>) {
        match result {
            Ok(list) => {
                self.selected_data_source = list.first().cloned();
                self.data_sources = list;
            }
            Err(e) => {
                self.data_sources.clear();
                self.selected_data_source = None;
                self.message = format!("failed to load data sources: {}", e);
            }
        }
        self.reset_table_selection();
    }

    /// Switches the selected data source by name. Returns true if it changed.
    pub fn select_data_source(&mut self, name: &str) -> bool {
        if self.selected_data_source.as_ref().map(|ds| ds.name.as_str()) == Some(name) {
            return false;
        }
        let Some(found) = self.data_sources.iter().find(|ds| ds.name == name).cloned() else {
            return false;
        };
        self.selected_data_source = Some(found);
        self.reset_table_selection();
        true
    }

    fn reset_table_selection(&mut self) {
        self.tables.clear();
        self.selected_table = None;
        self.columns.clear();
        self.selected_columns.clear();
        // Outstanding listings belong to the previous data source
        self.tables_token = self.tables_token.next();
        self.columns_token = self.columns_token.next();
    }

    pub fn begin_table_listing(&mut self) -> Option<PendingListing> {
        let data_source = self.selected_data_source.as_ref()?.name.clone();
        self.tables_token = self.tables_token.next();
        Some(PendingListing {
            token: self.tables_token,
            data_source,
            table: None,
        })
    }

    /// Returns false when the listing was superseded and dropped
    pub fn apply_tables(
        &mut self,
        token: RequestToken,
        result: Result<Vec<TableRef>, ApiError>,
    ) -> bool {
        if token != self.tables_token {
            return false;
        }
        match result {
            Ok(tables) => self.tables = tables,
            Err(e) => {
                self.tables.clear();
                self.message = format!("failed to load tables: {}", e);
            }
        }
        true
    }

    /// Switches the selected table by name. Returns true if it changed.
    pub fn select_table(&mut self, name: &str) -> bool {
        if self.selected_table.as_ref().map(|t| t.name.as_str()) == Some(name) {
            return false;
        }
        let Some(found) = self.tables.iter().find(|t| t.name == name).cloned() else {
            return false;
        };
        self.selected_table = Some(found);
        self.columns.clear();
        self.selected_columns.clear();
        self.columns_token = self.columns_token.next();
        true
    }

    pub fn begin_column_listing(&mut self) -> Option<PendingListing> {
        let data_source = self.selected_data_source.as_ref()?.name.clone();
        let table = self.selected_table.as_ref()?.name.clone();
        self.columns_token = self.columns_token.next();
        Some(PendingListing {
            token: self.columns_token,
            data_source,
            table: Some(table),
        })
    }

    pub fn apply_columns(
        &mut self,
        token: RequestToken,
        result: Result<Vec<ColumnRef>, ApiError>,
    ) -> bool {
        if token != self.columns_token {
            return false;
        }
        match result {
            Ok(columns) => self.columns = columns,
            Err(e) => {
                self.columns.clear();
                self.message = format!("failed to load columns: {}", e);
            }
        }
        true
    }

    /// Checking appends to the selection, unchecking removes from it
    pub fn toggle_column(&mut self, name: &str, checked: bool) {
        let already = self.selected_columns.iter().any(|c| c.name == name);
        if checked && !already {
            if let Some(column) = self.columns.iter().find(|c| c.name == name) {
                self.selected_columns.push(column.clone());
            }
        } else if !checked {
            self.selected_columns.retain(|c| c.name != name);
        }
    }

    pub fn add_table(&mut self) {
        if let Some(table) = &self.selected_table {
            self.sql_text.push(' ');
            self.sql_text.push_str(&table.name);
        }
    }

    pub fn add_columns(&mut self) {
        for column in &self.selected_columns {
            self.sql_text.push(' ');
            self.sql_text.push_str(&column.name);
        }
    }

    /// Clears the grid and issues a new request token.
    ///
    /// Returns `None` when no data source is selected; nothing is sent then.
    pub fn begin_submission(&mut self) -> Option<PendingQuery> {
        self.grid_options.column_defs = None;
        self.grid_options.data = None;
        self.query_token = self.query_token.next();

        let Some(data_source) = &self.selected_data_source else {
            self.message = NO_DATA_SOURCE_MESSAGE.to_string();
            return None;
        };

        self.message = SUBMITTING_MESSAGE.to_string();
        Some(PendingQuery {
            token: self.query_token,
            data_source: data_source.name.clone(),
            sql: self.sql_text.clone(),
        })
    }

    /// Commits a submission result if `token` is still the latest.
    ///
    /// Column definitions stay unset so the grid derives them from the rows.
    pub fn finish_submission(
        &mut self,
        token: RequestToken,
        result: Result<QueryOutcome, QueryExecutionFailure>,
    ) -> bool {
        if token != self.query_token {
            return false;
        }
        match result {
            Ok(outcome) => {
                self.message = outcome.status_message();
                self.grid_options.data = outcome.into_rows();
            }
            Err(failure) => {
                self.message = failure.to_string();
            }
        }
        true
    }
}
