//! REST client for the data source service
//!
//! All calls go through [`SqlConsoleApi`] so the view model can be driven by
//! an in-memory fake in tests.

use async_trait::async_trait;
use contracts::system::sql_console::{
    ColumnRef, DataSourceRef, QueryOutcome, QueryResultDto, TableRef,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use super::error::ApiError;

const DATA_SOURCES_PATH: &str = "/api/datasources";

#[async_trait(?Send)]
pub trait SqlConsoleApi {
    async fn list_data_sources(&self) -> Result<Vec<DataSourceRef>, ApiError>;

    async fn list_tables(&self, data_source: &str) -> Result<Vec<TableRef>, ApiError>;

    async fn list_columns(
        &self,
        data_source: &str,
        table: &str,
    ) -> Result<Vec<ColumnRef>, ApiError>;

    /// Runs raw SQL text against the named data source
    async fn execute_sql(&self, data_source: &str, sql: &str) -> Result<QueryOutcome, ApiError>;
}

/// [`SqlConsoleApi`] over `fetch`
#[derive(Debug, Clone)]
pub struct HttpSqlConsoleApi {
    base: String,
}

impl HttpSqlConsoleApi {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn data_sources_url(&self) -> String {
        format!("{}{}", self.base, DATA_SOURCES_PATH)
    }

    fn data_source_url(&self, data_source: &str) -> String {
        format!(
            "{}{}/{}",
            self.base,
            DATA_SOURCES_PATH,
            urlencoding::encode(data_source)
        )
    }

    pub fn tables_url(&self, data_source: &str) -> String {
        format!("{}/tables", self.data_source_url(data_source))
    }

    pub fn columns_url(&self, data_source: &str, table: &str) -> String {
        format!(
            "{}/tables/{}/columns",
            self.data_source_url(data_source),
            urlencoding::encode(table)
        )
    }

    pub fn select_url(&self, data_source: &str) -> String {
        format!("{}/select", self.data_source_url(data_source))
    }
}

#[async_trait(?Send)]
impl SqlConsoleApi for HttpSqlConsoleApi {
    async fn list_data_sources(&self) -> Result<Vec<DataSourceRef>, ApiError> {
        let response = Request::get(&self.data_sources_url())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        read_json(response).await
    }

    async fn list_tables(&self, data_source: &str) -> Result<Vec<TableRef>, ApiError> {
        let response = Request::get(&self.tables_url(data_source))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        read_json(response).await
    }

    async fn list_columns(
        &self,
        data_source: &str,
        table: &str,
    ) -> Result<Vec<ColumnRef>, ApiError> {
        let response = Request::get(&self.columns_url(data_source, table))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        read_json(response).await
    }

    async fn execute_sql(&self, data_source: &str, sql: &str) -> Result<QueryOutcome, ApiError> {
        let response = Request::post(&self.select_url(data_source))
            .header("Content-Type", "text/plain")
            .header("Accept", "application/json")
            .body(sql.to_string())
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let dto: QueryResultDto = read_json(response).await?;
        Ok(dto.into())
    }
}

/// Turns a response into `T`, or into an [`ApiError`] carrying status and body
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let status_text = response.status_text();
    let body = response.text().await.map_err(|e| e.to_string());
    decode_response(status, status_text, response.ok(), body)
}

fn decode_response<T: DeserializeOwned>(
    status: u16,
    status_text: String,
    ok: bool,
    body: Result<String, String>,
) -> Result<T, ApiError> {
    if !ok {
        // The status is known even when the body could not be read
        return Err(ApiError::Http {
            status,
            status_text,
            body: body.unwrap_or_default(),
        });
    }

    let body = body.map_err(ApiError::Transport)?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode {
        status,
        status_text,
        detail: e.to_string(),
    })
}
