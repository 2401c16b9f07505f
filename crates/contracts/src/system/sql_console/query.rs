use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One result row, keyed by column name in server order
pub type Row = Map<String, Value>;

/// Wire response of the SQL execution endpoint.
///
/// `tuples` is present for statements that return rows and absent
/// (or null) for inserts/updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResultDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuples: Option<Vec<Row>>,
    pub row_count: i64,
}

/// Result of a statement, classified once at the wire boundary
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Selected { rows: Vec<Row>, row_count: i64 },
    Mutated { row_count: i64 },
}

impl From<QueryResultDto> for QueryOutcome {
    fn from(dto: QueryResultDto) -> Self {
        match dto.tuples {
            Some(rows) => QueryOutcome::Selected {
                rows,
                row_count: dto.row_count,
            },
            None => QueryOutcome::Mutated {
                row_count: dto.row_count,
            },
        }
    }
}

impl QueryOutcome {
    /// Status line shown after a successful execution
    pub fn status_message(&self) -> String {
        match self {
            QueryOutcome::Selected { row_count, .. } => format!("selected {} rows", row_count),
            QueryOutcome::Mutated { row_count } => format!("inserted/updated {} rows", row_count),
        }
    }

    /// Consumes the outcome, returning rows only for selects
    pub fn into_rows(self) -> Option<Vec<Row>> {
        match self {
            QueryOutcome::Selected { rows, .. } => Some(rows),
            QueryOutcome::Mutated { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> QueryOutcome {
        serde_json::from_value::<QueryResultDto>(value).unwrap().into()
    }

    #[test]
    fn test_select_result_keeps_rows_and_column_order() {
        let outcome = parse(json!({
            "tuples": [{ "zeta": 1, "alpha": "a" }],
            "rowCount": 1
        }));

        assert_eq!(outcome.status_message(), "selected 1 rows");
        let rows = outcome.into_rows().unwrap();
        let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_missing_or_null_tuples_is_mutation() {
        assert_eq!(
            parse(json!({ "rowCount": 3 })),
            QueryOutcome::Mutated { row_count: 3 }
        );
        assert_eq!(
            parse(json!({ "tuples": null, "rowCount": 0 })),
            QueryOutcome::Mutated { row_count: 0 }
        );
        assert_eq!(
            parse(json!({ "rowCount": 3 })).status_message(),
            "inserted/updated 3 rows"
        );
    }

    #[test]
    fn test_empty_tuples_is_still_a_select() {
        let outcome = parse(json!({ "tuples": [], "rowCount": 0 }));
        assert_eq!(outcome.status_message(), "selected 0 rows");
        assert_eq!(outcome.into_rows(), Some(Vec::new()));
    }
}
