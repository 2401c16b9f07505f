use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata key carrying a column's SQL type
pub const DATA_TYPE_KEY: &str = "data_type";

/// Backend connection the server can run SQL against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSourceRef {
    pub name: String,
    /// Server-supplied metadata, kept as-is
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRef {
    pub name: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRef {
    pub name: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl DataSourceRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: Map::new(),
        }
    }
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: Map::new(),
        }
    }
}

impl ColumnRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: Map::new(),
        }
    }

    /// SQL type reported by the server, if any
    pub fn data_type(&self) -> Option<&str> {
        self.metadata.get(DATA_TYPE_KEY).and_then(Value::as_str)
    }
}
