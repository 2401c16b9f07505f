pub mod data_source;
pub mod query;

pub use data_source::*;
pub use query::*;
