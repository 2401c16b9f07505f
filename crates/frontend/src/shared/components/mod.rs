pub mod result_grid;
pub mod ui;
