pub mod sql_console;
