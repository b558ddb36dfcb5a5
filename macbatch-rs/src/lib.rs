pub mod cli;
pub mod console;
pub mod dispatch;
pub mod error;
pub mod reader;
pub mod session;
pub mod table;
pub mod tokenize;
