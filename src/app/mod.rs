pub mod commands;
pub mod console;
pub mod replies;
pub mod report;
