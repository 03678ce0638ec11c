pub mod record;
pub mod parser;
pub mod index;
pub mod verify;
pub mod aggregate;
pub mod engine;
pub mod source;
pub mod report;
pub mod logging;
