pub mod generate;
pub mod table;

pub use table::{DataError, read_records};
