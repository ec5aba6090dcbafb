pub mod descriptor;
pub mod error;
pub mod protocol;
pub mod record;
