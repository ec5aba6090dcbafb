pub mod action;
pub mod config;
pub mod data;
pub mod flow;
pub mod report;
pub mod resolution;
pub mod scenario;
pub mod surface;
pub mod tracker;

pub use magpie_common::descriptor;
pub use magpie_common::error;
pub use magpie_common::protocol;
pub use magpie_common::record;
