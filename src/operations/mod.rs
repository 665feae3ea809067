// Operations module - discovery, valuation and asteroid queries

pub mod catalog;
pub mod discovery;
pub mod valuation;

pub use catalog::*;
pub use discovery::*;
pub use valuation::*;
