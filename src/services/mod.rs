//! 服务模块

pub mod autocomplete;

pub use autocomplete::{AutocompleteService, create_autocomplete_service};
