//! Handlers 模块
//!
//! HTTP 请求处理程序。

pub mod autocomplete_handler;

pub use autocomplete_handler::*;
