pub mod api_response;
pub mod config;
pub mod error;
pub mod form;
pub mod format;
pub mod list_view;
pub mod pagination;
