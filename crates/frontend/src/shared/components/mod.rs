pub mod confirm_dialog;
pub mod date_input;
pub mod filter_bar;
pub mod page_header;
pub mod pagination_controls;
pub mod record_form;
pub mod record_table;
