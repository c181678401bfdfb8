pub mod data_grid;
pub mod field_settings;
pub mod search_panel;
