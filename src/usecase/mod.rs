pub mod field_visibility;
pub mod filter;
pub mod format;
pub mod grid;
pub mod pagination;
pub mod ports;
pub mod request;
pub mod resize;
pub mod services;
pub mod sort_engine;
