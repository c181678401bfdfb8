pub mod date_format;
pub mod entities;
pub mod values;
