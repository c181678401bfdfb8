pub mod query_service;
pub mod visibility_service;
