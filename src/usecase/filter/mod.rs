pub mod criteria_store;
pub mod predicate;
