pub mod column;
pub mod edit;
pub mod job;
pub mod page;
pub mod row;
pub mod search;
pub mod sort;
pub mod stock;
pub mod visibility;
