pub mod job_drafts;
pub mod jobs;
pub mod remote;
pub mod watchlist;
