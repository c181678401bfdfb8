pub const WATCHLIST_PAGE_KEY: &str = "Watchlist";
