/// Runs a repository call from an event handler or effect. The desktop build
/// talks to a local SQLite file, so the call runs inline.
pub fn run_blocking<F, T>(f: F) -> T
where
    F: FnOnce() -> T,
{
    f()
}
