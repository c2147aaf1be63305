//! Progress events emitted while converting a write-up. Rendering is up to the caller.

use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress<'a> {
    Reading(&'a Path),
    Parsing,
    /// Catalog search started; `location` is the first page's URL.
    Searching { game: &'a str, location: &'a str },
    /// About to request catalog page `n` (0-based).
    CheckingPage(u32),
    /// The catalog returned nothing but the pagination sentinel.
    NoProviderGames { provider: &'a str },
    Found(&'a str),
    NotFound,
    /// Search stopped at the configured page cap.
    PageLimit(u32),
    Writing(&'a Path),
}

/// Optional progress callback, as taken by the conversion and search options.
pub type ProgressFn<'a> = Option<&'a dyn Fn(&Progress<'_>)>;

pub(crate) fn emit(progress: ProgressFn<'_>, event: Progress<'_>) {
    if let Some(cb) = progress {
        cb(&event);
    }
}
