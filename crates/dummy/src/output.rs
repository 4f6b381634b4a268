use std::io::{self, Write};
use std::path::Path;

/// Write rendered text verbatim to stdout
pub fn print_rendered(s: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(s.as_bytes())?;
    out.flush()
}

/// Write rendered text to `path`, or to stdout when there is none
pub fn write_rendered(path: Option<&Path>, s: &str) -> io::Result<()> {
    match path {
        Some(path) => std::fs::write(path, s),
        None => print_rendered(s),
    }
}
