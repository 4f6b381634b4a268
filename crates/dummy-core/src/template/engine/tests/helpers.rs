//! Shared test helpers for template engine tests

use crate::template::engine::Dummy;
use crate::template::loader::MemoryLoader;
use crate::template::record::Record;

/// Engine over an in-memory template set
pub(super) fn engine_with(templates: &[(&str, &str)]) -> Dummy {
    let loader = templates
        .iter()
        .fold(MemoryLoader::new(), |loader, (path, content)| {
            loader.with(path, *content)
        });
    Dummy::with_loader(loader)
}

/// The two-artist record list used across loop tests
pub(super) fn artists() -> Vec<Record> {
    vec![
        Record::new().with("name", "Freddie").with("age", 65),
        Record::new().with("name", "Brian").with("age", 66),
    ]
}
