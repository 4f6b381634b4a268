//! Template fixtures
//!
//! Writes template files to disk so engine and CLI tests can exercise the
//! filesystem loader against a known layout.

use std::path::Path;

/// The standard fixture set: a template dir with plain, nested and
/// repeated includes
///
/// | Template            | Resolves to       |
/// |---------------------|-------------------|
/// | `getTemplate.tpl`   | `dummyTest`       |
/// | `replaceVar.tpl`    | `Hello {name}!`   |
/// | `parent.tpl`        | `Hello Mother!`   |
/// | `parent2.tpl`       | `Hello Children!` |
/// | `parent3.tpl`       | `Hello Hello!`    |
/// | `inception.tpl`     | `Hello Mother!`   |
/// | `band.tpl`          | one loop, `artists` |
pub const STANDARD_TEMPLATES: &[(&str, &str)] = &[
    ("getTemplate.tpl", "dummyTest"),
    ("replaceVar.tpl", "Hello {name}!"),
    ("parent.tpl", "Hello {load child.tpl}!"),
    ("child.tpl", "Mother"),
    ("parent2.tpl", "{load child1.tpl} {load child2.tpl}!"),
    ("child1.tpl", "Hello"),
    ("child2.tpl", "Children"),
    ("parent3.tpl", "{load child1.tpl} {load child1.tpl}!"),
    ("inception.tpl", "{load inception/level1.tpl}"),
    ("inception/level1.tpl", "{load inception/level2.tpl}"),
    ("inception/level2.tpl", "Hello {load child.tpl}!"),
    (
        "band.tpl",
        "{title}\n{loop artists}- {:name} ({:age})\n{/loop}",
    ),
];

/// Write `templates` below `dir`, creating subdirectories as needed
///
/// Content is written byte for byte; no trailing newline is added.
///
/// # Panics
///
/// Panics if a directory or file cannot be written.
pub fn write_templates(dir: &Path, templates: &[(&str, &str)]) {
    for (name, content) in templates {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("Failed to create {}: {}", parent.display(), e));
        }
        std::fs::write(&path, content)
            .unwrap_or_else(|e| panic!("Failed to write {}: {}", path.display(), e));
    }
}

/// Write [`STANDARD_TEMPLATES`] below `dir`
pub fn write_standard_templates(dir: &Path) {
    write_templates(dir, STANDARD_TEMPLATES);
}
