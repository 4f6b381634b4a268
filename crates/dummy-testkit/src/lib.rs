//! Test utilities for dummy
//!
//! This crate provides shared testing utilities used across the dummy workspace.

pub mod fixtures;

pub use fixtures::{STANDARD_TEMPLATES, write_standard_templates, write_templates};

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the project root
///
/// This keeps test files in one gitignored location that is easy to clean up
/// by hand if a test run is interrupted.
///
/// # Panics
///
/// Panics if:
/// - Unable to determine current directory
/// - Unable to create `.tmp/` directory
/// - Unable to create temporary subdirectory
///
/// # Examples
///
/// ```rust
/// use dummy_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("page.tpl");
/// std::fs::write(&file_path, "Hello {name}!").unwrap();
/// // Cleanup happens automatically when temp is dropped
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    let workspace_root = std::env::current_dir().expect("Failed to get current directory");

    let tmp_base = workspace_root.join(".tmp");

    // Ensure .tmp/ exists
    std::fs::create_dir_all(&tmp_base).expect("Failed to create .tmp directory");

    TempDir::new_in(&tmp_base).expect("Failed to create temporary directory in .tmp/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_in_workspace_creates_in_tmp() {
        let temp = temp_dir_in_workspace();
        let path = temp.path();

        assert!(
            path.to_string_lossy().contains(".tmp"),
            "Path should contain .tmp, got: {}",
            path.display()
        );
        assert!(path.is_dir(), "Path should be a directory");
    }

    #[test]
    fn test_temp_dir_auto_cleanup() {
        let path = {
            let temp = temp_dir_in_workspace();
            temp.path().to_path_buf()
        };

        assert!(
            !path.exists(),
            "Directory should not exist after drop: {}",
            path.display()
        );
    }

    #[test]
    fn test_multiple_temp_dirs_unique() {
        let first = temp_dir_in_workspace();
        let second = temp_dir_in_workspace();
        assert_ne!(first.path(), second.path());
    }
}
