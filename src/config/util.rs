//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// ```text
/// /home/user/strokes/svg/kana/   ← cwd
/// /home/user/strokes/svgnorm.toml  ← found
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_from(&cwd, config_name)
}

/// Walk up from `start` until `config_name` exists.
fn find_config_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_ancestor() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join("a/svgnorm.toml"), "").unwrap();

        assert_eq!(
            find_config_from(&nested, Path::new("svgnorm.toml")),
            Some(temp.path().join("a/svgnorm.toml"))
        );
    }

    #[test]
    fn test_find_config_absent() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            find_config_from(temp.path(), Path::new("definitely-not-here-4e9c.toml")),
            None
        );
    }
}
