//! Locating inputs inside a React Native style project tree.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name searched for when no source icon is given.
pub const DEFAULT_ICON_NAME: &str = "app_icon.png";

/// Directories never worth descending into.
const SKIPPED_DIRS: [&str; 3] = ["node_modules", ".git", "target"];

/// Searches `root` recursively for a file named `file_name`, ignoring case.
///
/// Entries are visited in name order so the result is stable.
pub fn find_file(root: &Path, file_name: &str) -> io::Result<Option<PathBuf>> {
    let mut entries: Vec<_> = fs::read_dir(root)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            if SKIPPED_DIRS.iter().any(|skip| name == *skip) {
                continue;
            }
            if let Some(found) = find_file(&path, file_name)? {
                return Ok(Some(found));
            }
        } else if name.to_string_lossy().eq_ignore_ascii_case(file_name) {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

/// Name of the Xcode project under `<root>/ios`, taken from its `.xcodeproj`.
pub fn find_ios_project(root: &Path) -> Option<String> {
    let mut names: Vec<String> = fs::read_dir(root.join("ios"))
        .ok()?
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
        .iter()
        .find_map(|name| name.strip_suffix(".xcodeproj"))
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_icon_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("assets/images");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("App_Icon.PNG"), b"").unwrap();

        let found = find_file(dir.path(), DEFAULT_ICON_NAME).unwrap();
        assert_eq!(found, Some(nested.join("App_Icon.PNG")));
    }

    #[test]
    fn skips_dependency_folders() {
        let dir = tempfile::tempdir().unwrap();
        let modules = dir.path().join("node_modules/pkg");
        fs::create_dir_all(&modules).unwrap();
        fs::write(modules.join(DEFAULT_ICON_NAME), b"").unwrap();

        assert_eq!(find_file(dir.path(), DEFAULT_ICON_NAME).unwrap(), None);
    }

    #[test]
    fn finds_xcode_project_name() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(find_ios_project(dir.path()), None);

        let ios = dir.path().join("ios");
        fs::create_dir_all(ios.join("Pods")).unwrap();
        assert_eq!(find_ios_project(dir.path()), None);

        fs::create_dir_all(ios.join("MyApp.xcodeproj")).unwrap();
        fs::create_dir_all(ios.join("MyApp.xcworkspace")).unwrap();
        assert_eq!(find_ios_project(dir.path()).as_deref(), Some("MyApp"));
    }
}
