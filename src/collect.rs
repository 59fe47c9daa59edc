use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::WalkBuilder;

use crate::error::{Error, Result};

/// Files gathered from one scan, keyed by path relative to the scanned root.
pub struct Collection {
    pub files: BTreeMap<String, String>,
    /// Files that matched a suffix but could not be read as UTF-8 text.
    pub skipped: Vec<(PathBuf, std::io::Error)>,
}

/// Walks `root` and collects every regular file whose name ends with one of
/// `extensions`, minus anything the root `.gitignore` excludes.
pub fn collect_files(root: &Path, extensions: &[String]) -> Result<Collection> {
    match fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => {}
        Ok(_) => return Err(Error::RootNotFound(root.to_path_buf())),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::RootNotFound(root.to_path_buf()));
        }
        Err(err) => return Err(Error::Io(err)),
    }

    let gitignore = load_gitignore(root)?;
    let mut collection = Collection {
        files: BTreeMap::new(),
        skipped: Vec::new(),
    };

    // Standard filters are off so the only ignore source is the explicit
    // root .gitignore; hidden files stay in, matching the extension filter.
    for result in WalkBuilder::new(root).standard_filters(false).build() {
        let entry = result?;
        if !entry.file_type().map_or(false, |ft| ft.is_file()) {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !extensions.iter().any(|ext| name.ends_with(ext.as_str())) {
            continue;
        }

        let path = entry.path();
        let relative = match path.strip_prefix(root) {
            Ok(relative) => relative,
            Err(_) => continue,
        };

        if let Some(gitignore) = &gitignore {
            if gitignore
                .matched_path_or_any_parents(relative, false)
                .is_ignore()
            {
                continue;
            }
        }

        match fs::read_to_string(path) {
            Ok(content) => {
                collection
                    .files
                    .insert(relative.to_string_lossy().into_owned(), content);
            }
            Err(err) => collection.skipped.push((path.to_path_buf(), err)),
        }
    }

    Ok(collection)
}

fn load_gitignore(root: &Path) -> Result<Option<Gitignore>> {
    let path = root.join(".gitignore");
    if !path.exists() {
        return Ok(None);
    }

    let mut builder = GitignoreBuilder::new(root);
    if let Some(err) = builder.add(&path) {
        return Err(err.into());
    }
    Ok(Some(builder.build()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir() -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        path.push(format!("gistup-test-{}-{nanos}", std::process::id()));
        fs::create_dir_all(&path).unwrap();
        path
    }

    fn create_file(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    fn exts(suffixes: &[&str]) -> Vec<String> {
        suffixes.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn collects_by_extension_and_respects_gitignore() {
        let root = unique_temp_dir();
        create_file(&root.join("a.py"), "x");
        create_file(&root.join("b.txt"), "not python");
        create_file(&root.join(".gitignore"), "b.txt\n");

        let collection = collect_files(&root, &exts(&[".py"])).unwrap();

        let keys: Vec<_> = collection.files.keys().cloned().collect();
        assert_eq!(keys, vec!["a.py"]);
        assert_eq!(collection.files["a.py"], "x");
        assert!(collection.skipped.is_empty());

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn recurses_into_subdirectories() {
        let root = unique_temp_dir();
        create_file(&root.join("top.py"), "top");
        create_file(&root.join("pkg/nested/deep.py"), "deep");
        create_file(&root.join("pkg/readme.md"), "docs");

        let collection = collect_files(&root, &exts(&[".py"])).unwrap();

        let keys: Vec<_> = collection.files.keys().cloned().collect();
        assert_eq!(keys, vec!["pkg/nested/deep.py", "top.py"]);

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn negation_patterns_reinstate_files() {
        let root = unique_temp_dir();
        create_file(&root.join("drop.py"), "drop");
        create_file(&root.join("keep.py"), "keep");
        create_file(&root.join(".gitignore"), "*.py\n!keep.py\n");

        let collection = collect_files(&root, &exts(&[".py"])).unwrap();

        let keys: Vec<_> = collection.files.keys().cloned().collect();
        assert_eq!(keys, vec!["keep.py"]);

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn directory_patterns_exclude_everything_beneath() {
        let root = unique_temp_dir();
        create_file(&root.join("src/ok.py"), "ok");
        create_file(&root.join("build/generated.py"), "generated");
        create_file(&root.join(".gitignore"), "build/\n");

        let collection = collect_files(&root, &exts(&[".py"])).unwrap();

        let keys: Vec<_> = collection.files.keys().cloned().collect();
        assert_eq!(keys, vec!["src/ok.py"]);

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn undecodable_files_are_skipped_not_fatal() {
        let root = unique_temp_dir();
        create_file(&root.join("good.py"), "fine");
        fs::write(root.join("bad.py"), [0xff, 0xfe, 0x00, 0x41]).unwrap();

        let collection = collect_files(&root, &exts(&[".py"])).unwrap();

        let keys: Vec<_> = collection.files.keys().cloned().collect();
        assert_eq!(keys, vec!["good.py"]);
        assert_eq!(collection.skipped.len(), 1);
        assert!(collection.skipped[0].0.ends_with("bad.py"));

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn missing_root_is_an_error() {
        let root = unique_temp_dir().join("does-not-exist");

        match collect_files(&root, &exts(&[".py"])) {
            Err(Error::RootNotFound(path)) => assert_eq!(path, root),
            other => panic!("expected RootNotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn no_matches_yields_empty_collection() {
        let root = unique_temp_dir();
        create_file(&root.join("notes.txt"), "text");

        let collection = collect_files(&root, &exts(&[".py"])).unwrap();
        assert!(collection.files.is_empty());
        assert!(collection.skipped.is_empty());

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn repeated_runs_are_identical() {
        let root = unique_temp_dir();
        create_file(&root.join("a.py"), "alpha");
        create_file(&root.join("lib/b.py"), "beta");

        let first = collect_files(&root, &exts(&[".py"])).unwrap();
        let second = collect_files(&root, &exts(&[".py"])).unwrap();
        assert_eq!(first.files, second.files);

        fs::remove_dir_all(root).unwrap();
    }
}
