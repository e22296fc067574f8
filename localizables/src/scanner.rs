//! Pairs the resource files of two `.lproj` trees by language.
//!
//! Files are expected at `.../<language>.lproj/<Name>.strings`. The language
//! is read from the parent directory name, `Base` is replaced by the
//! configured base language, and region subtags are ignored when matching
//! (`ca-ES` matches `ca`).
//!
//! Symbolic links to files are picked up like regular files; linked
//! directories are not descended into.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::{error::Error, options::ScanOptions, types::FilePair};

const BASE_LANGUAGE_TAG: &str = "Base";

/// A resource file found by a scan, with the language of its bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageFile {
    pub language: String,
    pub path: PathBuf,
}

/// Matches destination files to update files across two directory trees.
#[derive(Debug, Clone)]
pub struct FolderScanner {
    destination_root: PathBuf,
    update_root: PathBuf,
    options: ScanOptions,
}

impl FolderScanner {
    pub fn new(
        destination_root: impl Into<PathBuf>,
        update_root: impl Into<PathBuf>,
        options: ScanOptions,
    ) -> Self {
        FolderScanner {
            destination_root: destination_root.into(),
            update_root: update_root.into(),
            options,
        }
    }

    /// Scans both roots and pairs every destination file with an update file.
    ///
    /// Fails with [`Error::LanguageNotFound`] on the first destination file
    /// whose language has no update counterpart; no pairs are returned then.
    pub fn find_matches(&self) -> Result<Vec<FilePair>, Error> {
        let (destination, update) = rayon::join(
            || scan(&self.destination_root, &self.options),
            || scan(&self.update_root, &self.options),
        );

        match_files(&destination?, &update?)
    }
}

/// Recursively collects resource files under `root`, sorted by path.
pub fn scan(root: &Path, options: &ScanOptions) -> Result<Vec<LanguageFile>, Error> {
    let suffix = format!(".{}", options.extension);
    let mut files = Vec::new();

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build();

    for dent in walker {
        let dent = dent?;
        let is_file = match dent.file_type() {
            Some(ftype) if ftype.is_symlink() => dent.path().is_file(),
            Some(ftype) => ftype.is_file(),
            None => false,
        };
        if !is_file {
            continue;
        }

        let path = dent.path();
        let has_extension = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(&suffix));
        if !has_extension {
            continue;
        }

        if let Some(language) = language_tag(path, options) {
            files.push(LanguageFile {
                language,
                path: path.to_path_buf(),
            });
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    tracing::debug!(root = %root.display(), files = files.len(), "scanned resource tree");
    Ok(files)
}

/// Language of a resource file, taken from its parent directory name.
///
/// `Base` is replaced by `options.base_language`.
pub fn language_tag(path: &Path, options: &ScanOptions) -> Option<String> {
    let bundle = path.parent()?.file_name()?.to_str()?;
    let language = bundle
        .strip_suffix(options.bundle_suffix.as_str())
        .unwrap_or(bundle);

    if language == BASE_LANGUAGE_TAG {
        Some(options.base_language.clone())
    } else {
        Some(language.to_string())
    }
}

/// Drops region and script subtags: `ca-ES` becomes `ca`.
pub fn normalize_language(language: &str) -> &str {
    language.split('-').next().unwrap_or(language)
}

/// Pairs destination files with update files by normalized language.
///
/// When several update files share a normalized language the last one wins.
pub fn match_files(
    destination: &[LanguageFile],
    update: &[LanguageFile],
) -> Result<Vec<FilePair>, Error> {
    let mut index: HashMap<&str, &Path> = HashMap::with_capacity(update.len());
    for file in update {
        let language = normalize_language(&file.language);
        if let Some(previous) = index.insert(language, &file.path) {
            tracing::warn!(
                language,
                replaced = %previous.display(),
                kept = %file.path.display(),
                "several update files share a language, keeping the last one"
            );
        }
    }

    destination
        .iter()
        .map(|file| {
            let language = normalize_language(&file.language);
            index
                .get(language)
                .map(|update| FilePair::new(&file.path, *update))
                .ok_or_else(|| Error::LanguageNotFound {
                    path: file.path.clone(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, relative: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "\"k\" = \"v\";\n").unwrap();
        path
    }

    fn file(language: &str, path: &str) -> LanguageFile {
        LanguageFile {
            language: language.to_string(),
            path: PathBuf::from(path),
        }
    }

    #[test]
    fn test_language_tag_strips_bundle_suffix() {
        let options = ScanOptions::new();
        let tag = language_tag(Path::new("res/ca-ES.lproj/Localizable.strings"), &options);
        assert_eq!(tag.as_deref(), Some("ca-ES"));
    }

    #[test]
    fn test_language_tag_replaces_base() {
        let options = ScanOptions::new().with_base_language("es");
        let tag = language_tag(Path::new("res/Base.lproj/Main.strings"), &options);
        assert_eq!(tag.as_deref(), Some("es"));
    }

    #[test]
    fn test_language_tag_without_suffix_uses_directory_name() {
        let options = ScanOptions::new();
        let tag = language_tag(Path::new("translations/fr/Localizable.strings"), &options);
        assert_eq!(tag.as_deref(), Some("fr"));
    }

    #[test]
    fn test_normalize_language() {
        assert_eq!(normalize_language("ca-ES"), "ca");
        assert_eq!(normalize_language("zh-Hans-CN"), "zh");
        assert_eq!(normalize_language("en"), "en");
        assert_eq!(normalize_language(""), "");
    }

    #[test]
    fn test_match_files_by_prefix() {
        let destination = vec![file("ca", "d/ca.lproj/L.strings")];
        let update = vec![file("ca-ES", "u/ca-ES.lproj/L.strings")];

        let pairs = match_files(&destination, &update).unwrap();
        assert_eq!(
            pairs,
            vec![FilePair::new("d/ca.lproj/L.strings", "u/ca-ES.lproj/L.strings")]
        );
    }

    #[test]
    fn test_match_files_last_update_wins_on_collision() {
        let destination = vec![file("pt", "d/pt.lproj/L.strings")];
        let update = vec![
            file("pt-BR", "u/pt-BR.lproj/L.strings"),
            file("pt-PT", "u/pt-PT.lproj/L.strings"),
        ];

        let pairs = match_files(&destination, &update).unwrap();
        assert_eq!(pairs[0].update, PathBuf::from("u/pt-PT.lproj/L.strings"));
    }

    #[test]
    fn test_match_files_missing_language() {
        let destination = vec![
            file("en", "d/en.lproj/L.strings"),
            file("fr", "d/fr.lproj/L.strings"),
        ];
        let update = vec![file("en", "u/en.lproj/L.strings")];

        let err = match_files(&destination, &update).unwrap_err();
        match err {
            Error::LanguageNotFound { path } => {
                assert_eq!(path, PathBuf::from("d/fr.lproj/L.strings"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_scan_keeps_only_resource_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let kept = touch(root, "App/en.lproj/Localizable.strings");
        touch(root, "App/en.lproj/Localizable.stringsdict");
        touch(root, "App/en.lproj/notes.txt");
        fs::create_dir_all(root.join("App/fr.lproj/Folder.strings")).unwrap();

        let files = scan(root, &ScanOptions::new()).unwrap();
        assert_eq!(files, vec![LanguageFile {
            language: "en".to_string(),
            path: kept,
        }]);
    }

    #[test]
    fn test_scan_includes_hidden_directories() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), ".build/de.lproj/Localizable.strings");

        let files = scan(dir.path(), &ScanOptions::new()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].language, "de");
    }

    #[test]
    fn test_scan_with_custom_bundle_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let kept = touch(dir.path(), "res/it.locale/Strings.strings");
        touch(dir.path(), "res/Base.locale/Strings.txt");

        let options = ScanOptions::new()
            .with_bundle_suffix(".locale")
            .with_base_language("it");
        let files = scan(dir.path(), &options).unwrap();
        assert_eq!(files, vec![LanguageFile {
            language: "it".to_string(),
            path: kept,
        }]);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_follows_symlinked_files() {
        let dir = tempfile::tempdir().unwrap();
        let target = touch(dir.path(), "shared/Localizable.strings");
        let bundle = dir.path().join("App/fr.lproj");
        fs::create_dir_all(&bundle).unwrap();
        let link = bundle.join("Localizable.strings");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let files = scan(&dir.path().join("App"), &ScanOptions::new()).unwrap();
        assert_eq!(files, vec![LanguageFile {
            language: "fr".to_string(),
            path: link,
        }]);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_dangling_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("en.lproj");
        fs::create_dir_all(&bundle).unwrap();
        std::os::unix::fs::symlink(
            dir.path().join("missing.strings"),
            bundle.join("Localizable.strings"),
        )
        .unwrap();

        let files = scan(dir.path(), &ScanOptions::new()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_scan_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = scan(&dir.path().join("absent"), &ScanOptions::new());
        assert!(matches!(result, Err(Error::Walk(_))));
    }

    #[test]
    fn test_find_matches_tree_scenario() {
        let destination = tempfile::tempdir().unwrap();
        let update = tempfile::tempdir().unwrap();

        let d_en = touch(destination.path(), "en.lproj/Localizable.strings");
        let d_base = touch(destination.path(), "Base.lproj/Localizable.strings");
        let d_ca = touch(destination.path(), "ca.lproj/Localizable.strings");
        let u_en = touch(update.path(), "en.lproj/Localizable.strings");
        let u_ca = touch(update.path(), "ca-ES.lproj/Localizable.strings");

        let scanner = FolderScanner::new(
            destination.path(),
            update.path(),
            ScanOptions::new().with_base_language("en"),
        );
        let mut pairs = scanner.find_matches().unwrap();
        pairs.sort_by(|a, b| a.destination.cmp(&b.destination));

        let mut expected = vec![
            FilePair::new(d_en, u_en.clone()),
            FilePair::new(d_base, u_en),
            FilePair::new(d_ca, u_ca),
        ];
        expected.sort_by(|a, b| a.destination.cmp(&b.destination));
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_find_matches_fails_fast_on_unknown_language() {
        let destination = tempfile::tempdir().unwrap();
        let update = tempfile::tempdir().unwrap();
        touch(destination.path(), "en.lproj/Localizable.strings");
        let orphan = touch(destination.path(), "ja.lproj/Localizable.strings");
        touch(update.path(), "en.lproj/Localizable.strings");

        let scanner = FolderScanner::new(destination.path(), update.path(), ScanOptions::new());
        let err = scanner.find_matches().unwrap_err();
        assert!(matches!(err, Error::LanguageNotFound { path } if path == orphan));
    }
}
