//! Argument checks run before any file is touched.

use std::path::Path;
use unic_langid::LanguageIdentifier;

#[derive(Clone, Copy)]
enum Kind {
    File,
    Directory,
}

fn validate_existing(path: &str, kind: Kind) -> Result<(), String> {
    let path_obj = Path::new(path);
    let (label, matches) = match kind {
        Kind::File => ("File", path_obj.is_file()),
        Kind::Directory => ("Directory", path_obj.is_dir()),
    };

    if !path_obj.exists() {
        return Err(format!("{} does not exist: {}", label, path));
    }
    if !matches {
        let expected = match kind {
            Kind::File => "a file",
            Kind::Directory => "a directory",
        };
        return Err(format!("Path is not {}: {}", expected, path));
    }
    Ok(())
}

/// Validate a `.strings` input file exists
pub fn validate_file_path(path: &str) -> Result<(), String> {
    validate_existing(path, Kind::File)
}

/// Validate a tree root exists
pub fn validate_dir_path(path: &str) -> Result<(), String> {
    validate_existing(path, Kind::Directory)
}

/// Make sure the parent directory of a report path exists.
pub fn validate_output_path(path: &str) -> Result<(), String> {
    match Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Cannot create output directory: {}", e))
        }
        _ => Ok(()),
    }
}

/// Validate a BCP 47 language identifier such as `en` or `pt-BR`.
///
/// The undetermined language `und` is rejected.
pub fn validate_language_code(lang: &str) -> Result<(), String> {
    if lang.is_empty() {
        return Err("Language code cannot be empty".to_string());
    }

    let invalid = || {
        format!(
            "Invalid language code format: {}. Expected valid BCP 47 language identifier",
            lang
        )
    };
    let identifier = lang.parse::<LanguageIdentifier>().map_err(|_| invalid())?;
    if identifier.language.is_empty() {
        return Err(invalid());
    }
    Ok(())
}

/// Validate resource file extension (with or without leading dot)
pub fn validate_extension(extension: &str) -> Result<(), String> {
    let trimmed = extension.trim_start_matches('.');
    if trimmed.is_empty() {
        return Err("Extension cannot be empty".to_string());
    }
    if trimmed.contains(['/', '\\']) {
        return Err(format!("Invalid extension: {}", extension));
    }
    Ok(())
}
