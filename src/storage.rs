//! Storage helpers for generated cards on disk.
//!
//! Cards live in a directory-per-domain layout under the data directory:
//! `{data_dir}/{domain}/output_{domain}.jpg`. The filesystem is the only
//! record of what has been generated.

use std::fs;
use std::path::{Path, PathBuf};

/// Filename prefix for generated cards.
pub const CARD_PREFIX: &str = "output_";

/// File extension for generated cards.
pub const CARD_EXTENSION: &str = "jpg";

/// Directory holding one domain's generated card.
pub fn domain_dir(data_dir: &Path, domain: &str) -> PathBuf {
    data_dir.join(domain)
}

/// Construct the card path for a domain:
/// `{data_dir}/{domain}/output_{domain}.jpg`.
pub fn card_path(data_dir: &Path, domain: &str) -> PathBuf {
    domain_dir(data_dir, domain).join(format!("{}{}.{}", CARD_PREFIX, domain, CARD_EXTENSION))
}

/// Create a domain directory if it does not already exist.
///
/// Returns whether a usable directory now exists. Failures are logged and
/// reported as `false` so the caller can skip just the one domain.
pub fn ensure_dir(path: &Path) -> bool {
    match fs::create_dir_all(path) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("Error creating directory {}: {}", path.display(), e);
            false
        }
    }
}

/// List domains with a generated card, sorted by name.
///
/// A domain is listed only when its directory contains the conventionally
/// named card file; an empty directory left over from a failed run does
/// not count. A missing or unreadable data directory yields an empty list.
pub fn list_generated(data_dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(data_dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Cannot read data directory {}: {}", data_dir.display(), e);
            return Vec::new();
        }
    };

    let mut domains: Vec<String> = entries
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| card_path(data_dir, name).is_file())
        .collect();
    domains.sort();
    domains
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_card_path() {
        let path = card_path(Path::new("/data"), "www.acme.com");
        assert_eq!(
            path,
            PathBuf::from("/data/www.acme.com/output_www.acme.com.jpg")
        );
    }

    #[test]
    fn test_card_path_is_deterministic() {
        let first = card_path(Path::new("/data"), "www.globex.com");
        let second = card_path(Path::new("/data"), "www.globex.com");
        assert_eq!(first, second);
    }

    #[test]
    fn test_ensure_dir_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("www.acme.com");

        assert!(ensure_dir(&target));
        assert!(target.is_dir());
    }

    #[test]
    fn test_ensure_dir_accepts_existing_directory() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("www.acme.com");
        fs::create_dir(&target).unwrap();

        assert!(ensure_dir(&target));
    }

    #[test]
    fn test_ensure_dir_reports_failure() {
        let dir = tempdir().unwrap();
        // A file already occupies the path, so no directory can be made.
        let target = dir.path().join("www.acme.com");
        fs::write(&target, b"in the way").unwrap();

        assert!(!ensure_dir(&target));
    }

    #[test]
    fn test_list_generated_requires_card_file() {
        let dir = tempdir().unwrap();

        let with_card = domain_dir(dir.path(), "www.acme.com");
        fs::create_dir(&with_card).unwrap();
        fs::write(card_path(dir.path(), "www.acme.com"), b"jpeg bytes").unwrap();

        // Directory without a card: a failed run left it behind.
        fs::create_dir(domain_dir(dir.path(), "www.globex.com")).unwrap();

        // Stray file at the top level is not a domain.
        fs::write(dir.path().join("companies.xlsx"), b"sheet").unwrap();

        assert_eq!(list_generated(dir.path()), vec!["www.acme.com"]);
    }

    #[test]
    fn test_list_generated_sorts_by_name() {
        let dir = tempdir().unwrap();
        for domain in ["www.zeta.org", "www.acme.com", "www.mid.net"] {
            fs::create_dir(domain_dir(dir.path(), domain)).unwrap();
            fs::write(card_path(dir.path(), domain), b"jpeg bytes").unwrap();
        }

        assert_eq!(
            list_generated(dir.path()),
            vec!["www.acme.com", "www.mid.net", "www.zeta.org"]
        );
    }

    #[test]
    fn test_list_generated_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");

        assert!(list_generated(&missing).is_empty());
    }
}
