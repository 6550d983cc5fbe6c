use std::path::{Path, PathBuf};

use crate::error::CliError;

const MEMORY_URL: &str = "sqlite::memory:";

/// Turns `sqlite:relative.db` or a bare path into an absolute `sqlite://` URL.
pub fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == MEMORY_URL || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path = Path::new(trimmed.strip_prefix("sqlite:").unwrap_or(trimmed));
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Creates the database file and its parent directory if missing.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), CliError> {
    if db_url == MEMORY_URL {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .map(|rest| rest.split('?').next().unwrap_or(rest))
        .filter(|path| !path.is_empty())
        .ok_or_else(|| CliError::InvalidDbUrl(db_url.to_string()))?;

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_memory_and_absolute_urls() {
        assert_eq!(normalize_sqlite_url(MEMORY_URL), MEMORY_URL);
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/progress.db"),
            "sqlite:///tmp/progress.db"
        );
    }

    #[test]
    fn absolutizes_relative_paths() {
        let url = normalize_sqlite_url("sqlite:data/progress.db");
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/progress.db"));
    }

    #[test]
    fn creates_missing_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join("progress.db");
        let url = format!("sqlite://{}?mode=rwc", file.display());

        prepare_sqlite_file(&url).unwrap();
        assert!(file.exists());
    }

    #[test]
    fn rejects_url_without_path() {
        assert!(matches!(
            prepare_sqlite_file("postgres://localhost/db"),
            Err(CliError::InvalidDbUrl(_))
        ));
    }
}
