use crate::error::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, instrument};

static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

fn temp_path_for(path: &Path) -> std::path::PathBuf {
    let counter = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut temp_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| std::ffi::OsString::from("delays"));
    temp_name.push(format!(".{}.{}.tmp", std::process::id(), counter));
    path.with_file_name(temp_name)
}

fn parent_dir_for_fs_ops(path: &Path) -> Option<&Path> {
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
}

#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = parent_dir_for_fs_ops(path) {
        let dir = fs::File::open(parent)?;
        dir.sync_all()?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Writes `content` to a sibling temp file and renames it over `path`.
pub(crate) fn write_atomic_file(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = parent_dir_for_fs_ops(path) {
        fs::create_dir_all(parent)?;
    }

    let temp_path = temp_path_for(path);

    let result = (|| {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        drop(file);

        #[cfg(windows)]
        if path.exists() {
            fs::remove_file(path)?;
        }

        fs::rename(&temp_path, path)
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    sync_parent_dir(path)?;

    Ok(())
}

pub(crate) fn read_to_string_if_exists(path: &Path) -> std::io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Writes a rendered report (HTML, JSON, ...) to `path`.
#[instrument(skip(content), fields(path = %path.as_ref().display(), bytes = content.len()))]
pub fn write_output<P>(path: P, content: &str) -> Result<()>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();

    write_atomic_file(path, content).map_err(|e| Error::OutputWrite {
        path: path.display().to_string(),
        source: e,
    })?;

    debug!("Successfully wrote output file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    mod write_output_tests {
        use super::*;

        #[test]
        fn writes_content_to_file() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("plan.html");

            write_output(&path, "<html></html>").unwrap();

            let content = std::fs::read_to_string(&path).unwrap();
            assert_eq!(content, "<html></html>");
        }

        #[test]
        fn creates_parent_directories() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("nested/dirs/plan.html");

            write_output(&path, "chart").unwrap();

            assert!(path.exists());
        }

        #[test]
        fn overwrites_existing_file() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("plan.html");

            write_output(&path, "first").unwrap();
            write_output(&path, "second").unwrap();

            let content = std::fs::read_to_string(&path).unwrap();
            assert_eq!(content, "second");
        }

        #[test]
        fn leaves_no_temp_files_behind() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("plan.html");

            write_output(&path, "chart").unwrap();

            let entries: Vec<_> = std::fs::read_dir(dir.path())
                .unwrap()
                .map(|e| e.unwrap().file_name())
                .collect();
            assert_eq!(entries, vec![std::ffi::OsString::from("plan.html")]);
        }

        #[test]
        fn fails_when_target_is_a_directory() {
            let dir = tempdir().unwrap();

            let result = write_output(dir.path(), "chart");

            assert!(matches!(result, Err(Error::OutputWrite { .. })));
        }
    }

    mod read_if_exists_tests {
        use super::*;

        #[test]
        fn returns_none_for_missing_file() {
            let dir = tempdir().unwrap();
            let result = read_to_string_if_exists(&dir.path().join("missing.toml")).unwrap();
            assert!(result.is_none());
        }

        #[test]
        fn returns_content_for_existing_file() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("delays.toml");
            std::fs::write(&path, "[plan]\n").unwrap();

            let result = read_to_string_if_exists(&path).unwrap();
            assert_eq!(result.as_deref(), Some("[plan]\n"));
        }
    }
}
