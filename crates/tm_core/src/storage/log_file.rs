use crate::config;
use crate::error::AppError;
use crate::storage::log_codec;
use crate::store::TaskStore;
use std::io::Write;
use std::path::{Path, PathBuf};

const LOG_FILE_NAME: &str = "TM_log.txt";
const LOG_PATH_ENV_VAR: &str = "TM_LOG_PATH";

/// Resolves the log file location: `TM_LOG_PATH`, then the configuration
/// file's `log_path`, then `TM_log.txt` in the current directory.
pub fn log_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(LOG_PATH_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    let config = config::load_config_with_fallback().config;
    if let Some(path) = config.log_path
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from(LOG_FILE_NAME))
}

/// Loads the store from disk, writing the empty skeleton first if the file
/// does not exist yet. A file that exists but fails to parse is fatal to the
/// invocation; there is no fallback to a fresh log.
pub fn load_or_init(path: &Path) -> Result<TaskStore, AppError> {
    if !path.exists() {
        let store = TaskStore::default();
        save(path, &store)?;
        return Ok(store);
    }

    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    log_codec::parse(&content)
}

/// Rewrites the entire log. The content goes to a temp file in the
/// destination directory first and is renamed over the original, so an
/// interrupted write never leaves a truncated log behind.
pub fn save(path: &Path, store: &TaskStore) -> Result<(), AppError> {
    let content = log_codec::render(store)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent)
                .map_err(|err| AppError::io(format!("{}: {}", parent.display(), err)))?;
            parent
        }
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|err| AppError::io(format!("{}: {}", dir.display(), err)))?;
    tmp.write_all(content.as_bytes())
        .map_err(|err| AppError::io(err.to_string()))?;
    tmp.flush().map_err(|err| AppError::io(err.to_string()))?;
    tmp.persist(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;

    Ok(())
}
