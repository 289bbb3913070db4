use crate::error::AppError;
use crate::model::{TaskRecord, TaskSize};
use crate::storage::{log_codec, log_file};
use crate::store::{SummaryRow, TaskStore};
use std::path::Path;
use time::{Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

const OP_START: &str = "start";
const OP_STOP: &str = "stop";
const OP_DESCRIBE: &str = "describe";
const OP_SIZE: &str = "size";
const OP_RENAME: &str = "rename";

pub fn start_task(name: &str) -> Result<TaskRecord, AppError> {
    let path = log_file::log_path()?;
    start_task_with_path(&path, name)
}

pub fn start_task_with_path(path: &Path, name: &str) -> Result<TaskRecord, AppError> {
    let mut store = log_file::load_or_init(path)?;
    let now = now_local();
    let record = store.start(name, now)?;
    commit(path, &mut store, OP_START, &record.name, now)?;
    Ok(record)
}

pub fn stop_task(name: &str) -> Result<TaskRecord, AppError> {
    let path = log_file::log_path()?;
    stop_task_with_path(&path, name)
}

pub fn stop_task_with_path(path: &Path, name: &str) -> Result<TaskRecord, AppError> {
    let mut store = log_file::load_or_init(path)?;
    let now = now_local();
    let record = store.stop(name, now)?;
    commit(path, &mut store, OP_STOP, &record.name, now)?;
    Ok(record)
}

/// Applies description and size to every window sharing `name`; returns the
/// number of windows touched.
pub fn describe_task(
    name: &str,
    description: &str,
    size_token: Option<&str>,
) -> Result<usize, AppError> {
    let path = log_file::log_path()?;
    describe_task_with_path(&path, name, description, size_token)
}

pub fn describe_task_with_path(
    path: &Path,
    name: &str,
    description: &str,
    size_token: Option<&str>,
) -> Result<usize, AppError> {
    let mut store = log_file::load_or_init(path)?;
    let updated = store.describe(name, description, size_token)?;
    commit(path, &mut store, OP_DESCRIBE, name.trim(), now_local())?;
    Ok(updated)
}

pub fn resize_task(name: &str, size_token: &str) -> Result<usize, AppError> {
    let path = log_file::log_path()?;
    resize_task_with_path(&path, name, size_token)
}

pub fn resize_task_with_path(path: &Path, name: &str, size_token: &str) -> Result<usize, AppError> {
    let mut store = log_file::load_or_init(path)?;
    let updated = store.resize(name, size_token)?;
    commit(path, &mut store, OP_SIZE, name.trim(), now_local())?;
    Ok(updated)
}

pub fn rename_task(name: &str, new_name: &str) -> Result<usize, AppError> {
    let path = log_file::log_path()?;
    rename_task_with_path(&path, name, new_name)
}

pub fn rename_task_with_path(path: &Path, name: &str, new_name: &str) -> Result<usize, AppError> {
    let mut store = log_file::load_or_init(path)?;
    let updated = store.rename(name, new_name)?;
    // The operation log records the name the command was invoked with.
    commit(path, &mut store, OP_RENAME, name.trim(), now_local())?;
    Ok(updated)
}

pub fn summary_all() -> Result<Vec<SummaryRow>, AppError> {
    let path = log_file::log_path()?;
    summary_all_with_path(&path)
}

pub fn summary_all_with_path(path: &Path) -> Result<Vec<SummaryRow>, AppError> {
    let store = log_file::load_or_init(path)?;
    Ok(store.aggregate(now_local()))
}

pub fn summary_by_name(name: &str) -> Result<SummaryRow, AppError> {
    let path = log_file::log_path()?;
    summary_by_name_with_path(&path, name)
}

pub fn summary_by_name_with_path(path: &Path, name: &str) -> Result<SummaryRow, AppError> {
    let store = log_file::load_or_init(path)?;
    store.summary_by_name(name, now_local())
}

pub fn summary_by_size(size: TaskSize) -> Result<Vec<SummaryRow>, AppError> {
    let path = log_file::log_path()?;
    summary_by_size_with_path(&path, size)
}

pub fn summary_by_size_with_path(path: &Path, size: TaskSize) -> Result<Vec<SummaryRow>, AppError> {
    let store = log_file::load_or_init(path)?;
    Ok(store.summary_by_size(size, now_local()))
}

/// Elapsed time as "H Hours, M Minutes, S Seconds"; hours are unbounded,
/// minutes and seconds are the sub-hour and sub-minute remainders.
pub fn format_duration(total: Duration) -> String {
    let hours = total.whole_hours();
    let minutes = total.whole_minutes() % 60;
    let seconds = total.whole_seconds() % 60;
    format!("{hours} Hours, {minutes} Minutes, {seconds} Seconds")
}

/// The wall clock in the system's local zone, to the precision the log format
/// keeps. Falls back to UTC when the local offset cannot be determined.
fn now_local() -> PrimitiveDateTime {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let now = OffsetDateTime::now_utc().to_offset(offset);
    PrimitiveDateTime::new(now.date(), now.time())
}

/// Appends the operation-log line for a successful mutation and rewrites the
/// whole file. Mutations that fail validation never reach this point, so an
/// invocation either persists completely or not at all.
fn commit(
    path: &Path,
    store: &mut TaskStore,
    operation: &str,
    name: &str,
    now: PrimitiveDateTime,
) -> Result<(), AppError> {
    store.push_operation(log_codec::format_operation(operation, name, now)?);
    log_file::save(path, store)
}
