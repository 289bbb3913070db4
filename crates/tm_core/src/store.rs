use crate::error::AppError;
use crate::model::{MAX_NAME_LEN, TaskRecord, TaskSize, UNDEFINED_MARKER};
use time::{Duration, PrimitiveDateTime};

/// Aggregated time for one task name across every window sharing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub name: String,
    pub total: Duration,
}

/// In-memory image of the log file: the verbatim operation-log lines plus the
/// ordered record sequence (insertion order = chronological). Records are
/// never deleted; describe/size/rename mutate matching windows in place.
///
/// Mutating methods take `now` explicitly so the clock stays at the caller.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskStore {
    operations: Vec<String>,
    records: Vec<TaskRecord>,
}

impl TaskStore {
    pub fn new(operations: Vec<String>, records: Vec<TaskRecord>) -> Self {
        Self {
            operations,
            records,
        }
    }

    pub fn operations(&self) -> &[String] {
        &self.operations
    }

    pub fn records(&self) -> &[TaskRecord] {
        &self.records
    }

    pub fn push_operation(&mut self, line: String) {
        self.operations.push(line);
    }

    /// The last record under `name` in insertion order. Closed windows can
    /// share a name, so "latest" is the authoritative target for start/stop
    /// eligibility checks.
    pub fn find_latest(&self, name: &str) -> Option<&TaskRecord> {
        self.records.iter().rev().find(|record| record.name == name)
    }

    pub fn start(&mut self, name: &str, now: PrimitiveDateTime) -> Result<TaskRecord, AppError> {
        // Surrounding whitespace would be lost in the fixed-width rows, so
        // names are trimmed before any lookup or insert.
        let name = name.trim();
        check_name(name)?;

        if let Some(latest) = self.find_latest(name)
            && latest.is_running()
        {
            return Err(AppError::state_conflict("Task is running"));
        }

        let record = TaskRecord::open(name, now);
        self.records.push(record.clone());
        Ok(record)
    }

    pub fn stop(&mut self, name: &str, now: PrimitiveDateTime) -> Result<TaskRecord, AppError> {
        let name = name.trim();
        let index = self
            .records
            .iter()
            .rposition(|record| record.name == name)
            .ok_or_else(|| AppError::not_found(format!("Couldn't find {name}")))?;

        if !self.records[index].is_running() {
            return Err(AppError::state_conflict("Task is not running"));
        }

        self.records[index].stop(now);
        Ok(self.records[index].clone())
    }

    /// Sets description and size on every window sharing `name`. Existence is
    /// checked before the size token so an unknown task reports not-found even
    /// when the token is also bad. A missing token means `UNDEFINED`.
    pub fn describe(
        &mut self,
        name: &str,
        description: &str,
        size_token: Option<&str>,
    ) -> Result<usize, AppError> {
        let name = name.trim();
        let description = description.trim();
        self.require_name(name)?;
        let size = parse_size_token(size_token)?;

        let mut updated = 0;
        for record in self.records.iter_mut().filter(|record| record.name == name) {
            record.describe(description, size);
            updated += 1;
        }
        Ok(updated)
    }

    /// Sets the size on every window sharing `name`.
    pub fn resize(&mut self, name: &str, size_token: &str) -> Result<usize, AppError> {
        let name = name.trim();
        self.require_name(name)?;
        let size = parse_size_token(Some(size_token))?;

        let mut updated = 0;
        for record in self.records.iter_mut().filter(|record| record.name == name) {
            record.set_size(size);
            updated += 1;
        }
        Ok(updated)
    }

    /// Renames every window sharing `old`. The new name must not collide with
    /// any existing task, open or closed, and must itself be a legal task
    /// name so row alignment and summary disambiguation survive the rename.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<usize, AppError> {
        let old = old.trim();
        let new = new.trim();
        self.require_name(old)?;
        check_name(new)?;

        if self.records.iter().any(|record| record.name == new) {
            return Err(AppError::state_conflict(format!(
                "Name: {new} already exists"
            )));
        }

        let mut updated = 0;
        for record in self.records.iter_mut().filter(|record| record.name == old) {
            record.rename(new);
            updated += 1;
        }
        Ok(updated)
    }

    /// One row per distinct name in first-appearance order; running windows
    /// contribute elapsed time up to `now`.
    pub fn aggregate(&self, now: PrimitiveDateTime) -> Vec<SummaryRow> {
        let mut rows: Vec<SummaryRow> = Vec::new();
        for record in &self.records {
            match rows.iter_mut().find(|row| row.name == record.name) {
                Some(row) => row.total += record.elapsed(now),
                None => rows.push(SummaryRow {
                    name: record.name.clone(),
                    total: record.elapsed(now),
                }),
            }
        }
        rows
    }

    pub fn summary_by_name(
        &self,
        name: &str,
        now: PrimitiveDateTime,
    ) -> Result<SummaryRow, AppError> {
        let name = name.trim();
        self.aggregate(now)
            .into_iter()
            .find(|row| row.name == name)
            .ok_or_else(|| AppError::not_found(format!("Couldn't find {name}")))
    }

    /// Distinct names (first occurrence only) whose current size matches.
    /// The printed total is the name's full aggregate, not filtered by size,
    /// consistent with `aggregate`.
    pub fn summary_by_size(&self, size: TaskSize, now: PrimitiveDateTime) -> Vec<SummaryRow> {
        let totals = self.aggregate(now);
        let mut rows: Vec<SummaryRow> = Vec::new();
        for record in &self.records {
            if record.size != size {
                continue;
            }
            if rows.iter().any(|row| row.name == record.name) {
                continue;
            }
            if let Some(total) = totals.iter().find(|row| row.name == record.name) {
                rows.push(total.clone());
            }
        }
        rows
    }

    fn require_name(&self, name: &str) -> Result<(), AppError> {
        if self.find_latest(name).is_none() {
            return Err(AppError::not_found(format!("Couldn't find {name}")));
        }
        Ok(())
    }
}

fn check_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() {
        return Err(AppError::invalid_argument("Task name is required"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::invalid_argument(format!(
            "Task Name exceeds {MAX_NAME_LEN} Characters"
        )));
    }
    // Size labels share the summary argument slot with task names, so a task
    // may not be named after one.
    if TaskSize::parse(name).is_some() {
        return Err(AppError::state_conflict(format!(
            "Invalid name. It can't be one of: S, M, L, XL, or {UNDEFINED_MARKER}"
        )));
    }
    Ok(())
}

fn parse_size_token(token: Option<&str>) -> Result<TaskSize, AppError> {
    match token {
        Some(token) => TaskSize::parse(token)
            .ok_or_else(|| AppError::invalid_size(format!("Invalid size: {token}"))),
        None => Ok(TaskSize::Undefined),
    }
}
