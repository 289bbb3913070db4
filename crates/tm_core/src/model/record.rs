use std::fmt;
use time::macros::datetime;
use time::{Duration, PrimitiveDateTime};

/// Display width of every column in the log file, header row included.
pub const COLUMN_WIDTH: usize = 22;

/// Task names must fit a single column so rows stay aligned.
pub const MAX_NAME_LEN: usize = COLUMN_WIDTH;

/// Placeholder for a description that was never set.
pub const UNDEFINED_MARKER: &str = "UNDEFINED";

/// Sentinel end time marking a window as still running. The log file carries
/// no "running" flag; a record whose end equals this epoch is open.
pub const MIN_TIME: PrimitiveDateTime = datetime!(2000-01-01 0:00);

/// Left-align a field into its column. Fields longer than the column are kept
/// whole rather than truncated.
pub fn pad(field: &str) -> String {
    format!("{field:<width$}", width = COLUMN_WIDTH)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSize {
    Undefined,
    S,
    M,
    L,
    Xl,
}

impl TaskSize {
    /// Case-insensitive parse of a size label. Returns `None` for anything
    /// that is not one of the five labels; callers decide whether that is an
    /// error (`size`/`describe`) or a fallthrough (`summary`, where a token
    /// that is not a size is treated as a task name). Task names that parse
    /// here are reserved for the same reason.
    pub fn parse(token: &str) -> Option<TaskSize> {
        match token.to_ascii_uppercase().as_str() {
            "UNDEFINED" => Some(Self::Undefined),
            "S" => Some(Self::S),
            "M" => Some(Self::M),
            "L" => Some(Self::L),
            "XL" => Some(Self::Xl),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Undefined => "UNDEFINED",
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::Xl => "XL",
        }
    }
}

impl fmt::Display for TaskSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One start-to-stop (or start-to-now) window for a named task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub name: String,
    pub size: TaskSize,
    pub start: PrimitiveDateTime,
    pub end: PrimitiveDateTime,
    pub description: String,
}

impl TaskRecord {
    /// A fresh running window: size and description undefined, end at the
    /// sentinel.
    pub fn open(name: &str, now: PrimitiveDateTime) -> Self {
        Self {
            name: name.to_string(),
            size: TaskSize::Undefined,
            start: now,
            end: MIN_TIME,
            description: UNDEFINED_MARKER.to_string(),
        }
    }

    /// Reconstruct a window from parsed log fields.
    pub fn from_parts(
        name: String,
        size: TaskSize,
        start: PrimitiveDateTime,
        end: PrimitiveDateTime,
        description: String,
    ) -> Self {
        Self {
            name,
            size,
            start,
            end,
            description,
        }
    }

    pub fn is_running(&self) -> bool {
        self.end == MIN_TIME
    }

    /// Callers must check `is_running` first; the store enforces this.
    pub fn stop(&mut self, now: PrimitiveDateTime) {
        self.end = now;
    }

    pub fn describe(&mut self, description: &str, size: TaskSize) {
        self.description = description.to_string();
        self.size = size;
    }

    pub fn set_size(&mut self, size: TaskSize) {
        self.size = size;
    }

    pub fn rename(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Time spent in this window: end-or-now minus start.
    pub fn elapsed(&self, now: PrimitiveDateTime) -> Duration {
        if self.is_running() {
            now - self.start
        } else {
            self.end - self.start
        }
    }
}
