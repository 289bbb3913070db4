use crate::error::AppError;
use crate::model::{COLUMN_WIDTH, TaskRecord, TaskSize, pad};
use crate::store::TaskStore;
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

pub const OP_LOG_HEADER: &str = "Operation Log:";
pub const TASK_SUMMARY_HEADER: &str = "Task Summary:";

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]/[month]/[day]-[hour]:[minute]:[second]");

/// The column-header row of the task table. Written verbatim and matched
/// verbatim on parse, trailing padding included.
pub fn task_table_header() -> String {
    [
        pad("Task Name"),
        pad("Task Size"),
        pad("Start Time"),
        pad("End Time"),
        pad("Description"),
    ]
    .concat()
}

pub fn format_timestamp(timestamp: PrimitiveDateTime) -> Result<String, AppError> {
    timestamp
        .format(TIMESTAMP_FORMAT)
        .map_err(|err| AppError::io(err.to_string()))
}

pub fn parse_timestamp(field: &str) -> Result<PrimitiveDateTime, AppError> {
    PrimitiveDateTime::parse(field, TIMESTAMP_FORMAT)
        .map_err(|_| AppError::corrupt_log(format!("Invalid timestamp: {field}")))
}

/// One operation-log line: operation name, task name, timestamp, each in its
/// own column.
pub fn format_operation(
    operation: &str,
    name: &str,
    now: PrimitiveDateTime,
) -> Result<String, AppError> {
    Ok([pad(operation), pad(name), pad(&format_timestamp(now)?)].concat())
}

fn format_row(record: &TaskRecord) -> Result<String, AppError> {
    Ok([
        pad(&record.name),
        pad(record.size.label()),
        pad(&format_timestamp(record.start)?),
        pad(&format_timestamp(record.end)?),
        pad(&record.description),
    ]
    .concat())
}

/// Inverse of `format_row`. The first four fields are fixed 22-character
/// slices; the description runs from the fifth column to the end of the line
/// so values longer than one column survive a round trip. Offsets are in
/// characters, matching the char-count padding on the write side.
fn parse_row(line: &str) -> Result<TaskRecord, AppError> {
    let chars: Vec<char> = line.chars().collect();
    if chars.len() < 4 * COLUMN_WIDTH {
        return Err(AppError::corrupt_log(format!("Malformed task row: {line}")));
    }

    let field = |index: usize| -> String {
        chars[index * COLUMN_WIDTH..(index + 1) * COLUMN_WIDTH]
            .iter()
            .collect::<String>()
            .trim_end()
            .to_string()
    };

    let name = field(0);
    let size_token = field(1);
    let size = TaskSize::parse(&size_token)
        .ok_or_else(|| AppError::corrupt_log(format!("Invalid size: {size_token}")))?;
    let start = parse_timestamp(&field(2))?;
    let end = parse_timestamp(&field(3))?;
    let description = chars[4 * COLUMN_WIDTH..]
        .iter()
        .collect::<String>()
        .trim_end()
        .to_string();

    Ok(TaskRecord::from_parts(name, size, start, end, description))
}

/// Parses the full log file. Operation-log lines are kept verbatim; task rows
/// are decoded. The file must contain the `Operation Log:` marker and the
/// column-header row exactly once each.
pub fn parse(content: &str) -> Result<TaskStore, AppError> {
    let header = task_table_header();
    let mut operations = Vec::new();
    let mut records = Vec::new();
    let mut op_markers = 0;
    let mut header_markers = 0;
    let mut in_op_log = false;
    let mut in_summary = false;

    for line in content.lines() {
        if line.starts_with(OP_LOG_HEADER) {
            op_markers += 1;
            in_op_log = true;
            in_summary = false;
            continue;
        }
        if line == header {
            header_markers += 1;
            in_op_log = false;
            in_summary = true;
            continue;
        }
        if line.starts_with(TASK_SUMMARY_HEADER) || line.trim().is_empty() {
            continue;
        }

        if in_op_log {
            operations.push(line.to_string());
        } else if in_summary {
            records.push(parse_row(line)?);
        }
    }

    if op_markers != 1 || header_markers != 1 {
        return Err(AppError::corrupt_log(
            "Invalid Log file. A good log file should contain Operation Log and Task Summary",
        ));
    }

    Ok(TaskStore::new(operations, records))
}

/// Renders the entire file content from scratch; there is no append mode.
pub fn render(store: &TaskStore) -> Result<String, AppError> {
    let mut out = String::new();
    out.push_str(OP_LOG_HEADER);
    out.push('\n');
    for line in store.operations() {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(TASK_SUMMARY_HEADER);
    out.push('\n');
    out.push_str(&task_table_header());
    out.push('\n');
    for record in store.records() {
        out.push_str(&format_row(record)?);
        out.push('\n');
    }
    Ok(out)
}
