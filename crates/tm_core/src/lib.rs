pub mod config;
pub mod error;
pub mod model;
pub mod storage;
pub mod store;
pub mod task_api;

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::model::{MIN_TIME, TaskRecord, TaskSize};
    use time::macros::datetime;

    #[test]
    fn record_has_required_fields() {
        let record = TaskRecord::open("report", datetime!(2024-03-01 9:00));

        assert_eq!(record.name, "report");
        assert_eq!(record.size, TaskSize::Undefined);
        assert_eq!(record.start, datetime!(2024-03-01 9:00));
        assert_eq!(record.end, MIN_TIME);
        assert_eq!(record.description, "UNDEFINED");
    }

    #[test]
    fn app_error_exposes_code() {
        let err = AppError::state_conflict("Task is running");
        assert_eq!(err.code(), "state_conflict");
        assert_eq!(err.to_string(), "state_conflict - Task is running");
    }
}
