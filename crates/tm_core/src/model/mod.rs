mod record;

pub use record::{
    COLUMN_WIDTH, MAX_NAME_LEN, MIN_TIME, TaskRecord, TaskSize, UNDEFINED_MARKER, pad,
};
