//! Exit code constants for the deslang CLI.
//!
//! - 0: Success (including interrupted review sessions, which flush and exit cleanly)
//! - 1: User error (bad args, missing artifacts, missing credentials)
//! - 2: Dataset format failure (malformed CSV row or missing column)
//! - 3: Generation service failure (only reachable when a retry cap is configured)
//! - 4: Persistence failure (artifact or corpus could not be written)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, missing input artifacts, or missing credentials.
pub const USER_ERROR: i32 = 1;

/// Dataset format failure: a source record is missing a required field.
pub const DATA_FORMAT_FAILURE: i32 = 2;

/// Generation service failure: the configured retry cap was exhausted.
pub const SERVICE_FAILURE: i32 = 3;

/// Persistence failure: an output artifact could not be written.
pub const PERSISTENCE_FAILURE: i32 = 4;
