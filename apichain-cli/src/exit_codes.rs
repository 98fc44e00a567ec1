/// Process exit codes, stable for CI use.
pub const SUCCESS: i32 = 0;
/// The input could not be parsed or failed lint.
pub const VALIDATION_FAILED: i32 = 2;
/// A step missed its expectation or the run aborted.
pub const RUN_FAILED: i32 = 3;
pub const RUNTIME_ERROR: i32 = 4;
