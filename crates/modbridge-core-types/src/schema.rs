//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_SESSION_ID: &str = "session_id";

// Entity identifiers
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_MISSING_KEY: &str = "missing_key";
pub const FIELD_REPLACEMENT_KEY: &str = "replacement_key";
pub const FIELD_PATH: &str = "path";

// Collection sizes
pub const FIELD_MISSING_COUNT: &str = "missing_count";
pub const FIELD_RESOLVED_COUNT: &str = "resolved_count";
pub const FIELD_REMAINING_COUNT: &str = "remaining_count";
pub const FIELD_POOL_LEN: &str = "pool_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
