//! Shared constants and invariants

/// How much to compensate for clock skew between token issuer and verifier
pub const DEFAULT_TIME_SKEW_SECS: i64 = 180;

/// Wire format for token timestamps: strftime-style, UTC, second precision.
/// Writer and reader must agree on it.
pub const DEFAULT_WIRE_TIME_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Token lifetime when the settings file does not set one
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

/// Cache files hold bearer material, so they are written owner-only
#[cfg(unix)]
pub const CACHE_FILE_MODE: u32 = 0o600;
