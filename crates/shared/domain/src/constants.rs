//! Domain-level constants.
//!
//! These constants define query conventions and column limits.

// =============================================================================
// Filtering
// =============================================================================

/// Default field used for ordering filter results
pub const DEFAULT_ORDER_BY: &str = "id";

/// Prefix turning an equality filter value into "not equal"
pub const NEGATION_MARKER: char = '!';

/// Filter parameter holding a free-text name search
pub const QUERY_PARAM: &str = "query";

/// Filter parameter holding an exact (or negated) email match
pub const EMAIL_PARAM: &str = "email";

/// Largest offset or limit a query can carry (`i64::MAX`)
pub const MAX_PAGE_BOUND: u64 = i64::MAX as u64;

// =============================================================================
// Column limits
// =============================================================================

/// Maximum length of a named item's name
pub const MAX_NAME_LENGTH: u32 = 50;

/// Maximum length of an email address (RFC 3696 errata)
pub const MAX_EMAIL_LENGTH: u32 = 320;

/// Maximum length of a stored password
pub const MAX_PASSWORD_LENGTH: u32 = 128;
