//! Security and performance limits for the rule engine
//!
//! Rule files come from user and project directories, so every input that
//! feeds a compiler (regex, glob) or a reader is bounded.

/// Maximum size for TOML rule files (1MB)
pub const MAX_TOML_FILE_SIZE: u64 = 1_048_576; // 1MB

/// Maximum regex pattern length (500 characters)
///
/// Longer patterns are almost always malformed and invite ReDoS.
pub const MAX_REGEX_LENGTH: usize = 500;

/// Compiled regex size limit (10MB)
pub const REGEX_SIZE_LIMIT: usize = 10_000_000; // 10MB

/// Regex DFA size limit (2MB)
pub const REGEX_DFA_SIZE_LIMIT: usize = 2_000_000; // 2MB

/// Maximum glob pattern length
pub const MAX_GLOB_LENGTH: usize = 200;

/// Maximum number of module patterns in a single matcher list
pub const MAX_MODULE_PATTERNS: usize = 64;

/// Maximum directory traversal depth (10 levels)
pub const MAX_DIRECTORY_DEPTH: usize = 10;
