use thiserror::Error;

/// Errors raised while validating [`ParseOptions`](crate::ParseOptions).
///
/// Parsing itself never fails; only consumer-supplied configuration can.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid file base name pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
