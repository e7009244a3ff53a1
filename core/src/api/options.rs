//! Configuration options for codecs.

/// Limits and strictness applied while decoding.
///
/// Encoding is not affected by any option.
///
/// # Example
///
/// ```
/// use binschema_core::api::CodecOptions;
///
/// let options = CodecOptions {
///     max_sequence_len: 1 << 16,
///     strict_strings: true,
/// };
/// assert!(options.max_sequence_len < CodecOptions::default().max_sequence_len);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Largest element count accepted in a vector's length prefix.
    ///
    /// Default: `u32::MAX`
    pub max_sequence_len: u64,

    /// Reject strings that reach the end of the buffer without a NUL
    /// terminator. When false such a string simply ends there.
    ///
    /// Default: false
    pub strict_strings: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            max_sequence_len: u32::MAX as u64,
            strict_strings: false,
        }
    }
}
