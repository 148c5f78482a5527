//! Edit error types.

/// Error applying an edit.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// The page does not exist in the collection.
    #[error("page not found: {0}")]
    PageNotFound(String),

    /// The content section does not exist in the page.
    #[error("section not found: {0}")]
    SectionNotFound(String),

    /// No image at the given position.
    #[error("image index {index} out of range (len {len})")]
    ImageIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of images in the target.
        len: usize,
    },

    /// A field path or image target string could not be parsed.
    #[error("invalid path: {0}")]
    InvalidPath(String),
}
