use crate::shared::Result;

/// OutputPresenter port for the destination of formatted output
/// (stdout, a file, ...)
pub trait OutputPresenter {
    /// # Errors
    /// Returns an error if writing to the destination fails
    fn present(&self, content: &str) -> Result<()>;
}
