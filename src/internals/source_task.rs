use std::error::Error;

/// Boxed error returned by collaborators the runtime calls into.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// A running source Task, as far as offset committing is concerned.
///
/// [`Self::commit_offsets`] is called periodically from a blocking-friendly thread:
/// it can perform I/O and block while doing so.
pub trait SourceTask: Send + Sync + 'static {
    /// Commit the offsets of all the records processed so far.
    ///
    /// Returns `Ok(true)` if offsets were committed, `Ok(false)` if they could not be.
    fn commit_offsets(&self) -> Result<bool, BoxError>;
}
