//! Core trait definitions for frame classification
//!
//! The cleaner only needs to know whether a cleaned frame belongs to
//! framework code. How that is decided is pluggable.

/// Decides whether a frame belongs to framework (non-application) code
///
/// Implementations look at the cleaned frame text only. They must not
/// depend on where the frame sits in the trace.
pub trait FrameMatcher: Send + Sync {
    /// Whether `frame` is framework code
    fn matches(&self, frame: &str) -> bool;

    /// Human readable description, used in `config show` and debug logs
    fn describe(&self) -> String;
}

impl<M: FrameMatcher + ?Sized> FrameMatcher for Box<M> {
    fn matches(&self, frame: &str) -> bool {
        (**self).matches(frame)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
