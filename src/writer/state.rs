//! Writer states.

use strum::Display;

/// The states of the writer's state machine.
///
/// The writer starts in [`WriterState::Start`], moves through nested payload states as
/// scopes open and close, and finishes in [`WriterState::Completed`]. Any validation
/// failure moves it to the terminal [`WriterState::Error`] state, from which no further
/// writes are permitted. State names appear verbatim in transition error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum WriterState {
    /// Nothing has been written yet.
    Start,
    /// A resource set is open; only resources may be written into it.
    ResourceSet,
    /// A resource is open; properties were written, nested resource infos may follow.
    Resource,
    /// A null resource was written as nested singleton content.
    NullResource,
    /// A nested resource info is open and has no content yet.
    NestedResourceInfo,
    /// A nested resource info is open and already has content.
    NestedResourceInfoWithContent,
    /// An entity reference link is being written.
    EntityReferenceLink,
    /// The payload is complete; only `finish` is valid.
    Completed,
    /// Terminal error state; the output stream must be abandoned.
    Error,
}

impl WriterState {
    /// Returns `true` for the two states that accept no further payload writes.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, WriterState::Completed | WriterState::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_names_used_in_messages() {
        assert_eq!(WriterState::ResourceSet.to_string(), "ResourceSet");
        assert_eq!(
            WriterState::NestedResourceInfoWithContent.to_string(),
            "NestedResourceInfoWithContent"
        );
    }

    #[test]
    fn test_terminal_states() {
        assert!(WriterState::Completed.is_terminal());
        assert!(WriterState::Error.is_terminal());
        assert!(!WriterState::Start.is_terminal());
    }
}
