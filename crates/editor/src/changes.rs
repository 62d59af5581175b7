//! Unsaved-change detection.

use pagecraft_core::SlotConfiguration;

/// Tracks whether the in-memory document differs from the last saved one.
///
/// Before the first snapshot is recorded nothing counts as a change, so a
/// document that is still loading never shows as dirty.
#[derive(Debug, Clone, Default)]
pub struct ChangeTracker {
    last_saved: Option<SlotConfiguration>,
    has_unsaved_changes: bool,
}

impl ChangeTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_saved: None,
            has_unsaved_changes: false,
        }
    }

    /// Whether a snapshot has been recorded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.last_saved.is_some()
    }

    #[must_use]
    pub const fn has_unsaved_changes(&self) -> bool {
        self.has_unsaved_changes
    }

    /// The last saved document.
    #[must_use]
    pub const fn last_saved(&self) -> Option<&SlotConfiguration> {
        self.last_saved.as_ref()
    }

    /// Record `saved` as the new baseline and clear the dirty flag.
    pub fn update_last_saved(&mut self, saved: &SlotConfiguration) {
        self.last_saved = Some(saved.clone());
        self.has_unsaved_changes = false;
    }

    /// Compare `current` with the baseline and return the dirty flag.
    ///
    /// Metadata is not compared.
    pub fn observe(&mut self, current: &SlotConfiguration) -> bool {
        self.has_unsaved_changes = self
            .last_saved
            .as_ref()
            .is_some_and(|saved| !saved.same_layout(current));
        self.has_unsaved_changes
    }

    /// Forget the baseline (e.g. while a document is being reloaded).
    pub fn clear(&mut self) {
        self.last_saved = None;
        self.has_unsaved_changes = false;
    }
}
