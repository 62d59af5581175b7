//! The editing session for one page of one store.
//!
//! A session loads a document (draft, then published, then the page-type
//! defaults, then an empty slot set), tracks unsaved changes against the last
//! saved snapshot and exposes save, publish, reset and revert. Every handler
//! records a flash message, including on failure, and a failed handler never
//! moves the snapshot.

use std::sync::Arc;

use pagecraft_core::{
    PageType, PublishedVersion, SlotConfiguration, SlotConfigurationService, StoreId,
    VersionSummary,
};
use tracing::{error, info, instrument, warn};

use crate::changes::ChangeTracker;
use crate::error::{EditorError, EditorResult};
use crate::mirror::{MirrorRules, SlotEdit};

/// Where the loaded document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Draft,
    Published,
    Defaults,
    /// Nothing could be fetched; an empty slot set is shown.
    Empty,
}

/// Whether the session holds unsaved changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Clean,
    Dirty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

/// A dismissible status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub text: String,
}

impl FlashMessage {
    fn new(kind: FlashKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Editing session for `(store_id, page_type)`.
pub struct SlotEditor<S> {
    service: Arc<S>,
    store_id: StoreId,
    page_type: PageType,
    mirror: MirrorRules,
    configuration: Option<SlotConfiguration>,
    source: Option<LoadSource>,
    tracker: ChangeTracker,
    flash: Option<FlashMessage>,
}

impl<S> std::fmt::Debug for SlotEditor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotEditor")
            .field("store_id", &self.store_id)
            .field("page_type", &self.page_type)
            .field("source", &self.source)
            .field("dirty", &self.tracker.has_unsaved_changes())
            .field("flash", &self.flash)
            .finish_non_exhaustive()
    }
}

impl<S: SlotConfigurationService> SlotEditor<S> {
    /// Create an unloaded session mirroring every repeated family.
    #[must_use]
    pub fn new(service: Arc<S>, store_id: StoreId, page_type: PageType) -> Self {
        Self::with_mirror_rules(service, store_id, page_type, MirrorRules::all())
    }

    /// Create an unloaded session with explicit mirror rules.
    #[must_use]
    pub const fn with_mirror_rules(
        service: Arc<S>,
        store_id: StoreId,
        page_type: PageType,
        mirror: MirrorRules,
    ) -> Self {
        Self {
            service,
            store_id,
            page_type,
            mirror,
            configuration: None,
            source: None,
            tracker: ChangeTracker::new(),
            flash: None,
        }
    }

    #[must_use]
    pub const fn store_id(&self) -> StoreId {
        self.store_id
    }

    #[must_use]
    pub const fn page_type(&self) -> PageType {
        self.page_type
    }

    /// The in-memory document, once loaded.
    #[must_use]
    pub const fn configuration(&self) -> Option<&SlotConfiguration> {
        self.configuration.as_ref()
    }

    /// Where the current document was loaded from.
    #[must_use]
    pub const fn source(&self) -> Option<LoadSource> {
        self.source
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.configuration.is_some()
    }

    #[must_use]
    pub const fn has_unsaved_changes(&self) -> bool {
        self.tracker.has_unsaved_changes()
    }

    #[must_use]
    pub const fn state(&self) -> EditorState {
        if self.tracker.has_unsaved_changes() {
            EditorState::Dirty
        } else {
            EditorState::Clean
        }
    }

    /// The last saved snapshot.
    #[must_use]
    pub const fn last_saved(&self) -> Option<&SlotConfiguration> {
        self.tracker.last_saved()
    }

    #[must_use]
    pub const fn mirror_rules(&self) -> &MirrorRules {
        &self.mirror
    }

    #[must_use]
    pub const fn flash(&self) -> Option<&FlashMessage> {
        self.flash.as_ref()
    }

    /// Dismiss the current flash message.
    pub fn dismiss_flash(&mut self) {
        self.flash = None;
    }

    fn set_flash(&mut self, kind: FlashKind, text: impl Into<String>) {
        self.flash = Some(FlashMessage::new(kind, text));
    }

    fn fail(&mut self, action: &str, err: impl Into<EditorError>) -> EditorError {
        let err = err.into();
        error!(error = %err, store_id = %self.store_id, page_type = %self.page_type, "Failed to {action}");
        self.set_flash(FlashKind::Error, format!("Failed to {action}: {err}"));
        err
    }

    /// Replace the document and snapshot with `configuration`.
    fn install(&mut self, configuration: SlotConfiguration, source: Option<LoadSource>) {
        self.tracker.update_last_saved(&configuration);
        self.configuration = Some(configuration);
        if source.is_some() {
            self.source = source;
        }
    }

    /// Published document, then defaults, then an empty slot set.
    async fn published_or_default(&self) -> EditorResult<(SlotConfiguration, LoadSource)> {
        if let Some(published) = self
            .service
            .get_published(self.store_id, self.page_type)
            .await?
        {
            return Ok((published, LoadSource::Published));
        }

        match self.service.get_defaults(self.page_type).await {
            Ok(defaults) => Ok((defaults, LoadSource::Defaults)),
            Err(e) => {
                warn!(error = %e, page_type = %self.page_type, "Defaults unavailable, using empty slot set");
                Ok((SlotConfiguration::empty(self.page_type), LoadSource::Empty))
            }
        }
    }

    /// Load the draft, falling back to published, defaults, then empty.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::Service` if the draft or published lookup
    /// fails. The previous document (if any) is kept.
    #[instrument(skip(self), fields(store_id = %self.store_id, page_type = %self.page_type))]
    pub async fn load(&mut self) -> EditorResult<LoadSource> {
        let loaded = match self.service.get_draft(self.store_id, self.page_type).await {
            Ok(Some(draft)) => Ok((draft, LoadSource::Draft)),
            Ok(None) => self.published_or_default().await,
            Err(e) => Err(e.into()),
        };

        match loaded {
            Ok((configuration, source)) => {
                info!(?source, slots = configuration.slots.len(), "Configuration loaded");
                self.install(configuration, Some(source));
                Ok(source)
            }
            Err(e) => Err(self.fail("load configuration", e)),
        }
    }

    /// Apply a slot edit and mirror it to the slot's group.
    ///
    /// Returns the ids that changed.
    ///
    /// # Errors
    ///
    /// Returns `NotLoaded` before `load`, `UnknownSlot` if `id` is missing.
    pub fn edit(&mut self, id: &str, edit: SlotEdit) -> EditorResult<Vec<String>> {
        let configuration = self.configuration.as_mut().ok_or(EditorError::NotLoaded)?;
        let changed = self
            .mirror
            .apply(configuration, id, edit)
            .ok_or_else(|| EditorError::UnknownSlot(id.to_owned()))?;
        self.tracker.observe(configuration);
        Ok(changed)
    }

    /// Mutate the document directly (add or remove slots, edit views...).
    ///
    /// # Errors
    ///
    /// Returns `NotLoaded` before `load`.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut SlotConfiguration) -> R) -> EditorResult<R> {
        let configuration = self.configuration.as_mut().ok_or(EditorError::NotLoaded)?;
        let result = f(configuration);
        self.tracker.observe(configuration);
        Ok(result)
    }

    /// Save the document as the draft.
    ///
    /// # Errors
    ///
    /// Returns the service error; the document stays dirty.
    #[instrument(skip(self), fields(store_id = %self.store_id, page_type = %self.page_type))]
    pub async fn save(&mut self) -> EditorResult<SlotConfiguration> {
        let Some(configuration) = self.configuration.clone() else {
            return Err(self.fail("save draft", EditorError::NotLoaded));
        };

        match self
            .service
            .save_draft(self.store_id, &configuration, self.page_type)
            .await
        {
            Ok(saved) => {
                info!(slots = saved.slots.len(), "Draft saved");
                self.install(saved.clone(), None);
                self.set_flash(FlashKind::Success, "Draft saved");
                Ok(saved)
            }
            Err(e) => Err(self.fail("save draft", e)),
        }
    }

    /// Save the document, then publish it.
    ///
    /// # Errors
    ///
    /// Returns the first failing service error. Nothing moves on failure:
    /// the document stays dirty if it was.
    #[instrument(skip(self), fields(store_id = %self.store_id, page_type = %self.page_type))]
    pub async fn publish(&mut self) -> EditorResult<PublishedVersion> {
        let Some(configuration) = self.configuration.clone() else {
            return Err(self.fail("publish", EditorError::NotLoaded));
        };

        let saved = match self
            .service
            .save_draft(self.store_id, &configuration, self.page_type)
            .await
        {
            Ok(saved) => saved,
            Err(e) => return Err(self.fail("publish", e)),
        };

        match self.service.publish(self.store_id, self.page_type).await {
            Ok(published) => {
                info!(version = published.version, "Configuration published");
                self.install(saved, None);
                self.set_flash(
                    FlashKind::Success,
                    format!("Published version {}", published.version),
                );
                Ok(published)
            }
            Err(e) => Err(self.fail("publish", e)),
        }
    }

    /// Discard the draft and reload the published document (or defaults).
    ///
    /// # Errors
    ///
    /// Returns the service error if the draft cannot be discarded or the
    /// published lookup fails; the in-memory document is kept.
    #[instrument(skip(self), fields(store_id = %self.store_id, page_type = %self.page_type))]
    pub async fn reset(&mut self) -> EditorResult<LoadSource> {
        if let Err(e) = self
            .service
            .discard_draft(self.store_id, self.page_type)
            .await
        {
            return Err(self.fail("reset changes", e));
        }

        match self.published_or_default().await {
            Ok((configuration, source)) => {
                info!(?source, "Draft discarded");
                self.install(configuration, Some(source));
                let text = match source {
                    LoadSource::Published => "Changes discarded, showing the published layout",
                    _ => "Changes discarded, showing the default layout",
                };
                self.set_flash(FlashKind::Info, text);
                Ok(source)
            }
            Err(e) => Err(self.fail("reset changes", e)),
        }
    }

    /// Replace the draft with a published version.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` (wrapped) if the version is not kept.
    #[instrument(skip(self), fields(store_id = %self.store_id, page_type = %self.page_type))]
    pub async fn revert(&mut self, version: u32) -> EditorResult<SlotConfiguration> {
        match self
            .service
            .revert_to_version(self.store_id, self.page_type, version)
            .await
        {
            Ok(draft) => {
                info!(version, "Draft reverted");
                self.install(draft.clone(), Some(LoadSource::Draft));
                self.set_flash(
                    FlashKind::Success,
                    format!("Draft reverted to version {version}"),
                );
                Ok(draft)
            }
            Err(e) => Err(self.fail("revert", e)),
        }
    }

    /// Published history, newest first.
    ///
    /// # Errors
    ///
    /// Returns the service error; no flash is recorded.
    pub async fn versions(&self) -> EditorResult<Vec<VersionSummary>> {
        Ok(self
            .service
            .list_versions(self.store_id, self.page_type)
            .await?)
    }
}
