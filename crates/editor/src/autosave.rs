//! Debounced auto-save.
//!
//! [`AutoSaveEditor`] shares a [`SlotEditor`] with a single pending timer.
//! Each edit re-arms the timer; when it fires and the session is still
//! dirty, the draft is saved. Dropping the wrapper cancels the timer, so a
//! torn-down editor never saves in the background.

use std::sync::Arc;
use std::time::Duration;

use pagecraft_core::{SlotConfiguration, SlotConfigurationService};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::editor::SlotEditor;
use crate::error::EditorResult;
use crate::mirror::SlotEdit;

/// A single-shot timer that restarts on every `schedule`.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` after the delay, cancelling any task scheduled before.
    ///
    /// Must be called within a Tokio runtime.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    /// Cancel the pending task, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a task is scheduled and has not finished.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A [`SlotEditor`] that saves itself after edits settle.
pub struct AutoSaveEditor<S> {
    session: Arc<Mutex<SlotEditor<S>>>,
    debouncer: Debouncer,
}

impl<S> std::fmt::Debug for AutoSaveEditor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoSaveEditor")
            .field("debouncer", &self.debouncer)
            .finish_non_exhaustive()
    }
}

impl<S> AutoSaveEditor<S>
where
    S: SlotConfigurationService + 'static,
{
    #[must_use]
    pub fn new(editor: SlotEditor<S>, delay: Duration) -> Self {
        Self {
            session: Arc::new(Mutex::new(editor)),
            debouncer: Debouncer::new(delay),
        }
    }

    /// The shared session, for loading, publishing or reading state.
    #[must_use]
    pub fn session(&self) -> Arc<Mutex<SlotEditor<S>>> {
        Arc::clone(&self.session)
    }

    /// Whether an auto-save is scheduled.
    #[must_use]
    pub fn is_save_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Apply a slot edit and (re)arm the auto-save timer.
    ///
    /// # Errors
    ///
    /// See [`SlotEditor::edit`]. The timer is not armed on error.
    pub async fn edit(&mut self, id: &str, edit: SlotEdit) -> EditorResult<Vec<String>> {
        let changed = self.session.lock().await.edit(id, edit)?;
        self.arm();
        Ok(changed)
    }

    /// Mutate the document and (re)arm the auto-save timer.
    ///
    /// # Errors
    ///
    /// See [`SlotEditor::update`].
    pub async fn update<R>(
        &mut self,
        f: impl FnOnce(&mut SlotConfiguration) -> R,
    ) -> EditorResult<R> {
        let result = self.session.lock().await.update(f)?;
        self.arm();
        Ok(result)
    }

    /// Cancel the timer and save now if there are unsaved changes.
    ///
    /// # Errors
    ///
    /// See [`SlotEditor::save`].
    pub async fn flush(&mut self) -> EditorResult<()> {
        self.debouncer.cancel();
        let mut editor = self.session.lock().await;
        if editor.has_unsaved_changes() {
            editor.save().await?;
        }
        Ok(())
    }

    fn arm(&mut self) {
        let session = Arc::clone(&self.session);
        self.debouncer.schedule(async move {
            let mut editor = session.lock().await;
            if !editor.has_unsaved_changes() {
                debug!("Auto-save skipped, nothing to save");
                return;
            }
            if let Err(e) = editor.save().await {
                warn!(error = %e, "Auto-save failed");
            }
        });
    }
}
