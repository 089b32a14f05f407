//! Studio: the single controller that owns the collection, the selection and
//! the last build, and drives the generation gateway on the user's behalf.

use std::path::Path;
use std::sync::Arc;

use cardsmith_types::card::{Card, CardId};
use cardsmith_types::error::{ExportError, StudioError};
use cardsmith_types::generation::Artifact;
use tracing::{debug, info, warn};

use crate::card::selection::{SelectionState, ToggleOutcome};
use crate::card::store::CardStore;
use crate::generation::assembler::AssemblyRequest;
use crate::generation::gateway::GenerationGateway;
use crate::service::fs::FileSystem;
use crate::storage::blob_store::BlobStore;

pub struct Studio<B: BlobStore> {
    store: CardStore<B>,
    selection: SelectionState,
    gateway: Arc<GenerationGateway>,
    artifact: Option<Artifact>,
}

impl<B: BlobStore> Studio<B> {
    pub fn new(store: CardStore<B>, gateway: Arc<GenerationGateway>) -> Self {
        Self {
            store,
            selection: SelectionState::new(),
            gateway,
            artifact: None,
        }
    }

    pub fn store(&self) -> &CardStore<B> {
        &self.store
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Slot-scoped removals (`clear_structural`, `clear_theme`, `remove_voice`).
    pub fn selection_mut(&mut self) -> &mut SelectionState {
        &mut self.selection
    }

    pub fn gateway(&self) -> &GenerationGateway {
        &self.gateway
    }

    /// The most recent build, forwarded as context to the next one.
    pub fn artifact(&self) -> Option<&Artifact> {
        self.artifact.as_ref()
    }

    /// Seed the previous build, e.g. from a file saved by an earlier session.
    pub fn set_previous_artifact(&mut self, artifact: Artifact) {
        self.artifact = Some(artifact);
    }

    /// Toggle a card by id. Unknown ids return `None` and change nothing.
    pub fn toggle(&mut self, id: &CardId) -> Option<ToggleOutcome> {
        let card = self.store.get(id)?;
        Some(self.selection.toggle(card))
    }

    /// Selected cards in assembly order.
    pub fn active_cards(&self) -> Vec<&Card> {
        self.selection.combined_active(&self.store)
    }

    /// Draw a pack and add it to the collection. Returns the new cards.
    pub async fn draw_pack(&mut self) -> Result<Vec<Card>, StudioError> {
        let result = self.gateway.draw_pack().await;
        self.gateway.acknowledge();
        let cards = result.inspect_err(|e| warn!(error = %e, "pack draw failed"))?;

        self.store
            .append(cards.clone())
            .await
            .inspect_err(|e| warn!(error = %e, "failed to store drawn pack"))?;
        Ok(cards)
    }

    /// Forge a card from a description and add it to the collection.
    ///
    /// A blank description is ignored (`Ok(None)`); no call is made.
    pub async fn forge(&mut self, description: &str) -> Result<Option<Card>, StudioError> {
        if description.trim().is_empty() {
            debug!("forge skipped: empty description");
            return Ok(None);
        }

        let result = self.gateway.forge(description).await;
        self.gateway.acknowledge();
        let card = result.inspect_err(|e| warn!(error = %e, "forge failed"))?;

        self.store
            .append(vec![card.clone()])
            .await
            .inspect_err(|e| warn!(error = %e, "failed to store forged card"))?;
        Ok(Some(card))
    }

    /// Build a site from the active cards and the previous build, if any.
    ///
    /// A blank prompt is ignored (`Ok(None)`); no call is made. On success the
    /// new artifact replaces the previous one.
    pub async fn build(&mut self, prompt: &str) -> Result<Option<&Artifact>, StudioError> {
        if prompt.trim().is_empty() {
            debug!("build skipped: empty prompt");
            return Ok(None);
        }

        let request =
            AssemblyRequest::from_active(prompt, self.active_cards(), self.artifact.clone());
        let result = self.gateway.assemble(&request).await;
        self.gateway.acknowledge();
        let artifact = result.inspect_err(|e| warn!(error = %e, "build failed"))?;

        Ok(Some(self.artifact.insert(artifact)))
    }

    /// Forget the previous build so the next one starts fresh.
    pub fn reset_artifact(&mut self) {
        self.artifact = None;
    }

    /// Write the current build to `path` as a standalone document.
    pub async fn export_artifact<F: FileSystem>(
        &self,
        fs: &F,
        path: &Path,
    ) -> Result<(), ExportError> {
        let artifact = self.artifact.as_ref().ok_or(ExportError::NothingToExport)?;
        fs.write_file(path, artifact.as_str())
            .await
            .map_err(|source| ExportError::Io {
                path: path.display().to_string(),
                source,
            })?;
        info!(path = %path.display(), bytes = artifact.len(), "exported site");
        Ok(())
    }
}
