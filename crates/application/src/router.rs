//! Command router.
//!
//! One router instance serves one session. Inbound commands are
//! processed one at a time: each mutating command reads the persisted
//! list, applies a single store operation, writes the list back, and
//! emits exactly one push to the view. Send commands never touch the
//! store and run on their own task so a slow call cannot hold up
//! collection management.

use std::sync::Arc;

use nectar_domain::{Collection, StoreError, StoredRequest, store};

use crate::error::ApplicationResult;
use crate::execute_request::{RequestExecutor, SendInput};
use crate::ports::{CollectionStorage, HttpClient, NamePrompt, ViewSink};
use crate::protocol::{Command, ViewPush};
use crate::selection::{CommandOutcome, Selection, selection_for};

/// Routes view commands to the store, storage, and executor.
pub struct Router<S, C: HttpClient, P, V> {
    storage: S,
    executor: RequestExecutor<C>,
    prompt: P,
    view: Arc<V>,
    selection: Selection,
}

impl<S, C, P, V> Router<S, C, P, V>
where
    S: CollectionStorage,
    C: HttpClient + 'static,
    P: NamePrompt,
    V: ViewSink + 'static,
{
    /// Creates a router over the given capabilities.
    pub fn new(storage: S, client: C, prompt: P, view: Arc<V>) -> Self {
        Self {
            storage,
            executor: RequestExecutor::new(Arc::new(client)),
            prompt,
            view,
            selection: Selection::default(),
        }
    }

    /// The session's current selection. Ephemeral, never persisted.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Handles one inbound command.
    ///
    /// Store-level failures (empty names, unknown targets) degrade to
    /// silent no-ops; a cancelled name prompt aborts with no state
    /// change and no push.
    ///
    /// # Errors
    ///
    /// Returns an error only when the persistence layer fails; the
    /// session stays usable afterwards.
    pub async fn handle(&mut self, command: Command) -> ApplicationResult<()> {
        match command {
            Command::GetCollections => self.list_collections().await,
            Command::SendRequest {
                url,
                method,
                headers,
                body,
            } => {
                self.spawn_send(SendInput {
                    url,
                    method,
                    headers,
                    body,
                });
                Ok(())
            }
            Command::AddCollection => self.add_collection().await,
            Command::RenameCollection { id } => self.rename_collection(&id).await,
            Command::DeleteCollection { id } => self.delete_collection(&id).await,
            Command::AddRequest { collection_id } => self.add_request(&collection_id).await,
            Command::RenameRequest {
                collection_id,
                request_id,
            } => self.rename_request(&collection_id, &request_id).await,
            Command::DeleteRequest {
                collection_id,
                request_id,
            } => self.delete_request(&collection_id, &request_id).await,
            Command::UpdateRequest {
                collection_id,
                request,
            } => self.update_request(&collection_id, request).await,
        }
    }

    async fn list_collections(&mut self) -> ApplicationResult<()> {
        let list = self.storage.load().await?;
        self.finish(list, &CommandOutcome::Listed).await
    }

    async fn add_collection(&mut self) -> ApplicationResult<()> {
        let Some(name) = self.prompt_name("Collection name", None).await else {
            return Ok(());
        };
        let list = self.storage.load().await?;
        let (list, collection) = match store::add_collection(list, &name) {
            Ok(added) => added,
            Err(error) => return Self::skip("addCollection", &error),
        };
        self.storage.save(&list).await?;
        self.finish(list, &CommandOutcome::CollectionAdded { id: &collection.id })
            .await
    }

    async fn rename_collection(&mut self, id: &str) -> ApplicationResult<()> {
        let list = self.storage.load().await?;
        let Some(current) = list.iter().find(|c| c.id == id).map(|c| c.name.clone()) else {
            tracing::debug!(id, "renameCollection target missing");
            return Ok(());
        };
        let Some(name) = self.prompt_name("New collection name", Some(&current)).await else {
            return Ok(());
        };
        let list = match store::rename_collection(list, id, &name) {
            Ok(list) => list,
            Err(error) => return Self::skip("renameCollection", &error),
        };
        self.storage.save(&list).await?;
        self.finish(list, &CommandOutcome::CollectionRenamed).await
    }

    async fn delete_collection(&mut self, id: &str) -> ApplicationResult<()> {
        let list = self.storage.load().await?;
        let list = store::delete_collection(list, id);
        self.storage.save(&list).await?;
        self.finish(list, &CommandOutcome::CollectionDeleted).await
    }

    async fn add_request(&mut self, collection_id: &str) -> ApplicationResult<()> {
        let list = self.storage.load().await?;
        if !list.iter().any(|c| c.id == collection_id) {
            tracing::debug!(collection_id, "addRequest target missing");
            return Ok(());
        }
        let Some(name) = self.prompt_name("Request name", Some("New Request")).await else {
            return Ok(());
        };
        let (list, request) = match store::add_request(list, collection_id, &name) {
            Ok(added) => added,
            Err(error) => return Self::skip("addRequest", &error),
        };
        self.storage.save(&list).await?;
        self.finish(
            list,
            &CommandOutcome::RequestAdded {
                collection_id,
                request_id: &request.id,
            },
        )
        .await
    }

    async fn rename_request(&mut self, collection_id: &str, request_id: &str) -> ApplicationResult<()> {
        let list = self.storage.load().await?;
        let current = list
            .iter()
            .find(|c| c.id == collection_id)
            .and_then(|c| c.request(request_id))
            .map(|r| r.name.clone());
        let Some(current) = current else {
            tracing::debug!(collection_id, request_id, "renameRequest target missing");
            return Ok(());
        };
        let Some(name) = self.prompt_name("New request name", Some(&current)).await else {
            return Ok(());
        };
        let list = match store::rename_request(list, collection_id, request_id, &name) {
            Ok(list) => list,
            Err(error) => return Self::skip("renameRequest", &error),
        };
        self.storage.save(&list).await?;
        self.finish(
            list,
            &CommandOutcome::RequestRenamed {
                collection_id,
                request_id,
            },
        )
        .await
    }

    async fn delete_request(&mut self, collection_id: &str, request_id: &str) -> ApplicationResult<()> {
        let list = self.storage.load().await?;
        let list = store::delete_request(list, collection_id, request_id);
        self.storage.save(&list).await?;
        self.finish(list, &CommandOutcome::RequestDeleted { collection_id })
            .await
    }

    async fn update_request(
        &mut self,
        collection_id: &str,
        request: StoredRequest,
    ) -> ApplicationResult<()> {
        let list = self.storage.load().await?;
        let list = match store::update_request(list, collection_id, request) {
            Ok(list) => list,
            Err(error) => return Self::skip("updateRequest", &error),
        };
        self.storage.save(&list).await?;
        self.finish(list, &CommandOutcome::RequestUpdated).await
    }

    /// Fires the send on its own task and returns immediately.
    fn spawn_send(&self, input: SendInput) {
        let executor = self.executor.clone();
        let view = Arc::clone(&self.view);
        tokio::spawn(async move {
            let response = executor.execute(input).await;
            view.push(ViewPush::response(response)).await;
        });
    }

    /// Applies the selection transition and emits the single push for a
    /// completed command.
    async fn finish(
        &mut self,
        list: Vec<Collection>,
        outcome: &CommandOutcome<'_>,
    ) -> ApplicationResult<()> {
        let update = selection_for(outcome);
        self.selection.apply(&update);
        self.view.push(ViewPush::collections(list, update)).await;
        Ok(())
    }

    /// Prompts for a name; cancelled and empty answers abort the
    /// command.
    async fn prompt_name(&self, message: &str, initial: Option<&str>) -> Option<String> {
        match self.prompt.request_name(message, initial).await {
            Some(name) if !name.is_empty() => Some(name),
            _ => {
                tracing::debug!(message, "name input cancelled");
                None
            }
        }
    }

    fn skip(command: &str, error: &StoreError) -> ApplicationResult<()> {
        tracing::debug!(command, %error, "command skipped");
        Ok(())
    }
}
