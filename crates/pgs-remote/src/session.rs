//! The serialized session driver.

use std::collections::VecDeque;
use std::sync::Arc;

use futures_util::future::join_all;

use pgs_editor::{Editor, EditorState, Effect, Message};

use crate::api::PolygonApi;
use crate::{loader, sync};

/// Single logical owner of the editor state.
///
/// `process` applies each message fully before considering the next one
/// and feeds effect completions back through the same loop, so a result
/// merge can never race another merge. The network calls requested by one
/// applied message still run concurrently with each other (the save
/// cycle's fan-out lives below this loop, in [`sync::save`]).
pub struct Session {
    editor: Editor,
    api: Arc<dyn PolygonApi>,
}

impl Session {
    #[must_use]
    pub fn new(api: Arc<dyn PolygonApi>) -> Self {
        Self {
            editor: Editor::new(),
            api,
        }
    }

    /// Read-only projection of the current snapshot.
    #[must_use]
    pub fn state(&self) -> Arc<EditorState> {
        self.editor.state()
    }

    /// Apply a message and run every effect it (transitively) requests.
    pub async fn process(&mut self, message: Message) {
        let mut queue = VecDeque::from([message]);
        while let Some(message) = queue.pop_front() {
            let effects = self.editor.apply(message);
            if effects.is_empty() {
                continue;
            }
            let api = Arc::clone(&self.api);
            let completions = join_all(
                effects
                    .into_iter()
                    .map(|effect| run_effect(Arc::clone(&api), effect)),
            )
            .await;
            queue.extend(completions);
        }
    }
}

async fn run_effect(api: Arc<dyn PolygonApi>, effect: Effect) -> Message {
    match effect {
        Effect::FetchLayerFeatures(layer_id) => {
            loader::fetch_layer_features(api.as_ref(), layer_id).await
        }
        Effect::FetchAllFeatures => loader::fetch_all_features(api.as_ref()).await,
        Effect::FetchLayerCatalog => loader::fetch_layer_catalog(api.as_ref()).await,
        Effect::Save {
            features,
            deleted_ids,
        } => Message::SaveCompleted(sync::save(api.as_ref(), &features, &deleted_ids).await),
    }
}
