//! Fetch bridge: runs the [`FetchPipeline`] off the UI loop.
//!
//! Each fetch is a one-shot background task that reports its outcome as an
//! [`Action::CatalogLoaded`] tagged with the generation it was started for.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use atlas_core::FetchPipeline;

use crate::action::Action;

/// Spawn one fetch for `generation`.
///
/// The task ends when the pipeline returns or `cancel` fires, whichever
/// comes first. A cancelled fetch reports nothing.
pub fn spawn_fetch(
    pipeline: Arc<FetchPipeline>,
    generation: u64,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    tokio::spawn(async move {
        debug!(generation, "fetch started");
        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(generation, "fetch cancelled");
                return;
            }
            result = pipeline.run() => result,
        };

        if action_tx
            .send(Action::CatalogLoaded { generation, result })
            .is_err()
        {
            warn!(generation, "fetch finished after the UI shut down");
        }
    });
}
