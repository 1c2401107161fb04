//! Ordered background writer for store documents.
//!
//! Snapshots are written in commit order. A failed write keeps its snapshot
//! until a later write succeeds or a flush retries it.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use super::store::{StoreError, StoreResult};
use crate::task::{domain::StoreState, ports::StatePersistence};

/// Requests accepted by the writer task.
#[derive(Debug)]
pub(super) enum WriterCommand {
    /// Persist this snapshot.
    Save(Arc<StoreState>),
    /// Retry any unsaved snapshot and report the outcome.
    Flush(oneshot::Sender<StoreResult<()>>),
}

/// Starts the writer on the current runtime.
pub(super) fn spawn<P>(persistence: Arc<P>, slot: String) -> mpsc::UnboundedSender<WriterCommand>
where
    P: StatePersistence + ?Sized + 'static,
{
    let (sender, receiver) = mpsc::unbounded_channel();
    tokio::spawn(run(persistence, slot, receiver));
    sender
}

async fn run<P>(
    persistence: Arc<P>,
    slot: String,
    mut commands: mpsc::UnboundedReceiver<WriterCommand>,
) where
    P: StatePersistence + ?Sized,
{
    let mut unsaved: Option<Arc<StoreState>> = None;
    while let Some(command) = commands.recv().await {
        match command {
            WriterCommand::Save(state) => match write(&*persistence, &slot, &state).await {
                Ok(()) => unsaved = None,
                Err(err) => {
                    warn!(slot = %slot, error = %err, "failed to persist store state");
                    unsaved = Some(state);
                }
            },
            WriterCommand::Flush(reply) => {
                let outcome = match unsaved.take() {
                    Some(state) => {
                        let retried = write(&*persistence, &slot, &state).await;
                        if retried.is_err() {
                            unsaved = Some(state);
                        }
                        retried
                    }
                    None => Ok(()),
                };
                if reply.send(outcome).is_err() {
                    debug!(slot = %slot, "flush requester went away");
                }
            }
        }
    }
    debug!(slot = %slot, "persistence writer stopped");
}

async fn write<P>(persistence: &P, slot: &str, state: &StoreState) -> StoreResult<()>
where
    P: StatePersistence + ?Sized,
{
    let document =
        serde_json::to_string(state).map_err(|err| StoreError::Serialize(Arc::new(err)))?;
    persistence.save(slot, &document).await?;
    debug!(slot, bytes = document.len(), "store state persisted");
    Ok(())
}
