use std::sync::Arc;

use quiz_core::model::SessionSnapshot;
use storage::repository::SnapshotRepository;
use tokio::sync::{mpsc, oneshot};

enum WriterCommand {
    Save(SessionSnapshot),
    Flush(oneshot::Sender<()>),
}

/// Fire-and-forget snapshot persistence.
///
/// A single background task applies writes in submission order. Failures are
/// logged and dropped; callers never observe them.
#[derive(Clone)]
pub struct SnapshotWriter {
    tx: mpsc::UnboundedSender<WriterCommand>,
}

impl SnapshotWriter {
    /// Start the writer task on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn spawn(repo: Arc<dyn SnapshotRepository>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(repo, rx));
        Self { tx }
    }

    /// Queue a snapshot. Never blocks.
    pub fn submit(&self, snapshot: SessionSnapshot) {
        if self.tx.send(WriterCommand::Save(snapshot)).is_err() {
            tracing::debug!("snapshot writer stopped; dropping snapshot");
        }
    }

    /// Wait until every snapshot queued before this call has been attempted.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.tx.send(WriterCommand::Flush(done)).is_err() {
            return;
        }
        let _ = wait.await;
    }
}

async fn run(repo: Arc<dyn SnapshotRepository>, mut rx: mpsc::UnboundedReceiver<WriterCommand>) {
    while let Some(command) = rx.recv().await {
        match command {
            WriterCommand::Save(snapshot) => {
                if let Err(err) = repo.save_snapshot(&snapshot).await {
                    tracing::warn!(
                        error = %err,
                        current_index = snapshot.current_index,
                        "failed to write progress snapshot"
                    );
                }
            }
            WriterCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}
