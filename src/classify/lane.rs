//! Single-worker execution lane around one `Classifier`.
//!
//! Requests queue on a bounded channel and are answered one at a time, in
//! arrival order. Clones share the same worker.

use std::panic::AssertUnwindSafe;

use anyhow::{anyhow, Result};
use futures::FutureExt;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use super::{Classifier, Polarity};

const QUEUE_DEPTH: usize = 64;

struct Job {
    text: String,
    reply: oneshot::Sender<Result<Polarity>>,
}

#[derive(Clone)]
pub struct ClassifierLane {
    tx: mpsc::Sender<Job>,
    name: &'static str,
}

impl ClassifierLane {
    /// Move `classifier` onto its own tokio task. Must be called inside a
    /// tokio runtime. The worker exits once every lane handle is dropped.
    pub fn spawn(mut classifier: Box<dyn Classifier>) -> Self {
        let name = classifier.name();
        let (tx, mut rx) = mpsc::channel::<Job>(QUEUE_DEPTH);

        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                // A panicking classifier only fails its own request.
                let out = match AssertUnwindSafe(classifier.classify(&job.text))
                    .catch_unwind()
                    .await
                {
                    Ok(res) => res,
                    Err(_panic) => {
                        warn!(classifier = name, "classifier panicked");
                        Err(anyhow!("classifier panicked"))
                    }
                };
                // Requester may have gone away; nothing to do then.
                let _ = job.reply.send(out);
            }
            debug!(classifier = name, "classifier lane closed");
        });

        Self { tx, name }
    }

    pub fn classifier_name(&self) -> &'static str {
        self.name
    }

    pub async fn classify(&self, text: &str) -> Result<Polarity> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Job {
                text: text.to_string(),
                reply,
            })
            .await
            .map_err(|_| anyhow!("classifier lane is closed"))?;
        rx.await
            .map_err(|_| anyhow!("classifier lane dropped the request"))?
    }
}
