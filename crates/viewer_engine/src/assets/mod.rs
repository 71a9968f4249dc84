//! Asset resolution boundary
//!
//! Retrieving and parsing the model is the host's job; the viewer only
//! consumes the outcome. Delivery happens over a one-shot endpoint the
//! render loop polls between ticks, so resolution never pre-empts a frame
//! and a result that arrives after teardown is simply never read.

use std::sync::mpsc;

use thiserror::Error;

use crate::scene::node::SceneFragment;

/// Errors the asset collaborator may deliver instead of a model
///
/// All of these are recoverable from the viewer's perspective: the loop
/// keeps running against an empty scene and the ready signal never fires.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// The asset could not be retrieved
    #[error("model fetch failed: {0}")]
    Fetch(String),

    /// The asset was retrieved but could not be parsed
    #[error("model parse failed: {0}")]
    Parse(String),

    /// The collaborator went away without delivering anything
    #[error("model source disconnected before resolving")]
    Disconnected,
}

/// Outcome of asset resolution
pub type ModelResult = Result<SceneFragment, AssetError>;

/// Sending half of the model delivery endpoint
///
/// Held by the asset collaborator, usually on another thread or task.
/// Dropping it without sending resolves the receiving side as a failure.
pub struct ModelSender {
    sender: mpsc::Sender<ModelResult>,
}

impl ModelSender {
    /// Deliver the resolution outcome
    ///
    /// Returns false when the viewer has already gone away; the result is
    /// discarded in that case, which is safe by design.
    pub fn send(self, result: ModelResult) -> bool {
        self.sender.send(result).is_ok()
    }
}

/// Receiving half of the model delivery endpoint, polled by the controller
pub struct ModelReceiver {
    receiver: Option<mpsc::Receiver<ModelResult>>,
}

impl ModelReceiver {
    /// Non-blocking poll for the resolution outcome
    ///
    /// Returns `Some` exactly once: either the delivered result, or
    /// [`AssetError::Disconnected`] when the sender was dropped without
    /// delivering. Afterwards the endpoint is spent and every later poll
    /// returns `None`.
    pub fn poll(&mut self) -> Option<ModelResult> {
        let receiver = self.receiver.as_ref()?;
        match receiver.try_recv() {
            Ok(result) => {
                self.receiver = None;
                Some(result)
            }
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                self.receiver = None;
                Some(Err(AssetError::Disconnected))
            }
        }
    }
}

/// Create a connected one-shot model delivery endpoint
pub fn model_channel() -> (ModelSender, ModelReceiver) {
    let (sender, receiver) = mpsc::channel();
    (
        ModelSender { sender },
        ModelReceiver {
            receiver: Some(receiver),
        },
    )
}
