//! A listener backed by channels.
//!
//! The function [`channel`] creates a pair of an [`UpdateListener`] to be
//! handed to a resolver and a [`ListenerHandle`] that is kept by whoever
//! serves the proxy’s stream. The handle receives the updates and ends the
//! stream.

use core::future::Future;
use core::pin::Pin;
use std::boxed::Box;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::trace;

use crate::watcher::{Update, UpdateListener};

//------------ channel -------------------------------------------------------

/// Creates a new channel listener and its handle.
pub fn channel() -> (Arc<ChannelListener>, ListenerHandle) {
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    let (stop_tx, stop_rx) = watch::channel(false);
    (
        Arc::new(ChannelListener {
            updates: update_tx,
            stopped: stop_rx,
        }),
        ListenerHandle {
            updates: update_rx,
            stop: stop_tx,
        },
    )
}

//------------ ChannelListener -----------------------------------------------

/// An update listener that forwards updates to a [`ListenerHandle`].
///
/// The listener is done once the handle was asked to stop or was dropped.
#[derive(Debug)]
pub struct ChannelListener {
    updates: mpsc::UnboundedSender<Update>,
    stopped: watch::Receiver<bool>,
}

impl ChannelListener {
    /// Returns whether the stream has ended.
    pub fn is_done(&self) -> bool {
        *self.stopped.borrow() || self.updates.is_closed()
    }
}

impl UpdateListener for ChannelListener {
    fn update(&self, update: Update) {
        if self.updates.send(update).is_err() {
            trace!("listener handle dropped, discarding update");
        }
    }

    fn done(&self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        let mut stopped = self.stopped.clone();
        Box::pin(async move {
            // An error means the handle is gone which ends the stream, too.
            if stopped.wait_for(|stopped| *stopped).await.is_err() {
                trace!("listener handle dropped, ending stream");
            }
        })
    }
}

//------------ ListenerHandle ------------------------------------------------

/// The serving end of a channel listener.
#[derive(Debug)]
pub struct ListenerHandle {
    updates: mpsc::UnboundedReceiver<Update>,
    stop: watch::Sender<bool>,
}

impl ListenerHandle {
    /// Receives the next update.
    ///
    /// Returns `None` once the listener has been dropped by everyone and
    /// all updates have been received.
    pub async fn recv(&mut self) -> Option<Update> {
        self.updates.recv().await
    }

    /// Receives the next update if one is available right now.
    pub fn try_recv(&mut self) -> Option<Update> {
        self.updates.try_recv().ok()
    }

    /// Ends the stream.
    ///
    /// This resolves the listener’s [`done`][UpdateListener::done] future
    /// and with that lets the resolution finish.
    pub fn stop(&self) {
        self.stop.send_replace(true);
    }
}

//============ Testing =======================================================
