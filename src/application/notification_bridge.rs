// Notification bridge - Payload-less "data changed" signal between panels
use futures::stream::Stream;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 16;

/// A wake-up signal carrying no data. Cloning yields another handle to the
/// same channel; whoever builds the panels owns the original.
#[derive(Clone)]
pub struct NotificationBridge {
    tx: broadcast::Sender<()>,
}

impl NotificationBridge {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Fire-and-forget. Returns how many live subscribers were signalled;
    /// with no subscribers the signal is dropped.
    pub fn publish(&self) -> usize {
        match self.tx.send(()) {
            Ok(receivers) => {
                tracing::debug!("Data-changed notification sent to {} subscribers", receivers);
                receivers
            }
            Err(_) => {
                tracing::debug!("Data-changed notification dropped, no subscribers");
                0
            }
        }
    }

    /// Register a subscriber. Dropping the subscription unregisters it.
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for NotificationBridge {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Subscription {
    rx: broadcast::Receiver<()>,
}

impl Subscription {
    /// Wait for the next notification. Signals carry nothing, so everything
    /// already queued (or lost to lag) collapses into this one wake-up.
    /// Returns `false` once every bridge handle has been dropped.
    pub async fn recv(&mut self) -> bool {
        match self.rx.recv().await {
            Ok(()) => {}
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::debug!("Subscriber lagged, coalescing {} notifications", skipped);
            }
            Err(broadcast::error::RecvError::Closed) => return false,
        }

        while let Ok(()) | Err(broadcast::error::TryRecvError::Lagged(_)) = self.rx.try_recv() {}
        true
    }

    pub fn into_stream(self) -> impl Stream<Item = ()> + Send + 'static {
        let mut subscription = self;
        async_stream::stream! {
            while subscription.recv().await {
                yield ();
            }
        }
    }
}
