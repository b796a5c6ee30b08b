//! `Feed<T>`: the owned, stream side of a live query.
//!
//! Every item is a full immutable snapshot, never a delta. Consumers replace their local list
//! wholesale on each item. The feed owns the remote listener's `Subscription`, so dropping the
//! feed (e.g. when the screen task that holds it is cancelled) releases the listener. A new
//! feed for the same query starts from a fresh initial snapshot.

use crate::subscription::Subscription;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// Sending half handed to the listener callback. Sending never blocks; a send after the feed
/// is gone is dropped.
#[derive(Debug)]
pub struct FeedSender<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> Clone for FeedSender<T> {
    fn clone(&self) -> Self {
        Self { tx: self.tx.clone() }
    }
}

impl<T> FeedSender<T> {
    pub fn send(&self, item: T) -> bool {
        self.tx.send(item).is_ok()
    }

    #[cfg(test)]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[derive(Debug)]
pub struct Feed<T> {
    rx: mpsc::UnboundedReceiver<T>,
    subscription: Option<Subscription>,
}

impl<T> Feed<T> {
    /// Create a feed and let `register` attach a listener that pushes into it.
    pub fn attach(register: impl FnOnce(FeedSender<T>) -> Subscription) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = register(FeedSender { tx });
        Self {
            rx,
            subscription: Some(subscription),
        }
    }

    /// A feed that yields `item` once and then ends.
    pub fn failed(item: T) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let _ = tx.send(item);
        Self {
            rx,
            subscription: None,
        }
    }

    /// Next snapshot. `None` once the feed is closed and drained.
    pub async fn next(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Next already-delivered snapshot, without waiting.
    pub fn try_next(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Most recent already-delivered snapshot, discarding older ones.
    pub fn latest(&mut self) -> Option<T> {
        let mut last = None;
        while let Some(item) = self.try_next() {
            last = Some(item);
        }
        last
    }

    /// Release the remote listener. Snapshots already delivered stay readable.
    pub fn close(&mut self) {
        if let Some(sub) = self.subscription.take() {
            sub.unsubscribe();
        }
        self.rx.close();
    }

    pub fn is_live(&self) -> bool {
        self.subscription.as_ref().is_some_and(Subscription::is_active)
    }
}

impl<T> Stream for Feed<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn failed_feed_yields_once_then_ends() {
        let mut feed: Feed<Result<u8, String>> = Feed::failed(Err("no session".into()));
        assert_eq!(feed.next().await, Some(Err("no session".into())));
        assert_eq!(feed.next().await, None);
        assert!(!feed.is_live());
    }

    #[tokio::test]
    async fn dropping_feed_releases_listener() {
        let released = Arc::new(AtomicBool::new(false));
        let r = released.clone();
        let sender: Arc<Mutex<Option<FeedSender<u8>>>> = Arc::new(Mutex::new(None));
        let s = sender.clone();
        let mut feed = Feed::attach(move |tx| {
            tx.send(1);
            *s.lock().unwrap() = Some(tx);
            Subscription::new(move || r.store(true, Ordering::SeqCst))
        });
        assert_eq!(feed.next().await, Some(1));
        sender.lock().unwrap().as_ref().unwrap().send(2);
        assert_eq!(StreamExt::next(&mut feed).await, Some(2));
        drop(feed);
        assert!(released.load(Ordering::SeqCst));
        assert!(sender.lock().unwrap().as_ref().unwrap().is_closed());
    }

    #[test]
    fn latest_keeps_only_newest_snapshot() {
        let mut feed = Feed::attach(|tx| {
            tx.send(1);
            tx.send(2);
            tx.send(3);
            Subscription::noop()
        });
        assert_eq!(feed.latest(), Some(3));
        assert_eq!(feed.try_next(), None);
    }
}
