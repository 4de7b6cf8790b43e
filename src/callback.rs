use crate::{async_rt, Config, Orientation};
use futures_util::{stream, StreamExt as _};

pub trait CallbackFn: FnMut(Orientation) + Send + Sync + 'static {}

impl<F> CallbackFn for F where F: FnMut(Orientation) + Send + Sync + 'static {}

/// A subscription for orientation changes created using [`Orientation::subscribe()`].
/// Dropping the subscription will cancel it and release the underlying sensors.
pub struct Subscription(stream::AbortHandle);

#[cfg(test)]
static_assertions::assert_impl_all!(Subscription: Send, Sync);

impl Drop for Subscription {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl Orientation {
    /// Creates a new subscription for orientation changes.
    ///
    /// The provided callback is guaranteed to be called at least once with the initial
    /// orientation and is subsequently called on a background thread whenever the orientation changes.
    ///
    #[doc = include_str!("doc/caveats.md")]
    pub fn subscribe(config: Config, mut callback: impl CallbackFn) -> Subscription {
        let (mut stream, handle) = stream::abortable(Self::stream(config));
        async_rt::spawn_future(async move {
            while let Some(orientation) = stream.next().await {
                callback(orientation);
            }
        });
        Subscription(handle)
    }
}

#[cfg(all(test, not(target_os = "android")))]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn calls_back_with_initial_orientation() {
        let (tx, rx) = mpsc::channel();
        let tx = std::sync::Mutex::new(tx);
        let config = Config::default().with_initial(Orientation::FaceDown);
        let _subscription = Orientation::subscribe(config, move |orientation| {
            _ = tx.lock().expect("lock poisoned").send(orientation);
        });
        assert_eq!(
            Ok(Orientation::FaceDown),
            rx.recv_timeout(Duration::from_secs(5))
        );
    }
}
