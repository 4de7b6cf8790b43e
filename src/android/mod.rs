//! # Android
//! ## Overview
//! The Android backend uses the Java Native Interface (JNI) to register a
//! [`SensorEventListener`] for the accelerometer and the magnetometer.
//!
//! To interact with Java code we need two things, both of which are provided to us by the
//! [`ndk_context`] crate:
//! * the JVM instance
//! * the current Android [`Context`].
//!
//! The listener itself is a small Java class (`TiltSupport.java`) that gets
//! compiled to DEX bytecode in our `build.rs` and injected at runtime in the
//! [`support`] module. It receives readings on its own handler thread and hands
//! them to Rust through a `native` method, which fans them out to every stream
//! in the [`subscription`] module. Each stream classifies its readings on its own,
//! so one stream never observes another stream's smoothing state.
//!
//! The injection approach is the one the [`netwatcher`] crate uses, described in a
//! [blog post] by its author, Thomas Karpiniec.
//!
//! ## Caveats
//!
//! The sensors stay registered for as long as at least one stream or subscription is alive.
//! Android stops delivering sensor readings to apps in the background, so
//! no changes are reported while the app is paused.
//!
//! [`SensorEventListener`]: https://developer.android.com/reference/android/hardware/SensorEventListener
//! [`Context`]: https://developer.android.com/reference/android/content/Context
//! [blog post]: https://octet-stream.net/b/scb/2025-08-03-injecting-java-from-native-libraries-on-android.html
//! [`netwatcher`]: https://github.com/thombles/netwatcher

use crate::{Config, Orientation, SensorSample};
use futures_channel::mpsc;
use futures_lite::{stream, Stream, StreamExt as _};
use pin_project_lite::pin_project;
use std::sync::Arc;
use support::{java_vm, JavaSupport, ORIENTATION_LANDSCAPE, ORIENTATION_PORTRAIT};

// signatures: <https://docs.oracle.com/javase/8/docs/technotes/guides/jni/spec/types.html>

mod subscription;
mod support;
pub(crate) use subscription::push_sample;

pub(crate) type Result<T, E = BoxedError> = std::result::Result<T, E>;
pub(crate) type BoxedError = Box<dyn std::error::Error + Send + Sync>;
pub(crate) type ArcError = Arc<dyn std::error::Error + Send + Sync>;

pin_project! {
    pub(crate) struct SampleStream {
        subscription: Option<subscription::Subscription>,
        #[pin] inner: stream::Boxed<SensorSample>,
    }
}

impl Stream for SampleStream {
    type Item = SensorSample;

    fn poll_next(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        self.project().inner.poll_next(cx)
    }
}

pub(crate) fn samples(config: Config) -> SampleStream {
    let (tx, rx) = mpsc::unbounded();
    let subscription = match subscription::subscribe(config.sensor_delay, move |sample| {
        _ = tx.unbounded_send(sample);
    }) {
        Ok(subscription) => subscription,
        #[cfg(not(feature = "log"))]
        Err(_) => return empty_samples(),
        #[cfg(feature = "log")]
        Err(e) => {
            log::warn!("failed to subscribe to sensor readings: {e:#?}");
            return empty_samples();
        }
    };

    SampleStream {
        subscription: Some(subscription),
        inner: rx.boxed(),
    }
}

fn empty_samples() -> SampleStream {
    SampleStream {
        subscription: None,
        inner: stream::empty().boxed(),
    }
}

pub(crate) fn current_orientation() -> Option<Orientation> {
    let result = try_current_orientation();
    #[cfg(feature = "log")]
    if let Err(e) = &result {
        log::warn!("failed to get the configuration orientation: {e:#?}");
    }
    result.ok().flatten()
}

fn try_current_orientation() -> Result<Option<Orientation>> {
    let vm = java_vm()?;
    let mut env = vm.attach_current_thread()?;
    let support = JavaSupport::get()?;
    Ok(match support.get_configuration_orientation(&mut env)? {
        ORIENTATION_PORTRAIT => Some(Orientation::Portrait),
        ORIENTATION_LANDSCAPE => Some(Orientation::Landscape),
        _ => None,
    })
}
