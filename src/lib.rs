#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]
#![forbid(
    clippy::dbg_macro,
    clippy::missing_safety_doc,
    clippy::unnecessary_safety_comment,
    clippy::unnecessary_safety_doc,
    unsafe_op_in_unsafe_fn
)]
#![deny(clippy::unwrap_used)]

//! Tells you which way up a device is held, based on its accelerometer and magnetometer.
//!
//! The device's attitude is classified into one of six [`Orientation`]s:
//! portrait, landscape (each either way round), face up and face down.
//! Readings are smoothed over a small window and a portrait device is
//! kept portrait while it is only slightly rolled, so the reported
//! orientation doesn't flap as the device is moved around.
//!
//! ## Example
//! The easiest way to follow the orientation is to use the
//! [`Orientation::stream`] function to create a stream that yields
//! the current orientation and then every change:
//!
//! ```no_run
//! use tilt::{Config, Orientation};
//! use futures_lite::StreamExt as _;
//!
//! let mut stream = Orientation::stream(Config::default());
//! # let _ = async move {
//! while let Some(orientation) = stream.next().await {
//!     eprintln!("orientation: {orientation:?}");
//! }
//! # };
//! ```
//!
//! Alternatively, there's [`Orientation::subscribe`] which
//! accepts a simple callback function instead.
//!
//! If you already receive sensor readings yourself, feed them into an
//! [`OrientationClassifier`] directly.
//!
//! ## Errors
//! Sensor readings that can't be classified (only one sensor has reported, the device
//! is in free fall, ...) are simply skipped. Platform errors while subscribing to sensors
//! result in a stream that only yields the initial orientation.
//! It can be useful to turn on the `log` feature to find out what's going on.

use futures_lite::Stream;
use pin_project_lite::pin_project;
use std::{error, fmt};

mod async_rt;
#[cfg(feature = "callback")]
mod callback;
#[cfg(feature = "callback")]
pub use callback::*;
mod classifier;
pub use classifier::*;
mod config;
pub use config::*;
mod rotation;
pub use rotation::*;
mod sample;
pub use sample::*;
mod smoothing;
pub use smoothing::*;
mod stream_utils;
pub use stream_utils::*;

#[cfg(any(target_os = "android", test))]
mod listeners;

cfg_if::cfg_if! {
    if #[cfg(target_os = "android")] {
        mod android;
        use android as imp;
    } else {
        mod fallback;
        use fallback as imp;
    }
}

/// Contains platform-specific functionality.
pub mod platform {
    /// On Android, tilt requires access to the JVM and the current [`Context`].
    /// To access these objects, tilt uses the [`ndk-context`] crate.
    ///
    /// Before calling any of tilt's functions, you need to make sure that the [`ndk-context`]
    /// is initialized. If you are writing an Android app using pure Rust using the [`android-activity`]
    /// or [`winit`] crates, then this is already done for you.
    ///
    /// [`Context`]: https://developer.android.com/reference/android/content/Context
    /// [`ndk-context`]: https://docs.rs/ndk-context
    /// [`android-activity`]: https://docs.rs/android-activity
    /// [`winit`]: https://docs.rs/winit
    #[cfg(any(doc, target_os = "android"))]
    #[cfg_attr(docsrs, doc(cfg(target_os = "android")))]
    pub mod android {
        /// Delivers a sensor reading to all active [streams](`crate::Orientation::stream`)
        /// and [subscriptions](`crate::Orientation::subscribe`).
        ///
        /// tilt registers its own sensor listener, so you only need this if your
        /// app already owns a [`SensorEventListener`] and wants to forward its
        /// readings, e.g. from `onSensorChanged`. `sensor_type` is the
        /// [`Sensor.getType()`] of the reading.
        ///
        /// [`SensorEventListener`]: https://developer.android.com/reference/android/hardware/SensorEventListener
        /// [`Sensor.getType()`]: https://developer.android.com/reference/android/hardware/Sensor#getType()
        pub fn push_sample(sensor_type: i32, x: f32, y: f32, z: f32) {
            #[cfg(target_os = "android")]
            crate::imp::push_sample(crate::SensorSample::new(
                crate::SensorKind::from_android_type(sensor_type),
                [x, y, z],
            ));
            #[cfg(not(target_os = "android"))]
            let _ = (sensor_type, x, y, z);
        }
    }
}

/// # Feature Flags
///
/// * `log`—Enable logging.
/// * `callback`—Enable the synchronous [`Orientation::subscribe`] function (*default*).
#[cfg(doc)]
#[cfg_attr(docsrs, doc(cfg(doc)))]
pub mod feature_flags {}

/// The way a device is held.
///
/// <details>
/// <summary style="cursor: pointer">
///
/// #### Host Codes
///
/// </summary>
///
/// Native hosts receive orientations as integers, see [`Orientation::host_code`].
/// The portrait and landscape codes match Android's [`ActivityInfo.SCREEN_ORIENTATION_*`] constants.
///
/// | Orientation                                    | Code |
/// |------------------------------------------------|------|
/// | [`Landscape`](Self::Landscape)                 | 0    |
/// | [`Portrait`](Self::Portrait)                   | 1    |
/// | [`LandscapeReversed`](Self::LandscapeReversed) | 8    |
/// | [`PortraitReversed`](Self::PortraitReversed)   | 9    |
/// | [`FaceUp`](Self::FaceUp)                       | 15   |
/// | [`FaceDown`](Self::FaceDown)                   | 16   |
///
/// </details>
///
/// [`ActivityInfo.SCREEN_ORIENTATION_*`]: https://developer.android.com/reference/android/content/pm/ActivityInfo#SCREEN_ORIENTATION_PORTRAIT
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Upright, with the top of the screen pointing up.
    #[default]
    Portrait,
    /// Upside down.
    PortraitReversed,
    /// Rotated 90° counter-clockwise, resting on its left edge.
    Landscape,
    /// Rotated 90° clockwise, resting on its right edge.
    LandscapeReversed,
    /// Lying on its back with the screen facing the sky.
    FaceUp,
    /// Lying on its screen.
    FaceDown,
}

impl Orientation {
    pub const ALL: [Orientation; 6] = [
        Orientation::Portrait,
        Orientation::PortraitReversed,
        Orientation::Landscape,
        Orientation::LandscapeReversed,
        Orientation::FaceUp,
        Orientation::FaceDown,
    ];

    /// Creates a new stream that yields the initial orientation
    /// and then every time the orientation changes.
    /// Should be called from the main thread.
    ///
    /// The stream is guaranteed to contain at least one item with the initial orientation.
    ///
    /// You can use [`Orientation::subscribe`] if you don't want to manage
    /// spawning an async runtime yourself.
    ///
    #[doc = include_str!("doc/caveats.md")]
    pub fn stream(config: Config) -> OrientationStream {
        let initial = config
            .initial
            .or_else(Orientation::current)
            .unwrap_or_default();
        let classifier = OrientationClassifier::new(initial, &config);
        OrientationStream {
            initial: Some(initial),
            inner: classifier.classify_stream(imp::samples(config)),
        }
    }

    /// The orientation the platform currently reports for the app.
    /// Only distinguishes between [`Portrait`](Self::Portrait) and [`Landscape`](Self::Landscape).
    ///
    /// Returns [`None`] if the platform doesn't report an orientation.
    pub fn current() -> Option<Self> {
        imp::current_orientation()
    }

    pub fn is_portrait(self) -> bool {
        matches!(self, Orientation::Portrait | Orientation::PortraitReversed)
    }

    pub fn is_landscape(self) -> bool {
        matches!(self, Orientation::Landscape | Orientation::LandscapeReversed)
    }

    pub fn is_flat(self) -> bool {
        matches!(self, Orientation::FaceUp | Orientation::FaceDown)
    }

    /// The integer used to report this orientation to native hosts.
    pub fn host_code(self) -> i32 {
        match self {
            Orientation::Landscape => 0,
            Orientation::Portrait => 1,
            Orientation::LandscapeReversed => 8,
            Orientation::PortraitReversed => 9,
            Orientation::FaceUp => 15,
            Orientation::FaceDown => 16,
        }
    }
}

impl TryFrom<i32> for Orientation {
    type Error = UnknownHostCode;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Orientation::ALL
            .into_iter()
            .find(|o| o.host_code() == code)
            .ok_or(UnknownHostCode(code))
    }
}

/// Returned when converting an integer that isn't a [host code](`Orientation::host_code`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownHostCode(pub i32);

impl fmt::Display for UnknownHostCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is not an orientation code", self.0)
    }
}

impl error::Error for UnknownHostCode {}

pin_project! {
    /// A stream that yields the initial orientation and then every change.
    /// Created by [`Orientation::stream()`].
    pub struct OrientationStream {
        initial: Option<Orientation>,
        #[pin] inner: Classify<imp::SampleStream>,
    }
}

#[cfg(test)]
static_assertions::assert_impl_all!(OrientationStream: Send);

impl Stream for OrientationStream {
    type Item = Orientation;

    fn poll_next(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        let this = self.project();
        if let Some(initial) = this.initial.take() {
            return std::task::Poll::Ready(Some(initial));
        }
        this.inner.poll_next(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_lite::{future, StreamExt as _};

    #[test]
    fn host_codes_round_trip() {
        for orientation in Orientation::ALL {
            assert_eq!(Ok(orientation), Orientation::try_from(orientation.host_code()));
        }
    }

    #[test]
    fn undefined_host_code_is_rejected() {
        assert_eq!(Err(UnknownHostCode(-1)), Orientation::try_from(-1));
        assert_eq!(Err(UnknownHostCode(2)), Orientation::try_from(2));
    }

    #[test]
    fn families_are_disjoint() {
        for orientation in Orientation::ALL {
            let families = [
                orientation.is_portrait(),
                orientation.is_landscape(),
                orientation.is_flat(),
            ];
            assert_eq!(1, families.iter().filter(|&&f| f).count());
        }
    }

    #[cfg(not(target_os = "android"))]
    #[test]
    fn stream_yields_configured_initial_orientation() {
        let config = Config::default().with_initial(Orientation::Landscape);
        let items: Vec<_> = future::block_on(Orientation::stream(config).collect());
        assert_eq!(vec![Orientation::Landscape], items);
    }

    #[cfg(not(target_os = "android"))]
    #[test]
    fn stream_defaults_to_portrait() {
        let mut stream = Orientation::stream(Config::default());
        assert_eq!(Some(Orientation::Portrait), future::block_on(stream.next()));
        assert_eq!(None, future::block_on(stream.next()));
    }
}
