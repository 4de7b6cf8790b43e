use crate::rotation::RotationMatrix;
use crate::stream_utils::Classify;
use crate::{Config, Orientation, SensorKind, SensorSample, SmoothingBuffer};
use futures_lite::Stream;

/// Roll (in degrees) within which the device counts as lying on its back.
const FACE_UP_ROLL: f32 = 20.0;
/// Roll magnitude (in degrees) beyond which the device counts as lying on its screen.
const FACE_DOWN_ROLL: f32 = 160.0;
/// Roll (in degrees) within which a portrait device stays portrait.
const PORTRAIT_HOLD_ROLL: f32 = 30.0;
/// Pitch magnitude (in degrees) from which the device counts as portrait.
const PORTRAIT_PITCH: f32 = 30.0;

/// Turns raw accelerometer and magnetometer readings into a debounced [`Orientation`].
///
/// The classifier is purely synchronous and keeps no shared state:
/// callers that receive samples on multiple threads must serialize calls
/// to [`ingest`](Self::ingest) themselves.
#[derive(Debug, Clone)]
pub struct OrientationClassifier {
    gravity: Option<[f32; 3]>,
    geomagnetic: Option<[f32; 3]>,
    pitch: SmoothingBuffer,
    roll: SmoothingBuffer,
    current: Orientation,
    last_emitted: Orientation,
}

impl OrientationClassifier {
    /// Creates a classifier that assumes the device is in the `initial` orientation
    /// until sensor data says otherwise. `initial` is never emitted by [`ingest`](Self::ingest).
    pub fn new(initial: Orientation, config: &Config) -> Self {
        Self {
            gravity: None,
            geomagnetic: None,
            pitch: SmoothingBuffer::new(config.window_size, config.averaging),
            roll: SmoothingBuffer::new(config.window_size, config.averaging),
            current: initial,
            last_emitted: initial,
        }
    }

    /// Feeds one sensor reading into the classifier.
    ///
    /// Returns the new orientation if it differs from the one last returned
    /// (or the initial orientation). Returns [`None`] when nothing changed,
    /// when only one of the two sensors has reported so far,
    /// when the sample is from an unrelated sensor
    /// or when the readings don't describe a valid attitude (e.g. free fall).
    pub fn ingest(&mut self, sample: SensorSample) -> Option<Orientation> {
        match sample.kind {
            SensorKind::Accelerometer => self.gravity = Some(sample.values),
            SensorKind::Magnetometer => self.geomagnetic = Some(sample.values),
            SensorKind::Other(_) => return None,
        }

        let matrix = RotationMatrix::from_vectors(self.gravity?, self.geomagnetic?)?;
        let angles = matrix.angles();
        if !angles.pitch.is_finite() || !angles.roll.is_finite() {
            return None;
        }
        let pitch = self.pitch.push(angles.pitch);
        let roll = self.roll.push(angles.roll);

        let candidate = classify(roll, pitch, self.current);
        #[cfg(feature = "log")]
        log::trace!("smoothed roll {roll:.1}°, pitch {pitch:.1}° -> {candidate:?}");
        self.current = candidate;

        if candidate == self.last_emitted {
            return None;
        }
        self.last_emitted = candidate;
        Some(candidate)
    }

    /// The orientation determined by the latest evaluation.
    pub fn current(&self) -> Orientation {
        self.current
    }

    /// The orientation last returned by [`ingest`](Self::ingest) (or the initial orientation).
    pub fn last_emitted(&self) -> Orientation {
        self.last_emitted
    }

    /// Forgets all readings and starts over from `initial`.
    pub fn reset(&mut self, initial: Orientation) {
        self.gravity = None;
        self.geomagnetic = None;
        self.pitch.clear();
        self.roll.clear();
        self.current = initial;
        self.last_emitted = initial;
    }

    /// Adapts a stream of sensor readings into a stream of orientation changes.
    pub fn classify_stream<S>(self, samples: S) -> Classify<S>
    where
        S: Stream<Item = SensorSample>,
    {
        Classify::new(samples, self)
    }
}

/// Classifies smoothed `roll` and `pitch` (in degrees).
///
/// `previous` keeps a portrait device portrait while it is only slightly rolled,
/// so that small tilts don't flap between portrait and landscape.
pub fn classify(roll: f32, pitch: f32, previous: Orientation) -> Orientation {
    let portrait = || {
        if pitch > 0.0 {
            Orientation::PortraitReversed
        } else {
            Orientation::Portrait
        }
    };

    if -FACE_UP_ROLL < roll && roll < FACE_UP_ROLL {
        Orientation::FaceUp
    } else if roll > FACE_DOWN_ROLL || roll < -FACE_DOWN_ROLL {
        Orientation::FaceDown
    } else if previous.is_portrait() && -PORTRAIT_HOLD_ROLL < roll && roll < PORTRAIT_HOLD_ROLL {
        portrait()
    } else if pitch.abs() >= PORTRAIT_PITCH {
        portrait()
    } else if roll > 0.0 {
        Orientation::LandscapeReversed
    } else {
        Orientation::Landscape
    }
}
