use crate::{Averaging, Orientation};
use std::num::NonZeroUsize;

/// Configuration used when creating a [stream], a [subscription] or a [classifier].
///
/// [stream]: `crate::Orientation::stream`
/// [subscription]: `crate::Orientation::subscribe`
/// [classifier]: `crate::OrientationClassifier::new`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Config {
    /// Number of readings each smoothing window holds.
    pub window_size: NonZeroUsize,
    /// How readings are averaged while the smoothing windows fill up.
    pub averaging: Averaging,
    /// The orientation assumed before any sensor data arrives.
    /// When unset, the orientation reported by [`Orientation::current`] is used,
    /// falling back to [`Orientation::Portrait`].
    pub initial: Option<Orientation>,
    /// How often the platform should deliver sensor readings.
    pub sensor_delay: SensorDelay,
}

impl Config {
    pub const DEFAULT_WINDOW_SIZE: NonZeroUsize = match NonZeroUsize::new(5) {
        Some(size) => size,
        None => unreachable!(),
    };

    pub fn with_window_size(mut self, window_size: NonZeroUsize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_averaging(mut self, averaging: Averaging) -> Self {
        self.averaging = averaging;
        self
    }

    pub fn with_initial(mut self, initial: Orientation) -> Self {
        self.initial = Some(initial);
        self
    }

    pub fn with_sensor_delay(mut self, sensor_delay: SensorDelay) -> Self {
        self.sensor_delay = sensor_delay;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_size: Self::DEFAULT_WINDOW_SIZE,
            averaging: Averaging::default(),
            initial: None,
            sensor_delay: SensorDelay::default(),
        }
    }
}

/// The rate at which sensor readings are delivered.
/// This corresponds to Android's [`SensorManager.SENSOR_DELAY_*`] constants.
///
/// [`SensorManager.SENSOR_DELAY_*`]: https://developer.android.com/reference/android/hardware/SensorManager#SENSOR_DELAY_NORMAL
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SensorDelay {
    Fastest,
    Game,
    Ui,
    #[default]
    Normal,
}

impl SensorDelay {
    #[cfg_attr(not(target_os = "android"), allow(dead_code))]
    pub(crate) fn android_constant(self) -> i32 {
        match self {
            SensorDelay::Fastest => 0,
            SensorDelay::Game => 1,
            SensorDelay::Ui => 2,
            SensorDelay::Normal => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_five_zero_filled_readings() {
        let config = Config::default();
        assert_eq!(5, config.window_size.get());
        assert_eq!(Averaging::ZeroFilled, config.averaging);
        assert_eq!(None, config.initial);
        assert_eq!(3, config.sensor_delay.android_constant());
    }

    #[test]
    fn builder_overrides_fields() {
        let size = NonZeroUsize::new(8).expect("non-zero");
        let config = Config::default()
            .with_window_size(size)
            .with_averaging(Averaging::Populated)
            .with_initial(Orientation::Landscape)
            .with_sensor_delay(SensorDelay::Game);
        assert_eq!(size, config.window_size);
        assert_eq!(Averaging::Populated, config.averaging);
        assert_eq!(Some(Orientation::Landscape), config.initial);
        assert_eq!(SensorDelay::Game, config.sensor_delay);
    }
}
