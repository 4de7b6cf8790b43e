/// The kind of motion sensor a [`SensorSample`] was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Acceleration including gravity, in m/s².
    Accelerometer,
    /// Ambient geomagnetic field, in μT.
    Magnetometer,
    /// Any other sensor. Samples of this kind are ignored by the classifier.
    /// The value is the platform's sensor type code.
    Other(i32),
}

impl SensorKind {
    /// Android's `Sensor.TYPE_ACCELEROMETER`.
    pub const ANDROID_ACCELEROMETER: i32 = 1;
    /// Android's `Sensor.TYPE_MAGNETIC_FIELD`.
    pub const ANDROID_MAGNETIC_FIELD: i32 = 2;

    /// Maps an Android [sensor type](https://developer.android.com/reference/android/hardware/Sensor#TYPE_ACCELEROMETER)
    /// to a [`SensorKind`].
    pub fn from_android_type(ty: i32) -> Self {
        match ty {
            Self::ANDROID_ACCELEROMETER => SensorKind::Accelerometer,
            Self::ANDROID_MAGNETIC_FIELD => SensorKind::Magnetometer,
            other => SensorKind::Other(other),
        }
    }
}

/// A single 3-axis reading from a motion sensor.
///
/// Axes follow the Android device coordinate system: `x` points to the right,
/// `y` points up along the long edge of the screen and `z` points out of the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSample {
    pub kind: SensorKind,
    pub values: [f32; 3],
}

impl SensorSample {
    pub fn new(kind: SensorKind, values: [f32; 3]) -> Self {
        Self { kind, values }
    }

    pub fn accelerometer(x: f32, y: f32, z: f32) -> Self {
        Self::new(SensorKind::Accelerometer, [x, y, z])
    }

    pub fn magnetometer(x: f32, y: f32, z: f32) -> Self {
        Self::new(SensorKind::Magnetometer, [x, y, z])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_android_sensor_types() {
        assert_eq!(SensorKind::Accelerometer, SensorKind::from_android_type(1));
        assert_eq!(SensorKind::Magnetometer, SensorKind::from_android_type(2));
        // Sensor.TYPE_GYROSCOPE
        assert_eq!(SensorKind::Other(4), SensorKind::from_android_type(4));
    }
}
