/// Standard gravity in m/s².
const GRAVITY_EARTH: f32 = 9.806_65;

/// Squared acceleration below which the device is considered to be in free fall.
const FREE_FALL_GRAVITY_SQUARED: f32 = 0.01 * GRAVITY_EARTH * GRAVITY_EARTH;

/// Magnitude of `geomagnetic × gravity` below which the vectors are treated as parallel.
const MIN_HORIZONTAL_NORM: f32 = 0.1;

/// A 3×3 rotation matrix in row-major order that transforms vectors
/// from the device coordinate system to the world coordinate system
/// (x east, y magnetic north, z toward the sky).
///
/// This is the same matrix as Android's [`SensorManager.getRotationMatrix`].
///
/// [`SensorManager.getRotationMatrix`]: https://developer.android.com/reference/android/hardware/SensorManager#getRotationMatrix(float[],%20float[],%20float[],%20float[])
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationMatrix(pub [f32; 9]);

impl RotationMatrix {
    /// Builds the matrix from a gravity (accelerometer) and geomagnetic (magnetometer) vector.
    ///
    /// Returns [`None`] if the device is in free fall, if the two vectors are
    /// (close to) parallel, e.g. near the magnetic poles, or if a reading is
    /// too large to normalize.
    pub fn from_vectors(gravity: [f32; 3], geomagnetic: [f32; 3]) -> Option<Self> {
        let [ax, ay, az] = gravity;
        let norm_sq_a = ax * ax + ay * ay + az * az;
        if !norm_sq_a.is_finite() || norm_sq_a < FREE_FALL_GRAVITY_SQUARED {
            return None;
        }

        let [ex, ey, ez] = geomagnetic;
        let hx = ey * az - ez * ay;
        let hy = ez * ax - ex * az;
        let hz = ex * ay - ey * ax;
        let norm_h = (hx * hx + hy * hy + hz * hz).sqrt();
        if !norm_h.is_finite() || norm_h < MIN_HORIZONTAL_NORM {
            return None;
        }

        let inv_h = 1.0 / norm_h;
        let (hx, hy, hz) = (hx * inv_h, hy * inv_h, hz * inv_h);
        let inv_a = 1.0 / norm_sq_a.sqrt();
        let (ax, ay, az) = (ax * inv_a, ay * inv_a, az * inv_a);
        let mx = ay * hz - az * hy;
        let my = az * hx - ax * hz;
        let mz = ax * hy - ay * hx;

        Some(Self([hx, hy, hz, mx, my, mz, ax, ay, az]))
    }

    /// Rotation around the z axis in radians.
    pub fn azimuth(&self) -> f32 {
        self.0[1].atan2(self.0[4])
    }

    /// Rotation around the x axis in radians, in `[-π/2, π/2]`.
    pub fn pitch(&self) -> f32 {
        (-self.0[7]).clamp(-1.0, 1.0).asin()
    }

    /// Rotation around the y axis in radians, in `[-π, π]`.
    pub fn roll(&self) -> f32 {
        (-self.0[6]).atan2(self.0[8])
    }

    pub fn angles(&self) -> Angles {
        Angles {
            azimuth: self.azimuth().to_degrees(),
            pitch: self.pitch().to_degrees(),
            roll: self.roll().to_degrees(),
        }
    }
}

/// Device attitude in degrees.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Angles {
    pub azimuth: f32,
    pub pitch: f32,
    pub roll: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    const NORTH_AND_DOWN: [f32; 3] = [0.0, 22.0, -40.0];

    fn assert_close(expected: f32, actual: f32) {
        assert!(
            (expected - actual).abs() < 0.5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn lying_flat_is_level() {
        let matrix = RotationMatrix::from_vectors([0.0, 0.0, GRAVITY_EARTH], NORTH_AND_DOWN)
            .expect("valid geometry");
        let angles = matrix.angles();
        assert_close(0.0, angles.pitch);
        assert_close(0.0, angles.roll);
        assert_close(0.0, angles.azimuth);
    }

    #[test]
    fn lying_on_the_screen_rolls_half_a_turn() {
        let matrix = RotationMatrix::from_vectors([0.0, 0.0, -GRAVITY_EARTH], NORTH_AND_DOWN)
            .expect("valid geometry");
        assert_close(180.0, matrix.roll().to_degrees().abs());
    }

    #[test]
    fn standing_upright_pitches_down() {
        let matrix = RotationMatrix::from_vectors([0.0, GRAVITY_EARTH, 0.0], [0.0, 0.0, -40.0])
            .expect("valid geometry");
        assert_close(-90.0, matrix.angles().pitch);
    }

    #[test]
    fn resting_on_the_left_edge_rolls_left() {
        let matrix = RotationMatrix::from_vectors([GRAVITY_EARTH, 0.0, 0.0], NORTH_AND_DOWN)
            .expect("valid geometry");
        assert_close(-90.0, matrix.angles().roll);
        assert_close(0.0, matrix.angles().pitch);
    }

    #[test]
    fn rejects_free_fall() {
        assert_eq!(
            None,
            RotationMatrix::from_vectors([0.0, 0.0, 0.5], NORTH_AND_DOWN)
        );
    }

    #[test]
    fn rejects_parallel_vectors() {
        assert_eq!(
            None,
            RotationMatrix::from_vectors([0.0, 0.0, GRAVITY_EARTH], [0.0, 0.0, 45.0])
        );
    }

    #[test]
    fn rejects_missing_field() {
        assert_eq!(
            None,
            RotationMatrix::from_vectors([0.0, 0.0, GRAVITY_EARTH], [0.0; 3])
        );
    }

    #[test]
    fn rejects_overflowing_gravity() {
        assert_eq!(
            None,
            RotationMatrix::from_vectors([1e20, 0.0, 0.0], NORTH_AND_DOWN)
        );
        assert_eq!(
            None,
            RotationMatrix::from_vectors([f32::INFINITY, 0.0, 0.0], NORTH_AND_DOWN)
        );
    }

    #[test]
    fn rejects_overflowing_field() {
        let gravity = [0.0, 0.0, GRAVITY_EARTH];
        assert_eq!(None, RotationMatrix::from_vectors(gravity, [0.0, 1e38, 0.0]));
        assert_eq!(
            None,
            RotationMatrix::from_vectors(gravity, [0.0, f32::INFINITY, -40.0])
        );
        assert_eq!(
            None,
            RotationMatrix::from_vectors(gravity, [f32::NAN, 22.0, -40.0])
        );
    }
}
