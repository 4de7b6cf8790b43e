use std::num::NonZeroUsize;

/// How a [`SmoothingBuffer`] computes its average before it has been filled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Averaging {
    /// Average over all slots. Slots that were never written count as `0`,
    /// so early averages are biased toward 0° until the window is full.
    #[default]
    ZeroFilled,
    /// Average over the slots that have been written so far.
    Populated,
}

/// A fixed-capacity rolling window of angle readings in whole degrees.
#[derive(Debug, Clone)]
pub struct SmoothingBuffer {
    slots: Box<[i32]>,
    populated: usize,
    averaging: Averaging,
    average: f32,
}

impl SmoothingBuffer {
    pub fn new(capacity: NonZeroUsize, averaging: Averaging) -> Self {
        Self {
            slots: vec![0; capacity.get()].into_boxed_slice(),
            populated: 0,
            averaging,
            average: 0.0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots written since creation or the last [`clear`](Self::clear).
    /// Never exceeds [`capacity`](Self::capacity).
    pub fn len(&self) -> usize {
        self.populated
    }

    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Pushes `degrees` (rounded to the nearest whole degree),
    /// evicting the oldest reading, and returns the new average.
    pub fn push(&mut self, degrees: f32) -> f32 {
        // Oldest reading sits at index 0 and falls off on rotation.
        self.slots.rotate_left(1);
        if let Some(last) = self.slots.last_mut() {
            *last = degrees.round() as i32;
        }
        self.populated = (self.populated + 1).min(self.slots.len());
        self.average = self.compute_average();
        self.average
    }

    /// The average as of the last push.
    pub fn average(&self) -> f32 {
        self.average
    }

    pub fn clear(&mut self) {
        self.slots.fill(0);
        self.populated = 0;
        self.average = 0.0;
    }

    fn compute_average(&self) -> f32 {
        let (values, count) = match self.averaging {
            Averaging::ZeroFilled => (&self.slots[..], self.slots.len()),
            Averaging::Populated => {
                let start = self.slots.len() - self.populated;
                (&self.slots[start..], self.populated)
            }
        };
        if count == 0 {
            return 0.0;
        }
        let sum: i64 = values.iter().map(|&v| i64::from(v)).sum();
        sum as f32 / count as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(capacity: usize, averaging: Averaging) -> SmoothingBuffer {
        let capacity = NonZeroUsize::new(capacity).expect("non-zero capacity");
        SmoothingBuffer::new(capacity, averaging)
    }

    #[test]
    fn steady_input_averages_to_itself_once_full() {
        let mut buffer = buffer(5, Averaging::ZeroFilled);
        for _ in 0..5 {
            buffer.push(10.0);
        }
        assert_eq!(10.0, buffer.push(10.0));
        assert_eq!(5, buffer.len());
    }

    #[test]
    fn single_value_is_diluted_by_empty_slots() {
        let mut buffer = buffer(5, Averaging::ZeroFilled);
        assert_eq!(7.0 / 5.0, buffer.push(7.0));
    }

    #[test]
    fn single_value_is_not_diluted_when_averaging_populated_slots() {
        let mut buffer = buffer(5, Averaging::Populated);
        assert_eq!(7.0, buffer.push(7.0));
        assert_eq!(8.0, buffer.push(9.0));
    }

    #[test]
    fn evicts_oldest_reading() {
        let mut buffer = buffer(3, Averaging::ZeroFilled);
        buffer.push(90.0);
        buffer.push(0.0);
        buffer.push(0.0);
        assert_eq!(30.0, buffer.average());
        assert_eq!(0.0, buffer.push(0.0));
    }

    #[test]
    fn rounds_to_nearest_degree() {
        let mut buffer = buffer(1, Averaging::ZeroFilled);
        assert_eq!(13.0, buffer.push(12.6));
        assert_eq!(-13.0, buffer.push(-12.6));
        assert_eq!(12.0, buffer.push(12.4));
    }

    #[test]
    fn length_never_exceeds_capacity() {
        let mut buffer = buffer(2, Averaging::Populated);
        for i in 0..10 {
            buffer.push(i as f32);
            assert!(buffer.len() <= buffer.capacity());
        }
        assert_eq!(8.5, buffer.average());
    }

    #[test]
    fn clear_resets_readings() {
        let mut buffer = buffer(2, Averaging::ZeroFilled);
        buffer.push(40.0);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(0.0, buffer.average());
        assert_eq!(5.0, buffer.push(10.0));
    }
}
