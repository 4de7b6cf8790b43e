use std::{error, fmt};

/// The sensor listeners currently interested in readings.
/// Optimized for iteration and adding while being slow on removal.
#[derive(Debug)]
pub(crate) struct Listeners<T> {
    listeners: Vec<Listener<T>>,
    next_handle: usize,
}

impl<T> Listeners<T> {
    pub(crate) const fn new() -> Self {
        /// The first handle is 1 and not 0 so that
        /// we can have an "invalid" handle that never matches anything.
        const FIRST_HANDLE: usize = 1;
        Self {
            listeners: Vec::new(),
            next_handle: FIRST_HANDLE,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> {
        self.listeners.iter().map(|l| &l.value)
    }

    pub(crate) fn add(&mut self, value: T) -> Result<ListenerHandle, OverflowError> {
        let handle = self.next_handle;
        self.next_handle = self.next_handle.checked_add(1).ok_or(OverflowError)?;
        self.listeners.push(Listener { handle, value });
        Ok(ListenerHandle(handle))
    }

    /// Removes the listener and returns `true` if it was the last one.
    pub(crate) fn remove(&mut self, handle: ListenerHandle) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.handle != handle.0);
        before != self.listeners.len() && self.listeners.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct OverflowError;

impl fmt::Display for OverflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("failed to add sensor listener: no more handles left")
    }
}

impl error::Error for OverflowError {}

/// An opaque handle used to remove a listener.
#[derive(Debug, Default)]
#[must_use]
pub(crate) struct ListenerHandle(usize);

#[derive(Debug)]
struct Listener<T> {
    handle: usize,
    value: T,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SensorSample;

    #[test]
    fn delivers_to_every_listener() {
        let mut listeners: Listeners<Box<dyn Fn(SensorSample) -> f32>> = Listeners::new();
        let _x = listeners.add(Box::new(|s: SensorSample| s.values[0])).expect("no overflow");
        let _z = listeners.add(Box::new(|s: SensorSample| s.values[2])).expect("no overflow");
        let sample = SensorSample::accelerometer(1.0, 2.0, 3.0);
        assert_eq!(
            vec![1.0, 3.0],
            listeners.iter().map(|l| l(sample)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn removes_a_listener() {
        let mut listeners = Listeners::new();
        let _first = listeners.add("first").expect("no overflow");
        let second = listeners.add("second").expect("no overflow");
        let _third = listeners.add("third").expect("no overflow");
        assert!(!listeners.remove(second));
        assert_eq!(vec![&"first", &"third"], listeners.iter().collect::<Vec<_>>());
    }

    #[test]
    fn reports_removal_of_last_listener() {
        let mut listeners = Listeners::new();
        let first = listeners.add("first").expect("no overflow");
        let second = listeners.add("second").expect("no overflow");
        assert!(!listeners.remove(first));
        assert!(listeners.remove(second));
        assert!(listeners.is_empty());
    }

    #[test]
    fn default_handle_does_not_remove_anything() {
        let mut listeners = Listeners::new();
        let _first = listeners.add("first").expect("no overflow");
        assert!(!listeners.remove(ListenerHandle::default()));
        assert_eq!(vec![&"first"], listeners.iter().collect::<Vec<_>>());
    }

    #[test]
    fn removing_twice_is_harmless() {
        let mut listeners = Listeners::new();
        let first = listeners.add("first").expect("no overflow");
        assert!(listeners.remove(first));
        assert!(!listeners.remove(ListenerHandle(1)));
    }
}
