use crate::{Config, Orientation, SensorSample};
use futures_lite::stream;

pub(crate) type SampleStream = stream::Empty<SensorSample>;

pub(crate) fn samples(_config: Config) -> SampleStream {
    stream::empty()
}

pub(crate) fn current_orientation() -> Option<Orientation> {
    None
}
