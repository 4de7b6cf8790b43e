use crate::{Orientation, OrientationClassifier, SensorSample};
use futures_lite::ready;
use futures_lite::stream::Stream;
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

pin_project! {
    /// A stream of orientation changes derived from a stream of sensor readings.
    /// Created by [`OrientationClassifier::classify_stream()`].
    pub struct Classify<S> {
        #[pin]
        samples: S,
        classifier: OrientationClassifier,
    }
}

impl<S: Stream<Item = SensorSample>> Classify<S> {
    pub(crate) fn new(samples: S, classifier: OrientationClassifier) -> Self {
        Classify {
            samples,
            classifier,
        }
    }

    pub fn classifier(&self) -> &OrientationClassifier {
        &self.classifier
    }
}

impl<S> Stream for Classify<S>
where
    S: Stream<Item = SensorSample>,
{
    type Item = Orientation;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        let next = ready!(this.samples.poll_next(cx));

        match next {
            Some(sample) => match this.classifier.ingest(sample) {
                Some(orientation) => Poll::Ready(Some(orientation)),
                None => {
                    cx.waker().wake_by_ref();
                    Poll::Pending
                }
            },
            None => Poll::Ready(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Config, Orientation, OrientationClassifier, SensorSample};
    use futures_lite::{future, stream, StreamExt as _};

    #[test]
    fn yields_only_changes() {
        let mut samples = vec![SensorSample::magnetometer(0.0, 22.0, -40.0)];
        samples.extend((0..8).map(|_| SensorSample::accelerometer(9.81, 0.0, 0.0)));
        samples.extend((0..8).map(|_| SensorSample::accelerometer(0.0, 0.0, -9.81)));

        let classifier = OrientationClassifier::new(Orientation::Portrait, &Config::default());
        let changes: Vec<_> =
            future::block_on(classifier.classify_stream(stream::iter(samples)).collect());
        assert_eq!(
            vec![
                Orientation::FaceUp,
                Orientation::Landscape,
                Orientation::FaceDown
            ],
            changes
        );
    }

    #[test]
    fn ends_with_the_sample_stream() {
        let classifier = OrientationClassifier::new(Orientation::Landscape, &Config::default());
        let mut changes = classifier.classify_stream(stream::empty());
        assert_eq!(None, future::block_on(changes.next()));
        assert_eq!(Orientation::Landscape, changes.classifier().current());
    }
}
