//! Connector segments between layers and blocks.
//!
//! Neuron layers are connected with a full bipartite set of segments, one per
//! (current neuron, next neuron) pair. Blocks are connected through a handful
//! of explicit corner pairs instead.

use visualnn_core::{
    draw::StrokeDefinition,
    geometry::{Point, sample_segment},
    scene::{Shape, Trace},
};

use super::NeuronLayer;

/// Number of samples per connector trace. Connectors are straight, so the two
/// endpoints are enough.
const SAMPLES_PER_SEGMENT: usize = 2;

/// A straight segment between two anchor points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    start: Point,
    end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }
}

/// An ordered set of connector segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectorSet {
    segments: Vec<Segment>,
}

impl ConnectorSet {
    /// Connects every point of `from` to every point of `to`.
    ///
    /// Segments are ordered by source point first, then by target point.
    pub fn bipartite(from: &[Point], to: &[Point]) -> Self {
        let segments = from
            .iter()
            .flat_map(|&start| to.iter().map(move |&end| Segment::new(start, end)))
            .collect();
        Self { segments }
    }

    /// Connects every neuron of `current` to every neuron of `next`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use visualnn::layout::{ConnectorSet, NeuronLayer};
    /// # use visualnn::color::Color;
    /// let a = NeuronLayer::new(3, 1.0, 2.0, 2.0, Color::default());
    /// let b = NeuronLayer::new(4, 2.0, 2.0, 1.0, Color::default());
    /// assert_eq!(ConnectorSet::between_layers(&a, &b).len(), 12);
    /// ```
    pub fn between_layers(current: &NeuronLayer, next: &NeuronLayer) -> Self {
        Self::bipartite(current.positions(), next.positions())
    }

    /// Builds a connector set from explicit anchor pairs, keeping their order.
    pub fn between_corners(pairs: impl IntoIterator<Item = (Point, Point)>) -> Self {
        let segments = pairs
            .into_iter()
            .map(|(start, end)| Segment::new(start, end))
            .collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Appends the segments of `other` after the segments of `self`.
    pub fn extend(&mut self, other: ConnectorSet) {
        self.segments.extend(other.segments);
    }

    /// One line trace per segment, each sampled at both endpoints.
    pub fn to_traces(&self, stroke: &StrokeDefinition) -> Vec<Trace> {
        self.segments
            .iter()
            .map(|segment| {
                let points = sample_segment(segment.start, segment.end, SAMPLES_PER_SEGMENT);
                Trace::lines(points, stroke.clone())
            })
            .collect()
    }

    /// One line shape per segment.
    pub fn to_shapes(&self, stroke: &StrokeDefinition) -> Vec<Shape> {
        self.segments
            .iter()
            .map(|segment| Shape::line(segment.start, segment.end, stroke.clone()))
            .collect()
    }
}

/// Traces connecting two adjacent neuron layers.
///
/// The connector lines come first, followed by the markers of `current` and
/// then those of `next`, so neurons are drawn over their connections.
pub fn connect(current: &NeuronLayer, next: &NeuronLayer, stroke: &StrokeDefinition) -> Vec<Trace> {
    let mut traces = ConnectorSet::between_layers(current, next).to_traces(stroke);
    traces.extend(current.traces());
    traces.extend(next.traces());
    traces
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;
    use visualnn_core::color::Color;

    /// Two layers of sizes n1 and n2 are joined by exactly n1 * n2 segments.
    fn check_bipartite_count(n1: usize, n2: usize) -> Result<(), TestCaseError> {
        let current = NeuronLayer::new(n1, 1.0, 2.0, 1.0, Color::default());
        let next = NeuronLayer::new(n2, 2.0, 2.0, 1.0, Color::default());

        let connectors = ConnectorSet::between_layers(&current, &next);
        prop_assert_eq!(connectors.len(), n1 * n2);
        prop_assert_eq!(connectors.to_traces(&StrokeDefinition::default()).len(), n1 * n2);
        Ok(())
    }

    proptest! {
        #[test]
        fn bipartite_count(n1 in 0usize..40, n2 in 0usize..40) {
            check_bipartite_count(n1, n2)?;
        }
    }
}
