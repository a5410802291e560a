//! Signal propagation animation for a single McCulloch-Pitts neuron.
//!
//! The neuron has three inputs at `(1, 1)`, `(1, 3)` and `(1, 5)`, a summing
//! junction at `(2, 3)` and an output at `(3, 3)`. The animation moves a point
//! along each input edge in turn while the running weighted sum accumulates,
//! then along the output edge while the threshold decision is shown.

use std::fmt;

use log::{debug, info};

use visualnn_core::{
    color::Color,
    draw::StrokeDefinition,
    geometry::{Point, linspace, line_through, sample_segment},
    scene::{AxisRange, Frame, Marker, SceneGraph, SceneLayout, TextPosition, Trace},
};

use crate::VisualNnError;

pub const MCCULLOCH_PITTS_TITLE: &str = "McCulloch-Pitts Model";

const INPUTS: [Point; 3] = [
    Point::new(1.0, 1.0),
    Point::new(1.0, 3.0),
    Point::new(1.0, 5.0),
];
const JUNCTION: Point = Point::new(2.0, 3.0);
const OUTPUT: Point = Point::new(3.0, 3.0);

/// Samples used to draw the static edges.
const EDGE_SAMPLES: usize = 100;
const EDGE_WIDTH: f32 = 2.0;
const NODE_MARKER_SIZE: f32 = 30.0;
const NODE_INNER_MARKER_SIZE: f32 = 20.0;
const PULSE_MARKER_SIZE: f32 = 10.0;

/// One of the neuron's three inputs, bottom first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    First,
    Second,
    Third,
}

impl Input {
    pub const ALL: [Input; 3] = [Input::First, Input::Second, Input::Third];

    /// Zero-based position in the input and weight arrays.
    pub fn index(self) -> usize {
        match self {
            Input::First => 0,
            Input::Second => 1,
            Input::Third => 2,
        }
    }

    /// Canvas position of the input node.
    pub fn position(self) -> Point {
        INPUTS[self.index()]
    }
}

/// One stage of the propagation, in playback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The signal travels from an input to the summing junction.
    EdgeTraversal(Input),
    /// The weighted sum travels from the junction to the output.
    ThresholdEdge,
}

impl Stage {
    /// All stages, first to last.
    pub const ALL: [Stage; 4] = [
        Stage::EdgeTraversal(Input::First),
        Stage::EdgeTraversal(Input::Second),
        Stage::EdgeTraversal(Input::Third),
        Stage::ThresholdEdge,
    ];

    /// Start and end of the edge the signal travels along.
    pub fn edge(self) -> (Point, Point) {
        match self {
            Stage::EdgeTraversal(input) => (input.position(), JUNCTION),
            Stage::ThresholdEdge => (JUNCTION, OUTPUT),
        }
    }

    fn text_position(self) -> TextPosition {
        match self {
            Stage::EdgeTraversal(Input::First) => TextPosition::BottomRight,
            Stage::EdgeTraversal(_) => TextPosition::TopRight,
            Stage::ThresholdEdge => TextPosition::MiddleCenter,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::EdgeTraversal(input) => write!(f, "edge{}", input.index() + 1),
            Stage::ThresholdEdge => write!(f, "threshold"),
        }
    }
}

/// Position and annotation of the travelling signal at one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PropagationStep {
    stage: Stage,
    position: Point,
    annotation: String,
}

impl PropagationStep {
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn annotation(&self) -> &str {
        &self.annotation
    }

    fn to_frame(&self, index: usize, color: Color) -> Frame {
        let pulse = Trace::markers_with_text(
            vec![self.position],
            Marker::new(color, PULSE_MARKER_SIZE),
            vec![self.annotation.clone()],
        )
        .with_text_position(self.stage.text_position());

        Frame::new(format!("{}-{index}", self.stage), vec![pulse])
    }
}

/// Product of an input and its weight, with `-0` folded into `0`.
fn product(x: f64, w: f64) -> f64 {
    x * w + 0.0
}

/// A three-input threshold neuron with fixed weights.
#[derive(Debug, Clone, PartialEq)]
pub struct McCullochPitts {
    inputs: [f64; 3],
    weights: [f64; 3],
    threshold: f64,
}

impl McCullochPitts {
    pub fn new(inputs: [f64; 3], weights: [f64; 3], threshold: f64) -> Self {
        Self {
            inputs,
            weights,
            threshold,
        }
    }

    pub fn inputs(&self) -> [f64; 3] {
        self.inputs
    }

    pub fn weights(&self) -> [f64; 3] {
        self.weights
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Dot product of inputs and weights.
    pub fn weighted_sum(&self) -> f64 {
        self.partial_sum(Input::ALL.len())
    }

    /// Fires (returns 1) only when the weighted sum is strictly above the
    /// threshold.
    ///
    /// # Examples
    ///
    /// ```
    /// # use visualnn::animate::McCullochPitts;
    /// assert_eq!(McCullochPitts::new([1.0, 0.0, 1.0], [1.0, 1.0, 1.0], 1.0).output(), 1);
    /// assert_eq!(McCullochPitts::new([1.0, 0.0, 0.0], [1.0, 1.0, 1.0], 1.0).output(), 0);
    /// ```
    pub fn output(&self) -> u8 {
        u8::from(self.weighted_sum() > self.threshold)
    }

    /// Running total after the first `inputs` products.
    fn partial_sum(&self, inputs: usize) -> f64 {
        self.inputs[..inputs]
            .iter()
            .zip(&self.weights[..inputs])
            .fold(0.0, |sum, (&x, &w)| sum + product(x, w))
    }

    fn annotation(&self, stage: Stage) -> String {
        match stage {
            Stage::EdgeTraversal(Input::First) => {
                let (x, w) = (self.inputs[0], self.weights[0]);
                format!("{x} x {w} = {}", product(x, w))
            }
            Stage::EdgeTraversal(input) => {
                let index = input.index();
                let before = self.partial_sum(index);
                let (x, w) = (self.inputs[index], self.weights[index]);
                format!("{before} + {x} x {w} = {}", before + product(x, w))
            }
            Stage::ThresholdEdge => {
                format!("{}/{} = {}", self.weighted_sum(), self.threshold, self.output())
            }
        }
    }

    /// Computes every frame of the animation, `fps` per stage.
    ///
    /// # Errors
    ///
    /// Returns [`VisualNnError::InvalidParameter`] if `fps` is zero.
    pub fn propagation_steps(&self, fps: usize) -> Result<Vec<PropagationStep>, VisualNnError> {
        if fps == 0 {
            return Err(VisualNnError::InvalidParameter(
                "frames per edge must be at least 1".to_string(),
            ));
        }

        let steps = Stage::ALL
            .into_iter()
            .flat_map(|stage| {
                let (start, end) = stage.edge();
                let xs = linspace(start.x(), end.x(), fps);
                let ys = line_through(&xs, start, end);
                let annotation = self.annotation(stage);

                xs.into_iter()
                    .zip(ys)
                    .map(move |(x, y)| PropagationStep {
                        stage,
                        position: Point::new(x, y),
                        annotation: annotation.clone(),
                    })
            })
            .collect();

        Ok(steps)
    }

    fn static_traces(&self, color: Color) -> Vec<Trace> {
        let stroke = StrokeDefinition::new(color, EDGE_WIDTH);
        let mut traces: Vec<Trace> = Stage::ALL
            .into_iter()
            .map(|stage| {
                let (start, end) = stage.edge();
                Trace::lines(sample_segment(start, end, EDGE_SAMPLES), stroke.clone())
            })
            .collect();

        let nodes = vec![INPUTS[0], INPUTS[1], INPUTS[2], JUNCTION, OUTPUT];
        let [x1, x2, x3] = self.inputs;
        let labels = vec![
            format!("x1 = {x1}"),
            format!("x2 = {x2}"),
            format!("x3 = {x3}"),
            format!("p = {}", self.weighted_sum()),
            format!("f(p) = {}", self.output()),
        ];

        traces.push(
            Trace::markers_with_text(nodes.clone(), Marker::new(color, NODE_MARKER_SIZE), labels)
                .with_text_position(TextPosition::BottomCenter),
        );
        traces.push(Trace::markers(
            nodes,
            Marker::new(Color::white(), NODE_INNER_MARKER_SIZE),
        ));
        traces
    }

    /// Builds the animated scene: static edges and nodes, plus `4 * fps`
    /// frames of the travelling signal.
    ///
    /// # Errors
    ///
    /// Returns [`VisualNnError::InvalidParameter`] if `fps` is zero.
    pub fn visualise(&self, fps: usize, color: Color) -> Result<SceneGraph, VisualNnError> {
        let steps = self.propagation_steps(fps)?;
        debug!(steps = steps.len(), fps; "Propagation steps computed");

        let layout = SceneLayout::new(AxisRange::new(0.0, 4.0), AxisRange::new(0.0, 6.0))
            .with_grid(true)
            .with_title(MCCULLOCH_PITTS_TITLE)
            .with_animation(true);

        let mut scene = SceneGraph::new(layout);
        scene.extend_traces(self.static_traces(color));
        scene.set_frames(
            steps
                .iter()
                .enumerate()
                .map(|(index, step)| step.to_frame(index, color))
                .collect(),
        );

        info!(
            weighted_sum = self.weighted_sum(),
            threshold = self.threshold,
            output = self.output(),
            frames = scene.frames().len();
            "McCulloch-Pitts animation built"
        );

        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use visualnn_core::scene::TraceMode;

    fn example() -> McCullochPitts {
        McCullochPitts::new([1.0, 0.0, 1.0], [1.0, 1.0, 1.0], 1.0)
    }

    fn blue() -> Color {
        Color::new("blue").unwrap()
    }

    #[test]
    fn test_weighted_sum_and_output() {
        let neuron = example();
        assert_approx_eq!(f64, neuron.weighted_sum(), 2.0);
        assert_eq!(neuron.output(), 1);
    }

    #[test]
    fn test_threshold_equality_does_not_fire() {
        let neuron = McCullochPitts::new([1.0, 1.0, 0.0], [0.5, 0.5, 1.0], 1.0);
        assert_approx_eq!(f64, neuron.weighted_sum(), 1.0);
        assert_eq!(neuron.output(), 0);

        let scene = neuron.visualise(3, blue()).unwrap();
        let last = scene.frames().last().unwrap();
        assert_eq!(last.traces()[0].text_labels()[0], "1/1 = 0");
    }

    #[test]
    fn test_zero_fps_is_rejected() {
        assert!(matches!(
            example().visualise(0, blue()),
            Err(VisualNnError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_frame_count_is_four_times_fps() {
        for fps in 1..6 {
            let scene = example().visualise(fps, blue()).unwrap();
            assert_eq!(scene.frames().len(), 4 * fps);
        }
    }

    #[test]
    fn test_end_to_end_example() {
        let scene = example().visualise(2, blue()).unwrap();
        let frames = scene.frames();

        assert_eq!(frames.len(), 8);
        assert_eq!(frames[7].traces()[0].text_labels()[0], "2/1 = 1");
        assert_eq!(frames[0].traces()[0].text_labels()[0], "1 x 1 = 1");
        assert_eq!(frames[2].traces()[0].text_labels()[0], "1 + 0 x 1 = 1");
        assert_eq!(frames[4].traces()[0].text_labels()[0], "1 + 1 x 1 = 2");
        assert_eq!(frames[0].name(), "edge1-0");
        assert_eq!(frames[7].name(), "threshold-7");
    }

    #[test]
    fn test_steps_travel_along_edges() {
        let steps = example().propagation_steps(3).unwrap();
        assert_eq!(steps.len(), 12);

        for (chunk, stage) in steps.chunks(3).zip(Stage::ALL) {
            let (start, end) = stage.edge();
            assert!(chunk.iter().all(|step| step.stage() == stage));
            assert_eq!(chunk[0].position(), start);
            assert_eq!(chunk[2].position(), end);
        }
        assert_eq!(steps[1].position(), Point::new(1.5, 2.0));
    }

    #[test]
    fn test_single_frame_per_stage_sits_at_edge_start() {
        let steps = example().propagation_steps(1).unwrap();
        let positions: Vec<Point> = steps.iter().map(PropagationStep::position).collect();
        assert_eq!(
            positions,
            vec![INPUTS[0], INPUTS[1], INPUTS[2], JUNCTION]
        );
    }

    #[test]
    fn test_static_scene() {
        let scene = example().visualise(2, blue()).unwrap();

        assert_eq!(scene.traces().len(), 6);
        assert!(scene.traces()[..4].iter().all(|t| t.mode() == TraceMode::Lines));
        assert_eq!(scene.traces()[0].points().len(), 100);
        assert_eq!(scene.traces()[3].endpoints(), Some((JUNCTION, OUTPUT)));

        let nodes = &scene.traces()[4];
        assert_eq!(nodes.mode(), TraceMode::MarkersText);
        assert_eq!(
            nodes.text_labels().to_vec(),
            vec!["x1 = 1", "x2 = 0", "x3 = 1", "p = 2", "f(p) = 1"]
        );
        assert_eq!(nodes.text_position(), TextPosition::BottomCenter);

        let layout = scene.layout();
        assert_eq!(layout.x_range(), AxisRange::new(0.0, 4.0));
        assert_eq!(layout.y_range(), AxisRange::new(0.0, 6.0));
        assert_eq!(layout.title(), Some(MCCULLOCH_PITTS_TITLE));
        assert!(layout.animated());
        assert!(scene.is_animated());
    }

    #[test]
    fn test_fractional_values_are_annotated() {
        let neuron = McCullochPitts::new([0.5, 2.0, 1.0], [2.0, 0.25, -1.0], 0.0);
        let steps = neuron.propagation_steps(1).unwrap();
        assert_eq!(steps[0].annotation(), "0.5 x 2 = 1");
        assert_eq!(steps[1].annotation(), "1 + 2 x 0.25 = 1.5");
        assert_eq!(steps[2].annotation(), "1.5 + 1 x -1 = 0.5");
        assert_eq!(steps[3].annotation(), "0.5/0 = 1");
    }

    #[test]
    fn test_zero_input_with_negative_weight_prints_zero() {
        let neuron = McCullochPitts::new([0.0, 0.0, 0.0], [-1.0, -1.0, -1.0], 0.0);
        let annotations: Vec<String> = neuron
            .propagation_steps(1)
            .unwrap()
            .iter()
            .map(|step| step.annotation().to_string())
            .collect();

        assert_eq!(
            annotations,
            vec![
                "0 x -1 = 0",
                "0 + 0 x -1 = 0",
                "0 + 0 x -1 = 0",
                "0/0 = 0",
            ]
        );

        let scene = neuron.visualise(1, blue()).unwrap();
        assert_eq!(scene.traces()[4].text_labels()[3], "p = 0");
    }

    #[test]
    fn test_decimal_sum_uses_double_precision() {
        // 0.1 + 0.2 exceeds 0.3 in double precision.
        let neuron = McCullochPitts::new([0.1, 0.2, 0.0], [1.0, 1.0, 1.0], 0.3);
        assert_eq!(neuron.output(), 1);

        let steps = neuron.propagation_steps(1).unwrap();
        assert_eq!(steps[3].annotation(), "0.30000000000000004/0.3 = 1");
    }

    #[test]
    fn test_stage_edges_and_names() {
        assert_eq!(
            Stage::EdgeTraversal(Input::Third).edge(),
            (Point::new(1.0, 5.0), JUNCTION)
        );
        assert_eq!(Stage::ThresholdEdge.edge(), (JUNCTION, OUTPUT));

        let names: Vec<String> = Stage::ALL.iter().map(Stage::to_string).collect();
        assert_eq!(names, vec!["edge1", "edge2", "edge3", "threshold"]);
    }
}
