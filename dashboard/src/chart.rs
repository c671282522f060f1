use fedwatchcore::metrics::MetricSample;
use iced::{
    mouse,
    widget::canvas::{self, Frame, Geometry, Path, Stroke, Text},
    Color, Pixels, Point, Rectangle, Renderer, Theme,
};

struct SeriesLine {
    label: &'static str,
    color: Color,
    value: fn(&MetricSample) -> f64,
}

fn series_lines() -> [SeriesLine; 3] {
    [
        SeriesLine {
            label: "loss",
            color: Color::from_rgb8(0x88, 0x84, 0xd8),
            value: |sample| sample.loss,
        },
        SeriesLine {
            label: "accuracy",
            color: Color::from_rgb8(0x82, 0xca, 0x9d),
            value: |sample| sample.accuracy,
        },
        SeriesLine {
            label: "epsilon",
            color: Color::from_rgb8(0xff, 0x73, 0x00),
            value: |sample| sample.epsilon,
        },
    ]
}

/// Round span of the series, widened to one when a single round is present.
fn round_bounds(samples: &[MetricSample]) -> (f64, f64) {
    let min = samples.iter().map(|s| s.round).min().unwrap_or(0) as f64;
    let max = samples.iter().map(|s| s.round).max().unwrap_or(0) as f64;
    (min, max.max(min + 1.0))
}

/// Shared value scale across all three lines, anchored at zero.
fn value_bounds(samples: &[MetricSample]) -> (f64, f64) {
    let mut min = 0.0_f64;
    let mut max = f64::MIN;
    for sample in samples {
        for line in series_lines() {
            let value = (line.value)(sample);
            min = min.min(value);
            max = max.max(value);
        }
    }
    (min, max.max(min + 1e-6))
}

/// Line chart over the metrics series, keyed by round.
///
/// An empty series draws the frame and grid with no points.
pub struct MetricsChart {
    samples: Vec<MetricSample>,
}

impl MetricsChart {
    pub fn new(samples: &[MetricSample]) -> Self {
        Self {
            samples: samples.to_vec(),
        }
    }
}

impl<Message> canvas::Program<Message> for MetricsChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.05, 0.05, 0.05),
        );

        let plot = Rectangle {
            x: 46.0,
            y: 16.0,
            width: (bounds.width - 62.0).max(1.0),
            height: (bounds.height - 60.0).max(1.0),
        };

        let grid_color = Color::from_rgb(0.25, 0.25, 0.3);
        for step in 0..=4 {
            let y = plot.y + plot.height * (step as f32 / 4.0);
            let rule = Path::new(|builder| {
                builder.move_to(Point::new(plot.x, y));
                builder.line_to(Point::new(plot.x + plot.width, y));
            });
            frame.stroke(&rule, Stroke::default().with_color(grid_color));
        }

        let label_color = Color::from_rgb(0.6, 0.6, 0.65);
        for (index, line) in series_lines().iter().enumerate() {
            let x = plot.x + index as f32 * 90.0;
            let y = plot.y + plot.height + 24.0;
            let swatch = Path::new(|builder| {
                builder.move_to(Point::new(x, y + 5.0));
                builder.line_to(Point::new(x + 16.0, y + 5.0));
            });
            frame.stroke(&swatch, Stroke::default().with_width(3.0).with_color(line.color));
            frame.fill_text(Text {
                content: line.label.into(),
                position: Point::new(x + 20.0, y),
                color: label_color,
                size: Pixels(12.0),
                ..Text::default()
            });
        }

        if self.samples.is_empty() {
            return vec![frame.into_geometry()];
        }

        let (min_round, max_round) = round_bounds(&self.samples);
        let round_span = (max_round - min_round) as f32;
        let (min_value, max_value) = value_bounds(&self.samples);
        let value_span = (max_value - min_value) as f32;

        let position = |sample: &MetricSample, value: f64| {
            let x = plot.x + ((sample.round as f64 - min_round) as f32 / round_span) * plot.width;
            let normalized = ((value - min_value) as f32 / value_span).clamp(0.0, 1.0);
            let y = plot.y + plot.height - normalized * plot.height;
            Point::new(x, y)
        };

        for line in series_lines() {
            if self.samples.len() > 1 {
                let path = Path::new(|builder| {
                    for (index, sample) in self.samples.iter().enumerate() {
                        let point = position(sample, (line.value)(sample));
                        if index == 0 {
                            builder.move_to(point);
                        } else {
                            builder.line_to(point);
                        }
                    }
                });
                frame.stroke(&path, Stroke::default().with_width(2.0).with_color(line.color));
            }

            for sample in &self.samples {
                let point = position(sample, (line.value)(sample));
                let marker = Path::new(|builder| builder.circle(point, 2.5));
                frame.fill(&marker, line.color);
            }
        }

        frame.fill_text(Text {
            content: format!("{max_value:.2}"),
            position: Point::new(6.0, plot.y - 6.0),
            color: label_color,
            size: Pixels(12.0),
            ..Text::default()
        });
        frame.fill_text(Text {
            content: format!("{min_value:.2}"),
            position: Point::new(6.0, plot.y + plot.height - 6.0),
            color: label_color,
            size: Pixels(12.0),
            ..Text::default()
        });
        frame.fill_text(Text {
            content: format!("round {min_round:.0}"),
            position: Point::new(plot.x, plot.y + plot.height + 6.0),
            color: label_color,
            size: Pixels(12.0),
            ..Text::default()
        });
        let last_round = self.samples.iter().map(|s| s.round).max().unwrap_or(0);
        frame.fill_text(Text {
            content: format!("round {last_round}"),
            position: Point::new(plot.x + plot.width - 52.0, plot.y + plot.height + 6.0),
            color: label_color,
            size: Pixels(12.0),
            ..Text::default()
        });

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_bounds_anchor_at_zero() {
        let samples = vec![MetricSample::new(1, 0.9, 0.1, 1.0)];
        let (min, max) = value_bounds(&samples);
        assert_eq!(min, 0.0);
        assert_eq!(max, 1.0);
    }

    #[test]
    fn value_bounds_follow_the_largest_line() {
        let samples = vec![
            MetricSample::new(1, 0.9, 0.1, 1.0),
            MetricSample::new(2, 0.5, 0.4, 3.2),
        ];
        assert_eq!(value_bounds(&samples).1, 3.2);
    }

    #[test]
    fn round_bounds_widen_a_single_round() {
        let samples = vec![MetricSample::new(7, 0.9, 0.1, 1.0)];
        assert_eq!(round_bounds(&samples), (7.0, 8.0));
    }

    #[test]
    fn round_bounds_span_the_series() {
        let samples = vec![
            MetricSample::new(3, 0.9, 0.1, 1.0),
            MetricSample::new(9, 0.5, 0.6, 2.0),
        ];
        assert_eq!(round_bounds(&samples), (3.0, 9.0));
    }
}
