use std::time::Instant;
use wheelcore::animation::SpinAnimation;
use wheelcore::prizes::Label;
use wheelcore::session::SpinTicket;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// What the drawing area paints. Shared with the draw and tick callbacks.
#[derive(Debug, Clone, Default)]
pub struct WheelState {
    pub segments: Vec<Label>,
    pub highlight: Option<usize>,
    rotation: f64,
    spin: Option<(SpinAnimation, Instant)>,
}

impl WheelState {
    pub fn new(segments: Vec<Label>) -> Self {
        Self {
            segments,
            ..Self::default()
        }
    }

    pub fn sync(&mut self, segments: &[Label], rotation: f64, highlight: Option<usize>) {
        self.segments = segments.to_vec();
        self.rotation = rotation;
        self.highlight = highlight;
    }

    pub fn start_spin(&mut self, ticket: &SpinTicket, now: Instant) {
        self.highlight = None;
        self.spin = Some((ticket.animation(), now));
    }

    pub fn finish_spin(&mut self) {
        if let Some((animation, _)) = self.spin.take() {
            self.rotation = animation.target();
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.spin
            .is_some_and(|(animation, started)| {
                !animation.is_finished(now.saturating_duration_since(started))
            })
    }

    /// Rotation to paint at `now`. Mid-spin this follows the eased animation.
    pub fn rotation_at(&self, now: Instant) -> f64 {
        match self.spin {
            Some((animation, started)) => {
                animation.rotation_at(now.saturating_duration_since(started))
            }
            None => self.rotation,
        }
    }
}

/// Breaks `text` into lines no wider than `max_width`. A single word wider than the limit gets
/// its own line rather than being split.
pub fn wrap_words(text: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };

        if measure(&candidate) > max_width && !line.is_empty() {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Vertical offsets that center `count` lines on the baseline.
pub fn line_offsets(count: usize, line_height: f64) -> Vec<f64> {
    let start = -((count.saturating_sub(1)) as f64) * line_height / 2.0;
    (0..count).map(|i| start + i as f64 * line_height).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn chars(s: &str) -> f64 {
        s.chars().count() as f64
    }

    #[test]
    fn test_wrap_words() {
        let cases = vec![
            ("HELM GRIN", 20.0, vec!["HELM GRIN"]),
            ("CAR AIR PURIFIER", 8.0, vec!["CAR AIR", "PURIFIER"]),
            ("CAR AIR PURIFIER", 3.0, vec!["CAR", "AIR", "PURIFIER"]),
            ("  spaced   out  ", 20.0, vec!["spaced out"]),
            ("", 10.0, vec![]),
        ];

        for (text, width, expected) in cases {
            assert_eq!(wrap_words(text, width, chars), expected, "text {text:?}");
        }
    }

    #[test]
    fn test_line_offsets_are_centered() {
        assert_eq!(line_offsets(1, 16.0), vec![0.0]);
        assert_eq!(line_offsets(2, 16.0), vec![-8.0, 8.0]);
        assert_eq!(line_offsets(3, 16.0), vec![-16.0, 0.0, 16.0]);
        assert!(line_offsets(0, 16.0).is_empty());
    }

    #[test]
    fn test_spin_animation_lifecycle() {
        let mut wheel = WheelState::new(vec![Label::from("A"), Label::from("B")]);
        let ticket = SpinTicket {
            id: 1,
            from: 0.0,
            to: 1500.0,
            duration: Duration::from_millis(3000),
        };
        let start = Instant::now();
        wheel.sync(&[Label::from("A"), Label::from("B")], 1500.0, Some(0));
        wheel.start_spin(&ticket, start);

        assert_eq!(wheel.highlight, None);
        assert_eq!(wheel.rotation_at(start), 0.0);
        assert!(wheel.is_animating(start + Duration::from_millis(1000)));
        let mid = wheel.rotation_at(start + Duration::from_millis(1500));
        assert!(mid > 0.0 && mid < 1500.0);
        assert!(!wheel.is_animating(start + Duration::from_millis(3000)));
        assert_eq!(wheel.rotation_at(start + Duration::from_millis(3000)), 1500.0);

        wheel.finish_spin();
        assert_eq!(wheel.rotation_at(start), 1500.0);
    }
}
