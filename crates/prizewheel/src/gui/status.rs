use derive_more::Display;
use wheelcore::prizes::Label;

/// The line of text under the wheel.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Status {
    #[display("Press \"SPIN!\" to start the draw")]
    Ready,
    #[display("The wheel is spinning...")]
    Spinning,
    #[display("Winner: {_0}")]
    Winner(Label),
    #[display("The prize list changed during the spin, no winner this time")]
    NoWinner,
    #[display("Prize \"{_0}\" has been taken out!")]
    TakenOut(Label),
    #[display("\"{_0}\" is no longer on the wheel")]
    AlreadyGone(Label),
    #[display("All prizes removed. Add new prizes to start the draw.")]
    Cleared,
    #[display("Default prizes loaded. Press \"SPIN!\" to start the draw.")]
    DefaultsLoaded,
    #[display("Saved data deleted and default prizes reloaded.")]
    StorageCleared,
    #[display("Add prizes to start the draw")]
    Empty,
}

impl Status {
    pub fn idle(has_prizes: bool) -> Self {
        if has_prizes { Self::Ready } else { Self::Empty }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        let cases = vec![
            (Status::Winner(Label::from("HELM GRIN")), "Winner: HELM GRIN"),
            (
                Status::TakenOut(Label::from("Mug")),
                "Prize \"Mug\" has been taken out!",
            ),
            (Status::idle(false), "Add prizes to start the draw"),
            (Status::idle(true), "Press \"SPIN!\" to start the draw"),
        ];

        for (status, expected) in cases {
            assert_eq!(status.to_string(), expected);
        }
    }
}
