use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaQuestion {
    pub question: String,
    pub answers: Vec<String>,
}

impl TriviaQuestion {
    pub fn new(question: impl Into<String>, answers: Vec<String>) -> Self {
        Self {
            question: question.into(),
            answers,
        }
    }

    /// Answers match ignoring case and surrounding or repeated whitespace.
    pub fn accepts(&self, answer: &str) -> bool {
        let answer = fold(answer);
        !answer.is_empty() && self.answers.iter().any(|a| fold(a) == answer)
    }
}

fn fold(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// A question standing between a resolved winner and the take-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriviaChallenge {
    question: TriviaQuestion,
    unlocked: bool,
}

impl TriviaChallenge {
    pub fn new(question: TriviaQuestion) -> Self {
        Self {
            question,
            unlocked: false,
        }
    }

    pub fn pick<R: Rng + ?Sized>(rng: &mut R, deck: &[TriviaQuestion]) -> Option<Self> {
        deck.choose(rng).cloned().map(Self::new)
    }

    pub fn question(&self) -> &TriviaQuestion {
        &self.question
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Once unlocked, stays unlocked.
    pub fn answer(&mut self, answer: &str) -> bool {
        if self.question.accepts(answer) {
            self.unlocked = true;
        }
        self.unlocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn capital() -> TriviaQuestion {
        TriviaQuestion::new(
            "Capital of Indonesia?",
            vec!["Jakarta".to_string(), "Nusantara".to_string()],
        )
    }

    #[test]
    fn test_answer_matching() {
        let q = capital();
        let cases = vec![
            ("Jakarta", true),
            ("  jakarta ", true),
            ("NUSANTARA", true),
            ("Bandung", false),
            ("", false),
            ("   ", false),
        ];
        for (answer, expected) in cases {
            assert_eq!(q.accepts(answer), expected, "answer {answer:?}");
        }
    }

    #[test]
    fn test_challenge_unlocks_once() {
        let mut challenge = TriviaChallenge::new(capital());
        assert!(!challenge.answer("Surabaya"));
        assert!(!challenge.is_unlocked());
        assert!(challenge.answer("jakarta"));
        assert!(challenge.answer("wrong now"));
        assert!(challenge.is_unlocked());
    }

    #[test]
    fn test_pick_from_deck() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(TriviaChallenge::pick(&mut rng, &[]).is_none());
        let picked = TriviaChallenge::pick(&mut rng, &[capital()]).unwrap();
        assert_eq!(picked.question(), &capital());
    }
}
