use crate::animation::SpinAnimation;
use crate::geometry::{FULL_TURN, Geometry};
use crate::prizes::{DuplicatePolicy, Label, PrizeError, PrizeList};
use crate::resolver::{self, Resolution};
use crate::trivia::{TriviaChallenge, TriviaQuestion};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum::Display as StrumDisplay;
use thiserror::Error;

/// Every spin turns the wheel at least this far, so rotation strictly grows.
pub const MIN_SPIN_TURNS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    pub min_turns: f64,
    pub max_turns: f64,
    pub duration_ms: u64,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            min_turns: 4.0,
            max_turns: 6.0,
            duration_ms: 3000,
        }
    }
}

impl SpinConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Extra rotation bounds in degrees, `[low, high)`. Bad values are clamped rather than
    /// refused so a typo in the config file cannot stop the wheel. Neither bound drops below
    /// [`MIN_SPIN_TURNS`].
    pub fn delta_bounds(&self) -> (f64, f64) {
        let turns = |t: f64| {
            if t.is_finite() {
                t.max(MIN_SPIN_TURNS)
            } else {
                MIN_SPIN_TURNS
            }
        };
        let low = turns(self.min_turns) * FULL_TURN;
        let high = turns(self.max_turns) * FULL_TURN;
        (low, high.max(low))
    }
}

/// Draws the extra rotation for one spin.
pub fn sample_delta<R: Rng + ?Sized>(rng: &mut R, config: &SpinConfig) -> f64 {
    let (low, high) = config.delta_bounds();
    if high > low {
        rng.random_range(low..high)
    } else {
        low
    }
}

pub type SpinId = u64;

/// Everything the front end needs to animate a spin and report its completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinTicket {
    pub id: SpinId,
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
}

impl SpinTicket {
    pub fn animation(&self) -> SpinAnimation {
        SpinAnimation::new(self.from, self.to, self.duration)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Winner {
    pub index: usize,
    pub label: Label,
    pub rotation: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpinOutcome {
    Winner(Winner),
    NoWinner,
}

impl SpinOutcome {
    pub fn winner(&self) -> Option<&Winner> {
        match self {
            Self::Winner(w) => Some(w),
            Self::NoWinner => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Spinning {
        ticket: SpinTicket,
        segments: Vec<Label>,
        challenge: Option<TriviaChallenge>,
    },
    Resolved {
        outcome: SpinOutcome,
        challenge: Option<TriviaChallenge>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum Rejection {
    #[strum(to_string = "the wheel is already spinning")]
    AlreadySpinning,
    #[strum(to_string = "there are no prizes on the wheel")]
    NoSegments,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinRequest {
    Started(SpinTicket),
    Ignored(Rejection),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Claim {
    /// The winning label was found and removed at `index`.
    Removed { label: Label, index: usize },
    /// The winning label is no longer on the wheel.
    Missing(Label),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("the prize list cannot change while the wheel is spinning")]
    Locked,
    #[error("there is no prize to claim")]
    NothingToClaim,
    #[error("answer the trivia question before claiming")]
    TriviaPending,
    #[error(transparent)]
    Prize(#[from] PrizeError),
}

/// One wheel: its segment list, cumulative rotation and spin phase.
#[derive(Debug, Clone)]
pub struct SpinSession {
    prizes: PrizeList,
    rotation: f64,
    phase: Phase,
    config: SpinConfig,
    trivia: Vec<TriviaQuestion>,
    lock_while_spinning: bool,
    next_id: SpinId,
}

impl SpinSession {
    pub fn new(prizes: PrizeList, config: SpinConfig) -> Self {
        Self {
            prizes,
            rotation: 0.0,
            phase: Phase::Idle,
            config,
            trivia: Vec::new(),
            lock_while_spinning: true,
            next_id: 1,
        }
    }

    pub fn with_trivia(mut self, trivia: Vec<TriviaQuestion>) -> Self {
        self.trivia = trivia;
        self
    }

    pub fn with_list_lock(mut self, lock_while_spinning: bool) -> Self {
        self.lock_while_spinning = lock_while_spinning;
        self
    }

    pub fn prizes(&self) -> &PrizeList {
        &self.prizes
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.phase, Phase::Spinning { .. })
    }

    pub fn can_spin(&self) -> bool {
        !self.is_spinning() && !self.prizes.is_empty()
    }

    /// Settings take effect from the next spin; a spin in flight keeps its ticket.
    pub fn reconfigure(
        &mut self,
        config: SpinConfig,
        trivia: Vec<TriviaQuestion>,
        lock_while_spinning: bool,
    ) {
        self.config = config;
        self.trivia = trivia;
        self.lock_while_spinning = lock_while_spinning;
    }

    /// The list the wheel is drawn from. While spinning this is the list captured at spin start,
    /// so the picture and the resolution never disagree.
    pub fn displayed_segments(&self) -> &[Label] {
        match &self.phase {
            Phase::Spinning { segments, .. } => segments,
            _ => self.prizes.current(),
        }
    }

    pub fn outcome(&self) -> Option<&SpinOutcome> {
        match &self.phase {
            Phase::Resolved { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<&Winner> {
        self.outcome().and_then(SpinOutcome::winner)
    }

    pub fn challenge(&self) -> Option<&TriviaChallenge> {
        match &self.phase {
            Phase::Resolved { challenge, .. } => challenge.as_ref(),
            _ => None,
        }
    }

    pub fn request_spin<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SpinRequest {
        if self.is_spinning() {
            return SpinRequest::Ignored(Rejection::AlreadySpinning);
        }
        if self.prizes.is_empty() {
            return SpinRequest::Ignored(Rejection::NoSegments);
        }

        let from = self.rotation;
        let to = from + sample_delta(rng, &self.config);
        let ticket = SpinTicket {
            id: self.next_id,
            from,
            to,
            duration: self.config.duration(),
        };
        self.next_id += 1;
        self.rotation = to;

        let challenge = TriviaChallenge::pick(rng, &self.trivia);
        self.phase = Phase::Spinning {
            ticket,
            segments: self.prizes.current().to_vec(),
            challenge,
        };

        log::info!(
            "Spin #{} started: {:.2}° -> {:.2}° over {:?}",
            ticket.id,
            from,
            to,
            ticket.duration
        );
        SpinRequest::Started(ticket)
    }

    /// Settles the spin `id`. Returns `None` when no such spin is in flight.
    pub fn animation_complete(&mut self, id: SpinId) -> Option<&SpinOutcome> {
        match &self.phase {
            Phase::Spinning { ticket, .. } if ticket.id == id => {}
            _ => {
                log::debug!("Ignoring completion of spin #{}", id);
                return None;
            }
        }

        let Phase::Spinning {
            ticket,
            segments,
            challenge,
        } = std::mem::replace(&mut self.phase, Phase::Idle)
        else {
            return None;
        };

        let outcome = if self.prizes.is_empty() {
            log::warn!("Prize list emptied during spin #{}, no winner", ticket.id);
            SpinOutcome::NoWinner
        } else {
            Self::settle(&segments, ticket.to)
        };

        if let SpinOutcome::Winner(w) = &outcome {
            log::info!("Spin #{} landed on {} ({})", ticket.id, w.index, w.label);
        }

        let challenge = challenge.filter(|_| matches!(outcome, SpinOutcome::Winner(_)));
        self.phase = Phase::Resolved { outcome, challenge };
        self.outcome()
    }

    fn settle(segments: &[Label], rotation: f64) -> SpinOutcome {
        let resolution = Geometry::new(segments.len())
            .map_err(resolver::ResolveError::from)
            .and_then(|geometry| resolver::resolve_with(&geometry, rotation));

        match resolution {
            Ok(r) => {
                log_resolution(&r, segments);
                SpinOutcome::Winner(Winner {
                    index: r.index,
                    label: segments[r.index].clone(),
                    rotation,
                })
            }
            Err(e) => {
                log::warn!("Could not resolve rotation {}: {}", rotation, e);
                SpinOutcome::NoWinner
            }
        }
    }

    /// Closes the result. Returns whether there was one to close.
    pub fn dismiss_result(&mut self) -> bool {
        if matches!(self.phase, Phase::Resolved { .. }) {
            self.phase = Phase::Idle;
            true
        } else {
            false
        }
    }

    pub fn answer_trivia(&mut self, answer: &str) -> Result<bool, SessionError> {
        match &mut self.phase {
            Phase::Resolved {
                challenge: Some(challenge),
                ..
            } => Ok(challenge.answer(answer)),
            Phase::Resolved {
                outcome: SpinOutcome::Winner(_),
                challenge: None,
            } => Ok(true),
            _ => Err(SessionError::NothingToClaim),
        }
    }

    /// Takes the winning prize off the wheel and closes the result.
    ///
    /// Works from the label captured at resolution, so edits made to the list since then cannot
    /// redirect the claim to a different prize.
    pub fn take_out(&mut self) -> Result<Claim, SessionError> {
        let label = match &self.phase {
            Phase::Resolved {
                outcome: SpinOutcome::Winner(w),
                challenge,
            } => {
                if challenge.as_ref().is_some_and(|c| !c.is_unlocked()) {
                    return Err(SessionError::TriviaPending);
                }
                w.label.clone()
            }
            _ => return Err(SessionError::NothingToClaim),
        };

        self.phase = Phase::Idle;
        match self.prizes.remove_first(&label) {
            Some(index) => {
                log::info!("Prize \"{}\" taken out", label);
                Ok(Claim::Removed { label, index })
            }
            None => Ok(Claim::Missing(label)),
        }
    }

    fn guard_list(&self) -> Result<(), SessionError> {
        if self.lock_while_spinning && self.is_spinning() {
            Err(SessionError::Locked)
        } else {
            Ok(())
        }
    }

    pub fn add_label(&mut self, text: &str) -> Result<Label, SessionError> {
        self.guard_list()?;
        Ok(self.prizes.add(text)?.clone())
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Label, SessionError> {
        self.guard_list()?;
        Ok(self.prizes.remove_at(index)?)
    }

    pub fn reset_to_defaults(&mut self) -> Result<(), SessionError> {
        self.guard_list()?;
        self.prizes.reset_to_defaults();
        Ok(())
    }

    pub fn clear_all(&mut self) -> Result<(), SessionError> {
        self.guard_list()?;
        self.prizes.clear_all();
        Ok(())
    }

    /// Swaps in new list policy on config reload. The live list is left alone.
    pub fn set_list_policy(&mut self, defaults: Vec<Label>, policy: DuplicatePolicy) {
        self.prizes.set_defaults(defaults);
        self.prizes.set_policy(policy);
    }
}

fn log_resolution(r: &Resolution, segments: &[Label]) {
    log::debug!(
        "Winner calculation: rotation {:.2}°, normalized {:.2}°, pointer {:.2}°, span {:.2}°, index {} of {} ({})",
        r.rotation,
        r.normalized,
        r.pointer_angle,
        r.span,
        r.index,
        segments.len(),
        segments[r.index]
    );
}
