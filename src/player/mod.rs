use std::time::{Duration, Instant};

pub const INTRO_DURATION: Duration = Duration::from_millis(4000);
pub const QUESTION_DURATION: Duration = Duration::from_millis(2000);
pub const COUNTDOWN_DURATION: Duration = Duration::from_millis(5000);
pub const REVEAL_DURATION: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Intro,
    Question,
    Countdown,
    Reveal,
    Finished,
}

impl Phase {
    /// How long the phase stays on screen. `Finished` is terminal.
    pub fn duration(self) -> Option<Duration> {
        match self {
            Phase::Intro => Some(INTRO_DURATION),
            Phase::Question => Some(QUESTION_DURATION),
            Phase::Countdown => Some(COUNTDOWN_DURATION),
            Phase::Reveal => Some(REVEAL_DURATION),
            Phase::Finished => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    PhaseChanged { phase: Phase, index: usize },
    Finished,
}

/// Drives the timed phase sequence of quiz playback.
///
/// Transitions are scheduled at absolute deadlines: each new deadline is
/// anchored to the previous one, not to the moment `poll` happened to run,
/// so a stalled event loop catches up by replaying every matured transition
/// in order instead of letting the schedule drift.
#[derive(Debug, Clone)]
pub struct Player {
    question_count: usize,
    phase: Phase,
    index: usize,
    deadline: Option<Instant>,
}

impl Player {
    /// Begins playback from the intro. `question_count` must be >= 1.
    pub fn start(question_count: usize, now: Instant) -> Self {
        Self {
            question_count: question_count.max(1),
            phase: Phase::Intro,
            index: 0,
            deadline: Some(now + INTRO_DURATION),
        }
    }

    /// Halts the timer and resets to the intro. Playback is not resumable
    /// mid-question; `restart` always replays from the top.
    pub fn stop(&mut self) {
        self.phase = Phase::Intro;
        self.index = 0;
        self.deadline = None;
    }

    pub fn restart(&mut self, now: Instant) {
        *self = Self::start(self.question_count, now);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn question_count(&self) -> usize {
        self.question_count
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fraction of the current phase already elapsed, in [0, 1].
    pub fn phase_progress(&self, now: Instant) -> f32 {
        let (Some(deadline), Some(duration)) = (self.deadline, self.phase.duration()) else {
            return 1.0;
        };
        let remaining = deadline.saturating_duration_since(now);
        let fraction = remaining.as_secs_f32() / duration.as_secs_f32();
        (1.0 - fraction).clamp(0.0, 1.0)
    }

    /// Advances through every transition whose deadline has passed and
    /// returns the emitted events in order. `Finished` is emitted exactly
    /// once; after that, polling is a no-op until a restart.
    pub fn poll(&mut self, now: Instant) -> Vec<PlayerEvent> {
        let mut events = Vec::new();
        while let Some(deadline) = self.deadline {
            if now < deadline {
                break;
            }
            self.advance(deadline);
            events.push(match self.phase {
                Phase::Finished => PlayerEvent::Finished,
                phase => PlayerEvent::PhaseChanged {
                    phase,
                    index: self.index,
                },
            });
        }
        events
    }

    fn advance(&mut self, at: Instant) {
        self.phase = match self.phase {
            Phase::Intro => Phase::Question,
            Phase::Question => Phase::Countdown,
            Phase::Countdown => Phase::Reveal,
            Phase::Reveal => {
                if self.index + 1 < self.question_count {
                    self.index += 1;
                    Phase::Question
                } else {
                    Phase::Finished
                }
            }
            Phase::Finished => Phase::Finished,
        };
        self.deadline = self.phase.duration().map(|d| at + d);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    fn drain(player: &mut Player, base: Instant, until_ms: u64, step_ms: u64) -> Vec<PlayerEvent> {
        let mut events = Vec::new();
        let mut t = 0;
        while t <= until_ms {
            events.extend(player.poll(at(base, t)));
            t += step_ms;
        }
        events
    }

    #[test]
    fn visits_phases_in_order() {
        let base = Instant::now();
        let mut player = Player::start(2, base);
        let events = drain(&mut player, base, 30_000, 100);

        let expected = vec![
            PlayerEvent::PhaseChanged { phase: Phase::Question, index: 0 },
            PlayerEvent::PhaseChanged { phase: Phase::Countdown, index: 0 },
            PlayerEvent::PhaseChanged { phase: Phase::Reveal, index: 0 },
            PlayerEvent::PhaseChanged { phase: Phase::Question, index: 1 },
            PlayerEvent::PhaseChanged { phase: Phase::Countdown, index: 1 },
            PlayerEvent::PhaseChanged { phase: Phase::Reveal, index: 1 },
            PlayerEvent::Finished,
        ];
        assert_eq!(events, expected);
    }

    #[test]
    fn transitions_fire_at_absolute_deadlines() {
        let base = Instant::now();
        let mut player = Player::start(3, base);

        assert!(player.poll(at(base, 3_999)).is_empty());
        assert_eq!(
            player.poll(at(base, 4_000)),
            vec![PlayerEvent::PhaseChanged { phase: Phase::Question, index: 0 }]
        );
        assert!(player.poll(at(base, 5_999)).is_empty());
        assert_eq!(
            player.poll(at(base, 6_000)),
            vec![PlayerEvent::PhaseChanged { phase: Phase::Countdown, index: 0 }]
        );
        assert_eq!(
            player.poll(at(base, 11_000)),
            vec![PlayerEvent::PhaseChanged { phase: Phase::Reveal, index: 0 }]
        );
        assert_eq!(
            player.poll(at(base, 15_000)),
            vec![PlayerEvent::PhaseChanged { phase: Phase::Question, index: 1 }]
        );
    }

    #[test]
    fn single_question_reaches_finished_without_second_question() {
        let base = Instant::now();
        let mut player = Player::start(1, base);
        let events = drain(&mut player, base, 20_000, 100);

        assert_eq!(events.last(), Some(&PlayerEvent::Finished));
        let question_phases = events
            .iter()
            .filter(|e| matches!(e, PlayerEvent::PhaseChanged { phase: Phase::Question, .. }))
            .count();
        assert_eq!(question_phases, 1);
    }

    #[test]
    fn finished_entered_after_intro_plus_cycles() {
        // 4000 ms intro + N * (2000 + 5000 + 4000) ms per question.
        let base = Instant::now();
        let mut player = Player::start(5, base);

        let events = drain(&mut player, base, 58_999, 100);
        assert!(!events.contains(&PlayerEvent::Finished));
        assert_eq!(player.poll(at(base, 59_000)), vec![PlayerEvent::Finished]);
    }

    #[test]
    fn late_poll_catches_up_in_order() {
        let base = Instant::now();
        let mut player = Player::start(1, base);

        let events = player.poll(at(base, 15_000));
        assert_eq!(
            events,
            vec![
                PlayerEvent::PhaseChanged { phase: Phase::Question, index: 0 },
                PlayerEvent::PhaseChanged { phase: Phase::Countdown, index: 0 },
                PlayerEvent::PhaseChanged { phase: Phase::Reveal, index: 0 },
                PlayerEvent::Finished,
            ]
        );
    }

    #[test]
    fn finished_fires_exactly_once() {
        let base = Instant::now();
        let mut player = Player::start(1, base);

        let events = drain(&mut player, base, 60_000, 500);
        let finishes = events.iter().filter(|e| **e == PlayerEvent::Finished).count();
        assert_eq!(finishes, 1);
        assert!(player.poll(at(base, 120_000)).is_empty());
        assert_eq!(player.phase(), Phase::Finished);
    }

    #[test]
    fn stop_resets_to_intro() {
        let base = Instant::now();
        let mut player = Player::start(3, base);
        player.poll(at(base, 7_000));
        assert_eq!(player.phase(), Phase::Countdown);

        player.stop();
        assert_eq!(player.phase(), Phase::Intro);
        assert_eq!(player.index(), 0);
        assert!(!player.is_running());
        assert!(player.poll(at(base, 60_000)).is_empty());
    }

    #[test]
    fn restart_after_stop_replays_from_the_top() {
        let base = Instant::now();
        let mut player = Player::start(2, base);
        player.poll(at(base, 20_000));
        player.stop();

        let resume = at(base, 30_000);
        player.restart(resume);
        assert_eq!(player.phase(), Phase::Intro);
        assert_eq!(
            player.poll(resume + Duration::from_millis(4_000)),
            vec![PlayerEvent::PhaseChanged { phase: Phase::Question, index: 0 }]
        );
    }

    #[test]
    fn countdown_progress_tracks_elapsed_fraction() {
        let base = Instant::now();
        let mut player = Player::start(1, base);
        player.poll(at(base, 6_000));
        assert_eq!(player.phase(), Phase::Countdown);

        assert!(player.phase_progress(at(base, 6_000)) < 0.01);
        let halfway = player.phase_progress(at(base, 8_500));
        assert!((halfway - 0.5).abs() < 0.01);
        assert!(player.phase_progress(at(base, 11_000)) > 0.99);
    }
}
