//! Scripted input for headless runs and tests

use super::InputSampler;
use crate::sim::TickInput;

/// Replays key-state changes at fixed ticks.
///
/// Each entry `(tick, input)` replaces the held keys from that tick on.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    changes: Vec<(u64, TickInput)>,
    current: TickInput,
    tick: u64,
}

impl ScriptedInput {
    pub fn new(mut changes: Vec<(u64, TickInput)>) -> Self {
        changes.sort_by_key(|(tick, _)| *tick);
        Self {
            changes,
            current: TickInput::default(),
            tick: 0,
        }
    }

    /// Nothing held, ever
    pub fn idle() -> Self {
        Self::default()
    }
}

impl InputSampler for ScriptedInput {
    fn sample(&mut self) -> TickInput {
        let upcoming = self.changes.partition_point(|(tick, _)| *tick <= self.tick);
        if let Some((_, input)) = upcoming.checked_sub(1).map(|i| self.changes[i]) {
            self.current = input;
        }
        self.tick += 1;
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changes_apply_from_their_tick() {
        let jump = TickInput { jump: true, ..Default::default() };
        let right = TickInput { right: true, ..Default::default() };
        let mut script = ScriptedInput::new(vec![(3, right), (1, jump)]);
        let sampled: Vec<TickInput> = (0..5).map(|_| script.sample()).collect();
        assert_eq!(
            sampled,
            vec![TickInput::default(), jump, jump, right, right]
        );
    }

    #[test]
    fn test_idle_never_presses() {
        let mut script = ScriptedInput::idle();
        assert!((0..100).all(|_| script.sample() == TickInput::default()));
    }
}
