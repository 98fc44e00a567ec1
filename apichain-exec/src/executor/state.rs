/// Lifecycle of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
    NotStarted,
    Running { index: usize },
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainEvent {
    StepStarted(usize),
    Finished,
    Aborted,
}

impl ChainState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ChainState::Completed | ChainState::Failed)
    }

    /// Steps start strictly in order; terminal states accept nothing.
    pub fn next(self, event: ChainEvent) -> Option<ChainState> {
        match (self, event) {
            (ChainState::NotStarted, ChainEvent::StepStarted(0)) => Some(ChainState::Running { index: 0 }),
            (ChainState::Running { index }, ChainEvent::StepStarted(n)) if n == index + 1 => {
                Some(ChainState::Running { index: n })
            }
            (ChainState::NotStarted | ChainState::Running { .. }, ChainEvent::Finished) => Some(ChainState::Completed),
            (ChainState::NotStarted | ChainState::Running { .. }, ChainEvent::Aborted) => Some(ChainState::Failed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_advance_in_order() {
        let s = ChainState::NotStarted.next(ChainEvent::StepStarted(0)).unwrap();
        let s = s.next(ChainEvent::StepStarted(1)).unwrap();
        assert_eq!(s, ChainState::Running { index: 1 });
        assert_eq!(s.next(ChainEvent::StepStarted(3)), None);
        assert_eq!(s.next(ChainEvent::StepStarted(1)), None);
    }

    #[test]
    fn terminal_states_are_final() {
        let done = ChainState::Running { index: 2 }.next(ChainEvent::Finished).unwrap();
        assert!(done.is_terminal());
        assert_eq!(done.next(ChainEvent::StepStarted(3)), None);
        assert_eq!(done.next(ChainEvent::Aborted), None);

        let failed = ChainState::Running { index: 0 }.next(ChainEvent::Aborted).unwrap();
        assert_eq!(failed, ChainState::Failed);
        assert_eq!(failed.next(ChainEvent::Finished), None);
    }

    #[test]
    fn empty_chain_completes_directly() {
        assert_eq!(ChainState::NotStarted.next(ChainEvent::Finished), Some(ChainState::Completed));
    }
}
