/// State of an optimistic on/off control (pin, reaction).
///
/// The control is drawn lit while `Activating` or `Active`; the pending
/// states remember where to roll back to if the backend refuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToggleState {
    #[default]
    Inactive,
    Activating,
    Active,
    Deactivating,
}

impl ToggleState {
    pub fn settled(active: bool) -> Self {
        if active { Self::Active } else { Self::Inactive }
    }

    pub fn is_lit(self) -> bool {
        matches!(self, Self::Activating | Self::Active)
    }

    pub fn is_pending(self) -> bool {
        matches!(self, Self::Activating | Self::Deactivating)
    }

    /// Starts a flip and returns the requested end state, or `None` if a
    /// flip is already in flight.
    pub fn begin(&mut self) -> Option<bool> {
        let (next, target) = match *self {
            Self::Inactive => (Self::Activating, true),
            Self::Active => (Self::Deactivating, false),
            Self::Activating | Self::Deactivating => return None,
        };
        *self = next;
        Some(target)
    }

    pub fn confirm(&mut self) {
        *self = match *self {
            Self::Activating => Self::Active,
            Self::Deactivating => Self::Inactive,
            settled => settled,
        };
    }

    pub fn rollback(&mut self) {
        *self = match *self {
            Self::Activating => Self::Inactive,
            Self::Deactivating => Self::Active,
            settled => settled,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_and_confirm() {
        let mut t = ToggleState::Inactive;
        assert_eq!(t.begin(), Some(true));
        assert!(t.is_lit());
        assert!(t.is_pending());
        t.confirm();
        assert_eq!(t, ToggleState::Active);
    }

    #[test]
    fn rollback_restores_previous() {
        let mut t = ToggleState::Active;
        assert_eq!(t.begin(), Some(false));
        assert!(!t.is_lit());
        t.rollback();
        assert_eq!(t, ToggleState::Active);
    }

    #[test]
    fn pending_ignores_second_flip() {
        let mut t = ToggleState::Inactive;
        t.begin();
        assert_eq!(t.begin(), None);
        assert_eq!(t, ToggleState::Activating);
    }
}
