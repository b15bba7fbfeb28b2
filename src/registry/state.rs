//! Registry readiness state

/// Readiness of a pool registry.
///
/// Transitions are monotonic: `Uninitialized → Initializing → Ready`,
/// never back. A second `initialize` while `Initializing` or `Ready` is a
/// warned no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InitState {
    /// `initialize` has not been called yet
    #[default]
    Uninitialized,
    /// Template loads are in flight
    Initializing,
    /// All loads settled and all pools are built
    Ready,
}

impl InitState {
    /// Check if `initialize` has not started yet
    #[must_use]
    pub const fn is_uninitialized(self) -> bool {
        matches!(self, Self::Uninitialized)
    }

    /// Check if initialization is in flight
    #[must_use]
    pub const fn is_initializing(self) -> bool {
        matches!(self, Self::Initializing)
    }

    /// Check if the registry is serving spawns
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl std::fmt::Display for InitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::Initializing => "initializing",
            Self::Ready => "ready",
        })
    }
}
