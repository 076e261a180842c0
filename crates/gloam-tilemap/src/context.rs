/// Whether region darkness reaches the buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DarknessState {
    #[default]
    Active,
    Suppressed,
}

/// Session-only rendering context for region lights. Owned by the
/// coordinator and changed only through [`crate::RegionLightsCommand`].
#[derive(Clone, Debug, Default)]
pub struct RegionLightsContext {
    state: DarknessState,
}

impl RegionLightsContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DarknessState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == DarknessState::Active
    }

    /// Returns whether the state changed.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        let next = if visible {
            DarknessState::Active
        } else {
            DarknessState::Suppressed
        };
        if next == self.state {
            return false;
        }
        log::info!("region lights {:?} -> {:?}", self.state, next);
        self.state = next;
        true
    }
}
