//! Scroll-direction-aware navigation visibility.
//!
//! The navigation bar hides while the reader scrolls down past a small
//! threshold and reappears on any upward scroll or near the top of the page.
//! The policy is a pure function of the previous state and the newest scroll
//! position; [`ScrollVisibilityController`] only remembers the last result.

use crate::config::NavigationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    None,
}

/// Thresholds driving the visibility rule and the cosmetic reveal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollPolicy {
    /// Positions strictly below this always show the navigation.
    pub threshold: u32,
    /// Width of the window mapped onto `reveal()`'s `[0, 1]` range.
    pub fade_window: u32,
}

impl Default for ScrollPolicy {
    fn default() -> Self {
        Self {
            threshold: 50,
            fade_window: 100,
        }
    }
}

impl From<&NavigationConfig> for ScrollPolicy {
    fn from(cfg: &NavigationConfig) -> Self {
        Self {
            threshold: cfg.threshold,
            fade_window: cfg.fade_window.max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    pub last_position: u32,
    pub current_position: u32,
    pub direction: Direction,
    pub visible: bool,
}

impl ScrollState {
    /// State at mount: top of the page, navigation shown.
    pub fn initial() -> Self {
        Self {
            last_position: 0,
            current_position: 0,
            direction: Direction::None,
            visible: true,
        }
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Derive the next state from the previous one and the newest position.
pub fn next_state(prev: &ScrollState, current: u32, policy: &ScrollPolicy) -> ScrollState {
    let last = prev.current_position;
    let direction = if current > last {
        Direction::Down
    } else if current < last {
        Direction::Up
    } else {
        Direction::None
    };

    let visible = if current < policy.threshold {
        true
    } else {
        match direction {
            Direction::Up => true,
            Direction::Down => false,
            // Same position again: keep whatever the last event decided.
            Direction::None => prev.visible,
        }
    };

    ScrollState {
        last_position: last,
        current_position: current,
        direction,
        visible,
    }
}

/// Map a position onto `[0, 1]` across the policy's fade window.
pub fn reveal(position: u32, policy: &ScrollPolicy) -> f32 {
    let window = policy.fade_window.max(1);
    position.min(window) as f32 / window as f32
}

pub struct ScrollVisibilityController {
    policy: ScrollPolicy,
    state: ScrollState,
}

impl ScrollVisibilityController {
    pub fn new(policy: ScrollPolicy) -> Self {
        Self {
            policy,
            state: ScrollState::initial(),
        }
    }

    /// Consume the latest viewport offset and return the updated snapshot.
    pub fn on_scroll(&mut self, current_position: u32) -> ScrollState {
        let next = next_state(&self.state, current_position, &self.policy);
        if next.visible != self.state.visible {
            tracing::trace!(
                position = current_position,
                visible = next.visible,
                "navigation visibility changed"
            );
        }
        self.state = next;
        next
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn policy(&self) -> ScrollPolicy {
        self.policy
    }

    /// Continuous cosmetic value for the current position.
    pub fn reveal(&self) -> f32 {
        reveal(self.state.current_position, &self.policy)
    }
}

impl Default for ScrollVisibilityController {
    fn default() -> Self {
        Self::new(ScrollPolicy::default())
    }
}
