pub mod flow;

use tracing::debug;

/// Upper bound on remembered screens; the oldest entry is forgotten first.
pub const MAX_HISTORY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Login,
    Registration,
    Home,
}

/// Current screen plus the back stack.
///
/// Transitions only happen through explicit calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current: Screen,
    back_stack: Vec<Screen>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::starting_at(Screen::Login)
    }

    pub fn starting_at(screen: Screen) -> Self {
        Self {
            current: screen,
            back_stack: Vec::new(),
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn history(&self) -> &[Screen] {
        &self.back_stack
    }

    /// Makes `target` current. Returns false when it already is.
    pub fn navigate(&mut self, target: Screen) -> bool {
        if self.current == target {
            return false;
        }

        if self.back_stack.len() == MAX_HISTORY {
            self.back_stack.remove(0);
        }
        self.back_stack.push(self.current);
        debug!(from = ?self.current, to = ?target, "navigate");
        self.current = target;
        true
    }

    /// Returns to the previous screen. Returns false when there is none.
    pub fn back(&mut self) -> bool {
        match self.back_stack.pop() {
            Some(previous) => {
                debug!(from = ?self.current, to = ?previous, "back");
                self.current = previous;
                true
            }
            None => false,
        }
    }
}
