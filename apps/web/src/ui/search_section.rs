use std::time::Duration;

pub const EXAMPLE_QUERIES: [&str; 4] = [
    "Data Scientist jobs in San Francisco with Python and ML",
    "Remote Software Engineer positions with React",
    "Data Analyst roles in New York with SQL experience",
    "Senior Data Engineer jobs in Seattle",
];

pub const STATIC_PLACEHOLDER: &str =
    "e.g., Data Analyst jobs in California with SQL and Python experience...";

pub const TYPE_DELAY: Duration = Duration::from_millis(60);
pub const DELETE_DELAY: Duration = Duration::from_millis(30);
pub const FULL_TEXT_PAUSE: Duration = Duration::from_millis(2000);
pub const NEXT_EXAMPLE_DELAY: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing,
    Pausing,
    Deleting,
}

/// Typewriter animation cycling the example queries through the input placeholder.
///
/// Drive it by calling `tick` and waiting the returned delay before the next call.
/// `None` means the animation is suspended and no timer should be scheduled.
#[derive(Debug, Clone)]
pub struct PlaceholderAnimator {
    examples: Vec<String>,
    example: usize,
    chars: usize,
    phase: Phase,
    active: bool,
}

impl PlaceholderAnimator {
    pub fn new(examples: Vec<String>) -> Self {
        let active = !examples.is_empty();
        Self {
            examples,
            example: 0,
            chars: 0,
            phase: Phase::Typing,
            active,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn current_len(&self) -> usize {
        self.examples[self.example].chars().count()
    }

    pub fn placeholder(&self) -> String {
        if !self.active {
            return STATIC_PLACEHOLDER.to_string();
        }
        self.examples[self.example].chars().take(self.chars).collect()
    }

    /// Advances one step and returns the delay before the next step.
    pub fn tick(&mut self) -> Option<Duration> {
        if !self.active {
            return None;
        }

        let delay = match self.phase {
            Phase::Typing => {
                self.chars += 1;
                if self.chars >= self.current_len() {
                    self.phase = Phase::Pausing;
                    FULL_TEXT_PAUSE
                } else {
                    TYPE_DELAY
                }
            }
            Phase::Pausing => {
                self.phase = Phase::Deleting;
                DELETE_DELAY
            }
            Phase::Deleting => {
                self.chars = self.chars.saturating_sub(1);
                if self.chars == 0 {
                    self.example = (self.example + 1) % self.examples.len();
                    self.phase = Phase::Typing;
                    NEXT_EXAMPLE_DELAY
                } else {
                    DELETE_DELAY
                }
            }
        };
        Some(delay)
    }

    pub fn suspend(&mut self) {
        self.active = false;
    }

    /// Restarts the current example from its first character.
    pub fn resume(&mut self) {
        if self.examples.is_empty() {
            return;
        }
        self.active = true;
        self.chars = 0;
        self.phase = Phase::Typing;
    }
}

/// Query input with its placeholder animation and example shortcuts.
#[derive(Debug, Clone)]
pub struct SearchSection {
    query: String,
    focused: bool,
    animator: PlaceholderAnimator,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl SearchSection {
    pub fn new(query: String) -> Self {
        let examples = EXAMPLE_QUERIES.iter().map(|q| q.to_string()).collect();
        let mut section = Self {
            query,
            focused: false,
            animator: PlaceholderAnimator::new(examples),
        };
        section.sync_animation();
        section
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn placeholder(&self) -> String {
        self.animator.placeholder()
    }

    /// Placeholder written into the served page. The browser runs the animation from
    /// there on, so an animation with nothing typed yet serves the static text.
    pub fn initial_placeholder(&self) -> String {
        let typed = self.placeholder();
        if typed.is_empty() {
            STATIC_PLACEHOLDER.to_string()
        } else {
            typed
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_active()
    }

    pub fn animator_mut(&mut self) -> &mut PlaceholderAnimator {
        &mut self.animator
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.sync_animation();
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        self.sync_animation();
    }

    /// Clicking an example fills the input; it does not search.
    pub fn choose_example(&mut self, index: usize) {
        if let Some(example) = EXAMPLE_QUERIES.get(index) {
            self.set_query(*example);
        }
    }

    pub fn can_submit(&self, is_loading: bool) -> bool {
        !is_loading && !self.query.trim().is_empty()
    }

    fn sync_animation(&mut self) {
        let should_animate = !self.focused && self.query.is_empty();
        match (should_animate, self.animator.is_active()) {
            (true, false) => self.animator.resume(),
            (false, true) => self.animator.suspend(),
            _ => {}
        }
    }
}
