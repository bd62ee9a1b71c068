use serde::Serialize;

/// Scroll offset applied after a navigation commits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScrollPosition {
    pub x: u32,
    pub y: u32,
}

impl ScrollPosition {
    pub const TOP: ScrollPosition = ScrollPosition { x: 0, y: 0 };
}

/// Scroll policy of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Always scroll to the top of the page
    #[default]
    Top,
    /// Restore the saved position on back/forward, otherwise scroll to top
    RestoreSaved,
}

impl ScrollBehavior {
    /// Position to apply, given the position saved for the target entry.
    #[must_use]
    pub fn position(self, saved: Option<ScrollPosition>) -> ScrollPosition {
        match (self, saved) {
            (ScrollBehavior::RestoreSaved, Some(saved)) => saved,
            _ => ScrollPosition::TOP,
        }
    }
}
