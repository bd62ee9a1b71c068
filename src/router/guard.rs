use super::Resolution;

/// Outcome of a navigation guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Let the navigation proceed
    Continue,
    /// Start over at another location
    Redirect(String),
    /// Cancel the navigation; the current route stays
    Abort,
}

/// Hook run before every navigation commits
///
/// Guards are installed once on the engine and survive match table resets.
/// They run in installation order; the first decision other than
/// [`GuardDecision::Continue`] wins.
pub trait NavigationGuard: Send + Sync {
    fn check(&self, to: &Resolution, from: Option<&Resolution>) -> GuardDecision;
}

impl<F> NavigationGuard for F
where
    F: Fn(&Resolution, Option<&Resolution>) -> GuardDecision + Send + Sync,
{
    fn check(&self, to: &Resolution, from: Option<&Resolution>) -> GuardDecision {
        self(to, from)
    }
}
