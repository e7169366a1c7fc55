use crate::model::task::Task;

/// Shown when there is no advice to display
pub const EMPTY_ADVICE: &str = "Add some tasks to get AI-powered productivity advice.";

/// Identifies one issued request. Only the newest ticket is honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Generation counter for requests of one kind
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    /// Issue a new ticket, invalidating every earlier one
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// Invalidate every outstanding ticket without issuing a new one
    pub fn cancel(&mut self) {
        self.latest += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AdvisorState {
    #[default]
    Empty,
    Loading,
    Ready(String),
}

/// The AI assistant panel. Every time it is shown it starts over from
/// empty and fetches again if there are tasks; `r` refetches on demand.
#[derive(Debug, Default)]
pub struct AdvisorPanel {
    pub state: AdvisorState,
    tracker: RequestTracker,
}

impl AdvisorPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called each time the panel is shown. Returns a ticket when a request
    /// should go out, which is whenever there are tasks.
    pub fn on_open(&mut self, tasks: &[Task]) -> Option<Ticket> {
        self.reset();
        if tasks.is_empty() {
            return None;
        }
        Some(self.start())
    }

    /// Explicit refresh. Always reissues; an in-flight request is superseded.
    pub fn refresh(&mut self) -> Ticket {
        self.start()
    }

    /// Back to empty, dropping any reply still in flight. The ticket counter
    /// keeps counting so old tickets never match a later request.
    pub fn reset(&mut self) {
        self.tracker.cancel();
        self.state = AdvisorState::Empty;
    }

    fn start(&mut self) -> Ticket {
        self.state = AdvisorState::Loading;
        self.tracker.issue()
    }

    /// Deliver a completed request. Returns false (and changes nothing) if
    /// the ticket has been superseded.
    pub fn complete(&mut self, ticket: Ticket, advice: String) -> bool {
        if !self.tracker.is_current(ticket) {
            return false;
        }
        self.state = if advice.is_empty() {
            AdvisorState::Empty
        } else {
            AdvisorState::Ready(advice)
        };
        true
    }

    pub fn is_loading(&self) -> bool {
        self.state == AdvisorState::Loading
    }

    /// Text to display when not loading
    pub fn text(&self) -> &str {
        match &self.state {
            AdvisorState::Ready(text) => text,
            _ => EMPTY_ADVICE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::seed_tasks;

    #[test]
    fn every_open_with_tasks_requests_again() {
        let tasks = seed_tasks();
        let mut panel = AdvisorPanel::new();
        let first = panel.on_open(&tasks).unwrap();
        assert!(panel.complete(first, "old advice".into()));

        let second = panel.on_open(&tasks).unwrap();
        assert_ne!(first, second);
        assert!(panel.is_loading());
    }

    #[test]
    fn open_without_tasks_shows_empty_message() {
        let mut panel = AdvisorPanel::new();
        assert!(panel.on_open(&[]).is_none());
        assert_eq!(panel.state, AdvisorState::Empty);
        assert_eq!(panel.text(), EMPTY_ADVICE);
        // Tasks added since the last visit are picked up on the next one
        assert!(panel.on_open(&seed_tasks()).is_some());
    }

    #[test]
    fn reopening_an_emptied_board_clears_old_advice() {
        let mut panel = AdvisorPanel::new();
        let ticket = panel.on_open(&seed_tasks()).unwrap();
        panel.complete(ticket, "Finish the budget".into());
        assert!(panel.on_open(&[]).is_none());
        assert_eq!(panel.text(), EMPTY_ADVICE);
    }

    #[test]
    fn reset_drops_in_flight_reply() {
        let mut panel = AdvisorPanel::new();
        let stale = panel.refresh();
        panel.reset();
        let fresh = panel.refresh();
        assert_ne!(stale, fresh);
        assert!(!panel.complete(stale, "from before".into()));
        assert!(panel.is_loading());
        assert!(panel.complete(fresh, "current".into()));
        assert_eq!(panel.text(), "current");
    }

    #[test]
    fn completion_sets_ready_text() {
        let mut panel = AdvisorPanel::new();
        let ticket = panel.on_open(&seed_tasks()).unwrap();
        assert!(panel.complete(ticket, "- Do the high one first".into()));
        assert_eq!(panel.text(), "- Do the high one first");
        assert!(!panel.is_loading());
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut panel = AdvisorPanel::new();
        let first = panel.on_open(&seed_tasks()).unwrap();
        let second = panel.refresh();

        assert!(panel.complete(second, "new".into()));
        assert!(!panel.complete(first, "old".into()));
        assert_eq!(panel.text(), "new");
    }

    #[test]
    fn stale_completion_while_loading_keeps_loading() {
        let mut panel = AdvisorPanel::new();
        let first = panel.refresh();
        let _second = panel.refresh();
        assert!(!panel.complete(first, "old".into()));
        assert!(panel.is_loading());
    }

    #[test]
    fn refresh_works_without_tasks() {
        let mut panel = AdvisorPanel::new();
        panel.on_open(&[]);
        let ticket = panel.refresh();
        assert!(panel.is_loading());
        assert!(panel.complete(ticket, "tip".into()));
    }

    #[test]
    fn tracker_cancel_invalidates_outstanding() {
        let mut tracker = RequestTracker::default();
        let t = tracker.issue();
        assert!(tracker.is_current(t));
        tracker.cancel();
        assert!(!tracker.is_current(t));
    }
}
