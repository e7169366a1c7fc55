use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::ai::Collaborator;
use crate::model::session::Session;
use crate::model::task::Task;
use crate::ops::advisor::Ticket;
use crate::ops::auth::{self, AuthError};

/// Results sent from worker threads to the TUI event loop.
#[derive(Debug)]
pub enum WorkerEvent {
    LoginDone {
        ticket: Ticket,
        result: Result<Session, AuthError>,
    },
    BreakdownDone {
        ticket: Ticket,
        items: Vec<String>,
    },
    AdviceDone {
        ticket: Ticket,
        advice: String,
    },
}

/// Runs the slow calls (sign-in delay, AI requests) off the UI thread.
/// Each call spawns a short-lived thread; results come back through
/// `poll()`, which the event loop calls every tick.
pub struct Worker {
    tx: mpsc::Sender<WorkerEvent>,
    rx: mpsc::Receiver<WorkerEvent>,
    ai: Arc<dyn Collaborator>,
    login_delay: Duration,
}

impl Worker {
    pub fn new(ai: Arc<dyn Collaborator>, login_delay: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        Worker {
            tx,
            rx,
            ai,
            login_delay,
        }
    }

    pub fn login(&self, ticket: Ticket, employee_id: String, password: String) {
        let tx = self.tx.clone();
        let delay = self.login_delay;
        thread::spawn(move || {
            let result = auth::authenticate(&employee_id, &password, delay);
            let _ = tx.send(WorkerEvent::LoginDone { ticket, result });
        });
    }

    pub fn breakdown(&self, ticket: Ticket, title: String, description: String) {
        let tx = self.tx.clone();
        let ai = Arc::clone(&self.ai);
        thread::spawn(move || {
            let items = ai.breakdown(&title, &description);
            let _ = tx.send(WorkerEvent::BreakdownDone { ticket, items });
        });
    }

    pub fn advice(&self, ticket: Ticket, tasks: Vec<Task>) {
        let tx = self.tx.clone();
        let ai = Arc::clone(&self.ai);
        thread::spawn(move || {
            let advice = ai.advice(&tasks);
            let _ = tx.send(WorkerEvent::AdviceDone { ticket, advice });
        });
    }

    /// Non-blocking poll for finished work.
    /// Returns all queued events (may be empty).
    pub fn poll(&self) -> Vec<WorkerEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.rx.try_recv() {
            events.push(evt);
        }
        events
    }

    /// Block until the next result arrives or `timeout` passes
    pub fn wait(&self, timeout: Duration) -> Option<WorkerEvent> {
        self.rx.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ai::AiError;
    use crate::model::session::Role;
    use crate::model::task::seed_tasks;
    use crate::ops::advisor::RequestTracker;

    /// Collaborator that answers instantly without the network
    pub(crate) struct CannedAi;

    impl Collaborator for CannedAi {
        fn request_breakdown(&self, title: &str, _description: &str) -> Result<Vec<String>, AiError> {
            Ok(vec![format!("Plan {}", title), "Ship it".to_string()])
        }

        fn request_advice(&self, summary: &str) -> Result<String, AiError> {
            Ok(format!("Tips for: {}", summary))
        }
    }

    fn worker() -> Worker {
        Worker::new(Arc::new(CannedAi), Duration::ZERO)
    }

    #[test]
    fn login_result_comes_back_with_its_ticket() {
        let w = worker();
        let mut tracker = RequestTracker::default();
        let ticket = tracker.issue();
        w.login(ticket, "EMP2001".into(), "emp@pass".into());
        match w.wait(Duration::from_secs(5)) {
            Some(WorkerEvent::LoginDone { ticket: t, result }) => {
                assert_eq!(t, ticket);
                assert_eq!(result.unwrap().role, Role::Employee);
            }
            other => panic!("expected LoginDone, got {:?}", other),
        }
    }

    #[test]
    fn breakdown_runs_on_a_thread() {
        let w = worker();
        let ticket = RequestTracker::default().issue();
        w.breakdown(ticket, "Launch".into(), "Ship the thing".into());
        match w.wait(Duration::from_secs(5)) {
            Some(WorkerEvent::BreakdownDone { items, .. }) => {
                assert_eq!(items, vec!["Plan Launch".to_string(), "Ship it".to_string()]);
            }
            other => panic!("expected BreakdownDone, got {:?}", other),
        }
    }

    #[test]
    fn advice_gets_task_summary() {
        let w = worker();
        let ticket = RequestTracker::default().issue();
        w.advice(ticket, seed_tasks());
        match w.wait(Duration::from_secs(5)) {
            Some(WorkerEvent::AdviceDone { advice, .. }) => {
                assert!(advice.starts_with("Tips for: Q4 Budget Proposal (IN_PROGRESS, High)"));
            }
            other => panic!("expected AdviceDone, got {:?}", other),
        }
    }

    #[test]
    fn poll_is_empty_when_idle() {
        assert!(worker().poll().is_empty());
    }
}
