pub mod gemini;

use crate::model::task::Task;

/// Subtasks offered when a breakdown cannot be produced
pub const FALLBACK_BREAKDOWN: [&str; 4] =
    ["Research requirements", "Define scope", "Execution", "Review"];
/// Advice shown when the model replies with nothing
pub const EMPTY_ADVICE_REPLY: &str =
    "Keep moving forward! Focus on your high-priority tasks first.";
/// Advice shown when the request fails
pub const FAILED_ADVICE_REPLY: &str =
    "Focus on completing your high-priority tasks first to maximize impact.";

/// Error type for generative-AI requests. These never reach the user; the
/// `Collaborator` methods absorb them into fallbacks.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API key not set (looked in ${0})")]
    MissingKey(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not parse reply: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The two generative operations the board uses. Implementors supply the
/// fallible requests; callers use `breakdown` and `advice`, which never fail.
pub trait Collaborator: Send + Sync {
    /// Ask for subtasks of a task
    fn request_breakdown(&self, title: &str, description: &str) -> Result<Vec<String>, AiError>;

    /// Ask for productivity tips given a one-line task summary
    fn request_advice(&self, summary: &str) -> Result<String, AiError>;

    /// Subtasks for a task, or the fixed fallback list
    fn breakdown(&self, title: &str, description: &str) -> Vec<String> {
        match self.request_breakdown(title, description) {
            Ok(items) if !items.is_empty() => items,
            Ok(_) => {
                tracing::warn!("breakdown returned no items, using fallback");
                fallback_breakdown()
            }
            Err(e) => {
                tracing::warn!(error = %e, "breakdown failed, using fallback");
                fallback_breakdown()
            }
        }
    }

    /// Tips for the given tasks, or a canned encouragement
    fn advice(&self, tasks: &[Task]) -> String {
        match self.request_advice(&task_summary(tasks)) {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => EMPTY_ADVICE_REPLY.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "advice request failed, using fallback");
                FAILED_ADVICE_REPLY.to_string()
            }
        }
    }
}

pub fn fallback_breakdown() -> Vec<String> {
    FALLBACK_BREAKDOWN.iter().map(|s| s.to_string()).collect()
}

/// `title (STATUS, Priority)` for each task, comma-joined
pub fn task_summary(tasks: &[Task]) -> String {
    tasks
        .iter()
        .map(|t| format!("{} ({}, {})", t.title, t.status, t.priority))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn breakdown_prompt(title: &str, description: &str) -> String {
    format!(
        "You are a productivity expert. Break down the following task into a list of 4-6 small, actionable sub-tasks:\n\n\
         Task Title: {title}\n\
         Description: {description}\n\n\
         Respond only with the JSON array of strings."
    )
}

pub fn advice_prompt(summary: &str) -> String {
    format!(
        "Given these office tasks: {summary}.\n\
         Provide 3 concise, highly actionable productivity tips to help the user finish their work efficiently today.\n\
         Use professional yet encouraging tone. Format as bullet points."
    )
}

/// Parse a breakdown reply: a JSON array of strings, possibly wrapped in a
/// code fence. Items are trimmed and blanks dropped. An empty reply is an
/// empty list.
pub fn parse_breakdown(reply: &str) -> Result<Vec<String>, AiError> {
    let body = reply
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }
    let items: Vec<String> = serde_json::from_str(body)?;
    Ok(items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::seed_tasks;
    use pretty_assertions::assert_eq;

    /// Canned replies keyed by what the test wants to exercise
    enum Fake {
        Items(Vec<&'static str>),
        Text(&'static str),
        Fail,
    }

    impl Collaborator for Fake {
        fn request_breakdown(&self, _: &str, _: &str) -> Result<Vec<String>, AiError> {
            match self {
                Fake::Items(items) => Ok(items.iter().map(|s| s.to_string()).collect()),
                Fake::Text(text) => parse_breakdown(text),
                Fake::Fail => Err(AiError::MissingKey("API_KEY".into())),
            }
        }

        fn request_advice(&self, _: &str) -> Result<String, AiError> {
            match self {
                Fake::Text(text) => Ok(text.to_string()),
                Fake::Items(_) => Ok(String::new()),
                Fake::Fail => Err(AiError::Status {
                    status: 500,
                    body: "boom".into(),
                }),
            }
        }
    }

    #[test]
    fn breakdown_passes_through_model_items() {
        let ai = Fake::Items(vec!["Outline", "Draft", "Send"]);
        assert_eq!(ai.breakdown("t", "d"), vec!["Outline", "Draft", "Send"]);
    }

    #[test]
    fn breakdown_falls_back_on_failure() {
        assert_eq!(Fake::Fail.breakdown("t", "d"), fallback_breakdown());
    }

    #[test]
    fn breakdown_falls_back_on_empty_list() {
        assert_eq!(Fake::Items(vec![]).breakdown("t", "d"), fallback_breakdown());
        assert_eq!(Fake::Text("[]").breakdown("t", "d"), fallback_breakdown());
    }

    #[test]
    fn breakdown_falls_back_on_unparseable_reply() {
        assert_eq!(
            Fake::Text("here are some steps").breakdown("t", "d"),
            fallback_breakdown()
        );
    }

    #[test]
    fn advice_passes_through_text() {
        assert_eq!(Fake::Text("- Start early").advice(&seed_tasks()), "- Start early");
    }

    #[test]
    fn advice_empty_reply_and_failure_use_distinct_fallbacks() {
        assert_eq!(Fake::Items(vec![]).advice(&seed_tasks()), EMPTY_ADVICE_REPLY);
        assert_eq!(Fake::Fail.advice(&seed_tasks()), FAILED_ADVICE_REPLY);
    }

    #[test]
    fn summary_lists_title_status_priority() {
        let tasks = seed_tasks();
        assert_eq!(
            task_summary(&tasks[..2]),
            "Q4 Budget Proposal (IN_PROGRESS, High), Redesign UI components (TODO, Medium)"
        );
        assert_eq!(task_summary(&[]), "");
    }

    #[test]
    fn parse_breakdown_strips_fences_and_blanks() {
        let reply = "```json\n[\" Gather data \", \"\", \"Write report\"]\n```";
        assert_eq!(parse_breakdown(reply).unwrap(), vec!["Gather data", "Write report"]);
    }

    #[test]
    fn parse_breakdown_rejects_non_string_arrays() {
        assert!(parse_breakdown("[1, 2]").is_err());
        assert!(parse_breakdown("{\"a\": 1}").is_err());
    }

    #[test]
    fn prompts_embed_inputs() {
        let p = breakdown_prompt("Launch", "Ship v2");
        assert!(p.contains("Task Title: Launch"));
        assert!(p.contains("Description: Ship v2"));
        assert!(p.ends_with("Respond only with the JSON array of strings."));
        assert!(advice_prompt("A (TODO, Low)").starts_with("Given these office tasks: A (TODO, Low)."));
    }
}
