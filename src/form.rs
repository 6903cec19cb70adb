use tracing::{error, info};

use crate::client::AnswerClient;
use crate::constants::{ASK_LABEL, BUSY_LABEL, ERROR_MESSAGE};
use crate::error::AskError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    /// One request is outstanding.
    Busy,
}

/// State of the question form: what is typed, what came back, and whether
/// a request is in flight.
#[derive(Debug, Default)]
pub struct QuestionForm {
    question: String,
    answer: String,
    state: FormState,
}

impl QuestionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state == FormState::Busy
    }

    // Editing is allowed in both states.

    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.question.push(c);
    }

    pub fn push_str(&mut self, s: &str) {
        self.question.push_str(s);
    }

    pub fn pop_char(&mut self) {
        self.question.pop();
    }

    /// Whether the Ask trigger is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_busy()
    }

    pub fn button_label(&self) -> &'static str {
        match self.state {
            FormState::Idle => ASK_LABEL,
            FormState::Busy => BUSY_LABEL,
        }
    }

    /// Content of the answer panel, or `None` when the panel is hidden.
    pub fn answer_panel(&self) -> Option<&str> {
        if self.answer.is_empty() {
            None
        } else {
            Some(&self.answer)
        }
    }

    /// Moves Idle -> Busy and returns the question to send.
    ///
    /// Returns `None` and changes nothing when the question is empty or a
    /// request is already outstanding.
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.question.is_empty() || self.is_busy() {
            return None;
        }
        self.state = FormState::Busy;
        self.answer.clear();
        info!(question = %self.question, "Submitting question");
        Some(self.question.clone())
    }

    /// Applies the outcome of the outstanding request and returns to Idle.
    pub fn settle(&mut self, outcome: Result<String, AskError>) {
        match outcome {
            Ok(answer) => {
                info!(answer_len = answer.len(), "Question answered");
                self.answer = answer;
            }
            Err(e) => {
                error!(error = %e, "Failed to get an answer");
                self.answer = ERROR_MESSAGE.to_string();
            }
        }
        self.state = FormState::Idle;
    }

    /// Runs one full submission in place. Returns `false` if nothing was sent.
    pub async fn submit(&mut self, client: &AnswerClient) -> bool {
        let Some(question) = self.begin_submit() else {
            return false;
        };
        let outcome = client.ask(&question).await;
        self.settle(outcome);
        true
    }
}
