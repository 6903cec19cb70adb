use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::client::AnswerClient;
use crate::error::AskError;
use crate::form::QuestionForm;

type Outcome = Result<String, AskError>;

/// The terminal form: the form state plus the plumbing that runs its one
/// request in the background and hands the outcome back to the UI loop.
pub struct App {
    pub form: QuestionForm,
    client: AnswerClient,
    outcome_tx: mpsc::Sender<Outcome>,
    outcome_rx: mpsc::Receiver<Outcome>,
}

impl App {
    pub fn new(client: AnswerClient) -> Self {
        // At most one request is outstanding, so one slot is enough.
        let (outcome_tx, outcome_rx) = mpsc::channel(1);
        Self {
            form: QuestionForm::new(),
            client,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Handles the Ask trigger. Returns `true` if a request was started.
    pub fn submit(&mut self) -> bool {
        let Some(question) = self.form.begin_submit() else {
            debug!(busy = self.form.is_busy(), "Ask ignored");
            return false;
        };

        let client = self.client.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = client.ask(&question).await;
            if tx.send(outcome).await.is_err() {
                warn!("Form closed before the answer arrived");
            }
        });
        true
    }

    /// Applies a settled request, if any. Called once per UI tick.
    pub fn process_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.form.settle(outcome);
        }
    }

    /// Waits for the outstanding request to settle and applies it.
    pub async fn wait_for_settlement(&mut self) {
        if !self.form.is_busy() {
            return;
        }
        if let Some(outcome) = self.outcome_rx.recv().await {
            self.form.settle(outcome);
        }
    }
}
