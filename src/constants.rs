// Constants for the question form, some of them overridable from the environment.

use std::env;

/// Endpoint used when neither `--endpoint` nor `HR_ASSISTANT_URL` is given.
/// Replace with the tunnel or public URL of the answering service.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/";

/// Environment variable that overrides the endpoint.
pub const ENDPOINT_ENV: &str = "HR_ASSISTANT_URL";

/// The only message a user ever sees when a request fails.
pub const ERROR_MESSAGE: &str = "Error: Unable to get response.";

pub const TITLE: &str = "HR Assistant";
pub const PLACEHOLDER: &str = "Ask your HR question here...";
pub const ASK_LABEL: &str = "Ask";
pub const BUSY_LABEL: &str = "Thinking...";
pub const ANSWER_HEADING: &str = "Answer:";

pub const LOG_FILE_NAME: &str = "hr-assistant.log";

lazy_static::lazy_static! {
    // Read lazily so a .env loaded at start-up is honoured.
    pub static ref LOG_DIR: String = env::var("HR_ASSISTANT_LOG_DIR").unwrap_or_else(|_| ".".to_string());
}
