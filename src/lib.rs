//! Question form for the HR Assistant answering service.
//!
//! [`form::QuestionForm`] holds the question, the last answer and the busy
//! state; [`client::AnswerClient`] makes the one HTTP call. The terminal
//! front end lives in [`app`], [`events`] and [`ui`].

pub mod app;
pub mod client;
pub mod constants;
pub mod error;
pub mod events;
pub mod form;
pub mod ui;

pub use client::AnswerClient;
pub use error::AskError;
pub use form::{FormState, QuestionForm};
