use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::app::App;

/// Applies one key press to the form. Returns `true` when the user wants to quit.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> bool {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => true,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => true,

        // Enter is the Ask button; the form itself refuses it while busy.
        (KeyCode::Enter, _) => {
            if !app.form.can_submit() {
                debug!("Ask pressed while a request is outstanding");
            }
            app.submit();
            false
        }
        (KeyCode::Backspace, _) => {
            app.form.pop_char();
            false
        }
        (KeyCode::Char(c), m) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            app.form.push_char(c);
            false
        }
        _ => false,
    }
}

/// Pasted text goes into the single-line question, line breaks become spaces.
pub fn handle_paste(app: &mut App, data: &str) {
    let line = data.lines().collect::<Vec<_>>().join(" ");
    debug!("Paste of {} characters", line.len());
    app.form.push_str(&line);
}
