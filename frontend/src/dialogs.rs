//! Native browser dialogs used by menu actions and failure reporting.
//!
//! All of these block the page until the user answers.

pub fn prompt(message: &str, default_value: &str) -> Option<String> {
    web_sys::window()?
        .prompt_with_message_and_default(message, default_value)
        .ok()
        .flatten()
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn alert(message: &str) {
    match web_sys::window() {
        Some(window) => {
            if window.alert_with_message(message).is_err() {
                log::error!("alert failed: {message}");
            }
        }
        None => log::error!("{message}"),
    }
}
