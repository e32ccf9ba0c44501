use crate::dataflow::{Actor, ActorVec, Relay, relay};
use crate::theme::*;
use futures::{FutureExt, StreamExt, select};
use shared::{FilesApiError, MutationError};
use std::sync::atomic::{AtomicUsize, Ordering};
use zoon::events::Click;
use zoon::*;

#[derive(Debug, Clone, PartialEq, Copy, Default)]
pub enum NotificationVariant {
    #[default]
    Error,
    Info,
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: String,
    pub title: String,
    pub message: String,
    /// 0 keeps the toast until dismissed
    pub auto_dismiss_ms: u32,
    pub variant: NotificationVariant,
}

static TOAST_ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn next_toast_id() -> String {
    format!("toast_{}", TOAST_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
}

impl Toast {
    pub fn success(message: impl Into<String>, auto_dismiss_ms: u32) -> Self {
        Self {
            id: next_toast_id(),
            title: "Done".to_string(),
            message: message.into(),
            auto_dismiss_ms,
            variant: NotificationVariant::Success,
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>, auto_dismiss_ms: u32) -> Self {
        Self {
            id: next_toast_id(),
            title: title.into(),
            message: message.into(),
            auto_dismiss_ms,
            variant: NotificationVariant::Info,
        }
    }

    pub fn clipboard_error(auto_dismiss_ms: u32) -> Self {
        Self {
            id: next_toast_id(),
            title: "Clipboard Error".to_string(),
            message: "Failed to copy to clipboard. Your browser may not allow clipboard access here."
                .to_string(),
            auto_dismiss_ms,
            variant: NotificationVariant::Error,
        }
    }
}

/// Sentence shown in the blocking alert for a failed mutation.
pub fn mutation_failure_message(error: &MutationError) -> String {
    match error {
        MutationError::Api(api_error) => make_error_user_friendly(api_error),
        local => {
            let text = local.to_string();
            let mut chars = text.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => text,
            }
        }
    }
}

pub fn make_error_user_friendly(error: &FilesApiError) -> String {
    match error {
        FilesApiError::Http { status: 401, .. } => {
            "Your session has expired. Please sign in again.".to_string()
        }
        FilesApiError::Http { status: 403, message } if message.trim().is_empty() => {
            "You don't have access to this project.".to_string()
        }
        FilesApiError::Http { message, .. } => message.trim().to_string(),
        FilesApiError::Network(_) => {
            "Connection error. Please check your network connection.".to_string()
        }
        FilesApiError::Timeout { .. } => "Operation timed out. Please try again.".to_string(),
        FilesApiError::Decode(_) => "The server sent an unexpected response.".to_string(),
    }
}

/// Toast stack shown in the corner of the explorer.
#[derive(Clone)]
pub struct Notifications {
    pub active_toasts: ActorVec<Toast>,
    pub toast_added_relay: Relay<Toast>,
    pub toast_dismissed_relay: Relay<String>,
}

impl Notifications {
    pub fn new() -> Self {
        let (toast_added_relay, mut toast_added_stream) = relay::<Toast>();
        let (toast_dismissed_relay, mut toast_dismissed_stream) = relay::<String>();

        let active_toasts = ActorVec::new(vec![], async move |toasts| {
            loop {
                select! {
                    toast = toast_added_stream.next() => {
                        match toast {
                            Some(toast) => toasts.lock_mut().push_cloned(toast),
                            None => break,
                        }
                    }
                    dismissed_id = toast_dismissed_stream.next() => {
                        if let Some(id) = dismissed_id {
                            toasts.lock_mut().retain(|toast| toast.id != id);
                        }
                    }
                }
            }
        });

        Self {
            active_toasts,
            toast_added_relay,
            toast_dismissed_relay,
        }
    }

    pub fn push(&self, toast: Toast) {
        log::debug!("toast: {} - {}", toast.title, toast.message);
        self.toast_added_relay.send(toast);
    }
}

// ===== VIEW =====

pub fn toast_container(notifications: Notifications) -> impl Element {
    let dismissed_relay = notifications.toast_dismissed_relay.clone();
    El::new()
        .s(Width::fill())
        .s(Height::fill())
        .s(Align::new().bottom().right())
        .s(Padding::all(16))
        .update_raw_el(|raw_el| {
            raw_el
                .style("position", "fixed")
                .style("top", "0")
                .style("left", "0")
                .style("pointer-events", "none")
                .style("z-index", "900")
        })
        .child(
            Column::new()
                .s(Gap::new().y(SPACING_8))
                .s(Width::exact(320))
                .update_raw_el(|raw_el| raw_el.style("pointer-events", "auto"))
                .items_signal_vec(
                    notifications
                        .active_toasts
                        .signal_vec()
                        .map(move |toast| toast_element(toast, dismissed_relay.clone())),
                ),
        )
}

fn toast_element(toast: Toast, dismissed_relay: Relay<String>) -> impl Element {
    let (dismiss_clicked_relay, mut dismiss_clicked_stream) = relay::<()>();
    let auto_dismiss_ms = toast.auto_dismiss_ms;
    let toast_id = toast.id.clone();

    // Lives as long as the element
    let dismiss_timer = Actor::new((), async move |_state| {
        if auto_dismiss_ms == 0 {
            dismiss_clicked_stream.next().await;
        } else {
            select! {
                _ = Timer::sleep(auto_dismiss_ms).fuse() => {}
                _ = dismiss_clicked_stream.next() => {}
            }
        }
        dismissed_relay.send(toast_id);
    });

    let accent_color = match toast.variant {
        NotificationVariant::Error => danger(),
        NotificationVariant::Info => accent(),
        NotificationVariant::Success => success(),
    };

    Row::new()
        .s(Width::fill())
        .s(Padding::all(SPACING_12))
        .s(Gap::new().x(SPACING_8))
        .s(Background::new().color(surface_raised()))
        .s(Borders::new().left(Border::new().width(3).color(accent_color)))
        .s(RoundedCorners::all(6))
        .s(Shadows::new(vec![Shadow::new().color(hsluv!(0, 0, 0, 30)).y(2).blur(8)]))
        .after_remove(move |_| drop(dismiss_timer))
        .item(
            Column::new()
                .s(Width::fill())
                .s(Gap::new().y(SPACING_4))
                .item(
                    El::new()
                        .s(Font::new().size(14).weight(FontWeight::SemiBold).color(accent_color))
                        .child(Text::new(&toast.title)),
                )
                .item(
                    El::new()
                        .s(Font::new().size(13).color(text()).wrap_anywhere())
                        .child(Text::new(&toast.message)),
                ),
        )
        .item(
            El::new()
                .s(Font::new().size(14).color(text_muted()))
                .s(Cursor::new(CursorIcon::Pointer))
                .s(Padding::all(SPACING_4))
                .child("✕")
                .update_raw_el(move |raw_el| {
                    raw_el.event_handler(move |event: Click| {
                        event.stop_propagation();
                        dismiss_clicked_relay.send(());
                    })
                }),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_read_naturally() {
        assert_eq!(
            make_error_user_friendly(&FilesApiError::Http {
                status: 409,
                message: " Target already exists ".to_string()
            }),
            "Target already exists"
        );
        assert_eq!(
            make_error_user_friendly(&FilesApiError::Http {
                status: 401,
                message: "Unauthorized".to_string()
            }),
            "Your session has expired. Please sign in again."
        );
        assert_eq!(
            make_error_user_friendly(&FilesApiError::Timeout { after_ms: 30_000 }),
            "Operation timed out. Please try again."
        );
    }

    #[test]
    fn local_errors_are_capitalized() {
        assert_eq!(
            mutation_failure_message(&MutationError::EmptyName),
            "Name must not be empty"
        );
    }

    #[test]
    fn toast_ids_are_unique() {
        let first = Toast::success("a", 3000);
        let second = Toast::success("b", 3000);
        assert_ne!(first.id, second.id);
        assert_eq!(first.variant, NotificationVariant::Success);
    }
}
