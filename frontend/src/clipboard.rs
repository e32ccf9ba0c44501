//! Clipboard writes for the "Copy ..." menu actions.

#[cfg(web_sys_unstable_apis)]
use wasm_bindgen_futures::JsFuture;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardError(pub String);

/// Write `text` to the system clipboard.
pub async fn copy_text(text: &str) -> Result<(), ClipboardError> {
    let window = web_sys::window().ok_or_else(|| ClipboardError("no window".to_string()))?;
    let navigator = window.navigator();

    #[cfg(web_sys_unstable_apis)]
    {
        let clipboard = navigator.clipboard();
        JsFuture::from(clipboard.write_text(text))
            .await
            .map(|_| ())
            .map_err(|error| ClipboardError(format!("{error:?}")))
    }

    #[cfg(not(web_sys_unstable_apis))]
    {
        let _ = (navigator, text);
        Err(ClipboardError(
            "Clipboard API requires the web_sys_unstable_apis flag".to_string(),
        ))
    }
}
