pub(crate) mod feed;
pub(crate) mod login;
pub(crate) mod post_card;
pub(crate) mod signup;

/// Blocking notification for failed actions.
pub(crate) fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

pub(crate) fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}
