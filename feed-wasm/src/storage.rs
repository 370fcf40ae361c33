use crate::models::Identity;

pub(crate) const USER_KEY: &str = "user";

fn parse_identity(raw: &str) -> Option<Identity> {
    serde_json::from_str::<Identity>(raw).ok()
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, String> {
    let window = web_sys::window().ok_or_else(|| "window is not available".to_string())?;
    window
        .local_storage()
        .map_err(|_| "failed to access localStorage".to_string())?
        .ok_or_else(|| "localStorage is not available".to_string())
}

/// Reads the saved identity. A record that does not parse is removed.
#[cfg(target_arch = "wasm32")]
pub(crate) fn load_identity() -> Option<Identity> {
    let storage = local_storage().ok()?;
    let raw = storage.get_item(USER_KEY).ok()??;
    let identity = parse_identity(&raw);
    if identity.is_none() {
        let _ = storage.remove_item(USER_KEY);
    }
    identity
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn save_identity(identity: &Identity) -> Result<(), String> {
    let raw =
        serde_json::to_string(identity).map_err(|_| "failed to serialize user".to_string())?;
    local_storage()?
        .set_item(USER_KEY, &raw)
        .map_err(|_| "failed to save user".to_string())
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn clear_identity() -> Result<(), String> {
    local_storage()?
        .remove_item(USER_KEY)
        .map_err(|_| "failed to clear user".to_string())
}
