use leptos::prelude::*;

use crate::components::alert;
use crate::models::Identity;
use crate::storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum View {
    Signup,
    Login,
    Feed,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct AppState {
    pub(crate) identity: RwSignal<Option<Identity>>,
    pub(crate) view: RwSignal<View>,
}

impl AppState {
    /// Starts from the identity saved in localStorage, if any.
    pub(crate) fn restore() -> Self {
        Self {
            identity: RwSignal::new(storage::load_identity()),
            view: RwSignal::new(View::Feed),
        }
    }

    pub(crate) fn login(&self, identity: Identity) {
        if let Err(err) = storage::save_identity(&identity) {
            alert(&err);
        }
        self.identity.set(Some(identity));
        self.view.set(View::Feed);
    }

    pub(crate) fn logout(&self) {
        if let Err(err) = storage::clear_identity() {
            alert(&err);
        }
        self.identity.set(None);
        self.view.set(View::Login);
    }

    pub(crate) fn token(&self) -> Option<String> {
        self.identity.get().map(|identity| identity.token)
    }

    pub(crate) fn user_id(&self) -> Option<i64> {
        self.identity.with(|identity| identity.as_ref().map(|identity| identity.id))
    }

    pub(crate) fn is_authenticated(&self) -> bool {
        self.identity.with(Option::is_some)
    }
}
