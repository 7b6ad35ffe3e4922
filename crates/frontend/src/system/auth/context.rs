use contracts::system::auth::{LoginResponse, UserInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    /// State restored from localStorage, not yet validated
    fn from_storage() -> Self {
        match storage::get_token() {
            Some(token) => Self {
                token: Some(token),
                user_info: storage::get_user(),
            },
            None => Self::default(),
        }
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::from_storage());

    // Validate a restored token once on mount
    Effect::new(move |_| {
        if auth_state.get_untracked().token.is_none() {
            return;
        }
        spawn_local(async move {
            match api::get_current_user().await {
                Ok(user_info) => {
                    storage::save_user(&user_info);
                    set_auth_state.update(|state| state.user_info = Some(user_info));
                }
                Err(e) => {
                    log::warn!("Stored session rejected: {}", e);
                    storage::clear_session();
                    set_auth_state.set(AuthState::default());
                }
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Persist a successful login and publish it
pub fn apply_login(set_auth_state: WriteSignal<AuthState>, response: LoginResponse) {
    storage::save_token(&response.token);
    storage::save_user(&response.user);
    set_auth_state.set(AuthState {
        token: Some(response.token),
        user_info: Some(response.user),
    });
}

/// Forget the session locally. The backend keeps no server-side logout.
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_session();
    set_auth_state.set(AuthState::default());
}
