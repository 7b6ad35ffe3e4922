use leptos::prelude::*;
use leptos_router::components::Redirect;

use super::context::use_auth;

/// Renders children only with a session, otherwise redirects to `/login`
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().token.is_some()
            fallback=|| view! { <Redirect path="/login" /> }
        >
            {children()}
        </Show>
    }
}
