//! Top bar: brand, import source tabs, signed-in user and logout.

use super::ImportTab;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

#[component]
pub fn TopHeader(active_tab: RwSignal<ImportTab>) -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();
    let navigate = use_navigate();

    let logout = move |_| {
        do_logout(set_auth_state);
        navigate("/login", NavigateOptions::default());
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <span class="top-header__title">"Lead CRM"</span>
            </div>

            <nav class="top-header__tabs" role="tablist">
                {ImportTab::ALL
                    .into_iter()
                    .map(|tab| {
                        view! {
                            <button
                                role="tab"
                                class=move || {
                                    if active_tab.get() == tab {
                                        "top-header__tab top-header__tab--active"
                                    } else {
                                        "top-header__tab"
                                    }
                                }
                                aria-selected=move || (active_tab.get() == tab).to_string()
                                on:click=move |_| active_tab.set(tab)
                            >
                                {icon(if tab == ImportTab::ExcelFile { "file" } else { "sheet" })}
                                {tab.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>

            <div class="top-header__actions">
                <div class="top-header__user">
                    <span>
                        {move || auth_state.get().user_info
                            .map(|u| u.name.clone())
                            .unwrap_or_else(|| "Signed in".to_string())}
                    </span>
                    <span class="top-header__role">
                        {move || auth_state.get().user_info.map(|u| u.role.label())}
                    </span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Log out">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
