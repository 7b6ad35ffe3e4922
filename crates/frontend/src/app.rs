use crate::layout::MainLayout;
use crate::shared::toast::{ToastHost, ToastService};
use crate::system::auth::context::AuthProvider;
use crate::system::auth::guard::RequireAuth;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    // Global notifications for every page
    provide_context(ToastService::new());

    view! {
        <AuthProvider>
            <Router>
                <Routes fallback=|| view! { <div class="page">"Page not found"</div> }>
                    <Route path=path!("/login") view=LoginPage />
                    <Route path=path!("/") view=ProtectedLayout />
                    <Route path=path!("/leads/import") view=ProtectedLayout />
                </Routes>
            </Router>
            <ToastHost />
        </AuthProvider>
    }
}

#[component]
fn ProtectedLayout() -> impl IntoView {
    view! {
        <RequireAuth>
            <MainLayout />
        </RequireAuth>
    }
}
