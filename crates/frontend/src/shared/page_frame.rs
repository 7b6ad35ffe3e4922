//! PageFrame: root wrapper for every routed page.
//!
//! Sets `id` (`"{usecase}--{category}"`) and `data-page-category` on the
//! root element.

use super::page_standard::*;
use leptos::prelude::*;

#[component]
pub fn PageFrame(
    /// HTML id in format `{usecase}--{category}`
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants from `page_standard`
    category: &'static str,
    #[prop(optional)]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    debug_assert!(is_valid_page_id(page_id), "bad page id: {page_id}");

    let base_class = match category {
        PAGE_CAT_SYSTEM => "page page--system",
        _ => "page",
    };
    let full_class = if class.is_empty() {
        base_class.to_string()
    } else {
        format!("{base_class} {class}")
    };

    view! {
        <div id=page_id class=full_class data-page-category=category>
            {children()}
        </div>
    }
}
