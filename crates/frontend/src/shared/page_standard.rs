//! Page category constants.
//!
//! Every page declares an HTML `id` in the format `{usecase}--{category}`
//! (e.g. `"u601_import_leads_from_excel--usecase"`) and a
//! `data-page-category` with one of the constants below.

/// Use-case wizard / action page (imports).
pub const PAGE_CAT_USECASE: &str = "usecase";

/// System page (login, profile).
pub const PAGE_CAT_SYSTEM: &str = "system";

pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_USECASE, PAGE_CAT_SYSTEM];

/// Validate that a page id matches the `{usecase}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((name, category)) => !name.is_empty() && ALL_CATEGORIES.contains(&category),
        None => false,
    }
}
