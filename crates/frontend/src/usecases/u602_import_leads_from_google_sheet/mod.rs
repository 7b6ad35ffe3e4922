pub mod duplicate_review;
pub mod model;
pub mod view;

pub use view::ImportLeadsFromGoogleSheetPage;
