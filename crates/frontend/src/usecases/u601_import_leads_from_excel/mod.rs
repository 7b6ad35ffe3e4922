mod mapping_view;
pub mod model;
pub mod view;
pub mod view_model;

pub use view::ImportLeadsFromExcelPage;
