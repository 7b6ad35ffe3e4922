/// UseCase identification shown in page headers
pub trait UseCaseMetadata {
    /// UseCase index (e.g. "u601")
    fn usecase_index() -> &'static str;

    /// Display name for the UI
    fn display_name() -> &'static str;

    /// Subtitle under the page header
    fn description() -> &'static str {
        ""
    }

    /// Page header title like "u601: Import leads from Excel"
    fn title() -> String {
        format!("{}: {}", Self::usecase_index(), Self::display_name())
    }
}
