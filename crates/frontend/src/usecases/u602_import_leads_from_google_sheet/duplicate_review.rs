use crate::shared::modal::Modal;
use contracts::usecases::common::DuplicateLead;
use leptos::prelude::*;

/// Cell text for an optional contact value
fn cell_text(value: &Option<String>) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

/// Read-only list of rows the backend skipped as duplicates
#[component]
pub fn DuplicateReview(duplicates: Vec<DuplicateLead>, on_close: Callback<()>) -> impl IntoView {
    let title = match duplicates.len() {
        1 => "1 duplicate lead".to_string(),
        n => format!("{} duplicate leads", n),
    };

    view! {
        <Modal title=title on_close=on_close>
            <p class="duplicate-review__hint">
                "These rows match existing leads and were not imported."
            </p>
            <table class="table duplicate-review__table">
                <thead>
                    <tr>
                        <th>"Row"</th>
                        <th>"Name"</th>
                        <th>"Email"</th>
                        <th>"Phone"</th>
                        <th>"Reason"</th>
                    </tr>
                </thead>
                <tbody>
                    {duplicates
                        .iter()
                        .map(|lead| {
                            view! {
                                <tr>
                                    <td>{lead.row}</td>
                                    <td>{cell_text(&lead.name)}</td>
                                    <td>{cell_text(&lead.email)}</td>
                                    <td>{cell_text(&lead.phone)}</td>
                                    <td>{lead.reason.clone()}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_contact_values_render_as_dash() {
        assert_eq!(cell_text(&Some("ann@x.io".to_string())), "ann@x.io");
        assert_eq!(cell_text(&Some("  ".to_string())), "-");
        assert_eq!(cell_text(&None), "-");
    }
}
