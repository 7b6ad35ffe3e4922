use super::duplicate_review::DuplicateReview;
use super::model;
use crate::shared::format::pluralize;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_USECASE;
use crate::shared::toast::use_toasts;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u602_import_leads_from_google_sheet::{
    GoogleSheetImportRequest, GoogleSheetImportResponse, ImportLeadsFromGoogleSheet,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn ImportLeadsFromGoogleSheetPage() -> impl IntoView {
    let toasts = use_toasts();
    let (sheet_url, set_sheet_url) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (last_result, set_last_result) = signal(None::<GoogleSheetImportResponse>);
    let show_duplicates = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        let request = match GoogleSheetImportRequest::new(&sheet_url.get_untracked()) {
            Ok(request) => request,
            Err(e) => return toasts.error(e.to_string()),
        };

        set_is_submitting.set(true);
        show_duplicates.set(false);

        spawn_local(async move {
            match model::import_google_sheet(&request).await {
                Ok(response) => {
                    if response.success {
                        toasts.success(response.message.clone());
                    } else {
                        toasts.error(response.message.clone());
                    }
                    show_duplicates.set(response.duplicates_to_review().is_some());
                    set_last_result.set(Some(response));
                }
                Err(e) => toasts.error(e.to_string()),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <PageFrame page_id="u602_import_leads_from_google_sheet--usecase" category=PAGE_CAT_USECASE>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{ImportLeadsFromGoogleSheet::title()}</h1>
                    <p class="page__subtitle">{ImportLeadsFromGoogleSheet::description()}</p>
                </div>
            </div>

            <div class="page__content">
                <Card>
                    <form class="sheet-import" on:submit=on_submit>
                        <label class="form__label" for="sheet-url">"Google Sheet URL"</label>
                        <p class="wizard-hint">
                            "The sheet must be shared so that anyone with the link can view it."
                        </p>
                        <div class="doc-filters__row">
                            <input
                                id="sheet-url"
                                type="url"
                                class="doc-filter__input sheet-import__url"
                                placeholder="https://docs.google.com/spreadsheets/d/..."
                                prop:value=move || sheet_url.get()
                                on:input=move |ev| set_sheet_url.set(event_target_value(&ev))
                                disabled=move || is_submitting.get()
                            />
                            <button
                                type="submit"
                                class="button button--primary"
                                disabled=move || is_submitting.get() || sheet_url.get().trim().is_empty()
                            >
                                {icon("upload")}
                                {move || if is_submitting.get() { " Importing..." } else { " Import" }}
                            </button>
                        </div>
                    </form>
                </Card>

                {move || last_result.get().map(|result| {
                    let duplicate_count = result.duplicate_count.unwrap_or_default();
                    let has_review = result.duplicates_to_review().is_some();
                    view! {
                        <Card>
                            <div class="import-result__stats">
                                <div class="stat stat--success">
                                    <span class="stat__value">{result.inserted_count}</span>
                                    <span class="stat__label">"Imported"</span>
                                </div>
                                <div class="stat stat--warning">
                                    <span class="stat__value">{duplicate_count}</span>
                                    <span class="stat__label">"Duplicates"</span>
                                </div>
                            </div>
                            {has_review.then(|| view! {
                                <Button appearance=ButtonAppearance::Secondary on_click=move |_| show_duplicates.set(true)>
                                    {format!("Review {}", pluralize(duplicate_count as u64, "duplicate", "duplicates"))}
                                </Button>
                            })}
                        </Card>
                    }
                })}
            </div>

            {move || {
                if !show_duplicates.get() {
                    return None;
                }
                let duplicates = last_result.with(|r| {
                    r.as_ref()
                        .and_then(|r| r.duplicates_to_review())
                        .map(|rows| rows.to_vec())
                })?;
                Some(view! {
                    <DuplicateReview
                        duplicates=duplicates
                        on_close=Callback::new(move |_| show_duplicates.set(false))
                    />
                })
            }}
        </PageFrame>
    }
}
