use super::view::BusyNotice;
use super::view_model::ExcelImportVm;
use crate::shared::format::{format_file_size, format_timestamp, pluralize};
use crate::shared::icons::icon;
use contracts::usecases::u601_import_leads_from_excel::{
    FieldMapping, LeadFieldDefinition, RequestKind, SheetPreviewData, NOTES_FIELD,
};
use leptos::prelude::*;
use thaw::*;

/// Label shown for a mapped lead field
fn field_label(fields: &[LeadFieldDefinition], lead_field: &str) -> String {
    if lead_field == NOTES_FIELD {
        return "Notes".to_string();
    }
    fields
        .iter()
        .find(|f| f.name == lead_field)
        .map(|f| f.label.clone())
        .unwrap_or_else(|| lead_field.to_string())
}

/// Sheet selection, mapping editor and sample rows
#[component]
pub fn MappingStep(vm: ExcelImportVm) -> impl IntoView {
    let loading_preview = move || vm.in_flight() == Some(RequestKind::Preview);
    let has_preview = move || vm.wizard.with(|w| w.preview().is_some());

    view! {
        <SheetPicker vm=vm />

        {move || {
            if loading_preview() {
                view! { <BusyNotice text=|| "Loading sheet preview...".to_string() /> }.into_any()
            } else if has_preview() {
                view! {
                    <MappingTable vm=vm />
                    <PreviewTable vm=vm />
                }.into_any()
            } else {
                view! {
                    <p class="wizard-hint">"Select a sheet to map its columns."</p>
                }.into_any()
            }
        }}
    }
}

#[component]
fn SheetPicker(vm: ExcelImportVm) -> impl IntoView {
    let sheets = move || {
        vm.wizard
            .with(|w| w.analysis().map(|a| a.sheets.clone()).unwrap_or_default())
    };
    let selected = move || {
        vm.wizard
            .with(|w| w.selected_sheet().map(str::to_string).unwrap_or_default())
    };
    let file_summary = move || {
        vm.wizard.with(|w| {
            w.analysis()
                .map(|a| {
                    format!(
                        "{} · {} · uploaded {}",
                        a.file_name,
                        format_file_size(a.file_size),
                        format_timestamp(&a.uploaded_at)
                    )
                })
                .unwrap_or_default()
        })
    };

    view! {
        <Card>
            <div class="doc-filters__row">
                <div class="doc-filter">
                    <label class="doc-filter__label">"Sheet:"</label>
                    <select
                        class="doc-filter__select"
                        disabled=move || vm.in_flight().is_some()
                        on:change=move |ev| vm.select_sheet(event_target_value(&ev))
                    >
                        <option value="" disabled=true selected=move || selected().is_empty()>
                            "Select a sheet"
                        </option>
                        {move || {
                            let current = selected();
                            sheets()
                                .into_iter()
                                .map(|sheet| {
                                    let caption = if sheet.has_data {
                                        format!("{} ({})", sheet.name, pluralize(sheet.row_count, "row", "rows"))
                                    } else {
                                        format!("{} (empty)", sheet.name)
                                    };
                                    let is_selected = sheet.name == current;
                                    view! {
                                        <option value=sheet.name selected=is_selected>{caption}</option>
                                    }
                                })
                                .collect_view()
                        }}
                    </select>
                </div>
                <span class="doc-filter__hint">{file_summary}</span>
            </div>
        </Card>
    }
}

/// One row per mapping; `notes` last with its column chips
#[component]
fn MappingTable(vm: ExcelImportVm) -> impl IntoView {
    let missing = move || {
        vm.wizard.with(|w| {
            w.mappings()
                .missing_required()
                .iter()
                .map(|name| field_label(w.fields(), name))
                .collect::<Vec<_>>()
        })
    };

    let rows = move || {
        let (mappings, fields, preview) = vm.wizard.with(|w| {
            (
                w.mappings().as_slice().to_vec(),
                w.fields().to_vec(),
                w.preview().cloned(),
            )
        });
        let Some(preview) = preview else {
            return view! { <></> }.into_any();
        };
        let headers: Vec<String> = preview
            .mappable_headers()
            .into_iter()
            .map(str::to_string)
            .collect();

        mappings
            .into_iter()
            .map(|mapping| {
                if mapping.is_notes() {
                    view! { <NotesRow vm=vm mapping=mapping headers=headers.clone() /> }.into_any()
                } else {
                    let label = field_label(&fields, &mapping.lead_field);
                    view! {
                        <FieldRow
                            vm=vm
                            mapping=mapping
                            label=label
                            headers=headers.clone()
                            preview=preview.clone()
                        />
                    }
                    .into_any()
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <Card>
            <h3 class="card__title">"Map columns to lead fields"</h3>
            <table class="table mapping-table">
                <thead>
                    <tr>
                        <th>"Lead field"</th>
                        <th>"Spreadsheet column"</th>
                        <th>"First row"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>

            {move || {
                (!vm.fields_loaded()).then(|| view! {
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__icon">{icon("alert")}</span>
                        <span class="warning-box__text">
                            "Lead fields are not loaded yet, columns cannot be mapped."
                        </span>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| vm.load_fields()
                            disabled=move || vm.fields_loading()
                        >
                            {move || if vm.fields_loading() { "Loading..." } else { "Retry" }}
                        </Button>
                    </div>
                })
            }}

            {move || {
                let missing = missing();
                (!missing.is_empty()).then(|| view! {
                    <div class="warning-box warning-box--warning">
                        <span class="warning-box__icon">{icon("alert")}</span>
                        <span class="warning-box__text">
                            {format!("Required fields without a column: {}", missing.join(", "))}
                        </span>
                    </div>
                })
            }}

            <div class="wizard-actions">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.add_mapping()>
                    {icon("plus")}
                    " Add field"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.confirm_mapping()
                    disabled=move || vm.in_flight().is_some() || !vm.fields_loaded()
                >
                    "Continue"
                </Button>
            </div>
        </Card>
    }
}

#[component]
fn FieldRow(
    vm: ExcelImportVm,
    mapping: FieldMapping,
    label: String,
    headers: Vec<String>,
    preview: SheetPreviewData,
) -> impl IntoView {
    let sample = preview
        .column_index(&mapping.excel_column)
        .map(|i| preview.cell_text(0, i))
        .unwrap_or_default();
    let removable = vm.wizard.with_untracked(|w| w.mappings().can_remove(&mapping.lead_field));
    let field_for_change = mapping.lead_field.clone();
    let field_for_remove = mapping.lead_field.clone();
    let current = mapping.excel_column.clone();

    view! {
        <tr>
            <td>
                {label}
                {mapping.is_required.then(|| view! { <span class="required-mark">" *"</span> })}
            </td>
            <td>
                <select
                    class="doc-filter__select"
                    on:change=move |ev| vm.update_mapping(field_for_change.clone(), event_target_value(&ev))
                >
                    <option value="" selected=current.is_empty()>"Not mapped"</option>
                    {headers
                        .into_iter()
                        .map(|header| {
                            let is_selected = header == current;
                            view! { <option value=header.clone() selected=is_selected>{header.clone()}</option> }
                        })
                        .collect_view()}
                </select>
            </td>
            <td class="mapping-table__sample">{sample}</td>
            <td>
                {removable.then(|| view! {
                    <button
                        class="button button--icon"
                        title="Remove mapping"
                        on:click=move |_| vm.remove_mapping(field_for_remove.clone())
                    >
                        {icon("trash")}
                    </button>
                })}
            </td>
        </tr>
    }
}

#[component]
fn NotesRow(vm: ExcelImportVm, mapping: FieldMapping, headers: Vec<String>) -> impl IntoView {
    let columns = mapping.columns();
    let available: Vec<String> = headers
        .into_iter()
        .filter(|h| !columns.contains(h) && !h.contains(','))
        .collect();

    view! {
        <tr class="mapping-table__notes">
            <td>
                "Notes"
                <span class="mapping-table__hint">" (combine several columns)"</span>
            </td>
            <td colspan="2">
                <div class="chips">
                    {columns
                        .into_iter()
                        .enumerate()
                        .map(|(index, column)| view! {
                            <span class="chip">
                                {column}
                                <button
                                    class="chip__remove"
                                    title="Remove column"
                                    on:click=move |_| vm.remove_notes_column(index)
                                >
                                    {icon("x")}
                                </button>
                            </span>
                        })
                        .collect_view()}
                </div>
                <select
                    class="doc-filter__select"
                    on:change=move |ev| {
                        let column = event_target_value(&ev);
                        if !column.is_empty() {
                            vm.add_notes_column(column);
                        }
                    }
                >
                    <option value="" selected=true>"+ add column"</option>
                    {available
                        .into_iter()
                        .map(|header| view! { <option value=header.clone()>{header.clone()}</option> })
                        .collect_view()}
                </select>
            </td>
            <td></td>
        </tr>
    }
}

/// Sample rows of the selected sheet
#[component]
fn PreviewTable(vm: ExcelImportVm) -> impl IntoView {
    let preview = vm.wizard.with_untracked(|w| w.preview().cloned());
    let Some(preview) = preview else {
        return view! { <></> }.into_any();
    };

    let caption = format!(
        "Showing {} of {}",
        preview.sample_rows.len(),
        pluralize(preview.total_rows, "row", "rows")
    );
    let body = (0..preview.sample_rows.len())
        .map(|row| {
            let cells = (0..preview.headers.len())
                .map(|col| view! { <td>{preview.cell_text(row, col)}</td> })
                .collect_view();
            view! { <tr>{cells}</tr> }
        })
        .collect_view();

    view! {
        <Card>
            <h3 class="card__title">"Sheet preview"</h3>
            <p class="wizard-hint">{caption}</p>
            <div class="table-scroll">
                <table class="table preview-table">
                    <thead>
                        <tr>
                            {preview.headers.iter().map(|h| view! { <th>{h.clone()}</th> }).collect_view()}
                        </tr>
                    </thead>
                    <tbody>{body}</tbody>
                </table>
            </div>
        </Card>
    }
    .into_any()
}

/// Final check before the import is submitted
#[component]
pub fn ReviewStep(vm: ExcelImportVm) -> impl IntoView {
    let (sheet, total_rows, mappings, fields) = vm.wizard.with_untracked(|w| {
        (
            w.selected_sheet().unwrap_or_default().to_string(),
            w.preview().map(|p| p.total_rows).unwrap_or_default(),
            w.mappings().bound(),
            w.fields().to_vec(),
        )
    });
    let busy = move || vm.in_flight().is_some();

    view! {
        <Card>
            <h3 class="card__title">"Review import"</h3>
            <p class="wizard-hint">
                {format!(
                    "Sheet \"{}\" · {} will be imported with {}.",
                    sheet,
                    pluralize(total_rows, "row", "rows"),
                    pluralize(mappings.len() as u64, "mapped field", "mapped fields"),
                )}
            </p>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Lead field"</th>
                        <th>"Column"</th>
                    </tr>
                </thead>
                <tbody>
                    {mappings
                        .iter()
                        .map(|m| view! {
                            <tr>
                                <td>{field_label(&fields, &m.lead_field)}</td>
                                <td>{m.columns().join(", ")}</td>
                            </tr>
                        })
                        .collect_view()}
                </tbody>
            </table>

            <div class="wizard-actions">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| vm.back_to_mapping()
                    disabled=busy
                >
                    {icon("arrow-left")}
                    " Back to mapping"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.start_import()
                    disabled=busy
                >
                    {icon("upload")}
                    " Import leads"
                </Button>
            </div>
        </Card>
    }
}
