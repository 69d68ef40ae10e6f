use dioxus::prelude::*;
use quiz_core::model::QuestionId;
use services::QuestionTab;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    AdminDetailVm, AdminRowVm, map_admin_rows, map_admin_tabs, upload_error_message, upload_success_message,
};

#[derive(Clone, Debug, PartialEq, Eq)]
enum UploadStatus {
    Idle,
    Working,
    Done(String),
    Failed(String),
}

#[component]
pub fn AdminView() -> Element {
    let ctx = use_context::<AppContext>();
    if !ctx.admin_enabled() {
        return rsx! {
            div { class: "page admin",
                p { class: "error", "관리자 권한이 없습니다." }
            }
        };
    }
    rsx! { AdminPanel {} }
}

#[component]
fn AdminPanel() -> Element {
    let ctx = use_context::<AppContext>();
    let uploads = ctx.uploads();

    let mut json_text = use_signal(String::new);
    let mut file_path = use_signal(String::new);
    let mut status = use_signal(|| UploadStatus::Idle);
    let mut tab = use_signal(|| QuestionTab::All);
    let mut refresh = use_signal(|| 0_u64);
    let mut pending_delete = use_signal(|| None::<String>);

    let tabs_resource = {
        let uploads = uploads.clone();
        use_resource(move || {
            let uploads = uploads.clone();
            let _ = refresh();
            async move {
                let subjects = uploads.subjects().await.map_err(|_| ViewError::Unknown)?;
                Ok::<_, ViewError>(map_admin_tabs(&subjects))
            }
        })
    };
    let rows_resource = {
        let uploads = uploads.clone();
        use_resource(move || {
            let uploads = uploads.clone();
            let selected = tab();
            let _ = refresh();
            async move {
                let questions = uploads.list(&selected).await.map_err(|_| ViewError::Unknown)?;
                Ok::<_, ViewError>(map_admin_rows(&questions))
            }
        })
    };
    let tabs = view_state_from_resource(&tabs_resource);
    let rows = view_state_from_resource(&rows_resource);

    let load_file = use_callback(move |()| {
        let path = file_path.peek().trim().to_owned();
        if path.is_empty() {
            return;
        }
        spawn(async move {
            match tokio::fs::read_to_string(&path).await {
                Ok(text) => {
                    json_text.set(text);
                    status.set(UploadStatus::Idle);
                }
                Err(e) => status.set(UploadStatus::Failed(format!("파일을 읽지 못했습니다: {e}"))),
            }
        });
    });

    let upload = {
        let uploads = uploads.clone();
        use_callback(move |()| {
            let text = json_text.peek().clone();
            let uploads = uploads.clone();
            status.set(UploadStatus::Working);
            spawn(async move {
                match uploads.upload_json(&text).await {
                    Ok(summary) => {
                        status.set(UploadStatus::Done(upload_success_message(&summary)));
                        json_text.set(String::new());
                        refresh += 1;
                    }
                    Err(e) => status.set(UploadStatus::Failed(upload_error_message(&e))),
                }
            });
        })
    };

    let delete = {
        let uploads = uploads.clone();
        use_callback(move |id: String| {
            let uploads = uploads.clone();
            pending_delete.set(None);
            spawn(async move {
                let Ok(id) = QuestionId::new(id) else {
                    return;
                };
                match uploads.delete(&id).await {
                    Ok(_) => refresh += 1,
                    Err(e) => status.set(UploadStatus::Failed(format!("삭제에 실패했습니다: {e}"))),
                }
            });
        })
    };

    let working = status() == UploadStatus::Working;
    let selected_tab = tab();

    rsx! {
        div { class: "page admin",
            h2 { class: "page__title", "문제 관리" }

            section { class: "admin__upload",
                h3 { "JSON 업로드" }
                p { class: "hint", "* JSON 내부 tags.subject 값에 따라 자동 분류됩니다." }
                div { class: "admin__file",
                    input {
                        class: "input",
                        r#type: "text",
                        placeholder: "JSON 파일 경로",
                        value: "{file_path}",
                        oninput: move |evt| file_path.set(evt.value()),
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| load_file.call(()),
                        "파일 불러오기"
                    }
                }
                textarea {
                    class: "admin__json",
                    rows: "10",
                    placeholder: "문제 JSON (객체 또는 배열)",
                    value: "{json_text}",
                    oninput: move |evt| json_text.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: working || json_text.read().trim().is_empty(),
                    onclick: move |_| upload.call(()),
                    if working { "이미지 압축 및 업로드 중..." } else { "업로드 및 저장하기" }
                }
                match status() {
                    UploadStatus::Idle | UploadStatus::Working => rsx! {},
                    UploadStatus::Done(message) => rsx! {
                        p { class: "success", "{message}" }
                    },
                    UploadStatus::Failed(message) => rsx! {
                        p { class: "error", "{message}" }
                    },
                }
            }

            section { class: "admin__list",
                if let ViewState::Ready(tabs) = tabs {
                    div { class: "tabs",
                        for item in tabs {
                            button {
                                key: "{item.label}",
                                class: if item.tab == selected_tab { "chip chip--active" } else { "chip" },
                                r#type: "button",
                                onclick: move |_| tab.set(item.tab.clone()),
                                "{item.label}"
                            }
                        }
                    }
                }

                match rows {
                    ViewState::Idle | ViewState::Loading => rsx! {
                        p { class: "muted", "불러오는 중..." }
                    },
                    ViewState::Error(err) => rsx! {
                        p { class: "error", "{err.message()}" }
                    },
                    ViewState::Ready(rows) => rsx! {
                        if rows.is_empty() {
                            p { class: "empty", "등록된 문제가 없습니다." }
                        } else {
                            ul { class: "admin__rows",
                                for row in rows {
                                    AdminRow {
                                        key: "{row.id}",
                                        confirming: pending_delete.read().as_deref() == Some(row.id.as_str()),
                                        row,
                                        on_request_delete: move |id| pending_delete.set(Some(id)),
                                        on_cancel_delete: move |()| pending_delete.set(None),
                                        on_delete: delete,
                                    }
                                }
                            }
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn AdminRow(
    row: AdminRowVm,
    confirming: bool,
    on_request_delete: EventHandler<String>,
    on_cancel_delete: EventHandler<()>,
    on_delete: EventHandler<String>,
) -> Element {
    let id = row.id.clone();
    let confirm_id = row.id.clone();

    rsx! {
        li { class: "admin-row",
            div { class: "admin-row__head",
                span { class: "badge", "{row.subject}" }
                span { class: "admin-row__id", "{row.id}" }
                span { class: "admin-row__prompt", "{row.preview}" }
                span { class: "muted", "보기 {row.option_count}개" }
                if row.has_image {
                    span { class: "muted", "이미지" }
                }
                span { class: "muted", "{row.updated_at_str}" }
                if confirming {
                    span { class: "admin-row__confirm", "삭제할까요?" }
                    button {
                        class: "btn btn-danger",
                        r#type: "button",
                        onclick: move |_| on_delete.call(confirm_id.clone()),
                        "삭제"
                    }
                    button {
                        class: "btn btn-link",
                        r#type: "button",
                        onclick: move |_| on_cancel_delete.call(()),
                        "취소"
                    }
                } else {
                    button {
                        class: "btn btn-link",
                        r#type: "button",
                        onclick: move |_| on_request_delete.call(id.clone()),
                        "삭제"
                    }
                }
            }
            details { class: "admin-row__detail",
                summary { "문제 상세 보기" }
                AdminDetail { detail: row.detail.clone() }
            }
        }
    }
}

#[component]
fn AdminDetail(detail: AdminDetailVm) -> Element {
    rsx! {
        div { class: "admin-detail",
            if let Some(passage) = detail.passage.as_deref() {
                div { class: "question__passage", "{passage}" }
            }
            if let Some(src) = detail.image_src.as_deref() {
                img { class: "question__image", src: "{src}", alt: "문제 이미지" }
            }
            if let Some(text) = detail.box_text.as_deref() {
                div { class: "question__box", "{text}" }
            }
            p { class: "admin-detail__prompt", "{detail.prompt}" }
            ol { class: "admin-detail__options",
                for option in detail.options.clone() {
                    li {
                        key: "{option.mark}",
                        class: if option.is_correct { "admin-option admin-option--correct" } else { "admin-option" },
                        span { class: "option__mark", "{option.mark}" }
                        span { "{option.text}" }
                        if option.is_correct {
                            span { class: "badge", "정답" }
                        }
                    }
                }
            }
            div { class: "admin-detail__explanation",
                strong { "해설" }
                p { "{detail.explanation}" }
            }
        }
    }
}
