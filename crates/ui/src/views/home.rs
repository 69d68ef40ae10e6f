use dioxus::prelude::*;
use dioxus_router::Link;
use services::ANONYMOUS_QUESTION_LIMIT;

use crate::context::{AppContext, use_identity};
use crate::routes::{QuestionCount, Route};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{CategoryVm, count_choices, map_categories};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let identity = use_identity();
    let uploads = ctx.uploads();
    let mut count = use_signal(QuestionCount::default);

    let resource = use_resource(move || {
        let uploads = uploads.clone();
        async move {
            let subjects = uploads.subjects().await.map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(map_categories(&subjects))
        }
    });
    let state = view_state_from_resource(&resource);
    let anonymous = identity.read().is_none();
    let selected = count();

    rsx! {
        div { class: "page home",
            h2 { class: "page__title", "영역을 선택하세요" }

            div { class: "count-picker",
                for choice in count_choices() {
                    button {
                        key: "{choice.count}",
                        class: if choice.count == selected { "chip chip--active" } else { "chip" },
                        r#type: "button",
                        onclick: move |_| count.set(choice.count),
                        "{choice.label}"
                    }
                }
            }
            if anonymous {
                p { class: "hint",
                    "로그인하지 않으면 한 번에 최대 {ANONYMOUS_QUESTION_LIMIT}문제까지 풀 수 있습니다."
                }
            }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "muted", "영역을 불러오는 중입니다..." }
                },
                ViewState::Ready(categories) => rsx! {
                    div { class: "category-grid",
                        for category in categories {
                            CategoryCard { key: "{category.subject}", category, count: selected }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn CategoryCard(category: CategoryVm, count: QuestionCount) -> Element {
    rsx! {
        Link {
            class: "category-card",
            to: Route::Quiz { subject: category.subject.clone(), count },
            h3 { "{category.title}" }
            p { "{category.description}" }
        }
    }
}
