use dioxus::prelude::*;
use dioxus_router::Link;
use quiz_core::model::Subject;
use services::{QuizOutcome, QuizSession, SessionKind};

use crate::context::{AppContext, use_identity};
use crate::routes::{QuestionCount, Route};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuestionCardVm, ResultVm, category_title, map_question_card, map_result};

#[component]
pub fn QuizView(subject: String, count: QuestionCount) -> Element {
    let ctx = use_context::<AppContext>();
    let identity = use_identity();
    let quiz_loop = ctx.quiz_loop();

    let mut session = use_signal(|| None::<QuizSession>);
    let mut outcome = use_signal(|| None::<QuizOutcome>);
    let mut confirming = use_signal(|| false);
    let mut submitting = use_signal(|| false);
    let mut action_error = use_signal(|| None::<ViewError>);

    let resource = {
        let quiz_loop = quiz_loop.clone();
        let subject = subject.clone();
        use_resource(move || {
            let quiz_loop = quiz_loop.clone();
            let subject = subject.clone();
            async move {
                let subject = Subject::new(subject).map_err(|_| ViewError::EmptyCategory)?;
                let who = identity.peek().clone();
                let started = quiz_loop
                    .start_session(&subject, count.size(), who.as_ref())
                    .await
                    .map_err(|e| ViewError::from(&e))?;
                session.set(Some(started));
                outcome.set(None);
                Ok::<_, ViewError>(())
            }
        })
    };
    let state = view_state_from_resource(&resource);

    let submit_now = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |()| {
            let Some(finished) = session.write().take() else {
                return;
            };
            confirming.set(false);
            submitting.set(true);
            let quiz_loop = quiz_loop.clone();
            let who = identity.peek().clone();
            spawn(async move {
                match quiz_loop.complete(finished, who.as_ref()).await {
                    Ok(done) => outcome.set(Some(done)),
                    Err(e) => action_error.set(Some(ViewError::from(&e))),
                }
                submitting.set(false);
            });
        })
    };

    let request_submit = use_callback(move |()| {
        let unanswered = session.read().as_ref().is_some_and(QuizSession::has_unanswered);
        if unanswered {
            confirming.set(true);
        } else {
            submit_now.call(());
        }
    });

    let select = use_callback(move |index: usize| {
        if let Some(current) = session.write().as_mut() {
            if let Err(e) = current.select_answer(index) {
                action_error.set(Some(ViewError::from(&e)));
            }
        }
    });
    let previous = use_callback(move |()| {
        if let Some(current) = session.write().as_mut() {
            current.retreat();
        }
    });
    let next = use_callback(move |()| {
        if let Some(current) = session.write().as_mut() {
            current.advance();
        }
    });

    let retry = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |()| {
            let Some(previous) = outcome.peek().clone() else {
                return;
            };
            let retry_subject = previous.session.subject.clone();
            match quiz_loop.start_retry(previous.report.incorrect().to_vec(), retry_subject) {
                Ok(started) => {
                    session.set(Some(started));
                    outcome.set(None);
                }
                Err(e) => action_error.set(Some(ViewError::from(&e))),
            }
        })
    };

    let title = category_title(&subject);
    let is_retry = session
        .read()
        .as_ref()
        .is_some_and(|s| s.kind() == SessionKind::Retry);
    let card = session.read().as_ref().map(map_question_card);
    let unanswered = session.read().as_ref().map_or(0, QuizSession::unanswered_count);
    let result = outcome.read().as_ref().map(map_result);

    rsx! {
        div { class: "page quiz",
            header { class: "quiz__header",
                h2 { class: "page__title", "{title}" }
                if is_retry {
                    span { class: "badge", "틀린 문제 다시 풀기" }
                }
            }

            if let Some(err) = action_error() {
                p { class: "error", "{err.message()}" }
            }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "muted", "문제를 불러오는 중입니다..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "empty",
                        p { "{err.message()}" }
                        Link { class: "btn", to: Route::Home {}, "홈으로" }
                    }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(result) = result {
                        ResultPanel { result, on_retry: retry }
                    } else if submitting() {
                        p { class: "muted", "채점 중입니다..." }
                    } else if let Some(card) = card {
                        QuestionPanel {
                            card,
                            on_select: select,
                            on_previous: previous,
                            on_next: next,
                            on_submit: request_submit,
                        }
                        if confirming() {
                            ConfirmSubmit {
                                unanswered,
                                on_confirm: submit_now,
                                on_cancel: move |()| confirming.set(false),
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn QuestionPanel(
    card: QuestionCardVm,
    on_select: EventHandler<usize>,
    on_previous: EventHandler<()>,
    on_next: EventHandler<()>,
    on_submit: EventHandler<()>,
) -> Element {
    rsx! {
        section { class: "question",
            div { class: "progress",
                span { class: "progress__label", "{card.number} / {card.total}" }
                span { class: "progress__answered", "{card.answered}문제 답함" }
                div { class: "progress__bar",
                    div { class: "progress__fill", style: "width: {card.percent_through}%" }
                }
            }

            if let Some(passage) = card.passage.as_deref() {
                div { class: "question__passage", "{passage}" }
            }
            if let Some(src) = card.image_src.as_deref() {
                img { class: "question__image", src: "{src}", alt: "문제 이미지" }
            }
            if let Some(text) = card.box_text.as_deref() {
                div { class: "question__box", "{text}" }
            }
            h3 { class: "question__prompt", "{card.number}. {card.prompt}" }

            ol { class: "options",
                for option in card.options.clone() {
                    li { key: "{option.index}",
                        button {
                            class: if option.selected { "option option--selected" } else { "option" },
                            r#type: "button",
                            onclick: move |_| on_select.call(option.index),
                            span { class: "option__mark", "{option.mark}" }
                            span { class: "option__text", "{option.text}" }
                        }
                    }
                }
            }

            nav { class: "question__nav",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: card.is_first,
                    onclick: move |_| on_previous.call(()),
                    "이전"
                }
                if card.is_last {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_submit.call(()),
                        "제출하기"
                    }
                } else {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_next.call(()),
                        "다음"
                    }
                }
            }
        }
    }
}

#[component]
fn ConfirmSubmit(
    unanswered: usize,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "modal",
            div { class: "modal__body",
                p { "아직 풀지 않은 문제가 있습니다. 제출하시겠습니까?" }
                p { class: "muted", "남은 문제: {unanswered}개" }
                div { class: "modal__actions",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_cancel.call(()),
                        "계속 풀기"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_confirm.call(()),
                        "제출"
                    }
                }
            }
        }
    }
}

#[component]
fn ResultPanel(result: ResultVm, on_retry: EventHandler<()>) -> Element {
    let mut expanded = use_signal(|| None::<usize>);

    rsx! {
        section { class: "result",
            h2 {
                "학습 결과"
                if result.is_retry {
                    span { class: "badge", "틀린 문제 다시 풀기" }
                }
            }
            p { class: "muted", "수고하셨습니다!" }

            div { class: "result__score",
                span { class: "result__percentage", "{result.percentage}" }
                span { class: "result__unit", "점" }
            }
            div { class: "result__totals",
                div {
                    div { class: "result__value", "{result.total}" }
                    div { class: "result__label", "총 문제" }
                }
                div {
                    div { class: "result__value", "{result.correct}" }
                    div { class: "result__label", "정답 개수" }
                }
                div {
                    div { class: "result__value", "{result.incorrect}" }
                    div { class: "result__label", "오답 개수" }
                }
            }
            if result.unanswered > 0 {
                p { class: "muted", "풀지 않은 문제 {result.unanswered}개는 오답으로 처리되었습니다." }
            }
            p { class: "result__stats", "{result.stats_note}" }

            ul { class: "result__items",
                for item in result.items.clone() {
                    li {
                        key: "{item.position}",
                        class: if item.is_correct { "result-item result-item--correct" } else { "result-item result-item--wrong" },
                        button {
                            class: "result-item__head",
                            r#type: "button",
                            onclick: move |_| {
                                let open = expanded() == Some(item.position);
                                expanded.set(if open { None } else { Some(item.position) });
                            },
                            span { class: "result-item__mark", if item.is_correct { "O" } else { "X" } }
                            span { "{item.number}. {item.prompt}" }
                        }
                        if expanded() == Some(item.position) {
                            div { class: "result-item__detail",
                                p { "내 답: {item.selected}" }
                                p { "정답: {item.correct}" }
                                p { class: "result-item__explanation", "{item.explanation}" }
                            }
                        }
                    }
                }
            }

            div { class: "result__actions",
                if result.can_retry {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_retry.call(()),
                        "틀린 문제 다시 풀기"
                    }
                }
                Link { class: "btn btn-secondary", to: Route::Home {}, "다른 영역 풀기" }
            }
        }
    }
}
