use dioxus::prelude::*;
use dioxus_router::use_navigator;
use quiz_core::model::Identity;

use crate::context::{AppContext, use_identity};
use crate::routes::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthMode {
    SignIn,
    SignUp,
}

impl AuthMode {
    fn heading(self) -> &'static str {
        match self {
            Self::SignIn => "반가워요!",
            Self::SignUp => "새로운 시작을 해보세요!",
        }
    }

    fn action(self) -> &'static str {
        match self {
            Self::SignIn => "로그인",
            Self::SignUp => "회원가입",
        }
    }

    fn toggle_label(self) -> &'static str {
        match self {
            Self::SignIn => "아직 계정이 없으신가요? 회원가입",
            Self::SignUp => "이미 계정이 있나요? 로그인",
        }
    }

    fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::SignUp,
            Self::SignUp => Self::SignIn,
        }
    }
}

#[component]
pub fn AuthView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut identity = use_identity();
    let stats = ctx.stats();

    let mut email = use_signal(String::new);
    let mut mode = use_signal(|| AuthMode::SignIn);
    let mut error = use_signal(|| None::<&'static str>);
    let mut busy = use_signal(|| false);

    let submit = use_callback(move |()| {
        let Ok(signed_in) = Identity::from_email(&email.peek()) else {
            error.set(Some("올바른 이메일을 입력해주세요."));
            return;
        };
        error.set(None);
        match mode() {
            AuthMode::SignIn => {
                identity.set(Some(signed_in));
                let _ = navigator.push(Route::Home {});
            }
            AuthMode::SignUp => {
                let stats = stats.clone();
                busy.set(true);
                spawn(async move {
                    match stats.register(&signed_in).await {
                        Ok(_) => {
                            identity.set(Some(signed_in));
                            let _ = navigator.push(Route::Home {});
                        }
                        Err(_) => error.set(Some("회원가입에 실패했습니다. 다시 시도해 주세요.")),
                    }
                    busy.set(false);
                });
            }
        }
    });

    let current = mode();
    let signed_in_as = identity.read().as_ref().map(|i| i.display_name().to_owned());

    rsx! {
        div { class: "page auth",
            if let Some(name) = signed_in_as {
                p { class: "auth__current", "{name} 계정으로 로그인되어 있습니다." }
            }
            h2 { class: "page__title", "{current.heading()}" }
            form {
                class: "auth__form",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    submit.call(());
                },
                input {
                    class: "input",
                    r#type: "email",
                    placeholder: "이메일",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: busy(),
                    "{current.action()}"
                }
            }
            if let Some(message) = error() {
                p { class: "error", "{message}" }
            }
            button {
                class: "btn btn-link",
                r#type: "button",
                onclick: move |_| mode.set(current.toggled()),
                "{current.toggle_label()}"
            }
        }
    }
}
