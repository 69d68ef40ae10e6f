use dioxus::prelude::*;
use dioxus_router::Router;

use crate::context::{AppContext, use_identity_provider};
use crate::routes::Route;

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    use_identity_provider(ctx.initial_identity());

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        document::Title { "달곰 국어" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "문제가 발생했습니다" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
