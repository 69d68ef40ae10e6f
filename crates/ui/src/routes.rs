use std::fmt;
use std::str::FromStr;

use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};
use services::SampleSize;

use crate::context::{AppContext, use_identity};
use crate::views::{AdminView, AuthView, HomeView, QuizView, RankingView};

/// Route segment for the requested number of questions (`all` or a count).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuestionCount(pub SampleSize);

impl QuestionCount {
    #[must_use]
    pub fn size(self) -> SampleSize {
        self.0
    }
}

impl Default for QuestionCount {
    fn default() -> Self {
        Self(SampleSize::Count(10))
    }
}

impl fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            SampleSize::All => f.write_str("all"),
            SampleSize::Count(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for QuestionCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self(SampleSize::All));
        }
        s.parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map(|n| Self(SampleSize::Count(n)))
            .ok_or_else(|| format!("invalid question count: {s}"))
    }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quiz/:subject/:count", QuizView)] Quiz { subject: String, count: QuestionCount },
        #[route("/ranking", RankingView)] Ranking {},
        #[route("/auth", AuthView)] Auth {},
        #[route("/admin", AdminView)] Admin {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Header {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Header() -> Element {
    let ctx = use_context::<AppContext>();
    let mut identity = use_identity();
    let signed_in = identity.read().as_ref().map(|i| i.display_name().to_owned());

    rsx! {
        header { class: "topbar",
            Link { class: "brand", to: Route::Home {}, "달곰 국어" }
            nav { class: "topbar__nav",
                Link { to: Route::Home {}, "홈" }
                Link { to: Route::Ranking {}, "랭킹" }
                if ctx.admin_enabled() {
                    Link { to: Route::Admin {}, "관리자" }
                }
                if let Some(name) = signed_in {
                    span { class: "topbar__user", "{name}" }
                    button {
                        class: "btn btn-link",
                        r#type: "button",
                        onclick: move |_| identity.set(None),
                        "로그아웃"
                    }
                } else {
                    Link { to: Route::Auth {}, "로그인" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_count_round_trips_through_route_segment() {
        assert_eq!("all".parse::<QuestionCount>().unwrap().size(), SampleSize::All);
        assert_eq!(
            "20".parse::<QuestionCount>().unwrap().size(),
            SampleSize::Count(20)
        );
        assert_eq!(QuestionCount(SampleSize::Count(5)).to_string(), "5");
        assert_eq!(QuestionCount(SampleSize::All).to_string(), "all");
        assert!("0".parse::<QuestionCount>().is_err());
        assert!("many".parse::<QuestionCount>().is_err());
    }
}
