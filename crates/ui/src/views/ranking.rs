use dioxus::prelude::*;
use services::LEADERBOARD_SIZE;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState};
use crate::vm::{RankRowVm, map_rank_rows};

#[component]
pub fn RankingView() -> Element {
    let ctx = use_context::<AppContext>();
    let leaderboard = ctx.leaderboard();
    let mut state = use_signal(|| ViewState::<Vec<RankRowVm>>::Loading);

    // Runs until the view unmounts; dropping the task drops the subscription.
    use_future(move || {
        let leaderboard = leaderboard.clone();
        async move {
            let mut feed = leaderboard.subscribe(LEADERBOARD_SIZE);
            while let Some(snapshot) = feed.next().await {
                state.set(match snapshot {
                    Ok(entries) => ViewState::Ready(map_rank_rows(&entries)),
                    Err(_) => ViewState::Error(ViewError::Unknown),
                });
            }
        }
    });

    rsx! {
        div { class: "page ranking",
            h2 { class: "page__title", "RANKING" }

            match state() {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "muted", "랭킹을 불러오는 중입니다..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { class: "empty", "아직 랭킹 정보가 없습니다." }
                    } else {
                        table { class: "ranking__table",
                            thead {
                                tr {
                                    th { "순위" }
                                    th { "사용자" }
                                    th { "맞음" }
                                    th { "푼 문제" }
                                    th { "정답률" }
                                }
                            }
                            tbody {
                                for row in rows {
                                    tr {
                                        key: "{row.key}",
                                        class: if row.is_leader { "ranking__row ranking__row--leader" } else { "ranking__row" },
                                        td { class: "ranking__rank", "{row.rank_label}" }
                                        td { "{row.name}" }
                                        td { class: "ranking__correct", "{row.correct}" }
                                        td { "{row.solved}" }
                                        td { "{row.accuracy}" }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
