use services::{QuizOutcome, SessionKind, StatsRecord};

use crate::vm::quiz_vm::option_mark;

/// Shown when a question carries no explanation.
pub const NO_EXPLANATION: &str = "해설 정보가 없습니다.";

const NOT_SELECTED: &str = "선택 안 함";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultItemVm {
    /// Index into the report's outcomes; keys the expanded explanation.
    pub position: usize,
    pub number: usize,
    pub prompt: String,
    pub selected: String,
    pub correct: String,
    pub is_correct: bool,
    pub explanation: String,
}

/// Result screen for a completed session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub percentage: u32,
    pub total: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub unanswered: usize,
    pub is_retry: bool,
    pub can_retry: bool,
    pub stats_note: String,
    pub items: Vec<ResultItemVm>,
}

#[must_use]
pub fn map_result(outcome: &QuizOutcome) -> ResultVm {
    let report = &outcome.report;
    let items = outcome
        .session
        .questions
        .iter()
        .filter_map(|question| {
            let position = report.position_of(question.id())?;
            let scored = report.outcomes().get(position)?;
            let option_text = |index: usize| {
                question.options().get(index).map_or_else(String::new, |text| {
                    format!("{} {text}", option_mark(index))
                })
            };
            let explanation = question.explanation().trim();
            Some(ResultItemVm {
                position,
                number: position + 1,
                prompt: question.prompt().to_owned(),
                selected: scored
                    .selected
                    .map_or_else(|| NOT_SELECTED.to_owned(), option_text),
                correct: option_text(scored.correct_index),
                is_correct: scored.is_correct,
                explanation: if explanation.is_empty() {
                    NO_EXPLANATION.to_owned()
                } else {
                    explanation.to_owned()
                },
            })
        })
        .collect();

    ResultVm {
        percentage: report.percentage(),
        total: report.total(),
        correct: report.correct_count(),
        incorrect: report.incorrect_count(),
        unanswered: report.unanswered_count(),
        is_retry: outcome.session.kind == SessionKind::Retry,
        can_retry: !report.incorrect().is_empty(),
        stats_note: stats_note(&outcome.stats),
        items,
    }
}

fn stats_note(record: &StatsRecord) -> String {
    match record {
        StatsRecord::Anonymous => "로그인하면 학습 기록이 랭킹에 반영됩니다.".to_owned(),
        StatsRecord::Saved(stats) => format!(
            "누적 기록: {}문제 중 {}문제 정답 (정답률 {}%)",
            stats.total_solved(),
            stats.total_correct(),
            stats.accuracy()
        ),
        StatsRecord::Failed(_) => "학습 기록을 저장하지 못했습니다.".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{QuestionDraft, SessionCounts, Subject, UserId, UserStats};
    use quiz_core::score;
    use quiz_core::time::fixed_now;
    use services::FinalizedSession;

    fn outcome(stats: StatsRecord) -> QuizOutcome {
        let questions = vec![
            QuestionDraft {
                id: "q1".into(),
                prompt: "first".into(),
                passage: None,
                box_text: None,
                image: None,
                options: vec!["a".into(), "b".into(), "c".into()],
                correct_index: 1,
                explanation: "because b".into(),
                subject: "grammar".into(),
            }
            .validate()
            .unwrap(),
            QuestionDraft {
                id: "q2".into(),
                prompt: "second".into(),
                passage: None,
                box_text: None,
                image: None,
                options: vec!["x".into(), "y".into()],
                correct_index: 0,
                explanation: "  ".into(),
                subject: "grammar".into(),
            }
            .validate()
            .unwrap(),
        ];
        let answers = vec![Some(1), None];
        let report = score(&questions, &answers).unwrap();
        QuizOutcome {
            session: FinalizedSession {
                questions,
                answers,
                subject: Subject::new("grammar").unwrap(),
                kind: SessionKind::Fresh,
                started_at: fixed_now(),
            },
            report,
            stats,
        }
    }

    #[test]
    fn items_show_choices_and_placeholder_explanation() {
        let vm = map_result(&outcome(StatsRecord::Anonymous));
        assert_eq!(vm.percentage, 50);
        assert_eq!(vm.total, 2);
        assert_eq!(vm.correct, 1);
        assert_eq!(vm.unanswered, 1);
        assert!(vm.can_retry);
        assert!(!vm.is_retry);

        assert_eq!(vm.incorrect, 1);
        assert_eq!(vm.items[1].position, 1);
        assert_eq!(vm.items[1].number, 2);

        assert!(vm.items[0].is_correct);
        assert_eq!(vm.items[0].selected, "② b");
        assert_eq!(vm.items[0].explanation, "because b");

        assert!(!vm.items[1].is_correct);
        assert_eq!(vm.items[1].selected, NOT_SELECTED);
        assert_eq!(vm.items[1].correct, "① x");
        assert_eq!(vm.items[1].explanation, NO_EXPLANATION);
    }

    #[test]
    fn stats_note_reflects_record() {
        let saved = UserStats::from_session(
            UserId::new("me@example.com").unwrap(),
            None,
            SessionCounts::from_totals(4, 3),
        );
        let vm = map_result(&outcome(StatsRecord::Saved(saved)));
        assert_eq!(vm.stats_note, "누적 기록: 4문제 중 3문제 정답 (정답률 75%)");

        let vm = map_result(&outcome(StatsRecord::Failed("offline".into())));
        assert_eq!(vm.stats_note, "학습 기록을 저장하지 못했습니다.");
    }
}
