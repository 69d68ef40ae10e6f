use quiz_core::model::{Question, Subject};
use services::{QuestionTab, UploadError, UploadSummary};

use crate::vm::quiz_vm::{image_src, option_mark};
use crate::vm::result_vm::NO_EXPLANATION;
use crate::vm::time_fmt::format_datetime;

const PREVIEW_CHARS: usize = 40;
const NEVER_STAMPED: &str = "-";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminTabVm {
    pub label: String,
    pub tab: QuestionTab,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminRowVm {
    pub id: String,
    pub subject: String,
    pub preview: String,
    pub option_count: usize,
    pub has_image: bool,
    pub updated_at_str: String,
    pub detail: AdminDetailVm,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminOptionVm {
    pub mark: String,
    pub text: String,
    pub is_correct: bool,
}

/// Full content of one stored question, for checking an upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminDetailVm {
    pub prompt: String,
    pub passage: Option<String>,
    pub box_text: Option<String>,
    pub image_src: Option<String>,
    pub options: Vec<AdminOptionVm>,
    pub explanation: String,
}

/// "전체" followed by one tab per subject in the bank.
#[must_use]
pub fn map_admin_tabs(subjects: &[Subject]) -> Vec<AdminTabVm> {
    std::iter::once(AdminTabVm {
        label: "전체".to_owned(),
        tab: QuestionTab::All,
    })
    .chain(subjects.iter().map(|subject| AdminTabVm {
        label: subject.as_str().to_owned(),
        tab: QuestionTab::Subject(subject.clone()),
    }))
    .collect()
}

#[must_use]
pub fn map_admin_rows(questions: &[Question]) -> Vec<AdminRowVm> {
    questions
        .iter()
        .map(|q| AdminRowVm {
            id: q.id().as_str().to_owned(),
            subject: q.subject().as_str().to_owned(),
            preview: preview(q.prompt()),
            option_count: q.option_count(),
            has_image: q.image().is_some(),
            updated_at_str: q
                .updated_at()
                .map_or_else(|| NEVER_STAMPED.to_owned(), format_datetime),
            detail: map_admin_detail(q),
        })
        .collect()
}

#[must_use]
pub fn map_admin_detail(question: &Question) -> AdminDetailVm {
    let explanation = question.explanation().trim();
    AdminDetailVm {
        prompt: question.prompt().to_owned(),
        passage: question.passage().map(str::to_owned),
        box_text: question.box_text().map(str::to_owned),
        image_src: question.image().map(image_src),
        options: question
            .options()
            .iter()
            .enumerate()
            .map(|(index, text)| AdminOptionVm {
                mark: option_mark(index),
                text: text.clone(),
                is_correct: index == question.correct_index(),
            })
            .collect(),
        explanation: if explanation.is_empty() {
            NO_EXPLANATION.to_owned()
        } else {
            explanation.to_owned()
        },
    }
}

#[must_use]
pub fn upload_success_message(summary: &UploadSummary) -> String {
    if summary.images_compressed == 0 {
        format!("{}개 문제를 저장했습니다.", summary.count())
    } else {
        format!(
            "{}개 문제를 저장했습니다. (이미지 {}개 압축)",
            summary.count(),
            summary.images_compressed
        )
    }
}

#[must_use]
pub fn upload_error_message(err: &UploadError) -> String {
    match err {
        UploadError::Json(_) => "JSON 파싱 에러: 파일 형식을 확인하세요.".to_owned(),
        UploadError::Invalid { index, reason } => {
            format!("{}번째 문제가 올바르지 않습니다: {reason}", index + 1)
        }
        UploadError::Empty => "업로드할 문제가 없습니다.".to_owned(),
        other => format!("저장에 실패했습니다: {other}"),
    }
}

fn preview(prompt: &str) -> String {
    let mut chars = prompt.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}
