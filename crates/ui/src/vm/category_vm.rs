use quiz_core::model::Subject;
use services::SampleSize;

use crate::routes::QuestionCount;

/// A selectable category on the home screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryVm {
    pub subject: String,
    pub title: String,
    pub description: String,
}

/// A selectable question count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountChoiceVm {
    pub label: &'static str,
    pub count: QuestionCount,
}

const BUILT_IN: [(&str, &str, &str); 3] = [
    ("reading", "독서 (비문학)", "인문, 사회, 과학 지문 독해"),
    ("literature", "문학", "현대시, 고전소설 등 감상"),
    ("grammar", "언어와 매체", "국어 문법 핵심 정리"),
];

const UPLOADED_DESCRIPTION: &str = "업로드된 문제 모음";

/// Built-in categories first, then any other subject present in the bank.
#[must_use]
pub fn map_categories(bank: &[Subject]) -> Vec<CategoryVm> {
    let mut categories: Vec<CategoryVm> = BUILT_IN
        .iter()
        .map(|(subject, title, description)| CategoryVm {
            subject: (*subject).to_owned(),
            title: (*title).to_owned(),
            description: (*description).to_owned(),
        })
        .collect();

    for subject in bank {
        let name = subject.as_str();
        if BUILT_IN.iter().any(|(id, _, _)| *id == name) {
            continue;
        }
        categories.push(CategoryVm {
            subject: name.to_owned(),
            title: name.to_owned(),
            description: UPLOADED_DESCRIPTION.to_owned(),
        });
    }
    categories
}

/// Heading for a category; unknown subjects are shown as-is.
#[must_use]
pub fn category_title(subject: &str) -> String {
    BUILT_IN
        .iter()
        .find(|(id, _, _)| *id == subject)
        .map_or_else(|| subject.to_owned(), |(_, title, _)| (*title).to_owned())
}

#[must_use]
pub fn count_choices() -> [CountChoiceVm; 4] {
    [
        CountChoiceVm {
            label: "5문제",
            count: QuestionCount(SampleSize::Count(5)),
        },
        CountChoiceVm {
            label: "10문제",
            count: QuestionCount(SampleSize::Count(10)),
        },
        CountChoiceVm {
            label: "20문제",
            count: QuestionCount(SampleSize::Count(20)),
        },
        CountChoiceVm {
            label: "전체",
            count: QuestionCount(SampleSize::All),
        },
    ]
}
