use quiz_core::model::{Identity, QuestionDraft};
use quiz_core::score;
use services::SampleSize;

use super::test_harness::{HarnessOptions, ViewKind, setup_view_harness};

const GRAMMAR_SET: &str = r#"[
    {"id": "g1", "question": "첫 번째 문법 문제", "options": ["가", "나", "다"], "answer": 1,
     "memo": "나가 정답", "tags": {"subject": "grammar"}},
    {"id": "g2", "question": "두 번째 문법 문제", "options": ["라", "마"], "answer": 0,
     "tags": {"subject": "grammar"}},
    {"id": "n1", "question": "비문학 지문 문제", "passage": "지문 내용", "options": ["a", "b"],
     "answer": 0, "tags": {"subject": "비문학"}}
]"#;

fn seeded() -> HarnessOptions {
    HarnessOptions {
        seed_json: Some(GRAMMAR_SET),
        ..HarnessOptions::default()
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_lists_built_in_and_uploaded_categories() {
    let mut harness = setup_view_harness(ViewKind::Home, seeded()).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("영역을 선택하세요"), "missing title in {html}");
    assert!(html.contains("독서 (비문학)"), "missing built-in category in {html}");
    assert!(html.contains("업로드된 문제 모음"), "missing uploaded subject in {html}");
    assert!(html.contains("최대 10문제"), "missing anonymous hint in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_hides_hint_when_signed_in() {
    let options = HarnessOptions {
        identity: Some(Identity::from_email("me@example.com").unwrap()),
        ..HarnessOptions::default()
    };
    let mut harness = setup_view_harness(ViewKind::Home, options).await;
    harness.settle().await;
    let html = harness.render();

    assert!(!html.contains("최대 10문제"), "unexpected hint in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness =
        setup_view_harness(ViewKind::Quiz("grammar", SampleSize::All), seeded()).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("언어와 매체"), "missing category title in {html}");
    assert!(html.contains("1 / 2"), "missing progress in {html}");
    assert!(html.contains("첫 번째 문법 문제"), "missing prompt in {html}");
    assert!(html.contains("다음"), "missing next button in {html}");
    assert!(!html.contains("제출하기"), "submit shown too early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_passage() {
    let mut harness = setup_view_harness(ViewKind::Quiz("비문학", SampleSize::All), seeded()).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("지문 내용"), "missing passage in {html}");
    assert!(html.contains("제출하기"), "single question should offer submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_reports_empty_category() {
    let mut harness = setup_view_harness(ViewKind::Quiz("literature", SampleSize::All), seeded()).await;
    harness.settle().await;
    let html = harness.render();

    assert!(
        html.contains("이 영역에는 아직 등록된 문제가 없습니다."),
        "missing empty message in {html}"
    );
    assert!(html.contains("홈으로"), "missing home link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn ranking_view_smoke_renders_empty_board() {
    let mut harness = setup_view_harness(ViewKind::Ranking, HarnessOptions::default()).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("아직 랭킹 정보가 없습니다."), "missing empty text in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn ranking_view_smoke_renders_recorded_players() {
    let mut harness = setup_view_harness(ViewKind::Ranking, HarnessOptions::default()).await;

    let questions: Vec<_> = (0..4)
        .map(|i| {
            QuestionDraft {
                id: format!("q{i}"),
                prompt: "p".into(),
                passage: None,
                box_text: None,
                image: None,
                options: vec!["a".into(), "b".into()],
                correct_index: 0,
                explanation: String::new(),
                subject: "grammar".into(),
            }
            .validate()
            .unwrap()
        })
        .collect();
    let report = score(&questions, &[Some(0), Some(0), Some(0), Some(1)]).unwrap();
    let alice = Identity::from_email("alice@example.com").unwrap();
    harness.stats.record_session(&alice, &report).await.unwrap();

    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("정답률"), "missing header in {html}");
    assert!(html.contains("🥇"), "missing medal in {html}");
    assert!(html.contains("alice"), "missing player in {html}");
    assert!(html.contains("75%"), "missing accuracy in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn auth_view_smoke_renders_sign_in_form() {
    let mut harness = setup_view_harness(ViewKind::Auth, HarnessOptions::default()).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("반가워요!"), "missing heading in {html}");
    assert!(html.contains("이메일"), "missing email field in {html}");
    assert!(html.contains("아직 계정이 없으신가요? 회원가입"), "missing toggle in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_requires_admin() {
    let mut harness = setup_view_harness(ViewKind::Admin, seeded()).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("관리자 권한이 없습니다."), "missing denial in {html}");
    assert!(!html.contains("첫 번째 문법 문제"), "questions leaked in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_lists_questions_and_tabs() {
    let options = HarnessOptions {
        admin: true,
        ..seeded()
    };
    let mut harness = setup_view_harness(ViewKind::Admin, options).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("업로드 및 저장하기"), "missing upload button in {html}");
    assert!(html.contains("전체"), "missing all tab in {html}");
    assert!(html.contains("grammar"), "missing subject tab in {html}");
    assert!(html.contains("첫 번째 문법 문제"), "missing question row in {html}");
    assert!(html.contains("비문학 지문 문제"), "missing second subject row in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_renders_empty_bank() {
    let options = HarnessOptions {
        admin: true,
        ..HarnessOptions::default()
    };
    let mut harness = setup_view_harness(ViewKind::Admin, options).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("등록된 문제가 없습니다."), "missing empty text in {html}");
}

const DETAILED_QUESTION: &str = r#"{
    "id": "d1", "question": "다음 중 <보기>에 해당하는 것은?", "options": ["가", "나", "다"],
    "answer": 2, "memo": "다가 보기의 조건을 만족한다.", "useBox": true,
    "smartBoxData": "<보기> 조건 설명", "image": "iVBORw0KGgo=",
    "tags": {"subject": "grammar"}
}"#;

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_renders_question_detail() {
    let options = HarnessOptions {
        admin: true,
        seed_json: Some(DETAILED_QUESTION),
        ..HarnessOptions::default()
    };
    let mut harness = setup_view_harness(ViewKind::Admin, options).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("문제 상세 보기"), "missing detail toggle in {html}");
    assert!(
        html.contains("data:image/png;base64,iVBORw0KGgo="),
        "missing image preview in {html}"
    );
    assert!(html.contains("조건 설명"), "missing box text in {html}");
    assert!(html.contains("admin-option--correct"), "missing answer highlight in {html}");
    assert!(html.contains("다가 보기의 조건을 만족한다."), "missing explanation in {html}");
}
