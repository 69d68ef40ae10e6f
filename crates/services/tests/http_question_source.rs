use quiz_core::model::Subject;
use services::{HttpQuestionSource, HttpSourceConfig, QuestionSource, QuestionSourceError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source(server: &MockServer) -> HttpQuestionSource {
    let config = HttpSourceConfig::from_base_url(&format!("{}/", server.uri())).unwrap();
    HttpQuestionSource::new(config)
}

#[tokio::test]
async fn fetches_category_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/questions/grammar.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "1", "question": "Q1", "choices": ["a", "b"], "answer": 1, "explanation": "e1" },
            { "id": "2", "passage": "P", "question": "Q2", "choices": ["a", "b", "c"], "answer": 0, "explanation": "" }
        ])))
        .mount(&server)
        .await;

    let subject = Subject::new("grammar").unwrap();
    let questions = source(&server).questions_for(&subject).await.unwrap();

    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].subject(), &subject);
    assert_eq!(questions[0].correct_index(), 1);
    assert_eq!(questions[1].passage(), Some("P"));
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/questions/reading.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let subject = Subject::new("reading").unwrap();
    let err = source(&server).questions_for(&subject).await.unwrap_err();
    assert!(matches!(err, QuestionSourceError::HttpStatus(status) if status.as_u16() == 404));
}

#[tokio::test]
async fn malformed_body_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/questions/literature.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let subject = Subject::new("literature").unwrap();
    let err = source(&server).questions_for(&subject).await.unwrap_err();
    assert!(matches!(err, QuestionSourceError::Malformed(_)));
}

#[tokio::test]
async fn records_take_the_requested_category() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/questions/grammar.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "1", "question": "Q1", "choices": ["a", "b"], "answer": 0, "tags": { "subject": "문법" } },
            { "id": "2", "question": "Q2", "choices": ["a", "b"], "answer": 1, "subject": "reading" }
        ])))
        .mount(&server)
        .await;

    let subject = Subject::new("grammar").unwrap();
    let questions = source(&server).questions_for(&subject).await.unwrap();

    assert_eq!(questions.len(), 2);
    assert!(questions.iter().all(|q| q.subject() == &subject));
}
