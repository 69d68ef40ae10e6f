use services::QuizSession;

const OPTION_MARKS: [&str; 5] = ["①", "②", "③", "④", "⑤"];
const DATA_URL_PREFIX: &str = "data:";
const BARE_IMAGE_PREFIX: &str = "data:image/png;base64,";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub mark: String,
    pub text: String,
    pub selected: bool,
}

/// Everything the quiz screen shows for the current question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionCardVm {
    pub number: usize,
    pub total: usize,
    pub answered: usize,
    pub percent_through: u32,
    pub is_first: bool,
    pub is_last: bool,

    pub prompt: String,
    pub passage: Option<String>,
    pub box_text: Option<String>,
    pub image_src: Option<String>,
    pub options: Vec<OptionVm>,
}

#[must_use]
pub fn map_question_card(session: &QuizSession) -> QuestionCardVm {
    let progress = session.progress();
    let question = session.current_question();
    let selected = session.selected_for_current();

    let options = question
        .options()
        .iter()
        .enumerate()
        .map(|(index, text)| OptionVm {
            index,
            mark: option_mark(index),
            text: text.clone(),
            selected: selected == Some(index),
        })
        .collect();

    QuestionCardVm {
        number: progress.display_position(),
        total: progress.total,
        answered: progress.answered,
        percent_through: progress.percent_through(),
        is_first: session.is_first(),
        is_last: progress.is_last,
        prompt: question.prompt().to_owned(),
        passage: question.passage().map(str::to_owned),
        box_text: question.box_text().map(str::to_owned),
        image_src: question.image().map(image_src),
        options,
    }
}

/// Source attribute for a stored image: data URLs pass through, bare base64
/// is assumed to be PNG.
#[must_use]
pub fn image_src(raw: &str) -> String {
    if raw.starts_with(DATA_URL_PREFIX) || raw.starts_with("http") {
        raw.to_owned()
    } else {
        format!("{BARE_IMAGE_PREFIX}{raw}")
    }
}

pub(crate) fn option_mark(index: usize) -> String {
    OPTION_MARKS
        .get(index)
        .map_or_else(|| format!("{}.", index + 1), |mark| (*mark).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Question, QuestionDraft, Subject};
    use quiz_core::time::fixed_now;
    use services::SessionKind;

    fn question(id: &str, image: Option<&str>) -> Question {
        QuestionDraft {
            id: id.into(),
            prompt: format!("prompt {id}"),
            passage: Some("passage".into()),
            box_text: None,
            image: image.map(str::to_owned),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_index: 1,
            explanation: String::new(),
            subject: "grammar".into(),
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn card_reflects_position_and_selection() {
        let mut session = QuizSession::load(
            vec![question("q1", None), question("q2", Some("AAAA"))],
            Subject::new("grammar").unwrap(),
            SessionKind::Fresh,
            fixed_now(),
        )
        .unwrap();
        session.select_answer(2).unwrap();

        let card = map_question_card(&session);
        assert_eq!(card.number, 1);
        assert_eq!(card.total, 2);
        assert_eq!(card.answered, 1);
        assert!(card.is_first);
        assert!(!card.is_last);
        assert_eq!(card.passage.as_deref(), Some("passage"));
        assert!(card.image_src.is_none());
        let selected: Vec<_> = card.options.iter().map(|o| o.selected).collect();
        assert_eq!(selected, [false, false, true]);
        assert_eq!(card.options[0].mark, "①");

        session.advance();
        let card = map_question_card(&session);
        assert!(card.is_last);
        assert_eq!(card.image_src.as_deref(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn data_urls_pass_through() {
        assert_eq!(image_src("data:image/jpeg;base64,xyz"), "data:image/jpeg;base64,xyz");
        assert_eq!(option_mark(6), "7.");
    }
}
