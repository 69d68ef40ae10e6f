use rand::rng;
use rand::seq::SliceRandom;

use quiz_core::model::Question;

/// Maximum number of questions an anonymous player receives per attempt.
pub const ANONYMOUS_QUESTION_LIMIT: usize = 10;

/// How many questions the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleSize {
    Count(usize),
    All,
}

impl SampleSize {
    fn limit(self) -> Option<usize> {
        match self {
            Self::Count(n) => Some(n),
            Self::All => None,
        }
    }
}

/// Picks the questions for a fresh attempt from a whole category.
pub struct SessionBuilder {
    size: SampleSize,
    anonymous: bool,
    shuffle: bool,
}

impl SessionBuilder {
    #[must_use]
    pub fn new(size: SampleSize) -> Self {
        Self {
            size,
            anonymous: true,
            shuffle: true,
        }
    }

    /// Anonymous players are capped at `ANONYMOUS_QUESTION_LIMIT`.
    #[must_use]
    pub fn anonymous(mut self, anonymous: bool) -> Self {
        self.anonymous = anonymous;
        self
    }

    /// Enable or disable shuffling before truncation.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Effective number of questions to keep out of `available`.
    #[must_use]
    pub fn take_count(&self, available: usize) -> usize {
        let requested = self.size.limit().unwrap_or(available);
        let capped = if self.anonymous {
            requested.min(ANONYMOUS_QUESTION_LIMIT)
        } else {
            requested
        };
        capped.min(available)
    }

    /// Shuffle the category uniformly, then keep the first `take_count`.
    pub fn build(self, questions: impl IntoIterator<Item = Question>) -> Vec<Question> {
        let mut pool: Vec<Question> = questions.into_iter().collect();
        if self.shuffle {
            let mut rng = rng();
            pool.as_mut_slice().shuffle(&mut rng);
        }
        let take = self.take_count(pool.len());
        pool.truncate(take);
        pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionDraft;
    use std::collections::HashSet;

    fn questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| {
                QuestionDraft {
                    id: format!("q{i:02}"),
                    prompt: format!("prompt {i}"),
                    passage: None,
                    box_text: None,
                    image: None,
                    options: vec!["a".into(), "b".into()],
                    correct_index: 0,
                    explanation: String::new(),
                    subject: "reading".into(),
                }
                .validate()
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn anonymous_all_is_capped() {
        let picked = SessionBuilder::new(SampleSize::All).build(questions(25));
        assert_eq!(picked.len(), ANONYMOUS_QUESTION_LIMIT);
    }

    #[test]
    fn anonymous_count_above_cap_is_capped() {
        let picked = SessionBuilder::new(SampleSize::Count(20)).build(questions(25));
        assert_eq!(picked.len(), ANONYMOUS_QUESTION_LIMIT);
    }

    #[test]
    fn authenticated_request_larger_than_set_returns_full_set() {
        let picked = SessionBuilder::new(SampleSize::Count(50))
            .anonymous(false)
            .build(questions(25));
        assert_eq!(picked.len(), 25);

        let all = SessionBuilder::new(SampleSize::All)
            .anonymous(false)
            .build(questions(25));
        assert_eq!(all.len(), 25);
    }

    #[test]
    fn shuffled_pick_has_no_duplicates() {
        let picked = SessionBuilder::new(SampleSize::Count(8))
            .anonymous(false)
            .build(questions(30));
        let ids: HashSet<_> = picked.iter().map(|q| q.id().clone()).collect();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn unshuffled_keeps_source_order() {
        let picked = SessionBuilder::new(SampleSize::Count(3))
            .with_shuffle(false)
            .build(questions(5));
        let ids: Vec<_> = picked.iter().map(|q| q.id().as_str()).collect();
        assert_eq!(ids, ["q00", "q01", "q02"]);
    }

    #[test]
    fn small_set_is_returned_whole() {
        let builder = SessionBuilder::new(SampleSize::Count(10));
        assert_eq!(builder.take_count(4), 4);
        assert_eq!(builder.take_count(0), 0);
    }
}
