use dioxus::prelude::*;
use services::{QuestionSourceError, SessionError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    /// The chosen category has no questions.
    EmptyCategory,
    /// The question source could not be reached or returned garbage.
    SourceUnavailable,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Unknown => "문제가 발생했습니다. 다시 시도해 주세요.",
            Self::EmptyCategory => "이 영역에는 아직 등록된 문제가 없습니다.",
            Self::SourceUnavailable => "문제를 불러오지 못했습니다.",
        }
    }
}

impl From<&SessionError> for ViewError {
    fn from(err: &SessionError) -> Self {
        match err {
            SessionError::Empty => Self::EmptyCategory,
            SessionError::Source(QuestionSourceError::Storage(_)) => Self::Unknown,
            SessionError::Source(_) => Self::SourceUnavailable,
            _ => Self::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::UploadError;

    #[test]
    fn session_errors_map_to_messages() {
        assert_eq!(ViewError::from(&SessionError::Empty), ViewError::EmptyCategory);
        let err = SessionError::Source(QuestionSourceError::Malformed(UploadError::Empty));
        assert_eq!(ViewError::from(&err), ViewError::SourceUnavailable);
        assert_eq!(
            ViewError::EmptyCategory.message(),
            "이 영역에는 아직 등록된 문제가 없습니다."
        );
    }
}
