use thiserror::Error;

/// User-action conflicts surfaced through the notification channel. None of
/// these are fatal; the scene stays unchanged and interactive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("no body is selected")]
    NoBodySelected,
    #[error("the last body cannot be removed")]
    LastBody,
}
