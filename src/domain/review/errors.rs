use crate::domain::policy::MalformedNumber;

#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("menu name cannot be empty")]
    EmptyMenuName,

    #[error("review comment cannot be empty")]
    EmptyComment,

    #[error(transparent)]
    Malformed(#[from] MalformedNumber),

    #[error("you have not ordered {0:?}")]
    NotOrdered(String),

    #[error("no review written yet for {0:?}")]
    NoReviewYet(String),
}
