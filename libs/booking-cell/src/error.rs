use thiserror::Error;

use crate::models::FormField;

#[derive(Debug, Clone, Error)]
pub enum BookingError {
    #[error("draft is missing required field: {0:?}")]
    IncompleteDraft(FormField),

    #[error("validation failed, submission blocked")]
    ValidationFailed,

    #[error("submission already in progress")]
    AlreadySubmitting,
}
