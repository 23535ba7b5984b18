use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use scheduling_cell::models::SlotValidity;

use crate::models::{
    AppointmentDraft, AppointmentType, CloseAction, ContactMethod, FormErrors, FormField,
    FormStep, SubmissionStatus, VisitType,
};
use crate::ports::DraftStorage;
use crate::services::validation::validate_step;

/// The multi-step appointment form: draft, per-field errors, step and
/// submission state. One instance per open form; discarded on close or
/// submit.
#[derive(Debug, Clone)]
pub struct BookingForm {
    draft: AppointmentDraft,
    errors: FormErrors,
    step: FormStep,
    status: SubmissionStatus,
    touched: bool,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingForm {
    pub fn new() -> Self {
        Self {
            draft: AppointmentDraft::default(),
            errors: FormErrors::new(),
            step: FormStep::Contact,
            status: SubmissionStatus::Idle,
            touched: false,
        }
    }

    /// Resume from a previously persisted draft, when one exists.
    pub fn restore(storage: &dyn DraftStorage) -> Self {
        match storage.load() {
            Some(draft) => Self {
                draft,
                ..Self::new()
            },
            None => Self::new(),
        }
    }

    pub fn persist(&self, storage: &dyn DraftStorage) {
        storage.save(&self.draft);
    }

    pub fn draft(&self) -> &AppointmentDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn step(&self) -> FormStep {
        self.step
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    // ==========================================================================
    // FIELD EDITS
    // ==========================================================================

    pub fn set_name(&mut self, value: &str) {
        self.draft.name = value.to_string();
        self.field_edited(FormField::Name);
    }

    pub fn set_email(&mut self, value: &str) {
        self.draft.email = value.to_string();
        self.field_edited(FormField::Email);
    }

    pub fn set_phone(&mut self, value: &str) {
        self.draft.phone = value.to_string();
        self.field_edited(FormField::Phone);
    }

    pub fn set_appointment_type(&mut self, value: AppointmentType) {
        self.draft.appointment_type = Some(value);
        self.field_edited(FormField::AppointmentType);
    }

    pub fn set_preferred_date(&mut self, value: NaiveDate) {
        self.draft.preferred_date = Some(value);
        self.field_edited(FormField::PreferredDate);
    }

    pub fn set_preferred_time(&mut self, value: NaiveTime) {
        self.draft.preferred_time = Some(value);
        self.field_edited(FormField::PreferredTime);
    }

    pub fn set_visit_type(&mut self, value: VisitType) {
        self.draft.visit_type = Some(value);
        self.field_edited(FormField::VisitType);
    }

    pub fn set_special_requests(&mut self, value: &str) {
        self.draft.special_requests = value.to_string();
        self.touched = true;
    }

    pub fn set_contact_method(&mut self, value: ContactMethod) {
        self.draft.contact_method = value;
        self.touched = true;
    }

    pub fn set_marketing_consent(&mut self, value: bool) {
        self.draft.marketing_consent = value;
        self.touched = true;
    }

    /// Editing a field clears only that field's error; everything else is
    /// re-checked on the next advance attempt.
    fn field_edited(&mut self, field: FormField) {
        self.touched = true;
        self.errors.remove(&field);
    }

    // ==========================================================================
    // STEP TRANSITIONS
    // ==========================================================================

    /// Validate the current step and move forward when it passes. Blocked
    /// advances surface the full error set for the step; a valid draft on
    /// the last step is a no-op, so repeated calls never regress state.
    pub fn advance(&mut self) -> Result<FormStep, FormErrors> {
        let errors = validate_step(self.step, &self.draft);
        if !errors.is_empty() {
            debug!(
                "Step {} blocked with {} validation errors",
                self.step,
                errors.len()
            );
            self.errors = errors.clone();
            return Err(errors);
        }

        self.errors.clear();
        self.step = self.step.next();
        Ok(self.step)
    }

    /// Backward progress is always allowed and never validates. No-op at
    /// step 1.
    pub fn retreat(&mut self) -> FormStep {
        self.step = self.step.prev();
        self.step
    }

    /// Reduce the slot selector's validity event into the form's error set.
    /// Covers the date-changed-after-picking-a-time case.
    pub fn apply_slot_validity(&mut self, validity: SlotValidity) {
        match validity {
            SlotValidity::Valid => {
                self.errors.remove(&FormField::PreferredTime);
            }
            SlotValidity::Invalid(message) => {
                self.errors.insert(FormField::PreferredTime, message);
            }
        }
    }

    /// Escape / cancel semantics: past step 1 with edits, the caller must
    /// confirm before discarding; mid-submission the request is ignored.
    pub fn close_request(&self) -> CloseAction {
        if self.status == SubmissionStatus::Submitting {
            return CloseAction::Blocked;
        }
        if self.touched && self.step > FormStep::Contact {
            CloseAction::ConfirmDiscard
        } else {
            CloseAction::Close
        }
    }

    // ==========================================================================
    // SUBMISSION STATE (driven by the orchestrator)
    // ==========================================================================

    pub(crate) fn begin_submission(&mut self) {
        self.status = SubmissionStatus::Submitting;
    }

    pub(crate) fn finish_submission(&mut self, status: SubmissionStatus) {
        if status == SubmissionStatus::Success {
            self.touched = false;
        }
        self.status = status;
    }

    pub(crate) fn set_errors(&mut self, errors: FormErrors) {
        self.errors = errors;
    }

    /// From the `Error` terminal state, "try again" returns to the idle
    /// review step.
    pub fn reset_for_retry(&mut self) {
        if matches!(self.status, SubmissionStatus::Error(_)) {
            self.status = SubmissionStatus::Idle;
        }
    }
}
