//! The public waitlist form's submission flow.
//!
//! Local validation runs first and an invalid form never reaches the
//! backend. A successful submission is terminal: the form shows its
//! confirmation and ignores further edits.

use chrono::NaiveDate;
use estate_core::budget::BudgetRange;
use estate_core::error::FieldErrors;
use estate_core::lead::Lead;
use estate_core::neighborhoods::OTHER_SENTINEL;
use estate_core::selector::NeighborhoodSelector;
use estate_core::validation::{validate_lead_form, LeadForm};

use crate::backend::{BackendError, LeadBackend};
use crate::notice::Notice;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Editing,
    Submitting,
    Succeeded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The lead was stored.
    Submitted { lead: Lead, notice: Notice },
    /// Field errors, now available from [`IntakeForm::errors`].
    Invalid,
    /// The backend failed; the form is unchanged and can be retried.
    Failed(Notice),
    /// The form already succeeded.
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct IntakeForm {
    full_name: String,
    email: String,
    phone: String,
    move_in_date: Option<String>,
    budget_range: Option<BudgetRange>,
    neighborhoods: NeighborhoodSelector,
    errors: FieldErrors,
    phase: SubmitPhase,
}

impl IntakeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    fn editable(&self) -> bool {
        self.phase == SubmitPhase::Editing
    }

    pub fn set_full_name(&mut self, value: &str) {
        if self.editable() {
            self.full_name = value.to_string();
        }
    }

    pub fn set_email(&mut self, value: &str) {
        if self.editable() {
            self.email = value.to_string();
        }
    }

    pub fn set_phone(&mut self, value: &str) {
        if self.editable() {
            self.phone = value.to_string();
        }
    }

    /// `YYYY-MM-DD`, as a date picker produces it.
    pub fn set_move_in_date(&mut self, value: &str) {
        if self.editable() {
            self.move_in_date = Some(value.to_string());
        }
    }

    pub fn set_budget_range(&mut self, budget: BudgetRange) {
        if self.editable() {
            self.budget_range = Some(budget);
        }
    }

    pub fn neighborhoods(&self) -> &NeighborhoodSelector {
        &self.neighborhoods
    }

    /// The neighborhood control, or `None` once the form is not editable.
    pub fn neighborhoods_mut(&mut self) -> Option<&mut NeighborhoodSelector> {
        self.editable().then_some(&mut self.neighborhoods)
    }

    /// The body posted to the server.
    pub fn to_lead_form(&self) -> LeadForm {
        let selected = self.neighborhoods.selected();
        let other = selected
            .iter()
            .any(|s| s == OTHER_SENTINEL)
            .then(|| self.neighborhoods.other_text().to_string());
        LeadForm {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            move_in_date: self.move_in_date.clone(),
            budget_range: self.budget_range.map(|b| b.as_str().to_string()),
            neighborhoods: selected.to_vec(),
            other_neighborhood: other,
        }
    }

    /// Validate as of `today`, then submit through `backend`.
    pub async fn submit(&mut self, backend: &dyn LeadBackend, today: NaiveDate) -> SubmitOutcome {
        if !self.editable() {
            return SubmitOutcome::Ignored;
        }

        let form = self.to_lead_form();
        if let Err(errors) = validate_lead_form(&form, today) {
            self.errors = errors;
            return SubmitOutcome::Invalid;
        }
        self.errors = FieldErrors::new();

        self.phase = SubmitPhase::Submitting;
        match backend.submit_lead(&form).await {
            Ok(lead) => {
                self.phase = SubmitPhase::Succeeded;
                tracing::info!(lead_id = %lead.id, "Waitlist form submitted");
                SubmitOutcome::Submitted {
                    lead,
                    notice: Notice::success(
                        "You're on the list!",
                        "We'll be in touch soon with exclusive opportunities.",
                    ),
                }
            }
            Err(BackendError::InvalidForm(errors)) => {
                self.phase = SubmitPhase::Editing;
                self.errors = errors;
                SubmitOutcome::Invalid
            }
            Err(e) => {
                self.phase = SubmitPhase::Editing;
                tracing::error!(error = %e, "Waitlist submission failed");
                SubmitOutcome::Failed(Notice::error(
                    "Something went wrong",
                    "Please try again later.",
                ))
            }
        }
    }
}
