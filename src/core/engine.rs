use crate::core::wizard::{Step, Wizard};
use crate::domain::model::ReservationReceipt;
use crate::domain::ports::ReservationGateway;
use crate::utils::error::{BookingError, Result};
use chrono::NaiveDate;

/// Drives the final submission. The in-flight flag on the wizard state
/// is the only mutual exclusion: while a request is out, the submit
/// control stays disabled and a second call is rejected.
pub struct BookingEngine<G: ReservationGateway> {
    gateway: G,
}

impl<G: ReservationGateway> BookingEngine<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Assemble the draft from the wizard and send it. On success the
    /// wizard is reset for the next booking; on any failure the wizard is
    /// left exactly as it was (still on the summary, form intact) so the
    /// user can resubmit without re-entering anything.
    pub async fn submit(&self, wizard: &mut Wizard, today: NaiveDate) -> Result<ReservationReceipt> {
        if wizard.state.step != Step::Summary {
            return Err(BookingError::WizardError {
                message: format!(
                    "cannot submit from step {}; complete the wizard first",
                    wizard.state.step.number()
                ),
            });
        }
        if wizard.state.submitting {
            return Err(BookingError::WizardError {
                message: "a submission is already in flight".to_string(),
            });
        }

        wizard.state.submitting = true;

        let draft = match wizard.assemble_draft(today) {
            Ok(draft) => draft,
            Err(e) => {
                wizard.state.submitting = false;
                return Err(e);
            }
        };

        tracing::info!(
            services = draft.services.len(),
            total = draft.total_price,
            date = %draft.booking_date,
            "submitting reservation"
        );

        match self.gateway.create_reservation(&draft).await {
            Ok(receipt) => {
                tracing::info!("reservation accepted");
                wizard.reset();
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!("reservation failed: {}", e);
                wizard.state.submitting = false;
                Err(e)
            }
        }
    }
}
