use crate::core::engine::BookingEngine;
use crate::core::view;
use crate::core::wizard::{Step, Wizard};
use crate::domain::ports::ReservationGateway;
use crate::utils::error::{BookingError, Result};
use chrono::NaiveDate;
use std::io::{BufRead, Write};
use std::time::Duration;

/// Terminal front end for the wizard. Generic over reader/writer so the
/// whole flow can be scripted in tests.
pub struct InteractiveBooking<R: BufRead, W: Write> {
    input: R,
    output: W,
    today: NaiveDate,
}

const BACK: &str = "back";

impl<R: BufRead, W: Write> InteractiveBooking<R, W> {
    pub fn new(input: R, output: W, today: NaiveDate) -> Self {
        Self {
            input,
            output,
            today,
        }
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let bytes = self.input.read_line(&mut line)?;
        if bytes == 0 {
            return Err(BookingError::IoError(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input closed before the booking was completed",
            )));
        }
        Ok(line.trim().to_string())
    }

    /// Prompt for one field; an empty answer keeps the current value.
    fn prompt(&mut self, label: &str, current: &str) -> Result<String> {
        if current.is_empty() {
            write!(self.output, "{}: ", label)?;
        } else {
            write!(self.output, "{} [{}]: ", label, current)?;
        }
        self.output.flush()?;
        let answer = self.read_line()?;
        if answer.is_empty() {
            Ok(current.to_string())
        } else {
            Ok(answer)
        }
    }

    fn show_errors(&mut self, errors: &[BookingError]) -> Result<()> {
        for error in errors {
            writeln!(self.output, "  ! {}", error.user_friendly_message())?;
        }
        Ok(())
    }

    fn show_progress(&mut self, step: Step) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", view::render_progress(step))?;
        Ok(())
    }

    fn try_advance(&mut self, wizard: &mut Wizard) -> Result<()> {
        if let Err(errors) = wizard.advance(self.today) {
            self.show_errors(&errors)?;
        }
        Ok(())
    }

    fn customer_step(&mut self, wizard: &mut Wizard) -> Result<()> {
        wizard.form.customer_name = self.prompt("Your name", &wizard.form.customer_name)?;
        wizard.form.customer_email = self.prompt("Email", &wizard.form.customer_email)?;
        wizard.form.customer_phone = self.prompt("Phone", &wizard.form.customer_phone)?;
        self.try_advance(wizard)
    }

    fn pet_step(&mut self, wizard: &mut Wizard) -> Result<()> {
        let name = self.prompt("Pet name", &wizard.form.pet_name)?;
        if name == BACK {
            wizard.retreat(Step::Customer);
            return Ok(());
        }
        wizard.form.pet_name = name;
        wizard.form.pet_species = self.prompt("Type (dog/cat)", &wizard.form.pet_species)?;
        wizard.form.pet_breed = self.prompt("Breed", &wizard.form.pet_breed)?;
        wizard.form.pet_age = self.prompt("Age", &wizard.form.pet_age)?;
        wizard.form.pet_weight = self.prompt("Weight (kg)", &wizard.form.pet_weight)?;
        wizard.form.pet_gender = self.prompt("Gender (male/female)", &wizard.form.pet_gender)?;
        wizard.form.pet_notes = self.prompt("Notes about your pet", &wizard.form.pet_notes)?;
        self.try_advance(wizard)
    }

    fn services_step(&mut self, wizard: &mut Wizard) -> Result<()> {
        writeln!(self.output, "Available services:")?;
        for entry in &wizard.catalog().entries {
            let marker = if wizard.state.selected_services.contains(&entry.id) {
                "x"
            } else {
                " "
            };
            writeln!(
                self.output,
                "  [{}] {:<10} {} (${:.2})",
                marker, entry.id, entry.label, entry.price
            )?;
        }
        writeln!(self.output, "Total: ${}", wizard.total_display())?;
        write!(
            self.output,
            "Toggle a service id, or 'done' to continue, '{}' to go back: ",
            BACK
        )?;
        self.output.flush()?;

        match self.read_line()?.as_str() {
            "done" => self.try_advance(wizard)?,
            BACK => {
                wizard.retreat(Step::Pet);
            }
            id => {
                if let Err(e) = wizard.toggle_service(id) {
                    self.show_errors(&[e])?;
                }
            }
        }
        Ok(())
    }

    fn schedule_step(&mut self, wizard: &mut Wizard) -> Result<()> {
        let date = self.prompt("Date (YYYY-MM-DD)", &wizard.form.booking_date)?;
        if date == BACK {
            wizard.retreat(Step::Services);
            return Ok(());
        }
        if let Some(warning) = wizard.set_date(&date) {
            writeln!(self.output, "  ! {}", warning)?;
            return Ok(());
        }
        wizard.form.booking_time = self.prompt("Time (HH:MM)", &wizard.form.booking_time)?;
        wizard.form.notes = self.prompt("Additional notes", &wizard.form.notes)?;
        self.try_advance(wizard)
    }

    async fn summary_step<G: ReservationGateway>(
        &mut self,
        wizard: &mut Wizard,
        engine: &BookingEngine<G>,
        redirect_delay: Duration,
    ) -> Result<bool> {
        let summary = view::render_summary(wizard);
        writeln!(self.output, "{}", view::render_to_string(&summary))?;
        write!(self.output, "Confirm booking? (yes/no): ")?;
        self.output.flush()?;

        match self.read_line()?.as_str() {
            "yes" | "y" => {
                writeln!(self.output, "Submitting...")?;
                match engine.submit(wizard, self.today).await {
                    Ok(_) => {
                        tokio::time::sleep(redirect_delay).await;
                        let confirmation = view::render_confirmation();
                        writeln!(self.output, "{}", view::render_to_string(&confirmation))?;
                        Ok(true)
                    }
                    Err(e) if e.is_user_recoverable() => {
                        writeln!(self.output, "  ! {}", e.user_friendly_message())?;
                        Ok(false)
                    }
                    Err(e) => Err(e),
                }
            }
            _ => {
                wizard.retreat(Step::Schedule);
                Ok(false)
            }
        }
    }

    /// Drive the wizard until a reservation is accepted. Returns the
    /// error only for unrecoverable problems (closed input, IO).
    pub async fn run<G: ReservationGateway>(
        &mut self,
        wizard: &mut Wizard,
        engine: &BookingEngine<G>,
        redirect_delay: Duration,
    ) -> Result<()> {
        loop {
            self.show_progress(wizard.state.step)?;
            match wizard.state.step {
                Step::Customer => self.customer_step(wizard)?,
                Step::Pet => self.pet_step(wizard)?,
                Step::Services => self.services_step(wizard)?,
                Step::Schedule => self.schedule_step(wizard)?,
                Step::Summary => {
                    if self.summary_step(wizard, engine, redirect_delay).await? {
                        return Ok(());
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BookingDraft, ReservationReceipt, ServiceCatalog};
    use async_trait::async_trait;
    use std::io::Cursor;

    struct OkGateway;

    #[async_trait]
    impl ReservationGateway for OkGateway {
        async fn create_reservation(&self, _draft: &BookingDraft) -> Result<ReservationReceipt> {
            Ok(ReservationReceipt {
                body: serde_json::json!({"id": 1}),
            })
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()
    }

    #[tokio::test]
    async fn test_scripted_full_booking() {
        let script = "\
Maria Lopez
maria@example.com
555-123-4567
Rex
dog
Beagle
3 years
12.5
male

bath
dental
done
2026-08-31
10:30
Please call first
yes
";
        let mut session = InteractiveBooking::new(
            Cursor::new(script.as_bytes()),
            Vec::new(),
            today(),
        );
        let mut wizard = Wizard::new(ServiceCatalog::default_catalog());
        let engine = BookingEngine::new(OkGateway);

        session
            .run(&mut wizard, &engine, Duration::ZERO)
            .await
            .unwrap();

        let output = String::from_utf8(session.output).unwrap();
        assert!(output.contains("Total: $45.98"));
        assert!(output.contains("Booking Summary"));
        assert!(output.contains("Reservation Confirmed"));
        // Wizard reset for the next customer.
        assert_eq!(wizard.state.step, Step::Customer);
    }

    #[tokio::test]
    async fn test_invalid_email_reprompts_step_one() {
        // First pass has a bad email; the step repeats and the second
        // pass keeps the valid fields by answering with blanks.
        let script = "\
Maria Lopez
not-an-email
555-123-4567

maria@example.com

";
        let mut session = InteractiveBooking::new(
            Cursor::new(script.as_bytes()),
            Vec::new(),
            today(),
        );
        let mut wizard = Wizard::new(ServiceCatalog::default_catalog());
        let engine = BookingEngine::new(OkGateway);

        // Input runs dry on step 2; that is the expected end of script.
        let result = session.run(&mut wizard, &engine, Duration::ZERO).await;
        assert!(result.is_err());

        let output = String::from_utf8(session.output).unwrap();
        assert!(output.contains("email"));
        assert_eq!(wizard.state.step, Step::Pet);
        assert_eq!(wizard.form.customer_email, "maria@example.com");
    }

    #[tokio::test]
    async fn test_sunday_warning_shown_and_date_cleared() {
        let script = "\
Maria Lopez
maria@example.com
555-123-4567
Rex
dog
Beagle
3 years
12.5
male

bath
done
2026-08-30
";
        let mut session = InteractiveBooking::new(
            Cursor::new(script.as_bytes()),
            Vec::new(),
            today(),
        );
        let mut wizard = Wizard::new(ServiceCatalog::default_catalog());
        let engine = BookingEngine::new(OkGateway);

        let result = session.run(&mut wizard, &engine, Duration::ZERO).await;
        assert!(result.is_err()); // script ends after the rejected date

        let output = String::from_utf8(session.output).unwrap();
        assert!(output.contains("closed on Sundays"));
        assert!(wizard.form.booking_date.is_empty());
        assert_eq!(wizard.state.step, Step::Schedule);
    }
}
