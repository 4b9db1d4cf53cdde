use crate::domain::model::{BookingDraft, Customer, Gender, Pet, ServiceCatalog, Species};
use crate::utils::error::{BookingError, Result};
use crate::utils::validation;
use chrono::{Datelike, NaiveDate, Weekday};

/// The salon is closed on Sundays; picking one clears the date field.
pub const CLOSED_WEEKDAY: Weekday = Weekday::Sun;

/// Steps of the booking wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Customer,
    Pet,
    Services,
    Schedule,
    Summary,
}

impl Step {
    pub fn all() -> &'static [Step] {
        &[
            Self::Customer,
            Self::Pet,
            Self::Services,
            Self::Schedule,
            Self::Summary,
        ]
    }

    /// 1-indexed step number for display.
    pub fn number(&self) -> usize {
        match self {
            Self::Customer => 1,
            Self::Pet => 2,
            Self::Services => 3,
            Self::Schedule => 4,
            Self::Summary => 5,
        }
    }

    pub fn total() -> usize {
        5
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Customer => "Your Information",
            Self::Pet => "Pet Information",
            Self::Services => "Select Services",
            Self::Schedule => "Date & Time",
            Self::Summary => "Summary",
        }
    }

    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Customer => Some(Self::Pet),
            Self::Pet => Some(Self::Services),
            Self::Services => Some(Self::Schedule),
            Self::Schedule => Some(Self::Summary),
            Self::Summary => None,
        }
    }

    pub fn previous(&self) -> Option<Self> {
        match self {
            Self::Customer => None,
            Self::Pet => Some(Self::Customer),
            Self::Services => Some(Self::Pet),
            Self::Schedule => Some(Self::Services),
            Self::Summary => Some(Self::Schedule),
        }
    }
}

/// Raw field values as the user entered them. Validation works on these
/// strings; typed values are only produced when the draft is assembled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingForm {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub pet_name: String,
    pub pet_species: String,
    pub pet_breed: String,
    pub pet_age: String,
    pub pet_weight: String,
    pub pet_gender: String,
    pub pet_notes: String,
    pub booking_date: String,
    pub booking_time: String,
    pub notes: String,
}

/// Values carried over from the quick-booking entry point on the landing
/// page.
#[derive(Debug, Clone, Default)]
pub struct Prefill {
    pub pet_name: Option<String>,
    pub service: Option<String>,
    pub date: Option<String>,
}

/// Transient wizard state. One instance per booking attempt; nothing
/// here survives a completed or abandoned wizard.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    pub step: Step,
    pub selected_services: Vec<String>,
    pub total_price: f64,
    pub submitting: bool,
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            step: Step::Customer,
            selected_services: Vec::new(),
            total_price: 0.0,
            submitting: false,
        }
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

/// The booking wizard: five sequential steps, validated forward
/// transitions, unguarded backward transitions, and a running total that
/// always matches the selected services.
#[derive(Debug, Clone)]
pub struct Wizard {
    pub state: WizardState,
    pub form: BookingForm,
    catalog: ServiceCatalog,
}

impl Wizard {
    pub fn new(catalog: ServiceCatalog) -> Self {
        Self {
            state: WizardState::new(),
            form: BookingForm::default(),
            catalog,
        }
    }

    pub fn with_prefill(catalog: ServiceCatalog, prefill: Prefill) -> Self {
        let mut wizard = Self::new(catalog);
        if let Some(name) = prefill.pet_name {
            wizard.form.pet_name = name;
        }
        if let Some(service) = prefill.service {
            // Unknown preselected ids are silently dropped.
            let _ = wizard.toggle_service(&service);
        }
        if let Some(date) = prefill.date {
            let _ = wizard.set_date(&date);
        }
        wizard
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    /// Advance to the immediate next step. Forward skips are not a thing:
    /// the only reachable target is `current.next()`. Returns the new
    /// step, or every validation error for the current step (the step
    /// does not change on failure).
    pub fn advance(&mut self, today: NaiveDate) -> std::result::Result<Step, Vec<BookingError>> {
        let errors = self.validate_step(self.state.step, today);
        if !errors.is_empty() {
            return Err(errors);
        }
        match self.state.step.next() {
            Some(next) => {
                self.state.step = next;
                tracing::debug!("wizard advanced to step {} ({})", next.number(), next.title());
                Ok(next)
            }
            None => Err(vec![BookingError::WizardError {
                message: "already at the final step".to_string(),
            }]),
        }
    }

    /// Unconditional backward transition. Revisiting an earlier step must
    /// never be blocked, otherwise later mistakes could not be corrected.
    pub fn retreat(&mut self, target: Step) -> bool {
        if target < self.state.step {
            self.state.step = target;
            tracing::debug!("wizard went back to step {}", target.number());
            true
        } else {
            false
        }
    }

    /// Add or remove a service and recompute the running total. Ids not
    /// present in the catalog are rejected.
    pub fn toggle_service(&mut self, id: &str) -> Result<()> {
        if !self.catalog.contains(id) {
            return Err(BookingError::InvalidFieldError {
                field: "service".to_string(),
                reason: format!("unknown service: {}", id),
            });
        }
        if let Some(pos) = self.state.selected_services.iter().position(|s| s == id) {
            self.state.selected_services.remove(pos);
        } else {
            self.state.selected_services.push(id.to_string());
        }
        self.state.total_price = self.catalog.total_for(&self.state.selected_services);
        Ok(())
    }

    /// Store a booking date. A date on the closed weekday is not stored:
    /// the field is cleared and a warning comes back for the user.
    pub fn set_date(&mut self, raw: &str) -> Option<String> {
        if let Ok(date) = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            if date.weekday() == CLOSED_WEEKDAY {
                self.form.booking_date.clear();
                return Some("We are closed on Sundays. Please pick another day.".to_string());
            }
        }
        self.form.booking_date = raw.trim().to_string();
        None
    }

    /// Running total formatted with two decimals, as shown next to the
    /// service checkboxes.
    pub fn total_display(&self) -> String {
        format!("{:.2}", self.state.total_price)
    }

    /// Collect every violation for the given step. Pure over the form and
    /// state; `today` pins the past-date check.
    pub fn validate_step(&self, step: Step, today: NaiveDate) -> Vec<BookingError> {
        fn collect(errors: &mut Vec<BookingError>, result: Result<()>) {
            if let Err(e) = result {
                errors.push(e);
            }
        }

        let mut errors = Vec::new();

        match step {
            Step::Customer => {
                collect(
                    &mut errors,
                    validation::validate_non_empty("customer name", &self.form.customer_name),
                );
                collect(
                    &mut errors,
                    validation::validate_email("email", &self.form.customer_email),
                );
                collect(
                    &mut errors,
                    validation::validate_phone("phone", &self.form.customer_phone),
                );
            }
            Step::Pet => {
                collect(
                    &mut errors,
                    validation::validate_non_empty("pet name", &self.form.pet_name),
                );
                if self.form.pet_species.parse::<Species>().is_err() {
                    errors.push(BookingError::InvalidFieldError {
                        field: "species".to_string(),
                        reason: "select the type of pet".to_string(),
                    });
                }
                collect(
                    &mut errors,
                    validation::validate_non_empty("breed", &self.form.pet_breed),
                );
                collect(
                    &mut errors,
                    validation::validate_non_empty("age", &self.form.pet_age),
                );
                collect(
                    &mut errors,
                    validation::validate_positive_number("weight", &self.form.pet_weight).map(|_| ()),
                );
                if self.form.pet_gender.parse::<Gender>().is_err() {
                    errors.push(BookingError::InvalidFieldError {
                        field: "gender".to_string(),
                        reason: "select the pet's gender".to_string(),
                    });
                }
            }
            Step::Services => {
                if self.state.selected_services.is_empty() {
                    errors.push(BookingError::InvalidFieldError {
                        field: "services".to_string(),
                        reason: "select at least one service".to_string(),
                    });
                }
            }
            Step::Schedule => {
                if self.form.booking_date.trim().is_empty() {
                    errors.push(BookingError::InvalidFieldError {
                        field: "booking date".to_string(),
                        reason: "select a date for the reservation".to_string(),
                    });
                } else {
                    match validation::validate_date("booking date", &self.form.booking_date) {
                        Ok(date) => {
                            if date < today {
                                errors.push(BookingError::InvalidFieldError {
                                    field: "booking date".to_string(),
                                    reason: "cannot be in the past".to_string(),
                                });
                            }
                            if date.weekday() == CLOSED_WEEKDAY {
                                errors.push(BookingError::InvalidFieldError {
                                    field: "booking date".to_string(),
                                    reason: "we are closed on Sundays".to_string(),
                                });
                            }
                        }
                        Err(e) => errors.push(e),
                    }
                }
                if self.form.booking_time.trim().is_empty() {
                    errors.push(BookingError::InvalidFieldError {
                        field: "booking time".to_string(),
                        reason: "select a time for the reservation".to_string(),
                    });
                } else {
                    collect(
                        &mut errors,
                        validation::validate_time("booking time", &self.form.booking_time)
                            .map(|_| ()),
                    );
                }
            }
            // The summary only displays accumulated input.
            Step::Summary => {}
        }

        errors
    }

    /// Build the reservation payload from the form. Re-validates every
    /// input step so a draft can never be assembled from a form the
    /// wizard would not have let through.
    pub fn assemble_draft(&self, today: NaiveDate) -> Result<BookingDraft> {
        for step in Step::all() {
            let errors = self.validate_step(*step, today);
            if let Some(first) = errors.into_iter().next() {
                return Err(first);
            }
        }

        let species: Species = self
            .form
            .pet_species
            .parse()
            .map_err(|reason: String| BookingError::InvalidFieldError {
                field: "species".to_string(),
                reason,
            })?;
        let gender: Gender = self
            .form
            .pet_gender
            .parse()
            .map_err(|reason: String| BookingError::InvalidFieldError {
                field: "gender".to_string(),
                reason,
            })?;
        let weight = validation::validate_positive_number("weight", &self.form.pet_weight)?;

        Ok(BookingDraft {
            customer: Customer {
                name: self.form.customer_name.trim().to_string(),
                email: self.form.customer_email.trim().to_string(),
                phone: self.form.customer_phone.trim().to_string(),
            },
            pet: Pet {
                name: self.form.pet_name.trim().to_string(),
                species,
                breed: self.form.pet_breed.trim().to_string(),
                age: self.form.pet_age.trim().to_string(),
                weight,
                gender,
                notes: self.form.pet_notes.trim().to_string(),
            },
            services: self.state.selected_services.clone(),
            booking_date: self.form.booking_date.trim().to_string(),
            booking_time: self.form.booking_time.trim().to_string(),
            notes: self.form.notes.trim().to_string(),
            // Client-side total, rounded to cents. The backend is free to
            // recompute from its own price list.
            total_price: (self.state.total_price * 100.0).round() / 100.0,
            status: BookingDraft::STATUS_PENDING.to_string(),
        })
    }

    /// Discard everything and start over, keeping the catalog.
    pub fn reset(&mut self) {
        self.state = WizardState::new();
        self.form = BookingForm::default();
    }
}
