use crate::core::wizard::{Step, Wizard};
use chrono::NaiveDate;

/// Structured view tree. Rendering is a pure function of the wizard
/// state; nothing here ever interpolates user input into markup.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewNode {
    Section { title: String, children: Vec<ViewNode> },
    Field { label: String, value: String },
    Text(String),
}

impl ViewNode {
    fn section(title: &str, children: Vec<ViewNode>) -> Self {
        Self::Section {
            title: title.to_string(),
            children,
        }
    }

    fn field(label: &str, value: impl Into<String>) -> Self {
        Self::Field {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

/// Long-form date for display, e.g. "August 31, 2026". Falls back to the
/// raw value when it does not parse; the raw value is what was validated.
pub fn format_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%B %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// 12-hour clock for display, e.g. "14:30" -> "2:30 PM".
pub fn format_time(raw: &str) -> String {
    let mut parts = raw.splitn(2, ':');
    let (Some(hours), Some(minutes)) = (parts.next(), parts.next()) else {
        return raw.to_string();
    };
    let Ok(hour) = hours.parse::<u32>() else {
        return raw.to_string();
    };
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{}:{} {}", display_hour, minutes, meridiem)
}

/// Read-only summary of everything captured in steps 1-4, generated when
/// the wizard reaches the final step.
pub fn render_summary(wizard: &Wizard) -> ViewNode {
    let form = &wizard.form;

    let mut sections = vec![
        ViewNode::section(
            "Customer Information",
            vec![
                ViewNode::field("Name", form.customer_name.clone()),
                ViewNode::field("Email", form.customer_email.clone()),
                ViewNode::field("Phone", form.customer_phone.clone()),
            ],
        ),
        ViewNode::section(
            "Pet Information",
            vec![
                ViewNode::field("Name", form.pet_name.clone()),
                ViewNode::field("Type", form.pet_species.clone()),
                ViewNode::field("Breed", form.pet_breed.clone()),
                ViewNode::field("Age", form.pet_age.clone()),
                ViewNode::field("Weight", format!("{} kg", form.pet_weight)),
                ViewNode::field("Gender", form.pet_gender.clone()),
            ],
        ),
        ViewNode::section(
            "Selected Services",
            wizard
                .state
                .selected_services
                .iter()
                .filter_map(|id| wizard.catalog().get(id))
                .map(|entry| ViewNode::field(&entry.label, format!("${:.2}", entry.price)))
                .collect(),
        ),
        ViewNode::section(
            "Date & Time",
            vec![
                ViewNode::field("Date", format_date(&form.booking_date)),
                ViewNode::field("Time", format_time(&form.booking_time)),
            ],
        ),
    ];

    if !form.notes.trim().is_empty() {
        sections.push(ViewNode::section(
            "Additional Notes",
            vec![ViewNode::Text(form.notes.clone())],
        ));
    }

    sections.push(ViewNode::section(
        "Total",
        vec![ViewNode::field("Total price", format!("${}", wizard.total_display()))],
    ));

    ViewNode::section("Booking Summary", sections)
}

pub fn render_confirmation() -> ViewNode {
    ViewNode::section(
        "Reservation Confirmed",
        vec![ViewNode::Text(
            "Your booking was created. We will contact you soon to confirm.".to_string(),
        )],
    )
}

/// Progress indicator over the five steps: completed steps marked, the
/// current one highlighted.
pub fn render_progress(current: Step) -> String {
    let markers: Vec<String> = Step::all()
        .iter()
        .map(|step| {
            if *step == current {
                format!("[{}]", step.number())
            } else if *step < current {
                "[x]".to_string()
            } else {
                "[ ]".to_string()
            }
        })
        .collect();
    format!(
        "{}  Step {}/{}: {}",
        markers.join(""),
        current.number(),
        Step::total(),
        current.title()
    )
}

/// Flatten a view tree into indented terminal text.
pub fn render_to_string(node: &ViewNode) -> String {
    let mut out = String::new();
    write_node(node, 0, &mut out);
    out
}

fn write_node(node: &ViewNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        ViewNode::Section { title, children } => {
            out.push_str(&format!("{}{}\n", indent, title));
            out.push_str(&format!("{}{}\n", indent, "-".repeat(title.len())));
            for child in children {
                write_node(child, depth + 1, out);
            }
            out.push('\n');
        }
        ViewNode::Field { label, value } => {
            out.push_str(&format!("{}{}: {}\n", indent, label, value));
        }
        ViewNode::Text(text) => {
            out.push_str(&format!("{}{}\n", indent, text));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ServiceCatalog;

    fn filled_wizard() -> Wizard {
        let mut wizard = Wizard::new(ServiceCatalog::default_catalog());
        wizard.form.customer_name = "Maria Lopez".to_string();
        wizard.form.customer_email = "maria@example.com".to_string();
        wizard.form.customer_phone = "555-123-4567".to_string();
        wizard.form.pet_name = "Rex".to_string();
        wizard.form.pet_species = "dog".to_string();
        wizard.form.pet_breed = "Beagle".to_string();
        wizard.form.pet_age = "3 years".to_string();
        wizard.form.pet_weight = "12.5".to_string();
        wizard.form.pet_gender = "male".to_string();
        wizard.toggle_service("bath").unwrap();
        wizard.toggle_service("dental").unwrap();
        wizard.form.booking_date = "2026-08-31".to_string();
        wizard.form.booking_time = "14:30".to_string();
        wizard
    }

    #[test]
    fn test_summary_contains_every_captured_value() {
        let mut wizard = filled_wizard();
        wizard.form.notes = "Please call before arriving".to_string();
        let rendered = render_to_string(&render_summary(&wizard));

        for expected in [
            "Maria Lopez",
            "maria@example.com",
            "555-123-4567",
            "Rex",
            "dog",
            "Beagle",
            "3 years",
            "12.5 kg",
            "male",
            "Bath & Brush",
            "$25.99",
            "Dental Cleaning",
            "$19.99",
            "August 31, 2026",
            "2:30 PM",
            "Please call before arriving",
            "$45.98",
        ] {
            assert!(rendered.contains(expected), "missing {:?} in:\n{}", expected, rendered);
        }
    }

    #[test]
    fn test_summary_omits_empty_notes() {
        let wizard = filled_wizard();
        let rendered = render_to_string(&render_summary(&wizard));
        assert!(!rendered.contains("Additional Notes"));
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time("09:15"), "9:15 AM");
        assert_eq!(format_time("14:30"), "2:30 PM");
        assert_eq!(format_time("12:00"), "12:00 PM");
        assert_eq!(format_time("00:05"), "12:05 AM");
    }

    #[test]
    fn test_progress_marks_completed_and_current() {
        assert_eq!(
            render_progress(Step::Services),
            "[x][x][3][ ][ ]  Step 3/5: Select Services"
        );
        assert_eq!(
            render_progress(Step::Customer),
            "[1][ ][ ][ ][ ]  Step 1/5: Your Information"
        );
    }
}
