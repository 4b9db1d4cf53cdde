use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed enumeration of animals the salon takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Dog,
    Cat,
}

impl FromStr for Species {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dog" => Ok(Self::Dog),
            "cat" => Ok(Self::Cat),
            other => Err(format!("unknown species: {}", other)),
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dog => write!(f, "dog"),
            Self::Cat => write!(f, "cat"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(format!("unknown gender: {}", other)),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub name: String,
    #[serde(rename = "type")]
    pub species: Species,
    pub breed: String,
    pub age: String,
    pub weight: f64,
    pub gender: Gender,
    pub notes: String,
}

/// One entry in the service catalog: identifier, display label and unit
/// price as served by `GET /services`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub id: String,
    pub label: String,
    pub price: f64,
}

/// Ordered service id -> label/price lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCatalog {
    pub entries: Vec<ServiceEntry>,
}

impl ServiceCatalog {
    pub fn new(entries: Vec<ServiceEntry>) -> Self {
        Self { entries }
    }

    /// The salon's standard offering, used when the backend catalog is
    /// unreachable. Prices here can drift from the server's; the server
    /// copy wins whenever it is available.
    pub fn default_catalog() -> Self {
        let entry = |id: &str, label: &str, price: f64| ServiceEntry {
            id: id.to_string(),
            label: label.to_string(),
            price,
        };
        Self::new(vec![
            entry("bath", "Bath & Brush", 25.99),
            entry("haircut", "Haircut & Styling", 35.99),
            entry("spa", "Full Spa Package", 59.99),
            entry("dental", "Dental Cleaning", 19.99),
            entry("deworming", "Deworming Treatment", 15.99),
        ])
    }

    pub fn get(&self, id: &str) -> Option<&ServiceEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Sum of unit prices for the given ids. Unknown ids contribute
    /// nothing; the wizard rejects them before they get this far.
    pub fn total_for<'a, I: IntoIterator<Item = &'a String>>(&self, ids: I) -> f64 {
        // Folded from +0.0 rather than `.sum()`: the std f64 Sum impl
        // starts from -0.0, which would render an empty total as "-0.00".
        ids.into_iter()
            .filter_map(|id| self.get(id))
            .map(|e| e.price)
            .fold(0.0, |acc, p| acc + p)
    }
}

/// Aggregated reservation payload, shaped exactly like the wire contract
/// of `POST /reservations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub customer: Customer,
    pub pet: Pet,
    pub services: Vec<String>,
    pub booking_date: String,
    pub booking_time: String,
    pub notes: String,
    pub total_price: f64,
    pub status: String,
}

impl BookingDraft {
    pub const STATUS_PENDING: &'static str = "pending";
}

/// Whatever the backend answers with on a successful reservation. The
/// wizard only cares that a body was present.
#[derive(Debug, Clone)]
pub struct ReservationReceipt {
    pub body: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_and_gender_parsing() {
        assert_eq!("dog".parse::<Species>().unwrap(), Species::Dog);
        assert_eq!(" Cat ".parse::<Species>().unwrap(), Species::Cat);
        assert!("hamster".parse::<Species>().is_err());
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert!("".parse::<Gender>().is_err());
    }

    #[test]
    fn test_default_catalog_prices() {
        let catalog = ServiceCatalog::default_catalog();
        assert_eq!(catalog.entries.len(), 5);
        assert_eq!(catalog.get("bath").unwrap().price, 25.99);
        assert_eq!(catalog.get("dental").unwrap().price, 19.99);
        assert!(!catalog.contains("grooming-deluxe"));
    }

    #[test]
    fn test_total_for_ignores_unknown_ids() {
        let catalog = ServiceCatalog::default_catalog();
        let ids = vec!["bath".to_string(), "nope".to_string()];
        assert_eq!(catalog.total_for(&ids), 25.99);
    }
}
