use crate::utils::error::{BookingError, Result};
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(BookingError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BookingError::InvalidFieldError {
            field: field_name.to_string(),
            reason: "cannot be empty".to_string(),
        });
    }
    Ok(())
}

/// A local part and a domain with at least one dot, no whitespace or
/// extra '@' anywhere.
pub fn validate_email(field_name: &str, value: &str) -> Result<()> {
    let re = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    if !re.is_match(value) {
        return Err(BookingError::InvalidFieldError {
            field: field_name.to_string(),
            reason: "is not a valid email address".to_string(),
        });
    }
    Ok(())
}

/// Digits plus common separators, with at least 10 digits once the
/// separators are stripped.
pub fn validate_phone(field_name: &str, value: &str) -> Result<()> {
    let re = Regex::new(r"^[\d\s\-\+\(\)]+$").unwrap();
    let digit_count = value.chars().filter(|c| c.is_ascii_digit()).count();
    if !re.is_match(value) || digit_count < 10 {
        return Err(BookingError::InvalidFieldError {
            field: field_name.to_string(),
            reason: "must contain at least 10 digits".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: &str) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(n) if n > 0.0 => Ok(n),
        Ok(_) => Err(BookingError::InvalidFieldError {
            field: field_name.to_string(),
            reason: "must be greater than 0".to_string(),
        }),
        Err(_) => Err(BookingError::InvalidFieldError {
            field: field_name.to_string(),
            reason: "must be a number".to_string(),
        }),
    }
}

pub fn validate_date(field_name: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        BookingError::InvalidFieldError {
            field: field_name.to_string(),
            reason: "must be a date in YYYY-MM-DD format".to_string(),
        }
    })
}

pub fn validate_time(field_name: &str, value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| {
        BookingError::InvalidFieldError {
            field: field_name.to_string(),
            reason: "must be a time in HH:MM format".to_string(),
        }
    })
}

pub fn validate_positive_integer(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}
