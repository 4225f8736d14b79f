// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! RSVP form validation.

use crate::services::naming::to_ticket_name;
use serde::{Deserialize, Serialize};

/// Upper bound for adults on one RSVP.
pub const MAX_ADULTS: u32 = 30;
/// Upper bound for kids on one RSVP.
pub const MAX_KIDS: u32 = 30;

/// Candidate form values, after upstream coercion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FormInput {
    pub name: String,
    pub adults: f64,
    pub kids: f64,
}

/// Validation result: `ok` plus every failed rule, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub ok: bool,
    pub errors: Vec<String>,
}

/// Check a candidate RSVP. All rules are evaluated.
pub fn validate_form(input: &FormInput) -> Validation {
    let mut errors = Vec::new();
    let FormInput { name, adults, kids } = input;

    if name.trim().is_empty() {
        errors.push("Name is required.".to_string());
    }
    if !adults.is_finite() || *adults < 0.0 {
        errors.push("Adults must be a number of 0 or more.".to_string());
    }
    if !kids.is_finite() || *kids < 0.0 {
        errors.push("Kids must be a number of 0 or more.".to_string());
    }
    if *adults > f64::from(MAX_ADULTS) {
        errors.push(format!("Adults cannot be more than {MAX_ADULTS}."));
    }
    if *kids > f64::from(MAX_KIDS) {
        errors.push(format!("Kids cannot be more than {MAX_KIDS}."));
    }
    let places = adults + kids;
    if places.is_nan() || places < 1.0 {
        errors.push("You must reserve at least 1 place (adults + kids).".to_string());
    }

    Validation {
        ok: errors.is_empty(),
        errors,
    }
}

/// Floor and clamp a raw count into `[0, max]`. Non-finite input becomes 0.
pub fn clamp_count(raw: f64, max: u32) -> u32 {
    if !raw.is_finite() {
        return 0;
    }
    raw.floor().clamp(0.0, f64::from(max)) as u32
}

/// Ticket values after coercion and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketInput {
    /// Display name printed on the ticket.
    pub name: String,
    pub adults: u32,
    pub kids: u32,
}

/// Clamp the counts, validate, and derive the display name for a ticket.
pub fn prepare_ticket(name: &str, adults: f64, kids: f64) -> Result<TicketInput, Vec<String>> {
    let adults = clamp_count(adults, MAX_ADULTS);
    let kids = clamp_count(kids, MAX_KIDS);
    let validation = validate_form(&FormInput {
        name: name.to_string(),
        adults: f64::from(adults),
        kids: f64::from(kids),
    });
    if !validation.ok {
        return Err(validation.errors);
    }

    Ok(TicketInput {
        name: to_ticket_name(name),
        adults,
        kids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, adults: f64, kids: f64) -> FormInput {
        FormInput {
            name: name.to_string(),
            adults,
            kids,
        }
    }

    #[test]
    fn test_name_required() {
        let v = validate_form(&form("  ", 1.0, 0.0));
        assert!(!v.ok);
        assert_eq!(v.errors, vec!["Name is required.".to_string()]);
    }

    #[test]
    fn test_zero_places_rejected() {
        let v = validate_form(&form("X", 0.0, 0.0));
        assert!(!v.ok);
        assert_eq!(v.errors.len(), 1);
    }

    #[test]
    fn test_all_in_range_combinations_accepted() {
        for adults in 0..=MAX_ADULTS {
            for kids in 0..=MAX_KIDS {
                let v = validate_form(&form("Familia Pérez", adults.into(), kids.into()));
                assert_eq!(v.ok, adults + kids >= 1, "adults={adults} kids={kids}");
            }
        }
    }

    #[test]
    fn test_errors_are_not_short_circuited() {
        let v = validate_form(&form("", -1.0, 31.0));
        assert_eq!(
            v.errors,
            vec![
                "Name is required.".to_string(),
                "Adults must be a number of 0 or more.".to_string(),
                "Kids cannot be more than 30.".to_string(),
            ]
        );
    }

    #[test]
    fn test_non_finite_counts() {
        let v = validate_form(&form("X", f64::NAN, 1.0));
        assert!(!v.ok);
        assert!(v.errors[0].starts_with("Adults"));
    }

    #[test]
    fn test_clamp_count() {
        assert_eq!(clamp_count(2.9, MAX_ADULTS), 2);
        assert_eq!(clamp_count(-4.0, MAX_ADULTS), 0);
        assert_eq!(clamp_count(99.0, MAX_KIDS), 30);
        assert_eq!(clamp_count(f64::INFINITY, MAX_KIDS), 0);
    }

    #[test]
    fn test_prepare_ticket_clamps_and_shortens() {
        let input = prepare_ticket("Evan Fonseca Gonzalez", f64::from(u32::MAX), 1.0).unwrap();
        assert_eq!(
            input,
            TicketInput {
                name: "Evan Fonseca".to_string(),
                adults: MAX_ADULTS,
                kids: 1,
            }
        );
    }

    #[test]
    fn test_prepare_ticket_rejects() {
        let errors = prepare_ticket(" ", -3.0, 0.0).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "Name is required.".to_string(),
                "You must reserve at least 1 place (adults + kids).".to_string(),
            ]
        );
    }
}
