//! Intake form validation schema.
//!
//! [`validate_lead_form`] turns raw form input into a [`NewLead`] or a
//! field-keyed set of messages. It never panics; every malformed input ends
//! up as a [`FieldErrors`] entry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::budget::BudgetRange;
use crate::error::FieldErrors;
use crate::lead::NewLead;
use crate::neighborhoods::{OTHER_MAX_LEN, OTHER_SENTINEL};

/// Wire format of a calendar date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const MSG_NAME: &str = "Name must be at least 2 characters";
pub const MSG_NAME_LENGTH: &str = "Name must be at most 100 characters";
pub const NAME_MAX_LEN: usize = 100;
pub const MSG_EMAIL: &str = "Please enter a valid email address";
pub const MSG_EMAIL_LENGTH: &str = "Email must be at most 255 characters";
pub const MSG_PHONE: &str = "Please enter a valid phone number";
pub const MSG_MOVE_IN_REQUIRED: &str = "Please select a move-in date";
pub const MSG_MOVE_IN_FORMAT: &str = "Move-in date must be a date in YYYY-MM-DD format";
pub const MSG_MOVE_IN_PAST: &str = "Move-in date cannot be in the past";
pub const MSG_BUDGET: &str = "Please select a budget range";
pub const MSG_NEIGHBORHOODS: &str = "Please select at least one neighborhood";
pub const MSG_OTHER_REQUIRED: &str = "Please enter a neighborhood name";
pub const MSG_OTHER_LENGTH: &str = "Neighborhood name must be at most 100 characters";

/// Raw intake form input, as posted by the public form.
///
/// Every field defaults so a partially filled body still deserializes and
/// reaches validation instead of failing at the JSON layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct LeadForm {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub full_name: String,

    #[validate(
        email(message = "Please enter a valid email address"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,

    #[validate(length(min = 10, max = 20, message = "Please enter a valid phone number"))]
    pub phone: String,

    /// `YYYY-MM-DD`.
    pub move_in_date: Option<String>,

    pub budget_range: Option<String>,

    /// Selected labels; may contain [`OTHER_SENTINEL`].
    pub neighborhoods: Vec<String>,

    /// Free-text label standing in for the sentinel. Ignored unless the
    /// sentinel is selected.
    pub other_neighborhood: Option<String>,
}

/// Message reported when a body field has the wrong JSON type.
fn type_message(field: &str) -> &'static str {
    match field {
        "fullName" => MSG_NAME,
        "email" => MSG_EMAIL,
        "phone" => MSG_PHONE,
        "moveInDate" => MSG_MOVE_IN_FORMAT,
        "budgetRange" => MSG_BUDGET,
        "neighborhoods" => MSG_NEIGHBORHOODS,
        _ => MSG_OTHER_REQUIRED,
    }
}

/// Read a JSON request body into a [`LeadForm`].
///
/// A field of the wrong JSON type is reported under its wire name instead
/// of failing the whole body; absent and `null` fields default. A body that
/// is not an object reports every field.
pub fn lead_form_from_json(body: serde_json::Value) -> Result<LeadForm, FieldErrors> {
    const STRING_FIELDS: [&str; 4] = ["fullName", "email", "phone", "moveInDate"];
    const OPTIONAL_FIELDS: [&str; 2] = ["budgetRange", "otherNeighborhood"];

    let mut errors = FieldErrors::new();
    let Some(object) = body.as_object() else {
        for field in ["fullName", "email", "phone", "moveInDate", "budgetRange", "neighborhoods"] {
            errors.add(field, type_message(field));
        }
        return Err(errors);
    };

    for (field, value) in object {
        let ok = match field.as_str() {
            f if STRING_FIELDS.contains(&f) || OPTIONAL_FIELDS.contains(&f) => {
                value.is_string() || value.is_null()
            }
            "neighborhoods" => {
                value.is_null()
                    || value
                        .as_array()
                        .is_some_and(|items| items.iter().all(serde_json::Value::is_string))
            }
            _ => true,
        };
        if !ok {
            errors.add(field.as_str(), type_message(field));
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    // Every known field now has an acceptable shape; `null` means absent.
    let cleaned: serde_json::Map<String, serde_json::Value> = object
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    serde_json::from_value(serde_json::Value::Object(cleaned)).map_err(|e| {
        let mut errors = FieldErrors::new();
        errors.add("form", e.to_string());
        errors
    })
}

/// Validate `form` as of `today`.
///
/// `today` itself is an acceptable move-in date; anything earlier is not.
pub fn validate_lead_form(form: &LeadForm, today: NaiveDate) -> Result<NewLead, FieldErrors> {
    let mut normalized = form.clone();
    normalized.full_name = form.full_name.trim().to_string();
    normalized.other_neighborhood = form
        .other_neighborhood
        .as_deref()
        .map(|s| s.trim().to_string());

    let mut errors = FieldErrors::new();

    if let Err(violations) = normalized.validate() {
        for (field, list) in violations.field_errors() {
            let field = field.to_string();
            for violation in list.iter() {
                let message = violation
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", wire_name(&field)));
                errors.add(wire_name(&field), message);
            }
        }
    }

    if normalized.full_name.chars().count() > NAME_MAX_LEN {
        errors.add("fullName", MSG_NAME_LENGTH);
    }

    let move_in_date = check_move_in_date(normalized.move_in_date.as_deref(), today, &mut errors);
    let budget_range = check_budget(normalized.budget_range.as_deref(), &mut errors);
    let neighborhoods = merge_neighborhoods(
        &normalized.neighborhoods,
        normalized.other_neighborhood.as_deref(),
        &mut errors,
    );

    match (move_in_date, budget_range) {
        (Some(move_in_date), Some(budget_range)) if errors.is_empty() => Ok(NewLead {
            full_name: normalized.full_name,
            email: normalized.email,
            phone: normalized.phone,
            move_in_date,
            budget_range,
            neighborhoods,
        }),
        _ => Err(errors),
    }
}

fn check_move_in_date(
    raw: Option<&str>,
    today: NaiveDate,
    errors: &mut FieldErrors,
) -> Option<NaiveDate> {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => {
            errors.add("moveInDate", MSG_MOVE_IN_REQUIRED);
            return None;
        }
    };

    let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) else {
        errors.add("moveInDate", MSG_MOVE_IN_FORMAT);
        return None;
    };

    if date < today {
        errors.add("moveInDate", MSG_MOVE_IN_PAST);
        return None;
    }
    Some(date)
}

fn check_budget(raw: Option<&str>, errors: &mut FieldErrors) -> Option<BudgetRange> {
    match raw.and_then(|s| s.parse::<BudgetRange>().ok()) {
        Some(budget) => Some(budget),
        None => {
            errors.add("budgetRange", MSG_BUDGET);
            None
        }
    }
}

/// Replace the sentinel with the free-text label, in place, and drop blank
/// entries. A second sentinel is ignored.
fn merge_neighborhoods(
    selected: &[String],
    other: Option<&str>,
    errors: &mut FieldErrors,
) -> Vec<String> {
    let other = other.unwrap_or("");
    let mut merged = Vec::with_capacity(selected.len());
    let mut sentinel_seen = false;

    for label in selected {
        if label == OTHER_SENTINEL {
            if sentinel_seen {
                continue;
            }
            sentinel_seen = true;
            if other.is_empty() {
                errors.add("otherNeighborhood", MSG_OTHER_REQUIRED);
            } else if other.chars().count() > OTHER_MAX_LEN {
                errors.add("otherNeighborhood", MSG_OTHER_LENGTH);
            } else {
                merged.push(other.to_string());
            }
            continue;
        }

        let label = label.trim();
        if !label.is_empty() {
            merged.push(label.to_string());
        }
    }

    if merged.is_empty() && !sentinel_seen {
        errors.add("neighborhoods", MSG_NEIGHBORHOODS);
    }
    merged
}

/// `full_name` -> `fullName`.
fn wire_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn valid_form() -> LeadForm {
        LeadForm {
            full_name: "Jane Doe".into(),
            email: "jane@x.com".into(),
            phone: "2125550100".into(),
            move_in_date: Some("2099-01-01".into()),
            budget_range: Some("3k-5k".into()),
            neighborhoods: vec!["SoHo".into()],
            other_neighborhood: None,
        }
    }

    fn only_error(form: LeadForm) -> (String, String) {
        let errors = validate_lead_form(&form, today()).expect_err("form should be rejected");
        assert_eq!(errors.len(), 1, "expected exactly one field error, got {errors:?}");
        let (field, msg) = errors.iter().next().unwrap();
        (field.to_string(), msg.to_string())
    }

    #[test]
    fn valid_form_produces_new_lead_verbatim() {
        let lead = validate_lead_form(&valid_form(), today()).expect("valid form");
        assert_eq!(lead.full_name, "Jane Doe");
        assert_eq!(lead.email, "jane@x.com");
        assert_eq!(lead.phone, "2125550100");
        assert_eq!(lead.move_in_date, NaiveDate::from_ymd_opt(2099, 1, 1).unwrap());
        assert_eq!(lead.budget_range, BudgetRange::From3kTo5k);
        assert_eq!(lead.neighborhoods, vec!["SoHo".to_string()]);
    }

    #[test]
    fn name_is_trimmed_before_length_check() {
        let mut form = valid_form();
        form.full_name = "  A  ".into();
        assert_eq!(only_error(form), ("fullName".into(), MSG_NAME.into()));

        let mut form = valid_form();
        form.full_name = "  Al  ".into();
        assert_eq!(validate_lead_form(&form, today()).unwrap().full_name, "Al");
    }

    #[test]
    fn name_longer_than_100_is_rejected() {
        let mut form = valid_form();
        form.full_name = "x".repeat(101);
        assert_eq!(only_error(form), ("fullName".into(), MSG_NAME_LENGTH.into()));

        let mut form = valid_form();
        form.full_name = "x".repeat(100);
        assert!(validate_lead_form(&form, today()).is_ok());
    }

    #[test]
    fn bad_email_is_rejected() {
        let mut form = valid_form();
        form.email = "not-an-email".into();
        assert_eq!(only_error(form), ("email".into(), MSG_EMAIL.into()));
    }

    #[test]
    fn phone_length_bounds() {
        let mut form = valid_form();
        form.phone = "212555".into();
        assert_eq!(only_error(form), ("phone".into(), MSG_PHONE.into()));

        let mut form = valid_form();
        form.phone = "1".repeat(21);
        assert_eq!(only_error(form).0, "phone");

        // No digit-only enforcement.
        let mut form = valid_form();
        form.phone = "(212) 555-0123".into();
        assert!(validate_lead_form(&form, today()).is_ok());
    }

    #[test]
    fn move_in_today_accepted_yesterday_rejected() {
        let mut form = valid_form();
        form.move_in_date = Some("2026-10-16".into());
        assert!(validate_lead_form(&form, today()).is_ok());

        let mut form = valid_form();
        form.move_in_date = Some("2026-10-15".into());
        assert_eq!(only_error(form), ("moveInDate".into(), MSG_MOVE_IN_PAST.into()));
    }

    #[test]
    fn move_in_missing_or_malformed() {
        let mut form = valid_form();
        form.move_in_date = None;
        assert_eq!(only_error(form), ("moveInDate".into(), MSG_MOVE_IN_REQUIRED.into()));

        let mut form = valid_form();
        form.move_in_date = Some("01/01/2099".into());
        assert_eq!(only_error(form), ("moveInDate".into(), MSG_MOVE_IN_FORMAT.into()));
    }

    #[test]
    fn budget_must_be_a_known_bracket() {
        let mut form = valid_form();
        form.budget_range = None;
        assert_eq!(only_error(form), ("budgetRange".into(), MSG_BUDGET.into()));

        let mut form = valid_form();
        form.budget_range = Some("10k+".into());
        assert_eq!(only_error(form).0, "budgetRange");
    }

    #[test]
    fn neighborhoods_required() {
        let mut form = valid_form();
        form.neighborhoods.clear();
        assert_eq!(only_error(form), ("neighborhoods".into(), MSG_NEIGHBORHOODS.into()));
    }

    #[test]
    fn other_sentinel_replaced_in_place() {
        let mut form = valid_form();
        form.neighborhoods = vec!["SoHo".into(), OTHER_SENTINEL.into(), "Chelsea".into()];
        form.other_neighborhood = Some(" Astoria ".into());
        let lead = validate_lead_form(&form, today()).unwrap();
        assert_eq!(lead.neighborhoods, vec!["SoHo", "Astoria", "Chelsea"]);
    }

    #[test]
    fn other_value_matching_a_selected_pill_is_kept_distinct() {
        let mut form = valid_form();
        form.neighborhoods = vec!["SoHo".into(), OTHER_SENTINEL.into()];
        form.other_neighborhood = Some("SoHo".into());
        let lead = validate_lead_form(&form, today()).unwrap();
        assert_eq!(lead.neighborhoods, vec!["SoHo", "SoHo"]);
    }

    #[test]
    fn sentinel_without_text_is_an_error() {
        let mut form = valid_form();
        form.neighborhoods = vec![OTHER_SENTINEL.into()];
        form.other_neighborhood = Some("   ".into());
        assert_eq!(only_error(form), ("otherNeighborhood".into(), MSG_OTHER_REQUIRED.into()));
    }

    #[test]
    fn other_text_over_100_chars_is_rejected() {
        let mut form = valid_form();
        form.neighborhoods = vec![OTHER_SENTINEL.into()];
        form.other_neighborhood = Some("y".repeat(101));
        assert_eq!(only_error(form), ("otherNeighborhood".into(), MSG_OTHER_LENGTH.into()));
    }

    #[test]
    fn other_text_without_sentinel_is_ignored() {
        let mut form = valid_form();
        form.other_neighborhood = Some("Astoria".into());
        let lead = validate_lead_form(&form, today()).unwrap();
        assert_eq!(lead.neighborhoods, vec!["SoHo"]);
    }

    #[test]
    fn overlong_other_text_without_sentinel_does_not_block() {
        let mut form = valid_form();
        form.other_neighborhood = Some("y".repeat(150));
        let lead = validate_lead_form(&form, today()).expect("ignored field must not block");
        assert_eq!(lead.neighborhoods, vec!["SoHo"]);
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let errors = validate_lead_form(&LeadForm::default(), today()).unwrap_err();
        for field in ["fullName", "email", "phone", "moveInDate", "budgetRange", "neighborhoods"] {
            assert!(errors.contains(field), "missing error for {field}: {errors:?}");
        }
    }

    #[test]
    fn wrongly_typed_body_fields_are_field_errors() {
        let body = serde_json::json!({
            "fullName": "Jane Doe",
            "phone": 2125550100u64,
            "neighborhoods": "SoHo",
        });
        let errors = lead_form_from_json(body).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("phone"), Some(MSG_PHONE));
        assert_eq!(errors.get("neighborhoods"), Some(MSG_NEIGHBORHOODS));
    }

    #[test]
    fn json_body_with_nulls_and_extras_reads_as_form() {
        let body = serde_json::json!({
            "fullName": "Jane Doe",
            "budgetRange": null,
            "neighborhoods": ["SoHo"],
            "source": 7,
        });
        let form = lead_form_from_json(body).unwrap();
        assert_eq!(form.full_name, "Jane Doe");
        assert_eq!(form.budget_range, None);
        assert_eq!(form.neighborhoods, vec!["SoHo"]);
    }

    #[test]
    fn non_object_body_reports_required_fields() {
        let errors = lead_form_from_json(serde_json::json!(["Jane"])).unwrap_err();
        assert!(errors.contains("fullName"));
        assert!(errors.contains("neighborhoods"));
    }

    #[test]
    fn partial_json_body_still_deserializes() {
        let form: LeadForm = serde_json::from_str(r#"{"fullName":"Jane"}"#).unwrap();
        assert_eq!(form.full_name, "Jane");
        assert_matches!(validate_lead_form(&form, today()), Err(_));
    }

    #[test]
    fn wire_names_are_camel_case() {
        assert_eq!(wire_name("full_name"), "fullName");
        assert_eq!(wire_name("other_neighborhood"), "otherNeighborhood");
        assert_eq!(wire_name("email"), "email");
    }
}
