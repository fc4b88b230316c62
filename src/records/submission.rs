use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::forms::ContactForm;

/// A donation pledge as posted by the donate form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DonationRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub amount: Option<Value>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

/// A validated donation pledge, as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub name: String,
    pub email: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub received_at: DateTime<Utc>,
}

/// A message posted by the contact form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub received_at: DateTime<Utc>,
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::InvalidSubmission(format!("missing {}", field)))
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_amount(amount: Option<Value>) -> Result<f64> {
    let invalid = || Error::InvalidSubmission("missing or invalid amount".to_string());
    let amount = match amount.ok_or_else(invalid)? {
        Value::Number(number) => number.as_f64().ok_or_else(invalid)?,
        Value::String(text) => text.trim().parse::<f64>().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(invalid())
    }
}

impl DonationRequest {
    pub fn validate(self) -> Result<Donation> {
        self.validate_at(Utc::now())
    }

    /// Validates the pledge, stamping it with `received_at`.
    pub fn validate_at(self, received_at: DateTime<Utc>) -> Result<Donation> {
        Ok(Donation {
            name: required("name", self.name)?,
            email: required("email", self.email)?.to_lowercase(),
            amount: parse_amount(self.amount)?,
            phone: optional(self.phone),
            message: optional(self.message),
            received_at,
        })
    }
}

impl ContactRequest {
    pub fn validate(self) -> Result<ContactMessage> {
        self.validate_at(Utc::now())
    }

    pub fn validate_at(self, received_at: DateTime<Utc>) -> Result<ContactMessage> {
        Ok(ContactMessage {
            name: required("name", self.name)?,
            email: required("email", self.email)?.to_lowercase(),
            phone: optional(self.phone),
            message: optional(self.message),
            received_at,
        })
    }
}

impl From<&ContactMessage> for ContactForm {
    fn from(message: &ContactMessage) -> Self {
        ContactForm {
            name: message.name.clone(),
            email: message.email.clone(),
            phone: message.phone.clone().unwrap_or_default(),
            message: message.message.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn request(body: Value) -> DonationRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_valid_donation() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 10, 30, 0).unwrap();
        let donation = request(json!({
            "name": "  Ahmed Raza ",
            "email": " Ahmed@Example.COM",
            "amount": "2500",
            "phone": "   ",
            "message": " For the library "
        }))
        .validate_at(at)
        .unwrap();

        assert_eq!(donation.name, "Ahmed Raza");
        assert_eq!(donation.email, "ahmed@example.com");
        assert_eq!(donation.amount, 2500.0);
        assert_eq!(donation.phone, None);
        assert_eq!(donation.message.as_deref(), Some("For the library"));

        let stored = serde_json::to_value(&donation).unwrap();
        assert_eq!(stored["receivedAt"], "2025-03-01T10:30:00Z");
        assert!(stored.get("phone").is_none());
    }

    #[test]
    fn test_numeric_amount() {
        let donation = request(json!({"name": "A", "email": "a@b.c", "amount": 12.5}))
            .validate()
            .unwrap();
        assert_eq!(donation.amount, 12.5);
    }

    #[test]
    fn test_zero_and_negative_amounts() {
        for (amount, expected) in [(json!(0), 0.0), (json!(-5), -5.0), (json!("0"), 0.0)] {
            let donation = request(json!({"name": "A", "email": "a@b.c", "amount": amount}))
                .validate()
                .unwrap();
            assert_eq!(donation.amount, expected);
        }
    }

    #[test]
    fn test_invalid_donations() {
        let cases = [
            json!({"email": "a@b.c", "amount": 10}),
            json!({"name": " ", "email": "a@b.c", "amount": 10}),
            json!({"name": "A", "amount": 10}),
            json!({"name": "A", "email": "a@b.c"}),
            json!({"name": "A", "email": "a@b.c", "amount": "ten"}),
            json!({"name": "A", "email": "a@b.c", "amount": ""}),
            json!({"name": "A", "email": "a@b.c", "amount": "NaN"}),
            json!({"name": "A", "email": "a@b.c", "amount": "inf"}),
            json!({"name": "A", "email": "a@b.c", "amount": true}),
        ];
        for body in cases {
            assert!(
                matches!(request(body.clone()).validate(), Err(Error::InvalidSubmission(_))),
                "{} should be rejected",
                body
            );
        }
    }

    #[test]
    fn test_contact_request() {
        let request: ContactRequest =
            serde_json::from_value(json!({"name": "Sana", "email": "SANA@x.pk", "message": "Hi"}))
                .unwrap();
        let message = request.validate().unwrap();
        assert_eq!(message.email, "sana@x.pk");
        let form = ContactForm::from(&message);
        assert!(form.message().contains("Message (پیغام): Hi"));

        let missing: ContactRequest = serde_json::from_value(json!({"name": "Sana"})).unwrap();
        assert!(missing.validate().is_err());
    }
}
