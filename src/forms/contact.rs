use serde::{Deserialize, Serialize};

use crate::i18n::Lang;

fn or_dash(value: &str) -> &str {
    match value.trim() {
        "" => "-",
        value => value,
    }
}

/// The contact page form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    pub fn message(&self) -> String {
        let mut lines = vec![
            "*New Contact Message*".to_string(),
            String::new(),
            format!("Name (نام): {}", or_dash(&self.name)),
            format!("Email (ای میل): {}", or_dash(&self.email)),
            format!("Phone (فون): {}", or_dash(&self.phone)),
        ];
        let message = self.message.trim();
        if !message.is_empty() {
            lines.push(String::new());
            lines.push(format!("Message (پیغام): {}", message));
        }
        lines.push(String::new());
        lines.push("Submitted via Contact Form.".to_string());
        lines.join("\n")
    }
}

/// Spiritual healing (Rohani Ilaj) request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RohaniRequest {
    pub full_name: String,
    pub father_name: String,
    pub mother_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl RohaniRequest {
    /// The request as a WhatsApp message. Urdu readers get Urdu labels, everybody else
    /// English ones.
    pub fn message(&self, lang: Lang) -> String {
        let urdu = lang == Lang::Ur;
        let label = |ur: &'static str, en: &'static str| if urdu { ur } else { en };

        let mut lines = vec![
            label("*نئی روحانی علاج کی درخواست*", "*New Rohani Ilaj Request*").to_string(),
            String::new(),
        ];
        let fields = [
            (label("• مریض کا نام", "• Patient Name"), &self.full_name),
            (label("• والد کا نام", "• Father's Name"), &self.father_name),
            (label("• ماں کا نام", "• Mother's Name"), &self.mother_name),
            (label("• ای میل", "• Email"), &self.email),
            (label("• فون", "• Phone"), &self.phone),
        ];
        lines.extend(
            fields
                .iter()
                .map(|(name, value)| format!("{}: {}", name, or_dash(value))),
        );

        let message = self.message.trim();
        if !message.is_empty() {
            lines.push(String::new());
            lines.push(format!("{}: {}", label("• پیغام", "• Message"), message));
        }
        lines.push(String::new());
        lines.push(
            label(
                "روحانی علاج کے فارم سے جمع کروایا گیا۔",
                "Submitted via Rohani Ilaj Form.",
            )
            .to_string(),
        );
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_message() {
        let form = ContactForm {
            name: " Aisha ".to_string(),
            email: "aisha@example.com".to_string(),
            phone: String::new(),
            message: "Class timings?".to_string(),
        };
        assert_eq!(
            form.message(),
            "*New Contact Message*\n\nName (نام): Aisha\nEmail (ای میل): aisha@example.com\n\
             Phone (فون): -\n\nMessage (پیغام): Class timings?\n\nSubmitted via Contact Form."
        );
    }

    #[test]
    fn test_contact_message_without_text() {
        let message = ContactForm::default().message();
        assert!(!message.contains("Message (پیغام)"));
        assert!(message.ends_with("Phone (فون): -\n\nSubmitted via Contact Form."));
    }

    #[test]
    fn test_rohani_message_languages() {
        let request = RohaniRequest {
            full_name: "Bilal".to_string(),
            message: "  ".to_string(),
            ..RohaniRequest::default()
        };

        let english = request.message(Lang::En);
        assert!(english.starts_with("*New Rohani Ilaj Request*\n\n• Patient Name: Bilal\n"));
        assert!(english.contains("• Father's Name: -"));
        assert!(!english.contains("• Message"));
        assert_eq!(request.message(Lang::Ar), english);

        let urdu = request.message(Lang::Ur);
        assert!(urdu.contains("• مریض کا نام: Bilal"));
        assert!(urdu.ends_with("روحانی علاج کے فارم سے جمع کروایا گیا۔"));
    }
}
