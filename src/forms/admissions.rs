use serde::{Deserialize, Serialize};
use strum_macros::Display;
use url::Url;

use crate::debug;
use crate::error::{Error, Result};
use crate::forms::whatsapp_link;
use crate::i18n::{Lang, Localized};

/// Rules an applicant has to acknowledge before filling in the form.
pub static GUIDELINES: [Localized<&str>; 4] = [
    Localized::new(
        "Regular attendance and punctuality are expected.",
        "باقاعدہ حاضری اور وقت کی پابندی ضروری ہے۔",
    ),
    Localized::new(
        "Respectful behaviour with teachers and classmates is mandatory.",
        "اساتذہ اور ساتھی طلبہ کے ساتھ باوقار رویہ لازم ہے۔",
    ),
    Localized::new(
        "Keep audio and video on during class unless advised otherwise.",
        "کلاس کے دوران آڈیو اور ویڈیو کھلی رکھیں، جب تک اس کے برخلاف ہدایت نہ دی جائے۔",
    ),
    Localized::new(
        "Tuition fees should be paid on the agreed schedule.",
        "طے شدہ شیڈول کے مطابق فیس ادا کرنا لازم ہے۔",
    ),
];

/// A selectable value of the admissions form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormOption {
    pub value: &'static str,
    pub label: Localized<&'static str>,
}

const fn option(value: &'static str, en: &'static str, ur: &'static str) -> FormOption {
    FormOption {
        value,
        label: Localized::new(en, ur),
    }
}

static GENDER_OPTIONS: [FormOption; 3] = [
    option("male", "Male Teacher", "استاد (مرد)"),
    option("female", "Female Teacher", "استاد (خاتون)"),
    option("any", "No Preference", "کوئی بھی مناسب"),
];

static TIMING_OPTIONS: [FormOption; 6] = [
    option("sehar", "Sehar (pre-dawn)", "سحر (فجر سے پہلے)"),
    option("morning", "Morning", "صبح"),
    option("afternoon", "Afternoon", "دوپہر"),
    option("evening", "Evening", "شام"),
    option("isha", "After Isha", "بعد از عشاء"),
    option("weekend", "Weekend", "ویک اینڈ"),
];

static EXPERIENCE_OPTIONS: [FormOption; 3] = [
    option("beginner", "Beginner", "ابتدائی"),
    option("intermediate", "Intermediate", "درمیانہ"),
    option("advanced", "Advanced", "اعلیٰ"),
];

static COURSE_OPTIONS: [FormOption; 6] = [
    option("noorani-qaida", "Noorani Qaida", "نورانی قائدہ"),
    option("quran-reading", "Qur’an Reading", "قرآن خوانی"),
    option("tajweed", "Tajweed", "تجوید"),
    option("hifz", "Hifz (Memorisation)", "حفظ"),
    option("tafseer", "Tafseer", "تفسیر"),
    option("islamic-studies", "Islamic Studies", "اسلامک اسٹڈیز"),
];

static DAYS_OPTIONS: [FormOption; 4] = [
    option("mon-fri", "Mon – Fri", "پیر تا جمعہ"),
    option("mon-thu", "Mon – Thu", "پیر تا جمعرات"),
    option("weekends", "Weekends", "ویک اینڈ"),
    option("custom", "Custom", "حسبِ ضرورت"),
];

/// The select fields of the admissions form.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum OptionKind {
    Gender,
    Timing,
    Experience,
    Course,
    Days,
}

impl OptionKind {
    pub const ALL: [OptionKind; 5] = [
        OptionKind::Gender,
        OptionKind::Timing,
        OptionKind::Experience,
        OptionKind::Course,
        OptionKind::Days,
    ];

    pub fn options(self) -> &'static [FormOption] {
        match self {
            OptionKind::Gender => &GENDER_OPTIONS,
            OptionKind::Timing => &TIMING_OPTIONS,
            OptionKind::Experience => &EXPERIENCE_OPTIONS,
            OptionKind::Course => &COURSE_OPTIONS,
            OptionKind::Days => &DAYS_OPTIONS,
        }
    }
}

/// Label of `value` in `lang`. Values that are not options are shown as typed, or as
/// `-` when empty.
pub fn format_option_label(options: &[FormOption], value: &str, lang: Lang) -> String {
    match options.iter().find(|option| option.value == value) {
        Some(option) => option.label.get(lang).to_string(),
        None => raw_or_dash(value),
    }
}

/// Bilingual `en / ur` label of `value`, as written in the WhatsApp message.
pub fn format_option_label_for_message(options: &[FormOption], value: &str) -> String {
    match options.iter().find(|option| option.value == value) {
        Some(option) => option.label.bilingual(),
        None => raw_or_dash(value),
    }
}

fn raw_or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionSubmission {
    pub full_name: String,
    pub gender: String,
    pub age: String,
    pub phone: String,
    pub timing: String,
    pub experience: String,
    pub course: String,
    pub days: String,
    pub message: String,
}

impl AdmissionSubmission {
    /// Trims the free text fields. Option values are kept as submitted.
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.full_name,
            &mut self.age,
            &mut self.phone,
            &mut self.message,
        ] {
            *field = field.trim().to_string();
        }
        self
    }

    pub fn message(&self) -> String {
        let field = |value: &str| raw_or_dash(value.trim());
        let choice = |kind: OptionKind, value: &str| {
            format_option_label_for_message(kind.options(), value)
        };

        let mut lines = vec![
            "*New Admission Request / نئی داخلہ درخواست*".to_string(),
            String::new(),
            format!("• Name / نام: {}", field(&self.full_name)),
            format!("• Age / عمر: {}", field(&self.age)),
            format!("• Contact / رابطہ: {}", field(&self.phone)),
            format!(
                "• Preferred Teacher / استاد کی ترجیح: {}",
                choice(OptionKind::Gender, &self.gender)
            ),
            format!(
                "• Preferred Timing / پسندیدہ وقت: {}",
                choice(OptionKind::Timing, &self.timing)
            ),
            format!(
                "• Experience Level / تجربہ: {}",
                choice(OptionKind::Experience, &self.experience)
            ),
            format!(
                "• Course Interest / کورس: {}",
                choice(OptionKind::Course, &self.course)
            ),
            format!(
                "• Preferred Days / ایام: {}",
                choice(OptionKind::Days, &self.days)
            ),
        ];

        let notes = self.message.trim();
        if !notes.is_empty() {
            lines.push(String::new());
            lines.push(format!("• Notes / نوٹس: {}", notes));
        }
        lines.push(String::new());
        lines.push("Submitted via Admissions Form.".to_string());
        lines.join("\n")
    }
}

/// Steps of the admissions flow.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    #[default]
    Guidelines,
    Form,
    Success,
}

/// State of the admissions flow: guidelines, then the form, then the confirmation.
#[derive(Debug, Clone, Default)]
pub struct AdmissionWizard {
    stage: Stage,
    acknowledged: bool,
    last_submission: Option<AdmissionSubmission>,
}

impl AdmissionWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn acknowledged(&self) -> bool {
        self.acknowledged
    }

    pub fn last_submission(&self) -> Option<&AdmissionSubmission> {
        self.last_submission.as_ref()
    }

    pub fn acknowledge(&mut self, acknowledged: bool) {
        self.acknowledged = acknowledged;
    }

    /// Moves from the guidelines to the form. The guidelines must be acknowledged.
    pub fn proceed(&mut self) -> Result<()> {
        self.expect_stage(Stage::Guidelines)?;
        if !self.acknowledged {
            return Err(Error::InvalidSubmission(
                "the admission guidelines have not been acknowledged".to_string(),
            ));
        }
        self.stage = Stage::Form;
        Ok(())
    }

    /// Records the submission and returns the WhatsApp link it is sent through.
    pub fn submit(&mut self, submission: AdmissionSubmission, number: &str) -> Result<Url> {
        self.expect_stage(Stage::Form)?;
        let submission = submission.normalized();
        let link = whatsapp_link(number, Some(&submission.message()))?;
        debug!("[admissions] Submission for {} ready", or_unnamed(&submission.full_name));
        self.last_submission = Some(submission);
        self.stage = Stage::Success;
        Ok(link)
    }

    /// Starts over from the guidelines.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn expect_stage(&self, expected: Stage) -> Result<()> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(Error::InvalidStage {
                stage: self.stage.to_string(),
            })
        }
    }
}

fn or_unnamed(name: &str) -> &str {
    if name.is_empty() {
        "<unnamed>"
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> AdmissionSubmission {
        AdmissionSubmission {
            full_name: " Maryam Iqbal ".to_string(),
            gender: "female".to_string(),
            age: "12".to_string(),
            phone: "0300 1234567".to_string(),
            timing: "isha".to_string(),
            experience: "beginner".to_string(),
            course: "hifz".to_string(),
            days: "weekends".to_string(),
            message: String::new(),
        }
    }

    #[test]
    fn test_option_labels() {
        let timing = OptionKind::Timing.options();
        assert_eq!(format_option_label(timing, "evening", Lang::Ur), "شام");
        assert_eq!(format_option_label(timing, "evening", Lang::Ar), "Evening");
        assert_eq!(format_option_label(timing, "midnight", Lang::En), "midnight");
        assert_eq!(format_option_label(timing, "", Lang::En), "-");
        assert_eq!(
            format_option_label_for_message(OptionKind::Days.options(), "mon-fri"),
            "Mon – Fri / پیر تا جمعہ"
        );
    }

    #[test]
    fn test_admission_message() {
        let message = submission().normalized().message();
        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(lines[0], "*New Admission Request / نئی داخلہ درخواست*");
        assert_eq!(lines[2], "• Name / نام: Maryam Iqbal");
        assert_eq!(lines[5], "• Preferred Teacher / استاد کی ترجیح: Female Teacher / استاد (خاتون)");
        assert_eq!(lines[8], "• Course Interest / کورس: Hifz (Memorisation) / حفظ");
        assert_eq!(lines[9], "• Preferred Days / ایام: Weekends / ویک اینڈ");
        assert!(!message.contains("Notes"));
        assert!(message.ends_with("\n\nSubmitted via Admissions Form."));
    }

    #[test]
    fn test_admission_message_with_notes() {
        let mut data = submission();
        data.message = "Prefers a morning trial".to_string();
        data.gender = String::new();
        let message = data.message();
        assert!(message.contains("• Preferred Teacher / استاد کی ترجیح: -"));
        assert!(message.contains("\n\n• Notes / نوٹس: Prefers a morning trial\n\n"));
    }

    #[test]
    fn test_wizard_flow() {
        let mut wizard = AdmissionWizard::new();
        assert_eq!(wizard.stage(), Stage::Guidelines);

        assert!(matches!(wizard.proceed(), Err(Error::InvalidSubmission(_))));
        assert_eq!(wizard.stage(), Stage::Guidelines);

        wizard.acknowledge(true);
        wizard.proceed().unwrap();
        assert_eq!(wizard.stage(), Stage::Form);

        let link = wizard.submit(submission(), "03353503511").unwrap();
        assert!(link.as_str().starts_with("https://wa.me/923353503511?text="));
        assert_eq!(wizard.stage(), Stage::Success);
        assert_eq!(wizard.last_submission().unwrap().full_name, "Maryam Iqbal");

        wizard.reset();
        assert_eq!(wizard.stage(), Stage::Guidelines);
        assert!(!wizard.acknowledged());
        assert!(wizard.last_submission().is_none());
    }

    #[test]
    fn test_submit_outside_form_stage() {
        let mut wizard = AdmissionWizard::new();
        assert!(matches!(
            wizard.submit(submission(), "03353503511"),
            Err(Error::InvalidStage { stage }) if stage == "guidelines"
        ));
        assert!(wizard.last_submission().is_none());
    }
}
