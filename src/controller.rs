use std::io::Write;

use nu_ansi_term::Color::{Green, Yellow};
use url::Url;

use crate::cards::{shape_presets, CardRenderer, Side, TemplateCatalog, TemplateCategory};
use crate::config::MainConfig;
use crate::courses::{CourseCard, CourseCatalog, CourseFilter};
use crate::error::*;
use crate::forms::{whatsapp_link, AdmissionSubmission, AdmissionWizard, ContactForm};
use crate::i18n::{
    translate, FileLanguageStore, Key, Lang, LocaleResolver, RecordingDocument,
};
use crate::records::{ContactRequest, DonationRequest, JsonArrayStore};
use crate::utils::write_tree;

/// Provides the operations behind the command line: translations, the language choice,
/// card templates, courses and the form submissions.
///
/// Every operation writes its report to the given output so that it can be captured.
pub struct SiteController<'a> {
    pub config: &'a MainConfig,
    pub catalog: TemplateCatalog,
    pub courses: CourseCatalog,
    pub colored: bool,
}

impl<'a> SiteController<'a> {
    pub fn new(config: &'a MainConfig) -> Result<Self> {
        Ok(SiteController {
            config,
            catalog: TemplateCatalog::builtin()?,
            courses: CourseCatalog::builtin()?,
            colored: false,
        })
    }

    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// The locale resolver backed by the configured language file.
    pub fn locale(&self) -> Result<LocaleResolver<FileLanguageStore, RecordingDocument>> {
        Ok(LocaleResolver::with_default(
            FileLanguageStore::new(self.config.storage.language_path()?),
            RecordingDocument::default(),
            self.config.site.default_language,
        ))
    }

    fn paint(&self, text: &str, highlight: bool) -> String {
        match (self.colored, highlight) {
            (false, _) => text.to_string(),
            (true, true) => Green.paint(text).to_string(),
            (true, false) => Yellow.paint(text).to_string(),
        }
    }

    /// Prints the given keys in `lang` (the active language when not given), one per line.
    pub fn translate(&self, out: &mut dyn Write, keys: &[String], lang: Option<Lang>) -> Result<()> {
        let lang = match lang {
            Some(lang) => lang,
            None => self.locale()?.language(),
        };
        for name in keys {
            let key: Key = name.parse()?;
            writeln!(out, "{}", translate(key, lang))?;
        }
        Ok(())
    }

    /// Prints every key with its text in `lang`.
    pub fn list_keys(&self, out: &mut dyn Write, lang: Lang) -> Result<()> {
        for key in Key::ALL {
            writeln!(out, "{} = {}", self.paint(key.as_str(), false), translate(key, lang))?;
        }
        Ok(())
    }

    pub fn show_language(&self, out: &mut dyn Write) -> Result<()> {
        let locale = self.locale()?;
        writeln!(
            out,
            "{} ({})",
            self.paint(locale.language().code(), true),
            locale.attributes()
        )?;
        Ok(())
    }

    pub fn set_language(&self, out: &mut dyn Write, lang: Lang) -> Result<()> {
        let mut locale = self.locale()?;
        locale.set_language(lang);
        writeln!(
            out,
            "Language set to {} ({})",
            self.paint(lang.code(), true),
            locale.direction()
        )?;
        Ok(())
    }

    pub fn list_templates(&self, out: &mut dyn Write, category: Option<TemplateCategory>) -> Result<()> {
        let (templates, root) = match category {
            Some(category) => (self.catalog.by_category(category), category.label()),
            None => (self.catalog.all().iter().collect(), "All"),
        };
        let items: Vec<String> = templates
            .iter()
            .map(|template| {
                format!(
                    "{} ({}, {}) {}",
                    template.id,
                    template.category,
                    template.chrome,
                    template.description
                )
            })
            .collect();
        write_tree(out, &items, "template", root, self.colored)
    }

    pub fn show_template(&self, out: &mut dyn Write, id: &str) -> Result<()> {
        let template = self
            .catalog
            .get(id)
            .ok_or_else(|| Error::TemplateNotFound(id.to_string()))?;
        serde_json::to_writer_pretty(&mut *out, template)?;
        writeln!(out)?;
        Ok(())
    }

    pub fn render_template(&self, out: &mut dyn Write, id: &str, side: Side) -> Result<()> {
        let template = self
            .catalog
            .get(id)
            .ok_or_else(|| Error::TemplateNotFound(id.to_string()))?;
        let svg = CardRenderer::new()?.render(template, side)?;
        out.write_all(svg.as_bytes())?;
        Ok(())
    }

    pub fn list_shapes(&self, out: &mut dyn Write) -> Result<()> {
        let items: Vec<String> = shape_presets()
            .iter()
            .map(|preset| format!("{} ({}) {}", preset.id, preset.block.shape, preset.name))
            .collect();
        write_tree(out, &items, "shape preset", "shapes", self.colored)
    }

    pub fn list_courses(&self, out: &mut dyn Write, filter: CourseFilter, lang: Lang) -> Result<()> {
        let items: Vec<String> = self
            .courses
            .filter(filter)
            .into_iter()
            .map(|course| {
                let card = CourseCard::new(course, lang);
                format!(
                    "{} [{}] {} · {} · {}",
                    card.title, card.category_label, card.duration, card.price, card.href
                )
            })
            .collect();
        write_tree(out, &items, "course", translate(filter.label_key(), lang), self.colored)
    }

    /// Validates and stores a donation pledge. Returns the number of stored pledges.
    pub fn donate(&self, out: &mut dyn Write, request: DonationRequest) -> Result<usize> {
        let donation = request.validate()?;
        let store = JsonArrayStore::new(self.config.storage.donations_path()?);
        let count = store.append(&donation)?;
        writeln!(
            out,
            "Recorded donation of {} from {} ({} in {})",
            self.paint(&donation.amount.to_string(), true),
            donation.name,
            count,
            store.path().display()
        )?;
        Ok(count)
    }

    /// Validates and stores a contact message, returning the WhatsApp link that
    /// forwards it to the academy.
    pub fn contact(&self, out: &mut dyn Write, request: ContactRequest) -> Result<Url> {
        let message = request.validate()?;
        let store = JsonArrayStore::new(self.config.storage.contacts_path()?);
        store.append(&message)?;
        let link = whatsapp_link(
            &self.config.site.whatsapp_primary,
            Some(&ContactForm::from(&message).message()),
        )?;
        writeln!(out, "{}", link)?;
        Ok(link)
    }

    /// Runs an acknowledged admissions flow for `submission` and prints the resulting link.
    pub fn admissions(&self, out: &mut dyn Write, submission: AdmissionSubmission) -> Result<Url> {
        let mut wizard = AdmissionWizard::new();
        wizard.acknowledge(true);
        wizard.proceed()?;
        let link = wizard.submit(submission, &self.config.site.whatsapp_primary)?;
        writeln!(out, "{}", link)?;
        Ok(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Storage;
    use crate::records::Donation;
    use serde_json::json;
    use tempfile::{tempdir, TempDir};

    fn config(dir: &TempDir) -> MainConfig {
        MainConfig {
            storage: Storage {
                data_dir: dir.path().to_string_lossy().into_owned(),
                ..Storage::default()
            },
            ..MainConfig::default()
        }
    }

    fn output(run: impl FnOnce(&mut dyn Write) -> Result<()>) -> String {
        let mut out = Vec::new();
        run(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_translate_and_language() -> Result<()> {
        let dir = tempdir()?;
        let config = config(&dir);
        let controller = SiteController::new(&config)?;

        let keys = vec!["nav_home".to_string(), "nav_courses".to_string()];
        assert_eq!(
            output(|out| controller.translate(out, &keys, None)),
            "Home\nCourses\n"
        );

        output(|out| controller.set_language(out, Lang::Ur));
        assert_eq!(output(|out| controller.translate(out, &keys[..1], None)), "ہوم\n");
        assert!(output(|out| controller.show_language(out)).starts_with("ur (lang=\"ur\" dir=\"rtl\""));

        let bad = vec!["nav_nowhere".to_string()];
        assert!(matches!(
            controller.translate(&mut Vec::new(), &bad, Some(Lang::En)),
            Err(Error::UnknownTranslationKey(_))
        ));
        Ok(())
    }

    #[test]
    fn test_template_operations() -> Result<()> {
        let dir = tempdir()?;
        let config = config(&dir);
        let controller = SiteController::new(&config)?;

        let listing = output(|out| controller.list_templates(out, Some(TemplateCategory::Finance)));
        assert!(listing.starts_with("Found 3 templates"));
        assert!(listing.contains("modern-id-4 (finance, sunrise)"));

        let json = output(|out| controller.show_template(out, "modern-id-2"));
        let value: serde_json::Value = serde_json::from_str(&json)?;
        assert_eq!(value["chrome"], "midnight");

        assert!(output(|out| controller.render_template(out, "modern-id-3", Side::Back)).contains("<svg"));
        assert!(matches!(
            controller.show_template(&mut Vec::new(), "nope"),
            Err(Error::TemplateNotFound(_))
        ));
        assert!(output(|out| controller.list_shapes(out)).contains("outline-chip (chip)"));
        Ok(())
    }

    #[test]
    fn test_courses_listing() -> Result<()> {
        let dir = tempdir()?;
        let config = config(&dir);
        let controller = SiteController::new(&config)?;
        let listing = output(|out| {
            controller.list_courses(out, "tafseer".parse()?, Lang::En)
        });
        assert!(listing.starts_with("Found 1 course\n"));
        assert!(listing.contains("Qur'an Tafseer [Tafseer]"));
        Ok(())
    }

    #[test]
    fn test_donate_and_contact() -> Result<()> {
        let dir = tempdir()?;
        let config = config(&dir);
        let controller = SiteController::new(&config)?;

        let request: DonationRequest =
            serde_json::from_value(json!({"name": "Omar", "email": "OMAR@x.org", "amount": 50}))?;
        assert_eq!(controller.donate(&mut Vec::new(), request)?, 1);
        let stored: Vec<Donation> =
            JsonArrayStore::new(config.storage.donations_path()?).records()?;
        assert_eq!(stored[0].email, "omar@x.org");

        let contact: ContactRequest =
            serde_json::from_value(json!({"name": "Hina", "email": "hina@x.org"}))?;
        let link = controller.contact(&mut Vec::new(), contact)?;
        assert!(link.as_str().starts_with("https://wa.me/923353503511?text="));
        assert!(config.storage.contacts_path()?.exists());
        Ok(())
    }

    #[test]
    fn test_admissions_link() -> Result<()> {
        let dir = tempdir()?;
        let config = config(&dir);
        let controller = SiteController::new(&config)?;
        let submission = AdmissionSubmission {
            full_name: "Yusuf".to_string(),
            course: "tajweed".to_string(),
            ..AdmissionSubmission::default()
        };
        let link = controller.admissions(&mut Vec::new(), submission)?;
        let text = link
            .query_pairs()
            .find(|(key, _)| key == "text")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default();
        assert!(text.contains("• Course Interest / کورس: Tajweed / تجوید"));
        Ok(())
    }
}
