//! Course catalog of the academy.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::constants::assets;
use crate::error::{ConfigType, Error, Result};
use crate::i18n::{Key, Lang, Localized};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CourseCategory {
    Tafseer,
    Tajweed,
    Arabic,
    Islamic,
}

impl CourseCategory {
    pub const ALL: [CourseCategory; 4] = [
        CourseCategory::Tafseer,
        CourseCategory::Tajweed,
        CourseCategory::Arabic,
        CourseCategory::Islamic,
    ];

    /// Translation key of the filter button.
    pub fn label_key(self) -> Key {
        match self {
            CourseCategory::Tafseer => Key::FilterTafseer,
            CourseCategory::Tajweed => Key::FilterTajweed,
            CourseCategory::Arabic => Key::FilterArabic,
            CourseCategory::Islamic => Key::FilterIslamic,
        }
    }
}

impl FromStr for CourseCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CourseCategory::ALL
            .into_iter()
            .find(|category| category.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::ArgsProcessingError(format!("unknown course category \"{}\"", s)))
    }
}

/// Which courses to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CourseFilter {
    #[default]
    All,
    Category(CourseCategory),
}

impl FromStr for CourseFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CourseFilter::All)
        } else {
            s.parse().map(CourseFilter::Category)
        }
    }
}

impl CourseFilter {
    pub fn label_key(self) -> Key {
        match self {
            CourseFilter::All => Key::FilterAll,
            CourseFilter::Category(category) => category.label_key(),
        }
    }

    fn matches(self, course: &Course) -> bool {
        match self {
            CourseFilter::All => true,
            CourseFilter::Category(category) => course.category == category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub slug: String,
    pub title: Localized,
    pub description: Localized,
    pub duration: Localized,
    pub price: Localized,
    pub image: String,
    pub category: CourseCategory,
    pub theme: String,
}

impl Course {
    /// Link to the admissions form with the course preselected.
    pub fn admissions_href(&self) -> String {
        format!("/admissions?course={}", urlencoding::encode(&self.title.en))
    }
}

/// A course flattened to one language, as shown on a course card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseCard<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub duration: &'a str,
    pub price: &'a str,
    pub image: &'a str,
    pub category: CourseCategory,
    pub category_label: &'static str,
    pub theme: &'a str,
    pub href: String,
}

impl<'a> CourseCard<'a> {
    pub fn new(course: &'a Course, lang: Lang) -> Self {
        CourseCard {
            slug: &course.slug,
            title: course.title.get(lang),
            description: course.description.get(lang),
            duration: course.duration.get(lang),
            price: course.price.get(lang),
            image: &course.image,
            category: course.category,
            category_label: crate::i18n::translate(course.category.label_key(), lang),
            theme: &course.theme,
            href: course.admissions_href(),
        }
    }
}

#[derive(Deserialize)]
struct CoursesFile {
    #[serde(rename = "course")]
    courses: Vec<Course>,
}

#[derive(Debug, Clone)]
pub struct CourseCatalog {
    courses: Vec<Course>,
}

impl CourseCatalog {
    pub fn builtin() -> Result<Self> {
        Self::from_source(assets::COURSES)
    }

    pub fn from_source(source: &str) -> Result<Self> {
        let file: CoursesFile = toml::from_str(source).map_err(|e| Error::SerdeTomlError {
            location: ConfigType::COURSES,
            file: "courses.toml".to_string(),
            cause: e.to_string(),
        })?;

        let mut slugs = HashSet::new();
        if let Some(course) = file.courses.iter().find(|c| !slugs.insert(c.slug.as_str())) {
            return Err(Error::ContentError {
                location: ConfigType::COURSES,
                cause: format!("duplicate course slug \"{}\"", course.slug),
            });
        }
        Ok(CourseCatalog {
            courses: file.courses,
        })
    }

    pub fn all(&self) -> &[Course] {
        &self.courses
    }

    pub fn get(&self, slug: &str) -> Option<&Course> {
        self.courses.iter().find(|course| course.slug == slug)
    }

    /// Courses matching `filter`, keeping only the first course of each English title.
    pub fn filter(&self, filter: CourseFilter) -> Vec<&Course> {
        let mut titles = HashSet::new();
        self.courses
            .iter()
            .filter(|course| titles.insert(course.title.en.as_str()))
            .filter(|course| filter.matches(course))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_courses() {
        let catalog = CourseCatalog::builtin().unwrap();
        assert_eq!(catalog.all().len(), 6);
        assert_eq!(catalog.filter(CourseFilter::All).len(), 6);

        let tajweed = catalog.filter(CourseFilter::Category(CourseCategory::Tajweed));
        let slugs: Vec<&str> = tajweed.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["noorani-qaida", "quran-with-tajweed"]);
        assert_eq!(catalog.filter("islamic".parse().unwrap()).len(), 2);
    }

    #[test]
    fn test_duplicate_titles_are_shown_once() {
        let mut source = assets::COURSES.to_string();
        source.push_str(
            r#"
[[course]]
slug = "arabic-language-2"
image = "/course/arabic.jpg"
category = "arabic"
theme = "rose"
title = { en = "Arabic Language", ur = "عربی زبان" }
description = { en = "Again", ur = "دوبارہ" }
duration = { en = "Flexible", ur = "لچکدار" }
price = { en = "$1/mo", ur = "$1 / ماہ" }
"#,
        );
        let catalog = CourseCatalog::from_source(&source).unwrap();
        let arabic = catalog.filter(CourseFilter::Category(CourseCategory::Arabic));
        assert_eq!(arabic.len(), 1);
        assert_eq!(arabic[0].slug, "arabic-language");
    }

    #[test]
    fn test_duplicate_slug_is_rejected() {
        let source = format!("{}\n{}", assets::COURSES, assets::COURSES);
        assert!(matches!(
            CourseCatalog::from_source(&source),
            Err(Error::ContentError { .. })
        ));
    }

    #[test]
    fn test_admissions_href() {
        let catalog = CourseCatalog::builtin().unwrap();
        assert_eq!(
            catalog.get("arabic-language").unwrap().admissions_href(),
            "/admissions?course=Arabic%20Language"
        );
        assert_eq!(
            catalog.get("hifz-quran").unwrap().admissions_href(),
            "/admissions?course=Hifz%20Qur%27an"
        );
    }

    #[test]
    fn test_course_card_in_urdu() {
        let catalog = CourseCatalog::builtin().unwrap();
        let card = CourseCard::new(catalog.get("noorani-qaida").unwrap(), Lang::Ur);
        assert_eq!(card.title, "نورانی قائدہ");
        assert_eq!(card.category_label, "تجوید");
        assert_eq!(CourseFilter::All.label_key(), Key::FilterAll);
        assert!("poetry".parse::<CourseFilter>().is_err());
    }
}
