use std::collections::{BTreeMap, HashSet};
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use build_print::println as build_println;
use nu_ansi_term::Color::{Green, Red, Yellow};
use serde::Deserialize;

const TRANSLATIONS_FILE: &str = "assets/translations.toml";
const GENERATED_FILE: &str = "translation_keys.rs";

/// A single row of the translation table as written in the assets file.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Entry {
    en: String,
    ur: String,
    #[serde(default)]
    ar: Option<String>,
}

/// Reads the canonical translation table, validates its completeness and generates
/// the `Key` enum together with the static per-language tables.
///
/// Any key lacking an English or Urdu string aborts the build, so lookups at runtime
/// never miss.
///
/// # Returns
/// A `Result` indicating success or failure.
pub fn build() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed={}", TRANSLATIONS_FILE);

    let manifest_dir = env::var("CARGO_MANIFEST_DIR")?;
    let source = fs::read_to_string(Path::new(&manifest_dir).join(TRANSLATIONS_FILE))?;
    let entries: BTreeMap<String, Entry> = toml::from_str(&source).map_err(|e| {
        format!(
            "{} {}: {}",
            Red.paint("invalid translation table"),
            TRANSLATIONS_FILE,
            e
        )
    })?;

    validate(&entries)?;

    let out_file = Path::new(&env::var("OUT_DIR")?).join(GENERATED_FILE);
    fs::write(&out_file, generate(&entries)?)?;

    build_println!(
        "Generated {} translation keys into {}",
        Green.paint(entries.len().to_string()),
        Yellow.paint(out_file.display().to_string())
    );
    Ok(())
}

/// Checks key naming and content completeness of every entry.
fn validate(entries: &BTreeMap<String, Entry>) -> Result<(), String> {
    if entries.is_empty() {
        return Err(format!("{} contains no keys", TRANSLATIONS_FILE));
    }

    let mut variants = HashSet::new();
    for (key, entry) in entries {
        if !is_key_name(key) {
            return Err(format!(
                "translation key \"{}\" must be lowercase snake case",
                key
            ));
        }
        if !variants.insert(variant_name(key)) {
            return Err(format!("translation key \"{}\" collides with another key", key));
        }
        if entry.en.trim().is_empty() {
            return Err(format!("translation key \"{}\" has an empty \"en\" string", key));
        }
        if entry.ur.trim().is_empty() {
            return Err(format!("translation key \"{}\" has an empty \"ur\" string", key));
        }
        if entry.ar.as_deref().is_some_and(|ar| ar.trim().is_empty()) {
            return Err(format!(
                "translation key \"{}\" has an empty \"ar\" string (omit it to fall back to \"en\")",
                key
            ));
        }
    }
    Ok(())
}

fn is_key_name(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some('a'..='z'))
        && chars.all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_'))
        && !key.ends_with('_')
}

/// Turns `nav_home` into `NavHome`.
fn variant_name(key: &str) -> String {
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut c = part.chars();
            match c.next() {
                Some(first) => first.to_uppercase().collect::<String>() + c.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Emits the Rust source for the key enum and the string tables. String literals are
/// produced through `Debug`, which yields valid escaped Rust literals.
fn generate(entries: &BTreeMap<String, Entry>) -> Result<String, std::fmt::Error> {
    let count = entries.len();
    let mut code = String::new();

    writeln!(code, "// @generated from {}. Do not edit.", TRANSLATIONS_FILE)?;
    writeln!(code)?;
    writeln!(code, "/// Symbolic keys of the canonical translation table.")?;
    writeln!(code, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]")?;
    writeln!(code, "pub enum Key {{")?;
    for (key, entry) in entries {
        writeln!(code, "    #[doc = {:?}]", entry.en)?;
        writeln!(code, "    {},", variant_name(key))?;
    }
    writeln!(code, "}}")?;
    writeln!(code)?;

    writeln!(code, "impl Key {{")?;
    writeln!(code, "    /// Number of canonical keys.")?;
    writeln!(code, "    pub const COUNT: usize = {};", count)?;
    writeln!(code)?;
    writeln!(code, "    /// Every canonical key in table order.")?;
    writeln!(code, "    pub const ALL: [Key; {}] = [", count)?;
    for key in entries.keys() {
        writeln!(code, "        Key::{},", variant_name(key))?;
    }
    writeln!(code, "    ];")?;
    writeln!(code)?;
    writeln!(code, "    /// The symbolic name of the key as written in the table.")?;
    writeln!(code, "    pub const fn as_str(self) -> &'static str {{")?;
    writeln!(code, "        match self {{")?;
    for key in entries.keys() {
        writeln!(code, "            Key::{} => {:?},", variant_name(key), key)?;
    }
    writeln!(code, "        }}")?;
    writeln!(code, "    }}")?;
    writeln!(code)?;
    writeln!(code, "    /// Finds the key with the given symbolic name.")?;
    writeln!(code, "    pub fn from_name(name: &str) -> Option<Key> {{")?;
    writeln!(code, "        match name {{")?;
    for key in entries.keys() {
        writeln!(code, "            {:?} => Some(Key::{}),", key, variant_name(key))?;
    }
    writeln!(code, "            _ => None,")?;
    writeln!(code, "        }}")?;
    writeln!(code, "    }}")?;
    writeln!(code, "}}")?;
    writeln!(code)?;

    writeln!(code, "pub(crate) static EN: [&str; {}] = [", count)?;
    for entry in entries.values() {
        writeln!(code, "    {:?},", entry.en)?;
    }
    writeln!(code, "];")?;
    writeln!(code)?;
    writeln!(code, "pub(crate) static UR: [&str; {}] = [", count)?;
    for entry in entries.values() {
        writeln!(code, "    {:?},", entry.ur)?;
    }
    writeln!(code, "];")?;
    writeln!(code)?;
    writeln!(code, "pub(crate) static AR: [Option<&str>; {}] = [", count)?;
    for entry in entries.values() {
        match &entry.ar {
            Some(ar) => writeln!(code, "    Some({:?}),", ar)?,
            None => writeln!(code, "    None,")?,
        }
    }
    writeln!(code, "];")?;

    Ok(code)
}
