use std::io::Write;
use std::path::PathBuf;

use nu_ansi_term::Color::{Blue, Yellow};

use crate::error::*;

pub const ROOT_PREFIX: &str = "\u{f115}";
pub const ELEMENT_PREFIX: &str = "\u{ea7b}";

/// Expands environment variables and a leading `~` in the given path.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use alafra::utils::expand_path;
///
/// std::env::set_var("ALAFRA_DOC_DIR", "/srv");
/// assert_eq!(expand_path("$ALAFRA_DOC_DIR/data").unwrap(), PathBuf::from("/srv/data"));
/// ```
pub fn expand_path(path: &str) -> Result<PathBuf> {
    shellexpand::full(path)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|e| Error::InterpolationError {
            location: ConfigType::MAIN,
            cause: e.to_string(),
        })
}

/// Writes a list of items in a tree-like format.
///
/// # Arguments
/// * `out` - Destination of the listing
/// * `items` - The list of items to print
/// * `element_name` - The name of the element to display before the tree
/// * `root` - The root to display
/// * `colored` - Whether the header and root are painted
///
/// # Examples
/// ```
/// use alafra::utils::write_tree;
///
/// let mut out = Vec::new();
/// write_tree(&mut out, &["modern-id-1", "modern-id-5"], "template", "student", false).unwrap();
/// let listing = String::from_utf8(out).unwrap();
/// assert!(listing.starts_with("Found 2 templates"));
/// assert!(listing.ends_with("└── \u{ea7b} modern-id-5\n"));
/// ```
pub fn write_tree<T: AsRef<str>>(
    out: &mut dyn Write,
    items: &[T],
    element_name: &str,
    root: &str,
    colored: bool,
) -> Result<()> {
    let header_formatter = |s: &str| {
        if colored {
            Yellow.paint(s).to_string()
        } else {
            s.to_string()
        }
    };
    let root_formatter = |s: &str| {
        if colored {
            Blue.paint(s).to_string()
        } else {
            s.to_string()
        }
    };

    match items.split_last() {
        Some((last, rest)) => {
            let header = format!(
                "Found {} {}{}\n",
                items.len(),
                element_name,
                if items.len() > 1 { "s" } else { "" }
            );
            writeln!(out, "{}", header_formatter(&header))?;
            writeln!(out, "{}", root_formatter(&format!("{} {}", ROOT_PREFIX, root)))?;
            for item in rest {
                writeln!(out, "├── {} {}", ELEMENT_PREFIX, item.as_ref())?;
            }
            writeln!(out, "└── {} {}", ELEMENT_PREFIX, last.as_ref())?;
        }
        None => {
            writeln!(
                out,
                "{}",
                header_formatter(&format!("No {}s found", element_name))
            )?;
        }
    }
    Ok(())
}
