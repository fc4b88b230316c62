use url::Url;

use crate::constants::site::{COUNTRY_CODE, WHATSAPP_BASE_URL};
use crate::error::{Error, Result};

/// Normalizes a phone number for a `wa.me` link: only digits are kept and a local
/// number (leading `0`) gets the country code instead of its trunk prefix.
pub fn sanitize_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.starts_with(COUNTRY_CODE) {
        digits
    } else if let Some(local) = digits.strip_prefix('0') {
        format!("{}{}", COUNTRY_CODE, local)
    } else {
        digits
    }
}

/// Builds a WhatsApp deep link to `number`, optionally prefilled with `text`.
pub fn whatsapp_link(number: &str, text: Option<&str>) -> Result<Url> {
    let digits = sanitize_number(number);
    if digits.is_empty() {
        return Err(Error::InvalidSubmission(format!(
            "\"{}\" is not a WhatsApp number",
            number
        )));
    }

    let link = match text {
        Some(text) => format!(
            "{}{}?text={}",
            WHATSAPP_BASE_URL,
            digits,
            urlencoding::encode(text)
        ),
        None => format!("{}{}", WHATSAPP_BASE_URL, digits),
    };
    Ok(Url::parse(&link)?)
}
