//! Module for shared constants used across the codebase

pub mod site {
    /// Primary WhatsApp number used for admissions and contact forms
    pub const WHATSAPP_PRIMARY: &str = "03353503511";

    /// Secondary WhatsApp number (general enquiries, spiritual healing requests)
    pub const WHATSAPP_ALTERNATE: &str = "+92 304 2186295";

    /// Public contact address
    pub const CONTACT_EMAIL: &str = "info@alafra.academy";

    /// Base URL of WhatsApp deep links
    pub const WHATSAPP_BASE_URL: &str = "https://wa.me/";

    /// Country calling code prepended to local numbers starting with `0`
    pub const COUNTRY_CODE: &str = "92";
}

pub mod storage {
    /// Default data directory (shell expanded)
    pub const DEFAULT_DATA_DIR: &str = "${HOME}/.local/share/alafra";

    /// Default file collecting donation pledges
    pub const DONATIONS_FILE: &str = "donations.json";

    /// Default file collecting contact messages
    pub const CONTACTS_FILE: &str = "contacts.json";

    /// Default file holding the persisted language choice
    pub const LANGUAGE_FILE: &str = "lang";
}

pub mod server {
    /// Default bind address
    pub const DEFAULT_HOST: &str = "127.0.0.1";

    /// Default port
    pub const DEFAULT_PORT: u16 = 8080;
}

pub mod card {
    /// Width of the card canvas in pixels
    pub const WIDTH: u32 = 560;

    /// Height of the card canvas in pixels
    pub const HEIGHT: u32 = 350;

    /// Corner radius of the card canvas
    pub const RADIUS: u32 = 16;
}

pub mod assets {
    /// Bundled base layouts, one per chrome style
    pub const LAYOUTS: &str = include_str!("../assets/layouts.toml");

    /// Bundled template definitions
    pub const TEMPLATES: &str = include_str!("../assets/templates.toml");

    /// Bundled course catalog
    pub const COURSES: &str = include_str!("../assets/courses.toml");
}
