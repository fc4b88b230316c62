use std::io::Write;
use strum_macros::Display;
use thiserror::Error;

#[derive(Debug, Display)]
pub enum ConfigType {
    #[strum(serialize = "Main config")]
    MAIN,
    #[strum(serialize = "Card layouts")]
    LAYOUTS,
    #[strum(serialize = "Card templates")]
    TEMPLATES,
    #[strum(serialize = "Courses")]
    COURSES,
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("error processing args. Cause : {0}")]
    ArgsProcessingError(String),
    #[error("unable to create default configuration file in {0}")]
    ConfigError(String),
    #[error("unable to read configuration file {file:?}. Cause : {cause}")]
    ConfigReadError { file: String, cause: String },
    #[error("unable to parse {location} file {file:?}. Cause : {cause}")]
    SerdeTomlError {
        location: ConfigType,
        file: String,
        cause: String,
    },
    #[error("invalid {location} data. Cause : {cause}")]
    ContentError { location: ConfigType, cause: String },
    #[error("unable to interpolate variable. Cause : {cause}")]
    InterpolationError { location: ConfigType, cause: String },
    #[error("invalid hex color \"{0}\"")]
    InvalidColor(String),
    #[error("invalid submission. Cause : {0}")]
    InvalidSubmission(String),
    #[error("action not allowed at the \"{stage}\" stage of the admissions flow")]
    InvalidStage { stage: String },
    #[error("unknown language code \"{0}\" (expected one of: en, ur, ar)")]
    UnknownLanguage(String),
    #[error("unknown translation key \"{0}\"")]
    UnknownTranslationKey(String),
    #[error("template \"{0}\" not found")]
    TemplateNotFound(String),
    #[error("unable to render card. Cause : {0}")]
    TemplateRenderError(String),
    #[error(transparent)]
    Tera(#[from] ::tera::Error),
    #[error(transparent)]
    Io(#[from] ::std::io::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(String),
    #[error(transparent)]
    Url(#[from] ::url::ParseError),
    #[error("{0}")]
    Msg(String),
}

impl From<&'static str> for Error {
    fn from(s: &'static str) -> Self {
        Error::Msg(s.to_owned())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Msg(s)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::JsonError(error.to_string())
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(error: tempfile::PersistError) -> Self {
        Error::Io(error.error)
    }
}

impl Error {
    /// Whether the error was caused by the caller's input rather than by the
    /// environment (filesystem, serialization, ...).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidSubmission(_)
                | Error::InvalidColor(_)
                | Error::UnknownLanguage(_)
                | Error::UnknownTranslationKey(_)
                | Error::TemplateNotFound(_)
                | Error::InvalidStage { .. }
                | Error::ArgsProcessingError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub fn default_error_handler(error: &Error, output: &mut dyn Write) {
    use nu_ansi_term::Color::Red;

    match error {
        Error::Io(io_error) if io_error.kind() == ::std::io::ErrorKind::BrokenPipe => {
            ::std::process::exit(0);
        }
        Error::ConfigReadError { .. }
        | Error::SerdeTomlError { .. }
        | Error::InterpolationError { .. } => {
            writeln!(output, "{}: {}", Red.paint("[config error]"), error).ok();
        }
        Error::ContentError { .. } | Error::UnknownTranslationKey(_) => {
            writeln!(output, "{}: {}", Red.paint("[content error]"), error).ok();
        }
        Error::TemplateNotFound(_) | Error::TemplateRenderError(_) | Error::Tera(_) => {
            writeln!(output, "{}: {}", Red.paint("[template error]"), error).ok();
        }
        Error::InvalidSubmission(_) => {
            writeln!(output, "{}: {}", Red.paint("[submission error]"), error).ok();
        }
        _ => {
            writeln!(output, "{}: {}", Red.paint("[alafra error]"), error).ok();
        }
    };
}
