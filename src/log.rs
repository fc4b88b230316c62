use std::env;

use once_cell::sync::Lazy;

pub static DEBUG_ENABLED: Lazy<bool> = Lazy::new(|| {
    env::var("ALAFRA_DEBUG").map_or(false, |log_level| log_level.eq("true") || log_level.eq("1"))
});

/// Builds an error/diagnostic message, appending the details only when debug
/// logging is enabled.
///
/// # Arguments
///
/// * `message` - The main message to log.
/// * `details` - Additional details to include in the log.
///
/// # Returns
///
/// A formatted string containing the message and details.
pub fn debug_message<M, D>(message: M, details: D) -> String
where
    M: AsRef<str>,
    D: AsRef<str>,
{
    if *DEBUG_ENABLED {
        format!("{}{}", message.as_ref(), details.as_ref())
    } else {
        message.as_ref().to_string()
    }
}

/// Prints a warning in yellow to stderr. Warnings are always shown.
pub fn warn<M: AsRef<str>>(message: M) {
    eprintln!(
        "{}",
        nu_ansi_term::Color::Yellow.paint(format!("WARNING: {}", message.as_ref()))
    );
}

/// Logs a debug message with optional formatted arguments.
///
/// # Arguments
///
/// * `fmt` - The format string for the debug message.
/// * `args` - Optional arguments to be formatted into the message.
///
/// # Examples
///
/// ```
/// use std::env;
/// use alafra::debug;
///
/// env::set_var("ALAFRA_DEBUG", "true");
///
/// debug!("Catalog loaded");
/// debug!("[donation] New pledge received from {}", "alice@example.com");
///
/// env::remove_var("ALAFRA_DEBUG");
/// ```
#[macro_export]
macro_rules! debug {
    ($fmt:expr) => {
        if *$crate::log::DEBUG_ENABLED {
            eprintln!("{}", nu_ansi_term::Color::Yellow.paint(format!("{}", $fmt)));
        }
    };
    ($fmt:expr, $($arg:tt)*) => {
        if *$crate::log::DEBUG_ENABLED {
            eprintln!("{}", nu_ansi_term::Color::Yellow.paint(format!($fmt, $($arg)*)));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_message_details() {
        let message = debug_message("Failed to record donation", ": disk full");
        if *DEBUG_ENABLED {
            assert_eq!(message, "Failed to record donation: disk full");
        } else {
            assert_eq!(message, "Failed to record donation");
        }
    }
}
