use clap::{
    arg,
    builder::{styling::AnsiColor, Styles},
    crate_description, crate_name, crate_version, Arg, ArgAction, ColorChoice, Command,
};

use alafra::forms::OptionKind;

fn env_no_color() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|x| !x.is_empty())
}

// Builds the application command line interface defining the commands, subcommands
// and arguments
pub fn build_app(interactive_output: bool) -> Command {
    let color_when = if interactive_output && !env_no_color() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };

    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default())
        .usage(AnsiColor::Green.on_default())
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default());

    let app = Command::new(crate_name!())
        .styles(styles)
        .version(crate_version!())
        .about(crate_description!())
        .color(color_when)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("translate")
                .alias("t")
                .arg(arg!(<key> ... "The translation keys to resolve"))
                .arg(lang_arg())
                .about("Resolves translation keys in the active language.")
                .long_about(
                    "Prints the text of each given key (e.g. nav_home) in the active language, \
                    or in the language supplied with --lang. Arabic falls back to English \
                    for keys without an Arabic text.",
                ),
        )
        .subcommand(
            Command::new("lang")
                .about("Shows or changes the active language.")
                .arg_required_else_help(true)
                .subcommand(Command::new("show").about("Displays the active language and its direction."))
                .subcommand(
                    Command::new("set")
                        .arg(arg!(<code> "The language code (en, ur or ar)"))
                        .about("Persists the given language as the active one."),
                ),
        )
        .subcommand(
            Command::new("keys")
                .arg(lang_arg())
                .about("Lists every translation key with its text."),
        )
        .subcommand(configure_templates_subcommand())
        .subcommand(
            Command::new("courses")
                .arg(
                    arg!(-c --category <VALUE> "Only show one category")
                        .long_help("One of all, tafseer, tajweed, arabic or islamic (defaults to all)."),
                )
                .arg(lang_arg())
                .about("Lists the courses on offer."),
        )
        .subcommand(
            Command::new("donate")
                .arg(arg!(--name <VALUE> "Donor name"))
                .arg(arg!(--email <VALUE> "Donor email"))
                .arg(arg!(--amount <VALUE> "Pledged amount"))
                .arg(arg!(--phone <VALUE> "Donor phone number"))
                .arg(arg!(--message <VALUE> "Optional note"))
                .about("Records a donation pledge.")
                .long_about(
                    "Validates the pledge and appends it to the donations file \
                    configured in the [storage] section.",
                ),
        )
        .subcommand(
            Command::new("contact")
                .arg(arg!(--name <VALUE> "Sender name"))
                .arg(arg!(--email <VALUE> "Sender email"))
                .arg(arg!(--phone <VALUE> "Sender phone number"))
                .arg(arg!(--message <VALUE> "Message body"))
                .about("Records a contact message and prints its WhatsApp link."),
        )
        .subcommand(
            Command::new("admissions")
                .arg(arg!(--name <VALUE> "Full name of the student"))
                .arg(option_arg("gender", "Preferred teacher", OptionKind::Gender))
                .arg(arg!(--age <VALUE> "Age of the student"))
                .arg(arg!(--phone <VALUE> "Contact number"))
                .arg(option_arg("timing", "Preferred timing", OptionKind::Timing))
                .arg(option_arg("experience", "Experience level", OptionKind::Experience))
                .arg(option_arg("course", "Course of interest", OptionKind::Course))
                .arg(option_arg("days", "Preferred days", OptionKind::Days))
                .arg(arg!(--message <VALUE> "Additional notes"))
                .about("Builds the admissions WhatsApp message link."),
        );

    #[cfg(feature = "server")]
    let app = app.subcommand(
        Command::new("serve")
            .arg(arg!(--host <VALUE> "Overrides the configured host"))
            .arg(arg!(-p --port <VALUE> "Overrides the configured port").value_parser(clap::value_parser!(u16)))
            .about("Starts the HTTP API.")
            .long_about(
                "Serves the translations, card templates, courses and the donation and \
                contact endpoints. Static files are served from web_dir when configured.",
            ),
    );

    app
}

fn lang_arg() -> Arg {
    arg!(-l --lang <VALUE> "Language code (en, ur or ar)")
}

/// An admissions select field, listing the accepted option values in its help.
fn option_arg(id: &'static str, help: &str, kind: OptionKind) -> Arg {
    let values: Vec<&str> = kind.options().iter().map(|option| option.value).collect();
    Arg::new(id)
        .long(id)
        .value_name("VALUE")
        .action(ArgAction::Set)
        .help(format!("{} ({})", help, values.join(", ")))
        .long_help(format!(
            "{}. One of: {}. Other values are sent as typed.",
            help,
            values.join(", ")
        ))
}

/// Configure the templates subcommands
fn configure_templates_subcommand() -> Command {
    Command::new("templates")
        .about("Browse the built-in ID card templates")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("list")
                .alias("ls")
                .arg(
                    arg!(-c --category <VALUE> "Only list one category")
                        .long_help("One of student, employee, membership or finance."),
                )
                .about("Lists the built-in templates."),
        )
        .subcommand(
            Command::new("show")
                .arg(arg!(<template> "The id of the template to display"))
                .about("Prints the resolved template as JSON."),
        )
        .subcommand(
            Command::new("render")
                .arg(arg!(<template> "The id of the template to render"))
                .arg(arg!(-s --side <VALUE> "Card side (front or back)").default_value("front"))
                .about("Renders one side of a card as SVG."),
        )
        .subcommand(Command::new("shapes").about("Lists the decorative shape presets."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        build_app(false).debug_assert();
    }

    #[test]
    fn test_translate_alias() {
        let matches = build_app(false)
            .try_get_matches_from(["alafra", "t", "nav_home", "hero_title", "-l", "ur"])
            .unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "translate");
        assert_eq!(args.get_many::<String>("key").unwrap().count(), 2);
        assert_eq!(args.get_one::<String>("lang").unwrap(), "ur");
    }

    #[test]
    fn test_admissions_help_lists_option_values() {
        let app = build_app(false);
        let admissions = app.find_subcommand("admissions").unwrap();
        let help = |id: &str| {
            admissions
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_help())
                .map(|help| help.to_string())
                .unwrap()
        };
        assert_eq!(help("gender"), "Preferred teacher (male, female, any)");
        assert!(help("timing").contains("sehar"));
        assert!(help("days").contains("weekends"));

        let matches = build_app(false)
            .try_get_matches_from(["alafra", "admissions", "--gender", "any", "--days", "custom"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(args.get_one::<String>("gender").unwrap(), "any");
    }
}
