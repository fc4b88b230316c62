use std::io::{self, IsTerminal};

use crate::{bootstrap::BootStrap, clap_app};
use alafra::{
    controller::SiteController,
    courses::CourseFilter,
    error::*,
    forms::AdmissionSubmission,
    i18n::Lang,
    records::{ContactRequest, DonationRequest},
};
use clap::ArgMatches;
use serde_json::Value;

pub struct App {
    pub matches: ArgMatches,
    interactive_output: bool,
}

fn optional(args: &ArgMatches, id: &str) -> Option<String> {
    args.get_one::<String>(id).cloned()
}

fn text(args: &ArgMatches, id: &str) -> String {
    optional(args, id).unwrap_or_default()
}

fn lang(args: &ArgMatches) -> Result<Option<Lang>> {
    args.get_one::<String>("lang")
        .map(|code| code.parse())
        .transpose()
}

impl App {
    pub fn new() -> Result<Self> {
        #[cfg(windows)]
        let _ = nu_ansi_term::enable_ansi_support();

        let interactive_output = std::io::stdout().is_terminal();

        Ok(App {
            matches: clap_app::build_app(interactive_output).get_matches(),
            interactive_output,
        })
    }

    /// Runs the `templates` subcommands.
    fn run_template_subcommand(&self, controller: &SiteController, args: &ArgMatches) -> Result<()> {
        let mut out = io::stdout().lock();
        match args.subcommand() {
            Some(("list", list_args)) => {
                let category = list_args
                    .get_one::<String>("category")
                    .map(|category| category.parse())
                    .transpose()?;
                controller.list_templates(&mut out, category)
            }
            Some(("show", show_args)) => controller.show_template(&mut out, &text(show_args, "template")),
            Some(("render", render_args)) => controller.render_template(
                &mut out,
                &text(render_args, "template"),
                text(render_args, "side").parse()?,
            ),
            Some(("shapes", _)) => controller.list_shapes(&mut out),
            _ => Err(Error::ArgsProcessingError(String::from(
                "unknown templates subcommand",
            ))),
        }
    }

    /// Start the application, bootstraps the configuration and forwards the request to the controller.
    ///
    /// # Returns
    /// A `Result` indicating whether the command succeeded.
    pub fn start(&self) -> Result<bool> {
        let bootstrap = BootStrap::new()?;
        let config = bootstrap.get_config();
        let controller = SiteController::new(config)?.colored(self.interactive_output);
        let mut out = io::stdout().lock();

        match self.matches.subcommand() {
            Some(("translate", args)) => {
                let keys: Vec<String> = args
                    .get_many::<String>("key")
                    .map(|keys| keys.cloned().collect())
                    .unwrap_or_default();
                controller.translate(&mut out, &keys, lang(args)?)?;
            }
            Some(("lang", args)) => match args.subcommand() {
                Some(("set", set_args)) => {
                    controller.set_language(&mut out, text(set_args, "code").parse()?)?
                }
                _ => controller.show_language(&mut out)?,
            },
            Some(("keys", args)) => {
                let lang = match lang(args)? {
                    Some(lang) => lang,
                    None => controller.locale()?.language(),
                };
                controller.list_keys(&mut out, lang)?;
            }
            Some(("templates", args)) => {
                drop(out);
                self.run_template_subcommand(&controller, args)?;
            }
            Some(("courses", args)) => {
                let filter = match args.get_one::<String>("category") {
                    Some(category) => category.parse()?,
                    None => CourseFilter::All,
                };
                let lang = match lang(args)? {
                    Some(lang) => lang,
                    None => controller.locale()?.language(),
                };
                controller.list_courses(&mut out, filter, lang)?;
            }
            Some(("donate", args)) => {
                let request = DonationRequest {
                    name: optional(args, "name"),
                    email: optional(args, "email"),
                    amount: optional(args, "amount").map(Value::String),
                    phone: optional(args, "phone"),
                    message: optional(args, "message"),
                };
                controller.donate(&mut out, request)?;
            }
            Some(("contact", args)) => {
                let request = ContactRequest {
                    name: optional(args, "name"),
                    email: optional(args, "email"),
                    phone: optional(args, "phone"),
                    message: optional(args, "message"),
                };
                controller.contact(&mut out, request)?;
            }
            Some(("admissions", args)) => {
                let submission = AdmissionSubmission {
                    full_name: text(args, "name"),
                    gender: text(args, "gender"),
                    age: text(args, "age"),
                    phone: text(args, "phone"),
                    timing: text(args, "timing"),
                    experience: text(args, "experience"),
                    course: text(args, "course"),
                    days: text(args, "days"),
                    message: text(args, "message"),
                };
                controller.admissions(&mut out, submission)?;
            }
            #[cfg(feature = "server")]
            Some(("serve", args)) => {
                drop(out);
                let mut config = config.clone();
                if let Some(host) = optional(args, "host") {
                    config.server.host = host;
                }
                if let Some(port) = args.get_one::<u16>("port") {
                    config.server.port = *port;
                }
                tokio::runtime::Runtime::new()?.block_on(alafra::server::serve(&config))?;
            }
            _ => {
                return Err(Error::ArgsProcessingError(String::from(
                    "a subcommand is required",
                )))
            }
        }
        Ok(true)
    }
}
