//! Site forms that are delivered as prefilled WhatsApp messages.

mod admissions;
mod contact;
mod whatsapp;

pub use admissions::{
    format_option_label, format_option_label_for_message, AdmissionSubmission, AdmissionWizard,
    FormOption, OptionKind, Stage, GUIDELINES,
};
pub use contact::{ContactForm, RohaniRequest};
pub use whatsapp::{sanitize_number, whatsapp_link};
