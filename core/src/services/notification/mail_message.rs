//! HTML mail bodies rendered with Handlebars
//!
//! Templates are compiled into the binary. All visible text comes from the
//! message catalog so a mail follows the configured language.

use chrono::{Datelike, Utc};
use handlebars::Handlebars;
use serde_json::{json, Value};

use crate::domain::value_objects::{ContactMessage, DonationDetails};
use crate::errors::MailError;
use crate::i18n::Messages;

const REGISTRATION: &str = "registration";
const PASSWORD_RESET: &str = "password_reset";
const DONATION: &str = "donation";
const CONTACT: &str = "contact";

const TEMPLATES: [(&str, &str); 4] = [
    (REGISTRATION, include_str!("templates/registration.hbs")),
    (PASSWORD_RESET, include_str!("templates/password_reset.hbs")),
    (DONATION, include_str!("templates/donation.hbs")),
    (CONTACT, include_str!("templates/contact.hbs")),
];

/// Renders the bodies of every mail the application sends
pub struct MailMessageBuilder {
    handlebars: Handlebars<'static>,
    messages: Messages,
}

impl MailMessageBuilder {
    /// Compile the embedded templates
    ///
    /// # Returns
    /// * `Err(MailError::Encoding)` - A template failed to compile
    pub fn new(messages: Messages) -> Result<Self, MailError> {
        let mut handlebars = Handlebars::new();
        handlebars
            .register_partial("styles", include_str!("templates/styles.hbs"))
            .map_err(|e| MailError::Encoding(format!("styles partial: {}", e)))?;

        for (name, source) in TEMPLATES {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| MailError::Encoding(format!("{} template: {}", name, e)))?;
        }

        Ok(Self {
            handlebars,
            messages,
        })
    }

    /// Account verification mail linking to `url`
    pub fn registration(&self, url: &str) -> Result<String, MailError> {
        let app_name = self.messages.get("email.app.name");
        let data = json!({
            "heading": self.messages.get("mail.registration.heading"),
            "greeting": self.messages.get("mail.greeting"),
            "body": self.messages.format("mail.registration.body", &[&app_name]),
            "link_text": self.messages.get("mail.registration.link"),
            "url": url,
        });
        self.render(REGISTRATION, data)
    }

    /// Password reset mail linking to `url`
    pub fn password_reset(&self, url: &str) -> Result<String, MailError> {
        let data = json!({
            "heading": self.messages.get("mail.password.reset.heading"),
            "greeting": self.messages.get("mail.greeting"),
            "body": self.messages.get("mail.password.reset.body"),
            "link_text": self.messages.get("mail.password.reset.link"),
            "url": url,
        });
        self.render(PASSWORD_RESET, data)
    }

    /// Thank-you mail summarising a submitted donation
    pub fn donation(
        &self,
        donor_name: Option<&str>,
        details: &DonationDetails,
    ) -> Result<String, MailError> {
        let donor = donor_name
            .map(str::to_string)
            .unwrap_or_else(|| self.messages.get("mail.donation.anonymous"));
        let institution = details
            .institution
            .as_ref()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| self.messages.get("mail.donation.no.institution"));
        let donation = &details.donation;
        let comment = donation
            .pick_up_comment
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.messages.get("mail.donation.no.comment"));

        let data = json!({
            "heading": self.messages.get("mail.donation.heading"),
            "greeting": self.messages.format("mail.donation.greeting", &[&donor]),
            "body": self.messages.format("mail.donation.body", &[&institution]),
            "labels": {
                "details": self.messages.get("mail.donation.details"),
                "quantity": self.messages.get("mail.label.quantity"),
                "categories": self.messages.get("mail.label.categories"),
                "address": self.messages.get("mail.label.address"),
                "pickup": self.messages.get("mail.label.pickup"),
                "phone": self.messages.get("mail.label.phone"),
                "comment": self.messages.get("mail.label.comment"),
            },
            "quantity": donation.quantity,
            "categories": details.category_names(),
            "street": donation.street,
            "city": donation.city,
            "zip_code": donation.zip_code,
            "pick_up_date": donation.pick_up_date.format("%Y-%m-%d").to_string(),
            "pick_up_time": donation.pick_up_time.format("%H:%M").to_string(),
            "phone_number": donation.phone_number,
            "comment": comment,
        });
        self.render(DONATION, data)
    }

    /// Contact form message for the application inbox
    pub fn contact(&self, contact: &ContactMessage) -> Result<String, MailError> {
        let email = contact
            .email
            .clone()
            .unwrap_or_else(|| self.messages.get("mail.contact.no.email"));
        let data = json!({
            "heading": self.messages.get("mail.contact.heading"),
            "labels": {
                "first_name": self.messages.get("mail.label.first.name"),
                "last_name": self.messages.get("mail.label.last.name"),
                "email": self.messages.get("mail.label.email"),
                "message": self.messages.get("mail.label.message"),
            },
            "first_name": contact.first_name,
            "last_name": contact.last_name,
            "email": email,
            "message": contact.message,
        });
        self.render(CONTACT, data)
    }

    fn render(&self, template: &str, mut data: Value) -> Result<String, MailError> {
        if let Value::Object(map) = &mut data {
            map.insert("app_name".into(), json!(self.messages.get("email.app.name")));
            map.insert("signature".into(), json!(self.messages.get("mail.signature")));
            map.insert("footer".into(), json!(self.messages.get("mail.footer")));
            map.insert("year".into(), json!(Utc::now().year()));
        }

        self.handlebars
            .render(template, &data)
            .map_err(|e| MailError::Encoding(format!("{} template: {}", template, e)))
    }
}
