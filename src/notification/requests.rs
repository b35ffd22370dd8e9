//! Request types for each channel, literal and templated.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{NotificationError, Result};
use crate::template::TemplateVariables;

fn require(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(NotificationError::Validation(format!("{} must not be blank", field)));
    }
    Ok(())
}

fn require_address(value: &str, field: &str) -> Result<()> {
    require(value, field)?;
    let (local, domain) = value.split_once('@').unwrap_or(("", ""));
    if local.is_empty() || domain.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(NotificationError::Validation(format!(
            "{} is not a valid email address: {}",
            field, value
        )));
    }
    Ok(())
}

/// File attached to an email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

impl EmailAttachment {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            content: content.into(),
        }
    }
}

/// Email with a literal body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRequest {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub cc: Vec<String>,
    #[serde(default)]
    pub bcc: Vec<String>,
    pub subject: String,
    /// Plain text content
    #[serde(default)]
    pub text: Option<String>,
    /// HTML content
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub attachments: Vec<EmailAttachment>,
}

impl EmailRequest {
    pub fn new(from: impl Into<String>, to: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            subject: subject.into(),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn add_cc(&mut self, address: impl Into<String>) {
        self.cc.push(address.into());
    }

    pub fn add_bcc(&mut self, address: impl Into<String>) {
        self.bcc.push(address.into());
    }

    pub fn add_attachment(&mut self, attachment: EmailAttachment) {
        self.attachments.push(attachment);
    }

    pub fn validate(&self) -> Result<()> {
        require_address(&self.from, "from")?;
        require_address(&self.to, "to")?;
        for address in &self.cc {
            require_address(address, "cc")?;
        }
        for address in &self.bcc {
            require_address(address, "bcc")?;
        }
        require(&self.subject, "subject")
    }
}

/// Email whose HTML body is rendered from a template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplateRequest {
    pub template_id: String,
    #[serde(default)]
    pub template_variables: TemplateVariables,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub cc: Vec<String>,
    #[serde(default)]
    pub bcc: Vec<String>,
    pub subject: String,
}

impl EmailTemplateRequest {
    pub fn new(
        template_id: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            template_id: template_id.into(),
            from: from.into(),
            to: to.into(),
            subject: subject.into(),
            ..Default::default()
        }
    }

    pub fn variable(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.template_variables.insert(name.into(), value);
        self
    }

    /// Build the literal request carrying the rendered body
    pub fn into_email_request(self, html: String) -> EmailRequest {
        EmailRequest {
            from: self.from,
            to: self.to,
            cc: self.cc,
            bcc: self.bcc,
            subject: self.subject,
            text: None,
            html: Some(html),
            attachments: Vec::new(),
        }
    }
}

/// SMS with a literal message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsRequest {
    pub phone_number: String,
    pub message: String,
}

impl SmsRequest {
    pub fn new(phone_number: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            message: message.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require(&self.phone_number, "phone_number")?;
        require(&self.message, "message")
    }
}

/// SMS whose message is rendered from a template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmsTemplateRequest {
    pub template_id: String,
    #[serde(default)]
    pub template_variables: TemplateVariables,
    pub phone_number: String,
}

impl SmsTemplateRequest {
    pub fn new(template_id: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            template_variables: TemplateVariables::new(),
            phone_number: phone_number.into(),
        }
    }

    pub fn variable(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.template_variables.insert(name.into(), value);
        self
    }

    pub fn into_sms_request(self, message: String) -> SmsRequest {
        SmsRequest {
            phone_number: self.phone_number,
            message,
        }
    }
}

/// Push notification with a literal body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushRequest {
    /// Device registration token
    pub token: String,
    pub title: String,
    pub body: String,
    /// Extra key/value payload delivered with the notification
    #[serde(default)]
    pub data: HashMap<String, String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl PushRequest {
    pub fn new(token: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            title: title.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        require(&self.token, "token")
    }
}

/// Push notification whose body is rendered from a template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushTemplateRequest {
    pub template_id: String,
    #[serde(default)]
    pub template_variables: TemplateVariables,
    pub token: String,
    pub title: String,
    #[serde(default)]
    pub data: HashMap<String, String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl PushTemplateRequest {
    pub fn new(
        template_id: impl Into<String>,
        token: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            template_id: template_id.into(),
            token: token.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn variable(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.template_variables.insert(name.into(), value);
        self
    }

    pub fn into_push_request(self, body: String) -> PushRequest {
        PushRequest {
            token: self.token,
            title: self.title,
            body,
            data: self.data,
            image_url: self.image_url,
        }
    }
}
