use serde::{Deserialize, Serialize};

use crate::report::AnalyzeRequest;

pub const HEADLINE_MAX_CHARS: usize = 200;
pub const BODY_MAX_CHARS: usize = 5000;

const EXAMPLE_HEADLINE: &str = "Scientists Discover Breakthrough in Quantum Computing";
const EXAMPLE_BODY: &str = "Researchers at MIT have announced a major breakthrough in quantum \
computing technology that could revolutionize data processing. The new quantum processor can \
perform calculations 1000 times faster than traditional computers, potentially solving complex \
problems in seconds that would take current supercomputers years to complete.";
const EXAMPLE_URL: &str = "https://example-tech-news.com/quantum-breakthrough";

/// Depth of analysis requested from the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    #[default]
    Basic,
    Advanced,
}

impl AnalysisMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::Basic => Self::Advanced,
            Self::Advanced => Self::Basic,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic Analysis",
            Self::Advanced => "Advanced AI",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Headline,
    Body,
    SourceUrl,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[FormField::Headline, FormField::Body, FormField::SourceUrl]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Headline => "Headline (Optional)",
            Self::Body => "Content Text *",
            Self::SourceUrl => "Source URL (Optional)",
        }
    }

    pub fn max_chars(self) -> Option<usize> {
        match self {
            Self::Headline => Some(HEADLINE_MAX_CHARS),
            Self::Body => Some(BODY_MAX_CHARS),
            Self::SourceUrl => None,
        }
    }
}

/// Text submitted for analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub headline: String,
    pub body: String,
    pub source_url: String,
}

impl FormInput {
    /// The bundled example article.
    pub fn example() -> Self {
        Self {
            headline: EXAMPLE_HEADLINE.to_string(),
            body: EXAMPLE_BODY.to_string(),
            source_url: EXAMPLE_URL.to_string(),
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Headline => &self.headline,
            FormField::Body => &self.body,
            FormField::SourceUrl => &self.source_url,
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Headline => &mut self.headline,
            FormField::Body => &mut self.body,
            FormField::SourceUrl => &mut self.source_url,
        }
    }

    /// Append a character, refusing it once the field is at its cap.
    pub fn push_char(&mut self, field: FormField, ch: char) -> bool {
        let cap = field.max_chars();
        let value = self.field_mut(field);
        if cap.is_some_and(|max| value.chars().count() >= max) {
            return false;
        }
        value.push(ch);
        true
    }

    pub fn backspace(&mut self, field: FormField) {
        self.field_mut(field).pop();
    }

    pub fn char_count(&self, field: FormField) -> usize {
        self.field(field).chars().count()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Body text is the only required field.
    pub fn has_body(&self) -> bool {
        !self.body.trim().is_empty()
    }

    pub fn to_request(&self, mode: AnalysisMode) -> AnalyzeRequest {
        AnalyzeRequest {
            text: self.body.clone(),
            headline: self.headline.clone(),
            url: self.source_url.clone(),
            mode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub fn all() -> &'static [ContactField] {
        &[
            ContactField::Name,
            ContactField::Email,
            ContactField::Subject,
            ContactField::Message,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name *",
            Self::Email => "Email *",
            Self::Subject => "Subject",
            Self::Message => "Message *",
        }
    }

    pub fn required(self) -> bool {
        !matches!(self, Self::Subject)
    }
}

/// The contact page form. Sending is simulated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    pub fn field_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        }
    }

    /// First required field left blank, if any.
    pub fn missing_required(&self) -> Option<ContactField> {
        ContactField::all()
            .iter()
            .copied()
            .find(|&f| f.required() && self.field(f).trim().is_empty())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
