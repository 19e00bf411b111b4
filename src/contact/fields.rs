//! Contact form fields and their validation rules.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    Name,
    Email,
    Message,
}

impl FieldId {
    pub const ALL: [FieldId; 3] = [FieldId::Name, FieldId::Email, FieldId::Message];

    pub fn label(self) -> &'static str {
        match self {
            FieldId::Name => "Name",
            FieldId::Email => "Email",
            FieldId::Message => "Message",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FieldId::Name => "John Doe",
            FieldId::Email => "john@example.com",
            FieldId::Message => "Tell me about your project...",
        }
    }

    pub fn next(self) -> Option<FieldId> {
        match self {
            FieldId::Name => Some(FieldId::Email),
            FieldId::Email => Some(FieldId::Message),
            FieldId::Message => None,
        }
    }

    pub fn prev(self) -> Option<FieldId> {
        match self {
            FieldId::Name => None,
            FieldId::Email => Some(FieldId::Name),
            FieldId::Message => Some(FieldId::Email),
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormFields {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn get(&self, id: FieldId) -> &str {
        match id {
            FieldId::Name => &self.name,
            FieldId::Email => &self.email,
            FieldId::Message => &self.message,
        }
    }

    pub fn get_mut(&mut self, id: FieldId) -> &mut String {
        match id {
            FieldId::Name => &mut self.name,
            FieldId::Email => &mut self.email,
            FieldId::Message => &mut self.message,
        }
    }

    pub fn is_empty(&self) -> bool {
        FieldId::ALL.iter().all(|id| self.get(*id).is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FieldId,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A single row of the validation table.
pub struct FieldRule {
    pub field: FieldId,
    pub check: fn(&str) -> bool,
    pub message: &'static str,
}

fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

fn email_shaped(value: &str) -> bool {
    EMAIL_REGEX.is_match(value.trim())
}

pub static FIELD_RULES: [FieldRule; 3] = [
    FieldRule {
        field: FieldId::Name,
        check: not_blank,
        message: "Please enter your name",
    },
    FieldRule {
        field: FieldId::Email,
        check: email_shaped,
        message: "Please enter a valid email address",
    },
    FieldRule {
        field: FieldId::Message,
        check: not_blank,
        message: "Please enter a message",
    },
];

/// Run every rule and collect all failures in table order.
pub fn validate(fields: &FormFields) -> Vec<FieldError> {
    FIELD_RULES
        .iter()
        .filter(|rule| !(rule.check)(fields.get(rule.field)))
        .map(|rule| FieldError {
            field: rule.field,
            message: rule.message,
        })
        .collect()
}
