//! On-disk catalogue document shapes.
//!
//! Two layouts are accepted for every file, in JSON or YAML:
//!
//! - a structured map, where top-level string values are root-section
//!   messages and top-level objects are sections of `key: message` pairs;
//! - a flat list of `{ id, other, one }` records whose `id` is a
//!   fully-qualified key.
//!
//! A message is either a plain string or an object with an `other` form and
//! an optional `one` form. An object holding only `one`/`other` string fields
//! is therefore read as a plural message, never as a section.

use super::{LocaleSections, Message};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Serialisation format inferred from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Format {
    Json,
    Yaml,
}

impl Format {
    pub(super) fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    fn parse<T: for<'de> Deserialize<'de>>(self, source: &str) -> Result<T, String> {
        match self {
            Self::Json => serde_json::from_str(source).map_err(|err| err.to_string()),
            Self::Yaml => serde_saphyr::from_str(source).map_err(|err| err.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PluralForms {
    other: String,
    #[serde(default)]
    one: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MessageValue {
    Text(String),
    Plural(PluralForms),
}

impl MessageValue {
    fn into_message(self, id: &str) -> Message {
        match self {
            Self::Text(text) => Message::new(id, text),
            Self::Plural(PluralForms { other, one }) => {
                let message = Message::new(id, other);
                match one {
                    Some(singular) => message.with_singular(singular),
                    None => message,
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TopLevel {
    Message(MessageValue),
    Section(BTreeMap<String, MessageValue>),
}

#[derive(Debug, Deserialize)]
struct Record {
    id: String,
    other: String,
    #[serde(default)]
    one: Option<String>,
}

impl Record {
    fn into_message(self) -> (String, Message) {
        let message = Message::new(self.id.as_str(), self.other);
        let with_singular = match self.one {
            Some(singular) => message.with_singular(singular),
            None => message,
        };
        (self.id, with_singular)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LocaleDocument {
    Records(Vec<Record>),
    Map(BTreeMap<String, TopLevel>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SectionDocument {
    Records(Vec<Record>),
    Map(BTreeMap<String, MessageValue>),
}

/// Parse a whole-locale document.
pub(super) fn parse_locale(format: Format, source: &str) -> Result<LocaleSections, String> {
    let document: LocaleDocument = format.parse(source)?;
    let mut sections = LocaleSections::default();
    match document {
        LocaleDocument::Records(records) => {
            for record in records {
                let (id, message) = record.into_message();
                sections.insert_qualified(&id, message);
            }
        }
        LocaleDocument::Map(entries) => {
            for (name, entry) in entries {
                match entry {
                    TopLevel::Message(value) => {
                        sections.insert_qualified(&name, value.into_message(&name));
                    }
                    TopLevel::Section(messages) => {
                        let section = sections.section_mut(&name);
                        for (key, value) in messages {
                            section.insert(value.into_message(&key));
                        }
                    }
                }
            }
        }
    }
    Ok(sections)
}

/// Parse a document holding the contents of the single section `name`.
///
/// Record identifiers are relative to the section.
pub(super) fn parse_section(
    format: Format,
    source: &str,
    name: &str,
) -> Result<LocaleSections, String> {
    let document: SectionDocument = format.parse(source)?;
    let mut sections = LocaleSections::default();
    let section = sections.section_mut(name);
    match document {
        SectionDocument::Records(records) => {
            for record in records {
                let (_, message) = record.into_message();
                section.insert(message);
            }
        }
        SectionDocument::Map(messages) => {
            for (key, value) in messages {
                section.insert(value.into_message(&key));
            }
        }
    }
    Ok(sections)
}
