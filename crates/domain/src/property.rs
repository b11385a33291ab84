use std::fmt::{Display, Formatter};

use serde_json::Value;

use crate::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyId(String);

impl PropertyId {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::InvalidPropertyId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PropertyId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The stored image column as the data store handed it over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImagePayload {
    #[default]
    Absent,
    /// Serialized list of image descriptors, expected to be a JSON array.
    Text(String),
    /// The column held bytes that could not be read as text.
    Unreadable(String),
}

/// One active listing as it comes out of the data store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRecord {
    pub id: PropertyId,
    pub slug: String,
    pub title: String,
    pub images: ImagePayload,
    pub featured: bool,
}

/// Why a record's image payload could not be read as a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayloadError {
    NotText(String),
    NotJson(String),
    NotAList(&'static str),
}

impl Display for ImagePayloadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotText(reason) => write!(f, "not readable as text: {reason}"),
            Self::NotJson(reason) => write!(f, "not valid JSON: {reason}"),
            Self::NotAList(kind) => write!(f, "expected a JSON array, found {kind}"),
        }
    }
}

/// Parses a serialized image list into its descriptors.
///
/// Blank text and JSON `null` are an empty list. Elements are not inspected;
/// a descriptor may be a bare URL string or an object.
pub fn parse_image_list(raw: &str) -> Result<Vec<Value>, ImagePayloadError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(raw)
        .map_err(|error| ImagePayloadError::NotJson(error.to_string()))?;

    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items),
        Value::Bool(_) => Err(ImagePayloadError::NotAList("a boolean")),
        Value::Number(_) => Err(ImagePayloadError::NotAList("a number")),
        Value::String(_) => Err(ImagePayloadError::NotAList("a string")),
        Value::Object(_) => Err(ImagePayloadError::NotAList("an object")),
    }
}

/// A record together with the number of images it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedProperty {
    pub record: PropertyRecord,
    pub image_count: usize,
    /// Set when the payload was unreadable and counted as zero images.
    pub malformed_images: Option<ImagePayloadError>,
}

impl ClassifiedProperty {
    pub fn from_record(record: PropertyRecord) -> Self {
        let parsed = match &record.images {
            ImagePayload::Absent => Ok(Vec::new()),
            ImagePayload::Text(raw) => parse_image_list(raw),
            ImagePayload::Unreadable(reason) => Err(ImagePayloadError::NotText(reason.clone())),
        };

        match parsed {
            Ok(images) => Self {
                image_count: images.len(),
                record,
                malformed_images: None,
            },
            Err(error) => Self {
                record,
                image_count: 0,
                malformed_images: Some(error),
            },
        }
    }

    pub fn has_images(&self) -> bool {
        self.image_count > 0
    }
}
