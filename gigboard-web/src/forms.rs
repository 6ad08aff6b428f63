//! Form input parsing
//!
//! Submissions arrive as urlencoded key/value pairs. `FormFields` keeps every
//! pair (genres repeat), and each operation has an explicit input struct that
//! is validated before anything touches the store.
//!
//! Checkbox flags follow the browser convention: the field present with any
//! value means true, absent means false.

use chrono::{DateTime, Utc};
use gigboard_common::time::parse_start_time;
use serde::Deserialize;
use thiserror::Error;

/// Validation failure for a submitted form
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field must not be blank: {0}")]
    Blank(&'static str),

    #[error("Invalid value for {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },
}

/// All submitted key/value pairs, in submission order
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl From<Vec<(String, String)>> for FormFields {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }
}

impl FormFields {
    /// First value submitted under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First value under `name`, or a validation error when absent
    pub fn required(&self, name: &'static str) -> Result<&str, ValidationError> {
        self.get(name).ok_or(ValidationError::MissingField(name))
    }

    /// Whether `name` was submitted at all
    pub fn is_present(&self, name: &str) -> bool {
        self.pairs.iter().any(|(key, _)| key == name)
    }

    /// Every non-blank value submitted under `name`, trimmed, in order
    pub fn get_all(&self, name: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn required_owned(&self, name: &'static str) -> Result<String, ValidationError> {
        self.required(name).map(|value| value.trim().to_string())
    }

    fn required_name(&self) -> Result<String, ValidationError> {
        let name = self.required_owned("name")?;
        if name.is_empty() {
            return Err(ValidationError::Blank("name"));
        }
        Ok(name)
    }

    /// Required free text where an empty submission means "none"
    fn required_optional_text(&self, name: &'static str) -> Result<Option<String>, ValidationError> {
        let value = self.required_owned(name)?;
        Ok((!value.is_empty()).then_some(value))
    }

    fn required_id(&self, name: &'static str) -> Result<i64, ValidationError> {
        let raw = self.required(name)?;
        raw.trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidField {
                field: name,
                value: raw.to_string(),
            })
    }
}

/// Search box submission; an absent term searches for everything
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// Venue create/edit submission
#[derive(Debug, Clone, PartialEq)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub website: String,
    pub facebook_link: String,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueInput {
    pub fn from_form(fields: &FormFields) -> Result<Self, ValidationError> {
        Ok(Self {
            name: fields.required_name()?,
            city: fields.required_owned("city")?,
            state: fields.required_owned("state")?,
            address: fields.required_owned("address")?,
            phone: fields.required_owned("phone")?,
            image_link: fields.required_owned("image_link")?,
            website: fields.required_owned("website")?,
            facebook_link: fields.required_owned("facebook_link")?,
            genres: fields.get_all("genres"),
            seeking_talent: fields.is_present("seeking_talent"),
            seeking_description: fields.required_optional_text("seeking_description")?,
        })
    }
}

/// Artist create/edit submission
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub website: String,
    pub facebook_link: String,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistInput {
    pub fn from_form(fields: &FormFields) -> Result<Self, ValidationError> {
        Ok(Self {
            name: fields.required_name()?,
            city: fields.required_owned("city")?,
            state: fields.required_owned("state")?,
            phone: fields.required_owned("phone")?,
            image_link: fields.required_owned("image_link")?,
            website: fields.required_owned("website")?,
            facebook_link: fields.required_owned("facebook_link")?,
            genres: fields.get_all("genres"),
            seeking_venue: fields.is_present("seeking_venue"),
            seeking_description: fields.required_optional_text("seeking_description")?,
        })
    }
}

/// Show create submission
#[derive(Debug, Clone, PartialEq)]
pub struct ShowInput {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

impl ShowInput {
    pub fn from_form(fields: &FormFields) -> Result<Self, ValidationError> {
        let artist_id = fields.required_id("artist_id")?;
        let venue_id = fields.required_id("venue_id")?;

        let raw_start = fields.required("start_time")?;
        let start_time = parse_start_time(raw_start).ok_or_else(|| ValidationError::InvalidField {
            field: "start_time",
            value: raw_start.to_string(),
        })?;

        Ok(Self {
            artist_id,
            venue_id,
            start_time,
        })
    }
}
