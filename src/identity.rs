//! Project identity derivation.
//!
//! Turns a free-form author and project name into the identifiers the
//! template rewrite needs: type name, project id, package path, and the
//! main source file name.

use heck::ToUpperCamelCase;
use serde::Serialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIdentity {
    /// Display name as entered, e.g. "Cool Mod".
    pub name: String,
    /// Author name as entered.
    pub author: String,
    /// Author segment used in the package path (lowercased, spaces removed).
    pub package_author: String,
    /// Main type name, e.g. "CoolMod".
    pub type_name: String,
    /// Lowercase project id, e.g. "coolmod".
    pub id: String,
    /// Package path, e.g. "com.alice.coolmod".
    pub package: String,
}

impl ProjectIdentity {
    pub fn derive(author: &str, name: &str) -> Result<Self> {
        validate_author(author)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation_invalid_argument(
                "name",
                "Project name cannot be empty",
                None,
            ));
        }

        let type_name = name.to_upper_camel_case();
        if type_name.is_empty() {
            return Err(Error::validation_invalid_argument(
                "name",
                "Project name must contain at least one letter or number",
                Some(name.to_string()),
            ));
        }

        let id = type_name.to_lowercase();
        let package_author = author.replace(' ', "").to_lowercase();
        let package = format!("com.{}.{}", package_author, id);

        Ok(Self {
            name: name.to_string(),
            author: author.trim().to_string(),
            package_author,
            type_name,
            id,
            package,
        })
    }

    /// File name of the main source file for this identity.
    pub fn main_file(&self, source_ext: &str) -> String {
        format!("{}{}", self.type_name, source_ext)
    }
}

/// An author name may contain letters, digits, and spaces, and must start
/// with a letter.
pub fn validate_author(author: &str) -> Result<()> {
    let trimmed = author.trim();

    let valid = !trimmed.is_empty()
        && trimmed.chars().all(|c| c.is_alphanumeric() || c == ' ')
        && trimmed.chars().next().is_some_and(|c| c.is_alphabetic());

    if valid {
        Ok(())
    } else {
        Err(Error::validation_invalid_argument(
            "author",
            "Author name may only contain letters, numbers, and spaces, and must start with a letter",
            Some(author.to_string()),
        ))
    }
}
