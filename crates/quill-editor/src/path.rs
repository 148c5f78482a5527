//! Addresses of editable fields and image sequences within a page.
//!
//! Both types have a compact string form used by the admin API:
//!
//! | string                     | value                                           |
//! |----------------------------|-------------------------------------------------|
//! | `name`                     | `FieldPath::PageName`                           |
//! | `title`                    | `FieldPath::PageTitle`                          |
//! | `featured.title`           | `FieldPath::Featured(TextField::Title)`         |
//! | `sections.7.description`   | `FieldPath::Section { id: "7", field: Description }` |
//! | `banner`                   | `ImageTarget::Banner`                           |
//! | `featured`                 | `ImageTarget::Featured`                         |
//! | `sections.7`               | `ImageTarget::Section("7")`                     |

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::EditError;

/// Text field of a featured or content section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextField {
    Title,
    Description,
}

impl TextField {
    fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "title" => Some(Self::Title),
            "description" => Some(Self::Description),
            _ => None,
        }
    }
}

/// A string field anywhere in the page tree.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum FieldPath {
    /// Page display name.
    PageName,
    /// Page heading.
    PageTitle,
    /// Field of the featured section.
    Featured(TextField),
    /// Field of a content section.
    Section { id: String, field: TextField },
}

impl FieldPath {
    /// Path to a content section field.
    #[must_use]
    pub fn section(id: impl Into<String>, field: TextField) -> Self {
        Self::Section {
            id: id.into(),
            field,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageName => f.write_str("name"),
            Self::PageTitle => f.write_str("title"),
            Self::Featured(field) => write!(f, "featured.{}", field.as_str()),
            Self::Section { id, field } => write!(f, "sections.{id}.{}", field.as_str()),
        }
    }
}

impl FromStr for FieldPath {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EditError::InvalidPath(s.to_owned());
        match s {
            "name" => return Ok(Self::PageName),
            "title" => return Ok(Self::PageTitle),
            _ => {}
        }
        if let Some(field) = s.strip_prefix("featured.") {
            return TextField::parse(field).map(Self::Featured).ok_or_else(invalid);
        }
        let rest = s.strip_prefix("sections.").ok_or_else(invalid)?;
        let (id, field) = rest.rsplit_once('.').ok_or_else(invalid)?;
        if id.is_empty() {
            return Err(invalid());
        }
        let field = TextField::parse(field).ok_or_else(invalid)?;
        Ok(Self::section(id, field))
    }
}

impl TryFrom<String> for FieldPath {
    type Error = EditError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An image sequence (or the banner slot) within a page.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ImageTarget {
    /// The optional page banner; holds at most one image.
    Banner,
    /// Images of the featured section.
    Featured,
    /// Images of a content section.
    Section(String),
}

impl fmt::Display for ImageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Banner => f.write_str("banner"),
            Self::Featured => f.write_str("featured"),
            Self::Section(id) => write!(f, "sections.{id}"),
        }
    }
}

impl FromStr for ImageTarget {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "banner" => Ok(Self::Banner),
            "featured" => Ok(Self::Featured),
            _ => match s.strip_prefix("sections.") {
                Some(id) if !id.is_empty() => Ok(Self::Section(id.to_owned())),
                _ => Err(EditError::InvalidPath(s.to_owned())),
            },
        }
    }
}

impl TryFrom<String> for ImageTarget {
    type Error = EditError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_parse() {
        assert_eq!("name".parse(), Ok(FieldPath::PageName));
        assert_eq!("title".parse(), Ok(FieldPath::PageTitle));
        assert_eq!(
            "featured.description".parse(),
            Ok(FieldPath::Featured(TextField::Description))
        );
        assert_eq!(
            "sections.1700000000000.title".parse(),
            Ok(FieldPath::section("1700000000000", TextField::Title))
        );
    }

    #[test]
    fn test_field_path_display_matches_parse() {
        let paths = [
            FieldPath::PageName,
            FieldPath::Featured(TextField::Title),
            FieldPath::section("2", TextField::Description),
        ];
        for path in paths {
            assert_eq!(path.to_string().parse::<FieldPath>(), Ok(path));
        }
    }

    #[test]
    fn test_field_path_rejects_garbage() {
        for bad in ["", "featured", "featured.body", "sections..title", "sections.1", "banner"] {
            assert!(
                matches!(bad.parse::<FieldPath>(), Err(EditError::InvalidPath(_))),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn test_image_target_parse() {
        assert_eq!("banner".parse(), Ok(ImageTarget::Banner));
        assert_eq!("featured".parse(), Ok(ImageTarget::Featured));
        assert_eq!("sections.2".parse(), Ok(ImageTarget::Section("2".to_owned())));
        assert!("sections.".parse::<ImageTarget>().is_err());
        assert!("title".parse::<ImageTarget>().is_err());
    }

    #[test]
    fn test_deserialize_from_json_string() {
        #[derive(Deserialize)]
        struct Body {
            path: FieldPath,
            target: ImageTarget,
        }

        let body: Body =
            serde_json::from_str(r#"{"path": "featured.title", "target": "sections.9"}"#).unwrap();

        assert_eq!(body.path, FieldPath::Featured(TextField::Title));
        assert_eq!(body.target, ImageTarget::Section("9".to_owned()));
    }
}
