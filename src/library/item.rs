//! Catalog items: books, movies, music, and games.
//!
//! All four kinds share the same shape. The catalog format attaches an
//! open-ended set of attributes to each item element, so everything beyond
//! the identifier lives in an ordered attribute map rather than fixed
//! fields.

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::parser::LibraryError;
use super::xml::Element;

/// The four media categories a library can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Book,
    Movie,
    Music,
    Game,
}

impl Kind {
    /// Resolve an element tag name to a kind. Tag names are matched
    /// case-insensitively; unknown names return `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        if tag.eq_ignore_ascii_case("book") {
            Some(Kind::Book)
        } else if tag.eq_ignore_ascii_case("movie") {
            Some(Kind::Movie)
        } else if tag.eq_ignore_ascii_case("music") {
            Some(Kind::Music)
        } else if tag.eq_ignore_ascii_case("game") {
            Some(Kind::Game)
        } else {
            None
        }
    }

    /// Canonical element tag name for this kind
    pub fn tag(&self) -> &'static str {
        match self {
            Kind::Book => "book",
            Kind::Movie => "movie",
            Kind::Music => "music",
            Kind::Game => "game",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Cover image sizes stored alongside the library file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverSize {
    Large,
    Medium,
    Plain,
    #[default]
    Small,
}

impl CoverSize {
    /// Name of the per-size cover directory under `Images/`
    fn folder(&self) -> &'static str {
        match self {
            CoverSize::Large => "Large Covers",
            CoverSize::Medium => "Medium Covers",
            CoverSize::Plain => "Plain Covers",
            CoverSize::Small => "Small Covers",
        }
    }
}

/// A single catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Media category of this item
    pub kind: Kind,

    /// Unique identifier, from the element's `uuid` attribute
    pub uuid: String,

    /// Every attribute of the source element, name verbatim, document order
    pub attributes: IndexMap<String, String>,

    /// Text of the `description` child element, empty when absent
    pub description: String,

    /// Text of the `notes` child element, empty when absent
    pub notes: String,

    /// Nested recommendation items, document order. These form a tree
    /// reachable only from their parent; they are never part of the
    /// library's top-level item map.
    pub recommendations: Vec<Item>,

    /// Path of the library file this item was loaded from, kept to
    /// compute cover image locations
    pub source_path: PathBuf,
}

impl Item {
    /// Create an empty item of the given kind for a library file
    pub fn new(kind: Kind, source_path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            uuid: String::new(),
            attributes: IndexMap::new(),
            description: String::new(),
            notes: String::new(),
            recommendations: Vec::new(),
            source_path: source_path.into(),
        }
    }

    /// Populate this item from its source element.
    ///
    /// Copies every attribute (the `uuid` attribute also becomes the
    /// identifier), reads `description` and `notes`, and recursively loads
    /// every child of any `recommendations` container. A recommendation
    /// whose tag is not a known kind aborts the load with
    /// [`LibraryError::UnknownItemType`].
    pub fn load_information(&mut self, element: &Element) -> Result<(), LibraryError> {
        for (name, value) in &element.attributes {
            self.attributes.insert(name.clone(), value.clone());
        }
        self.uuid = element.attr("uuid").unwrap_or_default().to_string();

        self.description = element.child_text("description").unwrap_or_default().to_string();
        self.notes = element.child_text("notes").unwrap_or_default().to_string();

        for container in element.children_named("recommendations") {
            for child in &container.children {
                let kind = Kind::from_tag(&child.tag)
                    .ok_or_else(|| LibraryError::UnknownItemType(child.tag.clone()))?;
                let mut item = Item::new(kind, self.source_path.clone());
                item.load_information(child)?;
                self.recommendations.push(item);
            }
        }

        Ok(())
    }

    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Location of the cover image for this item at the given size.
    ///
    /// Covers live next to the library file under
    /// `Images/<Size> Covers/<uuid>`. This is pure path construction; the
    /// file is never checked for existence.
    pub fn cover_location(&self, size: CoverSize) -> PathBuf {
        let dir = self.source_path.parent().unwrap_or_else(|| Path::new(""));
        dir.join("Images").join(size.folder()).join(&self.uuid)
    }
}
