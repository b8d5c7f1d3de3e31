//! Library parsing.
//!
//! Parsing is two passes over one in-memory document. Pass one walks the
//! `items` container and materializes every enabled item (recursing into
//! its recommendations) into an identifier-keyed map. Pass two walks the
//! `shelves` container and resolves each shelf's references against the
//! map built in pass one; references that do not resolve are dropped.

use std::fs;
use std::io;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::item::{Item, Kind};
use super::shelf::Shelf;
use super::xml::{self, XmlError};

/// Errors surfaced by [`Library::parse`]
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The library file does not exist or cannot be read
    #[error("library file is not readable: {path}")]
    FileNotReadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The library file is not well-formed XML
    #[error("library file is not well-formed XML")]
    MalformedDocument(#[from] XmlError),

    /// An item or recommendation element's tag is not a known kind
    #[error("unknown item type: {0}")]
    UnknownItemType(String),
}

/// Which media categories to materialize during parsing.
///
/// Applies only to top-level item elements. Recommendation trees always
/// load in full, whatever the filter says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    pub books: bool,
    pub movies: bool,
    pub music: bool,
    pub games: bool,
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl CategoryFilter {
    /// Every category enabled
    pub fn all() -> Self {
        Self {
            books: true,
            movies: true,
            music: true,
            games: true,
        }
    }

    /// Every category disabled
    pub fn none() -> Self {
        Self {
            books: false,
            movies: false,
            music: false,
            games: false,
        }
    }

    /// Enable exactly the given kinds
    pub fn only(kinds: &[Kind]) -> Self {
        kinds.iter().fold(Self::none(), |filter, kind| filter.with(*kind))
    }

    /// Enable one more kind
    pub fn with(mut self, kind: Kind) -> Self {
        match kind {
            Kind::Book => self.books = true,
            Kind::Movie => self.movies = true,
            Kind::Music => self.music = true,
            Kind::Game => self.games = true,
        }
        self
    }

    /// Check if a kind is enabled
    pub fn includes(&self, kind: Kind) -> bool {
        match kind {
            Kind::Book => self.books,
            Kind::Movie => self.movies,
            Kind::Music => self.music,
            Kind::Game => self.games,
        }
    }
}

/// A parsed media library: the items and the shelves grouping them.
///
/// Construct with the path of the library file, adjust [`Library::filter`]
/// if only some categories are wanted, then call [`Library::parse`].
#[derive(Debug, Clone, Serialize)]
pub struct Library {
    /// Path of the library XML file
    pub path: PathBuf,

    /// Categories to materialize; set before calling `parse`
    pub filter: CategoryFilter,

    /// All top-level items, keyed by identifier, in document order
    pub items: IndexMap<String, Item>,

    /// All shelves, keyed by name, in document order
    pub shelves: IndexMap<String, Shelf>,
}

impl Library {
    /// Create an unparsed library for the given file, all categories
    /// enabled
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            filter: CategoryFilter::default(),
            items: IndexMap::new(),
            shelves: IndexMap::new(),
        }
    }

    /// Construct an empty item of the kind matching an element tag name.
    ///
    /// Fails with [`LibraryError::UnknownItemType`] when the tag is not
    /// one of the four known kinds.
    pub fn item_for_tag(&self, tag: &str) -> Result<Item, LibraryError> {
        let kind =
            Kind::from_tag(tag).ok_or_else(|| LibraryError::UnknownItemType(tag.to_string()))?;
        Ok(Item::new(kind, &self.path))
    }

    /// Parse the library file into `items` and `shelves`.
    ///
    /// Safe to call once. A repeat call does not reset the maps: it merges
    /// into them, last write wins per identifier and per shelf name. A
    /// failed call leaves the library partially populated; treat the
    /// instance as unusable afterwards.
    pub fn parse(&mut self) -> Result<(), LibraryError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| {
            LibraryError::FileNotReadable {
                path: self.path.clone(),
                source,
            }
        })?;

        self.parse_contents(&contents)
    }

    fn parse_contents(&mut self, contents: &str) -> Result<(), LibraryError> {
        let document = xml::parse_document(contents)?;

        if let Some(items) = document.child("items") {
            for element in &items.children {
                // Disabled categories skip before instantiation; unknown
                // tags still fail in item_for_tag below.
                if let Some(kind) = Kind::from_tag(&element.tag) {
                    if !self.filter.includes(kind) {
                        debug!(tag = %element.tag, "category disabled, skipping item");
                        continue;
                    }
                }

                let mut item = self.item_for_tag(&element.tag)?;
                item.load_information(element)?;

                let uuid = element.attr("uuid").unwrap_or_default().to_string();
                if self.items.insert(uuid.clone(), item).is_some() {
                    debug!(%uuid, "duplicate identifier, keeping the later item");
                }
            }
        }

        if let Some(shelves) = document.child("shelves") {
            for element in shelves.children_named("shelf") {
                let mut shelf = Shelf::new(element.attr("name").unwrap_or_default());

                for link in element.children_named("linkto") {
                    let uuid = link.attr("uuid").unwrap_or_default();
                    if self.items.contains_key(uuid) {
                        shelf.members.insert(uuid.to_string());
                    } else {
                        debug!(%uuid, shelf = %shelf.name, "unresolved shelf reference, dropping");
                    }
                }

                let name = shelf.name.clone();
                if self.shelves.insert(name.clone(), shelf).is_some() {
                    debug!(%name, "duplicate shelf name, keeping the later shelf");
                }
            }
        }

        info!(
            items = self.items.len(),
            shelves = self.shelves.len(),
            "parsed library"
        );
        Ok(())
    }

    /// All books, in item-map order
    pub fn books(&self) -> IndexMap<&str, &Item> {
        self.items_of(Kind::Book)
    }

    /// All movies, in item-map order
    pub fn movies(&self) -> IndexMap<&str, &Item> {
        self.items_of(Kind::Movie)
    }

    /// All music, in item-map order
    pub fn music(&self) -> IndexMap<&str, &Item> {
        self.items_of(Kind::Music)
    }

    /// All games, in item-map order
    pub fn games(&self) -> IndexMap<&str, &Item> {
        self.items_of(Kind::Game)
    }

    /// Items of one kind, as a new mapping of references in item-map order
    pub fn items_of(&self, kind: Kind) -> IndexMap<&str, &Item> {
        self.items
            .iter()
            .filter(|(_, item)| item.kind == kind)
            .map(|(uuid, item)| (uuid.as_str(), item))
            .collect()
    }

    /// Resolve a shelf's members through the item map, in member order.
    /// Returns `None` when no shelf has the given name.
    pub fn shelf_items(&self, name: &str) -> Option<Vec<&Item>> {
        let shelf = self.shelves.get(name)?;
        Some(
            shelf
                .member_ids()
                .filter_map(|uuid| self.items.get(uuid))
                .collect(),
        )
    }
}
