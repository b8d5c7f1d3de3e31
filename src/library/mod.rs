//! Media library parsing and the domain types it produces.
//!
//! A library file is a single XML document with two containers:
//!
//! # Document Layout
//!
//! ```text
//! <library>
//! ├── <items>              # book/movie/music/game elements, each with a
//! │                        # uuid attribute, arbitrary other attributes,
//! │                        # optional description and notes children, and
//! │                        # an optional recommendations container of
//! │                        # nested items
//! └── <shelves>            # shelf elements whose linkto children
//!                          # reference top-level items by uuid
//! ```
//!
//! Parsing materializes the items into an identifier-keyed map first, then
//! resolves shelf references against that map.

pub mod item;
pub mod parser;
pub mod shelf;
pub mod xml;

pub use item::{CoverSize, Item, Kind};
pub use parser::{CategoryFilter, Library, LibraryError};
pub use shelf::Shelf;
