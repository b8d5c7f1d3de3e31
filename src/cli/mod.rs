//! Command-line interface for medialib.
//!
//! Provides commands for listing items and shelves, printing cover image
//! locations, and exporting the parsed library as JSON.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::library::{CategoryFilter, CoverSize, Kind, Library};

/// medialib - Parser for personal media library XML catalogs
#[derive(Parser, Debug)]
#[command(name = "medialib")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the library XML file
    #[arg(short, long, env = "MEDIALIB_FILE")]
    pub library: PathBuf,

    /// Categories to include (repeatable; default is all four)
    #[arg(short, long, value_enum)]
    pub include: Vec<KindArg>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List items from the library
    Items {
        /// Only show items of this kind
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,

        /// Maximum number of items to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// List shelves, or show a single shelf's members
    Shelves {
        /// Show the members of this shelf
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Print the cover image location for an item
    Cover {
        /// Item identifier
        uuid: String,

        /// Cover size
        #[arg(short, long, value_enum, default_value = "small")]
        size: SizeArg,
    },

    /// Dump the parsed library as JSON
    Export,
}

/// Media kind for CLI (maps to Kind)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    /// Books
    Book,

    /// Movies
    Movie,

    /// Music albums
    Music,

    /// Video games
    Game,
}

impl From<KindArg> for Kind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Book => Kind::Book,
            KindArg::Movie => Kind::Movie,
            KindArg::Music => Kind::Music,
            KindArg::Game => Kind::Game,
        }
    }
}

/// Cover size for CLI (maps to CoverSize)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SizeArg {
    /// Large cover
    Large,

    /// Medium cover
    Medium,

    /// Plain cover
    Plain,

    /// Small cover
    Small,
}

impl From<SizeArg> for CoverSize {
    fn from(s: SizeArg) -> Self {
        match s {
            SizeArg::Large => CoverSize::Large,
            SizeArg::Medium => CoverSize::Medium,
            SizeArg::Plain => CoverSize::Plain,
            SizeArg::Small => CoverSize::Small,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let mut library = Library::new(&self.library);
        if !self.include.is_empty() {
            let kinds: Vec<Kind> = self.include.iter().map(|k| Kind::from(*k)).collect();
            library.filter = CategoryFilter::only(&kinds);
        }

        library
            .parse()
            .with_context(|| format!("Failed to parse library: {}", self.library.display()))?;

        match self.command {
            Commands::Items { kind, limit } => list_items(&library, kind, limit),
            Commands::Shelves { name } => list_shelves(&library, name),
            Commands::Cover { uuid, size } => show_cover(&library, &uuid, size),
            Commands::Export => export_json(&library),
        }
    }
}

/// List items, optionally restricted to one kind
fn list_items(library: &Library, kind: Option<KindArg>, limit: usize) -> Result<()> {
    let items: Vec<_> = match kind {
        Some(kind) => library.items_of(kind.into()).into_values().collect(),
        None => library.items.values().collect(),
    };

    if items.is_empty() {
        println!("No items.");
        return Ok(());
    }

    for item in items.iter().take(limit) {
        let title = item.attribute("title").unwrap_or("(untitled)");
        println!("{:<6} {:<38} {}", item.kind, item.uuid, title);
    }

    if items.len() > limit {
        println!("... and {} more", items.len() - limit);
    }

    Ok(())
}

/// List shelves with member counts, or one shelf's resolved members
fn list_shelves(library: &Library, name: Option<String>) -> Result<()> {
    if let Some(name) = name {
        let items = match library.shelf_items(&name) {
            Some(items) => items,
            None => bail!("No shelf named \"{}\"", name),
        };

        println!("{} ({} items)", name, items.len());
        for item in items {
            let title = item.attribute("title").unwrap_or("(untitled)");
            println!("  {:<6} {:<38} {}", item.kind, item.uuid, title);
        }
        return Ok(());
    }

    if library.shelves.is_empty() {
        println!("No shelves.");
        return Ok(());
    }

    for shelf in library.shelves.values() {
        println!("{:<30} {} items", shelf.name, shelf.len());
    }

    Ok(())
}

/// Print the cover image location for one item
fn show_cover(library: &Library, uuid: &str, size: SizeArg) -> Result<()> {
    let item = match library.items.get(uuid) {
        Some(item) => item,
        None => bail!("No item with identifier \"{}\"", uuid),
    };

    println!("{}", item.cover_location(size.into()).display());
    Ok(())
}

/// Serialize the parsed library to JSON on stdout
fn export_json(library: &Library) -> Result<()> {
    let json = serde_json::to_string_pretty(&serde_json::json!({
        "items": &library.items,
        "shelves": &library.shelves,
    }))
    .context("Failed to serialize library")?;

    println!("{}", json);
    Ok(())
}
