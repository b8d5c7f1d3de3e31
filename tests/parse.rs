//! Library Parsing Integration Tests
//!
//! End-to-end tests over real files: error paths, category filtering,
//! shelf resolution, and cover locations.

use std::fs;
use std::path::PathBuf;

use indexmap::IndexMap;
use tempfile::TempDir;

use medialib::{CategoryFilter, CoverSize, Item, Kind, Library, LibraryError};

const CATALOG: &str = r#"<library>
    <items>
        <book uuid="b1" title="The Dispossessed" author="Ursula K. Le Guin">
            <description>Anarres and Urras.</description>
            <notes>Paperback.</notes>
            <recommendations>
                <book uuid="r1" title="The Left Hand of Darkness"/>
                <movie uuid="r2" title="Solaris"/>
            </recommendations>
        </book>
        <book uuid="b2" title="Snow Crash"/>
        <book uuid="b3" title="A Wizard of Earthsea"/>
        <movie uuid="m1" title="Stalker"/>
        <music uuid="a1" title="Kind of Blue"/>
        <game uuid="g1" title="Myst"/>
    </items>
    <shelves>
        <shelf name="Favorites">
            <linkto uuid="b1"/>
            <linkto uuid="m1"/>
            <linkto uuid="missing"/>
        </shelf>
        <shelf name="To read">
            <linkto uuid="b3"/>
        </shelf>
    </shelves>
</library>"#;

/// Write the standard fixture into a temp dir and return (dir, file path)
fn fixture() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("library.xml");
    fs::write(&path, CATALOG).unwrap();
    (dir, path)
}

#[test]
fn test_missing_file_is_not_readable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no-such-file.xml");

    let mut library = Library::new(&path);
    let result = library.parse();

    assert!(matches!(
        result,
        Err(LibraryError::FileNotReadable { path: p, .. }) if p == path
    ));
    assert!(library.items.is_empty());
}

#[test]
fn test_not_wellformed_file_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.xml");
    fs::write(&path, "<library><items></library>").unwrap();

    let mut library = Library::new(&path);
    assert!(matches!(
        library.parse(),
        Err(LibraryError::MalformedDocument(_))
    ));
}

#[test]
fn test_default_filter_loads_everything() {
    let (_dir, path) = fixture();

    let mut library = Library::new(&path);
    library.parse().unwrap();

    assert_eq!(library.items.len(), 6);
    assert_eq!(library.books().len(), 3);
    assert_eq!(library.movies().len(), 1);
    assert_eq!(library.music().len(), 1);
    assert_eq!(library.games().len(), 1);

    // The four accessors partition the item map.
    let total = library.books().len()
        + library.movies().len()
        + library.music().len()
        + library.games().len();
    assert_eq!(total, library.items.len());
}

#[test]
fn test_books_only_filter() {
    let (_dir, path) = fixture();

    let mut library = Library::new(&path);
    library.filter = CategoryFilter::only(&[Kind::Book]);
    library.parse().unwrap();

    assert_eq!(library.items.len(), 3);
    assert!(library.items.values().all(|item| item.kind == Kind::Book));
    assert_eq!(library.books().len(), 3);
    assert!(library.movies().is_empty());
    assert!(library.games().is_empty());
}

#[test]
fn test_shelves_and_membership() {
    let (_dir, path) = fixture();

    let mut library = Library::new(&path);
    library.parse().unwrap();

    assert_eq!(library.shelves.len(), 2);

    let favorites = &library.shelves["Favorites"];
    let x = &library.items["b1"];
    let y = &library.items["b2"];
    assert!(favorites.contains(x));
    assert!(!favorites.contains(y));

    // Three references, one of which does not resolve.
    assert_eq!(favorites.len(), 2);

    let to_read = &library.shelves["To read"];
    assert_eq!(to_read.len(), 1);
    assert!(to_read.contains_id("b3"));
}

#[test]
fn test_recommendations_load_under_any_filter() {
    let (_dir, path) = fixture();

    let mut library = Library::new(&path);
    library.filter = CategoryFilter::only(&[Kind::Book]);
    library.parse().unwrap();

    let book = &library.items["b1"];
    assert_eq!(book.recommendations.len(), 2);
    assert_eq!(book.recommendations[1].kind, Kind::Movie);

    // Recommendations stay out of the top-level map.
    assert!(!library.items.contains_key("r1"));
    assert!(!library.items.contains_key("r2"));
}

#[test]
fn test_cover_locations_sit_next_to_the_library_file() {
    let (dir, path) = fixture();

    let mut library = Library::new(&path);
    library.parse().unwrap();

    let item = &library.items["b1"];
    assert_eq!(
        item.cover_location(CoverSize::default()),
        dir.path().join("Images").join("Small Covers").join("b1")
    );
    assert_eq!(
        item.cover_location(CoverSize::Large),
        dir.path().join("Images").join("Large Covers").join("b1")
    );

    // Recommendations point at the same image tree.
    assert_eq!(
        item.recommendations[0].cover_location(CoverSize::Medium),
        dir.path().join("Images").join("Medium Covers").join("r1")
    );
}

#[test]
fn test_reparse_merges_with_last_write_wins() {
    let (_dir, path) = fixture();

    let mut library = Library::new(&path);
    library.parse().unwrap();
    library.parse().unwrap();

    // Same file twice: every identifier and shelf name overwrites itself.
    assert_eq!(library.items.len(), 6);
    assert_eq!(library.shelves.len(), 2);

    // A mutated file merges into the existing maps instead of replacing
    // them.
    fs::write(
        &path,
        r#"<library><items><book uuid="b1" title="Retitled"/></items></library>"#,
    )
    .unwrap();
    library.parse().unwrap();

    assert_eq!(library.items.len(), 6);
    assert_eq!(library.items["b1"].attribute("title"), Some("Retitled"));
}

#[test]
fn test_unknown_item_type_aborts_the_parse() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("library.xml");
    fs::write(
        &path,
        r#"<library><items><cassette uuid="c1"/></items></library>"#,
    )
    .unwrap();

    let mut library = Library::new(&path);
    assert!(matches!(
        library.parse(),
        Err(LibraryError::UnknownItemType(tag)) if tag == "cassette"
    ));
}

#[test]
fn test_items_round_trip_through_json() {
    let (_dir, path) = fixture();

    let mut library = Library::new(&path);
    library.parse().unwrap();

    let json = serde_json::to_string(&library.items).unwrap();
    let parsed: IndexMap<String, Item> = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.len(), 6);
    assert_eq!(parsed["b1"].attribute("author"), Some("Ursula K. Le Guin"));
    assert_eq!(parsed["b1"].recommendations.len(), 2);
    assert_eq!(parsed["b1"].kind, Kind::Book);
}
