//! The canonical 66-book table: stable ids, English and Portuguese names,
//! and chapter counts. Used for instant navigation and for localized book
//! names independent of which corpus is loaded.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::model::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookMeta {
    pub id: &'static str,
    pub name_en: &'static str,
    pub name_pt: &'static str,
    pub chapters: u32,
}

impl BookMeta {
    const fn new(
        id: &'static str,
        name_en: &'static str,
        name_pt: &'static str,
        chapters: u32,
    ) -> Self {
        Self {
            id,
            name_en,
            name_pt,
            chapters,
        }
    }

    pub fn name(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.name_en,
            Locale::Pt => self.name_pt,
        }
    }
}

pub const BIBLE_STRUCTURE: [BookMeta; 66] = [
    BookMeta::new("gen", "Genesis", "Gênesis", 50),
    BookMeta::new("exod", "Exodus", "Êxodo", 40),
    BookMeta::new("lev", "Leviticus", "Levítico", 27),
    BookMeta::new("num", "Numbers", "Números", 36),
    BookMeta::new("deut", "Deuteronomy", "Deuteronômio", 34),
    BookMeta::new("josh", "Joshua", "Josué", 24),
    BookMeta::new("judg", "Judges", "Juízes", 21),
    BookMeta::new("ruth", "Ruth", "Rute", 4),
    BookMeta::new("1sam", "1 Samuel", "1 Samuel", 31),
    BookMeta::new("2sam", "2 Samuel", "2 Samuel", 24),
    BookMeta::new("1kings", "1 Kings", "1 Reis", 22),
    BookMeta::new("2kings", "2 Kings", "2 Reis", 25),
    BookMeta::new("1chron", "1 Chronicles", "1 Crônicas", 29),
    BookMeta::new("2chron", "2 Chronicles", "2 Crônicas", 36),
    BookMeta::new("ezra", "Ezra", "Esdras", 10),
    BookMeta::new("neh", "Nehemiah", "Neemias", 13),
    BookMeta::new("esth", "Esther", "Ester", 10),
    BookMeta::new("job", "Job", "Jó", 42),
    BookMeta::new("ps", "Psalms", "Salmos", 150),
    BookMeta::new("prov", "Proverbs", "Provérbios", 31),
    BookMeta::new("eccl", "Ecclesiastes", "Eclesiastes", 12),
    BookMeta::new("song", "Song of Solomon", "Cânticos", 8),
    BookMeta::new("isa", "Isaiah", "Isaías", 66),
    BookMeta::new("jer", "Jeremiah", "Jeremias", 52),
    BookMeta::new("lam", "Lamentations", "Lamentações", 5),
    BookMeta::new("ezek", "Ezekiel", "Ezequiel", 48),
    BookMeta::new("dan", "Daniel", "Daniel", 12),
    BookMeta::new("hos", "Hosea", "Oseias", 14),
    BookMeta::new("joel", "Joel", "Joel", 3),
    BookMeta::new("amos", "Amos", "Amós", 9),
    BookMeta::new("obad", "Obadiah", "Obadias", 1),
    BookMeta::new("jonah", "Jonah", "Jonas", 4),
    BookMeta::new("mic", "Micah", "Miqueias", 7),
    BookMeta::new("nah", "Nahum", "Naum", 3),
    BookMeta::new("hab", "Habakkuk", "Habacuque", 3),
    BookMeta::new("zeph", "Zephaniah", "Sofonias", 3),
    BookMeta::new("hag", "Haggai", "Ageu", 2),
    BookMeta::new("zech", "Zechariah", "Zacarias", 14),
    BookMeta::new("mal", "Malachi", "Malaquias", 4),
    BookMeta::new("matt", "Matthew", "Mateus", 28),
    BookMeta::new("mark", "Mark", "Marcos", 16),
    BookMeta::new("luke", "Luke", "Lucas", 24),
    BookMeta::new("john", "John", "João", 21),
    BookMeta::new("acts", "Acts", "Atos", 28),
    BookMeta::new("rom", "Romans", "Romanos", 16),
    BookMeta::new("1cor", "1 Corinthians", "1 Coríntios", 16),
    BookMeta::new("2cor", "2 Corinthians", "2 Coríntios", 13),
    BookMeta::new("gal", "Galatians", "Gálatas", 6),
    BookMeta::new("eph", "Ephesians", "Efésios", 6),
    BookMeta::new("phil", "Philippians", "Filipenses", 4),
    BookMeta::new("col", "Colossians", "Colossenses", 4),
    BookMeta::new("1thess", "1 Thessalonians", "1 Tessalonicenses", 5),
    BookMeta::new("2thess", "2 Thessalonians", "2 Tessalonicenses", 3),
    BookMeta::new("1tim", "1 Timothy", "1 Timóteo", 6),
    BookMeta::new("2tim", "2 Timothy", "2 Timóteo", 4),
    BookMeta::new("titus", "Titus", "Tito", 3),
    BookMeta::new("phlm", "Philemon", "Filemom", 1),
    BookMeta::new("heb", "Hebrews", "Hebreus", 13),
    BookMeta::new("jas", "James", "Tiago", 5),
    BookMeta::new("1pet", "1 Peter", "1 Pedro", 5),
    BookMeta::new("2pet", "2 Peter", "2 Pedro", 3),
    BookMeta::new("1john", "1 John", "1 João", 5),
    BookMeta::new("2john", "2 John", "2 João", 1),
    BookMeta::new("3john", "3 John", "3 João", 1),
    BookMeta::new("jude", "Jude", "Judas", 1),
    BookMeta::new("rev", "Revelation", "Apocalipse", 22),
];

static BY_ID: Lazy<HashMap<&'static str, &'static BookMeta>> =
    Lazy::new(|| BIBLE_STRUCTURE.iter().map(|b| (b.id, b)).collect());

pub fn book_meta(book_id: &str) -> Option<&'static BookMeta> {
    BY_ID.get(book_id).copied()
}

/// Localized book name; unknown ids are returned unchanged.
pub fn book_name(book_id: &str, locale: Locale) -> String {
    book_meta(book_id)
        .map(|meta| meta.name(locale).to_string())
        .unwrap_or_else(|| book_id.to_string())
}

/// Canonical position of a book (0 = Genesis), for ordering.
pub fn canonical_index(book_id: &str) -> Option<usize> {
    BIBLE_STRUCTURE.iter().position(|b| b.id == book_id)
}

/// Resolves user input ("John", "joão", "1cor") to a book id.
pub fn lookup_book(input: &str) -> Option<&'static str> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    BIBLE_STRUCTURE
        .iter()
        .find(|b| {
            b.id == needle
                || b.name_en.to_lowercase() == needle
                || b.name_pt.to_lowercase() == needle
        })
        .map(|b| b.id)
}
