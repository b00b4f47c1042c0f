//! # Content Catalog
//!
//! The finite, ordered, read-only list of titles available for shelf
//! population. Records are handed out by cyclic index: placement generation
//! walks the catalog round-robin through a call-local [`CatalogCursor`], so
//! independent layout runs never share counter state.

/// One catalog entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRecord {
    pub title: String,
    pub author: String,
    pub price: String,
    /// Spine color as linear RGB
    pub color: [f32; 3],
}

impl ContentRecord {
    pub fn new(title: &str, author: &str, price: &str, color: [f32; 3]) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            price: price.to_string(),
            color,
        }
    }
}

/// Ordered, read-only collection of content records
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<ContentRecord>,
}

impl Catalog {
    pub fn new(records: Vec<ContentRecord>) -> Self {
        Self { records }
    }

    /// The stock catalog: a dozen titles with the storefront's spine palette
    pub fn builtin() -> Self {
        let palette = [
            rgb(0xff4444),
            rgb(0x4444ff),
            rgb(0x44ff44),
            rgb(0xffaa00),
            rgb(0xff00ff),
            rgb(0x00ffff),
            rgb(0xff8800),
            rgb(0x8800ff),
            rgb(0x00ff88),
            rgb(0xffff00),
        ];

        let titles = [
            ("Vardar Mornings", "Macedonian Author", "329 MKD"),
            ("The Stone Bridge", "Macedonian Author", "449 MKD"),
            ("Letters from Ohrid", "Macedonian Author", "389 MKD"),
            ("A Winter Abroad", "International Writer", "599 MKD"),
            ("Harbor Lights", "International Writer", "549 MKD"),
            ("The Cartographer's Son", "International Writer", "629 MKD"),
            ("Collected Verses", "Classic Author", "299 MKD"),
            ("The Long Orchard", "Classic Author", "359 MKD"),
            ("Notes on Silence", "Classic Author", "319 MKD"),
            ("Skopje After Rain", "Macedonian Author", "479 MKD"),
            ("Paper Boats", "International Writer", "519 MKD"),
            ("The Last Reading Room", "Classic Author", "399 MKD"),
        ];

        let records = titles
            .iter()
            .enumerate()
            .map(|(i, (title, author, price))| {
                ContentRecord::new(title, author, price, palette[i % palette.len()])
            })
            .collect();

        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cyclic lookup: any index maps onto the catalog by modulo
    ///
    /// # Panics
    /// Panics on an empty catalog; callers check [`Catalog::is_empty`] first.
    pub fn get(&self, index: usize) -> &ContentRecord {
        &self.records[index % self.records.len()]
    }

    pub fn records(&self) -> &[ContentRecord] {
        &self.records
    }
}

/// Call-local cyclic index over a catalog
///
/// Owned by a single placement-generation run, never shared between
/// containers, so layouts stay independent and reproducible.
#[derive(Debug, Default)]
pub struct CatalogCursor {
    next: usize,
}

impl CatalogCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume and return the next cyclic index
    pub fn next(&mut self, catalog_len: usize) -> usize {
        let index = self.next % catalog_len;
        self.next += 1;
        index
    }
}

fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
