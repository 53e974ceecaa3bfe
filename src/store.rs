//! In-memory marine roster.
//!
//! The store is append-only and process-local: it is seeded with eight
//! records at startup and every restart resets it. Records are never
//! removed, so ids handed out by [`MarineStore::create`] stay unique for
//! the lifetime of the process.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::{PoisonError, RwLock};

/// Known rank labels. Advisory only: creation does not check against this
/// set, so custom ranks are accepted.
pub const RANKS: &[&str] = &[
    "Scout",
    "Marine",
    "Sergeant",
    "Chaplain",
    "Captain",
    "Librarian",
];

/// Known chapter labels. Advisory only, like [`RANKS`].
pub const CHAPTERS: &[&str] = &[
    "Ultramarines",
    "Blood Angels",
    "Imperial Fists",
    "Grey Knights",
    "Dark Angels",
    "Space Wolves",
    "Sisters of Battle",
    "Custodies",
];

/// One roster record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marine {
    pub id: u64,
    pub name: String,
    pub rank: String,
    pub chapter: String,
    /// `true` for active, `false` for fallen.
    pub status: bool,
}

/// Rejection for a creation body missing one or more required fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields;

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("name, rank and chapter are required")
    }
}

impl std::error::Error for MissingFields {}

/// Validated input for [`MarineStore::create`].
///
/// Validation is presence-only: each field must be a non-empty string, but
/// rank and chapter labels are not checked against [`RANKS`] / [`CHAPTERS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMarine {
    pub name: String,
    pub rank: String,
    pub chapter: String,
}

impl NewMarine {
    /// Extract and validate the creation fields from a request body.
    pub fn from_body(body: &Value) -> Result<Self, MissingFields> {
        let field = |name: &str| -> Option<String> {
            body.get(name)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        match (field("name"), field("rank"), field("chapter")) {
            (Some(name), Some(rank), Some(chapter)) => Ok(Self {
                name,
                rank,
                chapter,
            }),
            _ => Err(MissingFields),
        }
    }
}

fn seed_roster() -> Vec<Marine> {
    let record = |id: u64, name: &str, rank: &str, chapter: &str, status: bool| Marine {
        id,
        name: name.to_string(),
        rank: rank.to_string(),
        chapter: chapter.to_string(),
        status,
    };
    vec![
        record(1, "Titus", "Captain", "Ultramarines", true),
        record(2, "Dann", "Marine", "Dark Angels", true),
        record(3, "Lann", "Chaplain", "Blood Angels", false),
        record(4, "Leandros", "Sergeant", "Ultramarines", true),
        record(5, "Anna", "Captain", "Sisters of Battle", true),
        record(6, "Gunnar", "Captain", "Custodies", true),
        record(7, "Dimitri", "Captain", "Space Wolves", true),
        record(8, "Klaus", "Captain", "Space Wolves", true),
    ]
}

/// Shared roster store. Cheap to share behind an `Arc`; all access goes
/// through the interior lock.
#[derive(Debug, Default)]
pub struct MarineStore {
    records: RwLock<Vec<Marine>>,
}

impl MarineStore {
    /// An empty store. The first created record gets id 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the eight seed records, ids 1 through 8.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            records: RwLock::new(seed_roster()),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Marine>> {
        // Handlers never panic while holding the lock; recover the guard
        // if one somehow did.
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every record, in insertion order.
    #[must_use]
    pub fn all(&self) -> Vec<Marine> {
        self.read().clone()
    }

    /// Look up a record by id.
    #[must_use]
    pub fn find(&self, id: u64) -> Option<Marine> {
        self.read().iter().find(|m| m.id == id).cloned()
    }

    /// Records whose chapter matches `chapter` exactly, case-sensitively,
    /// in insertion order.
    #[must_use]
    pub fn by_chapter(&self, chapter: &str) -> Vec<Marine> {
        self.read()
            .iter()
            .filter(|m| m.chapter == chapter)
            .cloned()
            .collect()
    }

    /// Append a validated record and return it.
    ///
    /// The id is the current maximum plus one (1 for an empty store),
    /// computed and appended under a single exclusive lock so concurrent
    /// creations cannot observe the same maximum. New records start active.
    pub fn create(&self, new: NewMarine) -> Marine {
        let mut records = self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let id = records.iter().map(|m| m.id).max().map_or(1, |max| max + 1);
        let marine = Marine {
            id,
            name: new.name,
            rank: new.rank,
            chapter: new.chapter,
            status: true,
        };
        records.push(marine.clone());
        marine
    }

    /// Number of records currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
