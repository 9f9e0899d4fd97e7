//! Column mapping for header-driven SeeYou field order
//!
//! A SeeYou file may start with a header record naming its columns in any
//! order. This module maps the eleven known keywords to token indices and
//! falls back to the canonical order for every keyword the header omits.

use tracing::debug;

/// Semantic columns of a SeeYou record, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Code,
    Country,
    Latitude,
    Longitude,
    Elevation,
    Style,
    RunwayDirection,
    RunwayLength,
    Frequency,
    Description,
}

impl Column {
    /// All columns in canonical order
    pub const ALL: [Column; 11] = [
        Column::Name,
        Column::Code,
        Column::Country,
        Column::Latitude,
        Column::Longitude,
        Column::Elevation,
        Column::Style,
        Column::RunwayDirection,
        Column::RunwayLength,
        Column::Frequency,
        Column::Description,
    ];

    /// Header keyword naming this column
    pub fn keyword(self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Code => "code",
            Column::Country => "country",
            Column::Latitude => "lat",
            Column::Longitude => "lon",
            Column::Elevation => "elev",
            Column::Style => "style",
            Column::RunwayDirection => "rwdir",
            Column::RunwayLength => "rwlen",
            Column::Frequency => "freq",
            Column::Description => "desc",
        }
    }

    /// Column named by a header keyword (case-sensitive)
    pub fn from_keyword(keyword: &str) -> Option<Column> {
        match keyword {
            "name" => Some(Column::Name),
            "code" => Some(Column::Code),
            "country" => Some(Column::Country),
            "lat" => Some(Column::Latitude),
            "lon" => Some(Column::Longitude),
            "elev" => Some(Column::Elevation),
            "style" => Some(Column::Style),
            "rwdir" => Some(Column::RunwayDirection),
            "rwlen" => Some(Column::RunwayLength),
            "freq" => Some(Column::Frequency),
            "desc" => Some(Column::Description),
            _ => None,
        }
    }

    /// Position of this column when no header says otherwise
    pub fn default_index(self) -> usize {
        match self {
            Column::Name => 0,
            Column::Code => 1,
            Column::Country => 2,
            Column::Latitude => 3,
            Column::Longitude => 4,
            Column::Elevation => 5,
            Column::Style => 6,
            Column::RunwayDirection => 7,
            Column::RunwayLength => 8,
            Column::Frequency => 9,
            Column::Description => 10,
        }
    }
}

/// Token index of every semantic column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    indices: [usize; 11],
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            indices: Column::ALL.map(Column::default_index),
        }
    }
}

impl ColumnMap {
    /// Build a mapping from header tokens
    ///
    /// Keywords absent from the header keep their canonical index. If a
    /// keyword appears more than once, the last occurrence wins.
    pub fn from_header<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut map = Self::default();

        for (index, token) in tokens.iter().enumerate() {
            match Column::from_keyword(token.as_ref()) {
                Some(column) => map.set(column, index),
                None => debug!("Ignoring unknown header field '{}'", token.as_ref()),
            }
        }

        map
    }

    /// Number of tokens that are column keywords
    pub fn keyword_count<S: AsRef<str>>(tokens: &[S]) -> usize {
        tokens
            .iter()
            .filter(|token| Column::from_keyword(token.as_ref()).is_some())
            .count()
    }

    /// Token index of `column`
    pub fn index(&self, column: Column) -> usize {
        self.indices[column.default_index()]
    }

    pub fn set(&mut self, column: Column, index: usize) {
        self.indices[column.default_index()] = index;
    }

    /// Whether every column sits at its canonical index
    pub fn is_canonical(&self) -> bool {
        *self == Self::default()
    }
}
