//! Per-kind size constraints consulted by auto-layout.

use indexmap::IndexMap;
use mosaic_core::CellSize;
use smallvec::SmallVec;

/// Source of size limits for widget kinds.
pub trait SizeConstraints {
    /// Smallest size a widget of this kind may take.
    fn min_size(&self, kind: &str) -> CellSize;

    /// Largest size auto-layout may grow a widget of this kind to, or `None`
    /// when only the grid bounds apply.
    fn max_auto_size(&self, kind: &str, columns: u32) -> Option<CellSize>;
}

/// No limits beyond a 1x1 minimum.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconstrained;

impl SizeConstraints for Unconstrained {
    fn min_size(&self, _kind: &str) -> CellSize {
        CellSize::ONE
    }

    fn max_auto_size(&self, _kind: &str, _columns: u32) -> Option<CellSize> {
        None
    }
}

/// Upper bound for auto-layout growth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaxAutoSize {
    /// Same bound at every column count
    Fixed(CellSize),
    /// Bound keyed by minimum column count; the entry with the largest key
    /// not exceeding the current column count wins
    ByColumns(SmallVec<[(u32, CellSize); 4]>),
}

impl MaxAutoSize {
    /// Resolve the bound for a column count.
    pub fn resolve(&self, columns: u32) -> Option<CellSize> {
        match self {
            MaxAutoSize::Fixed(size) => Some(*size),
            MaxAutoSize::ByColumns(entries) => entries
                .iter()
                .filter(|(min_columns, _)| *min_columns <= columns)
                .max_by_key(|(min_columns, _)| *min_columns)
                .map(|(_, size)| *size),
        }
    }
}

/// Size limits for a single widget kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeConstraint {
    pub min_size: CellSize,
    pub max_auto_size: Option<MaxAutoSize>,
}

impl SizeConstraint {
    pub fn new(min_size: CellSize) -> Self {
        Self {
            min_size,
            max_auto_size: None,
        }
    }

    /// Bound growth to a fixed size.
    pub fn with_max_auto(mut self, max: CellSize) -> Self {
        self.max_auto_size = Some(MaxAutoSize::Fixed(max));
        self
    }

    /// Bound growth per column count.
    pub fn with_max_auto_by_columns(mut self, entries: &[(u32, CellSize)]) -> Self {
        self.max_auto_size = Some(MaxAutoSize::ByColumns(entries.iter().copied().collect()));
        self
    }
}

/// Constraint lookup table keyed by widget kind.
///
/// Kinds without an entry fall back to the table default.
#[derive(Debug, Clone)]
pub struct ConstraintTable {
    entries: IndexMap<String, SizeConstraint>,
    default: SizeConstraint,
}

impl Default for ConstraintTable {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            default: SizeConstraint::new(CellSize::ONE),
        }
    }
}

impl ConstraintTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the constraint for a kind.
    pub fn with(mut self, kind: impl Into<String>, constraint: SizeConstraint) -> Self {
        self.insert(kind, constraint);
        self
    }

    /// Set the constraint used for unknown kinds.
    pub fn with_default(mut self, constraint: SizeConstraint) -> Self {
        self.default = constraint;
        self
    }

    pub fn insert(&mut self, kind: impl Into<String>, constraint: SizeConstraint) {
        self.entries.insert(kind.into(), constraint);
    }

    pub fn get(&self, kind: &str) -> &SizeConstraint {
        self.entries.get(kind).unwrap_or(&self.default)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SizeConstraints for ConstraintTable {
    fn min_size(&self, kind: &str) -> CellSize {
        self.get(kind).min_size
    }

    fn max_auto_size(&self, kind: &str, columns: u32) -> Option<CellSize> {
        self.get(kind)
            .max_auto_size
            .as_ref()
            .and_then(|max| max.resolve(columns))
    }
}
