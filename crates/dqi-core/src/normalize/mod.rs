//! Record normalizers and registry.
//!
//! A [`Normalizer`] turns the rows of one sheet into typed records of its
//! source kind. Normalizers are stateless unit structs registered in a
//! [`NormalizerRegistry`] keyed by [`SourceKind`], so the coordinator can
//! dispatch on a classified file without knowing any column names.
//!
//! # Example
//!
//! ```
//! use dqi_core::normalize::default_registry;
//! use dqi_ingest::Sheet;
//! use dqi_model::SourceKind;
//!
//! let sheet = Sheet::from_text_columns(
//!     "Listing",
//!     vec![("Subject", vec![Some("S-1".to_string()), None])],
//! )
//! .unwrap();
//! let normalizer = default_registry().get(SourceKind::Edrr).unwrap();
//! let records = normalizer.normalize(&sheet, "Study 1");
//! assert_eq!(records.len(), 1);
//! ```

pub mod coding;
pub mod columns;
pub mod cpid;
pub mod edrr;
pub mod inactivated;
pub mod lab;
pub mod page;
pub mod sae;
pub mod visit;

use std::collections::BTreeMap;
use std::sync::OnceLock;

use dqi_ingest::Sheet;
use dqi_model::{Record, SourceKind, UNKNOWN};

use self::columns::Aliases;

/// Kind-specific extraction of typed records from a sheet.
///
/// Implementations must not keep state between calls: the same normalizer is
/// shared by every extraction worker.
pub trait Normalizer: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// Named sheets this kind reads, in read order. Empty means every sheet.
    fn sheets(&self) -> &'static [&'static str] {
        &[]
    }

    /// Key under which rows read from `sheet` are counted in the run stats.
    fn rows_key(&self, sheet: &str) -> &'static str;

    /// Produces the records of one sheet. Rows without an identifier are
    /// dropped; this never fails.
    fn normalize(&self, sheet: &Sheet, study: &str) -> Vec<Record>;
}

/// Registry of normalizers indexed by source kind.
pub struct NormalizerRegistry {
    normalizers: BTreeMap<SourceKind, Box<dyn Normalizer>>,
}

impl NormalizerRegistry {
    pub fn new() -> Self {
        Self {
            normalizers: BTreeMap::new(),
        }
    }

    /// Registers a normalizer for its kind, replacing any existing one.
    pub fn register(&mut self, normalizer: Box<dyn Normalizer>) {
        self.normalizers.insert(normalizer.kind(), normalizer);
    }

    pub fn get(&self, kind: SourceKind) -> Option<&dyn Normalizer> {
        self.normalizers.get(&kind).map(|n| n.as_ref())
    }

    pub fn len(&self) -> usize {
        self.normalizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalizers.is_empty()
    }

    /// Registered kinds in classification order.
    pub fn kinds(&self) -> impl Iterator<Item = SourceKind> + '_ {
        self.normalizers.keys().copied()
    }
}

impl Default for NormalizerRegistry {
    fn default() -> Self {
        build_default_registry()
    }
}

static DEFAULT_REGISTRY: OnceLock<NormalizerRegistry> = OnceLock::new();

/// The registry holding one normalizer for each of the nine source kinds.
pub fn default_registry() -> &'static NormalizerRegistry {
    DEFAULT_REGISTRY.get_or_init(build_default_registry)
}

/// Builds a fresh registry with the nine standard normalizers.
pub fn build_default_registry() -> NormalizerRegistry {
    let mut registry = NormalizerRegistry::new();
    registry.register(Box::new(cpid::CpidNormalizer));
    registry.register(Box::new(sae::SaeNormalizer));
    registry.register(Box::new(visit::VisitNormalizer));
    registry.register(Box::new(lab::LabNormalizer));
    registry.register(Box::new(page::PageNormalizer));
    registry.register(Box::new(coding::CodingNormalizer::meddra()));
    registry.register(Box::new(coding::CodingNormalizer::whodd()));
    registry.register(Box::new(edrr::EdrrNormalizer));
    registry.register(Box::new(inactivated::InactivatedNormalizer));
    registry
}

/// Rows whose identifying column is present, paired with the identifier text.
pub(crate) fn keyed_rows<'a>(
    sheet: &'a Sheet,
    key: Aliases,
) -> impl Iterator<Item = (usize, String)> + 'a {
    (0..sheet.height()).filter_map(move |row| sheet.text(key, row).map(|id| (row, id)))
}

/// Categorical field text, defaulting to `"Unknown"`.
pub(crate) fn field(sheet: &Sheet, aliases: Aliases, row: usize) -> String {
    sheet.text_or(aliases, row, UNKNOWN)
}
