use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::domain::{
    CatalogSnapshot, Category, DomainError, Profile, ProfileRequirements, Query, Record, RecordKind,
};
use crate::ports::CatalogStore;

struct Contents {
    records: Vec<Record>,
    profiles: Vec<ProfileRequirements>,
}

impl From<CatalogSnapshot> for Contents {
    fn from(mut snapshot: CatalogSnapshot) -> Self {
        let profiles = std::mem::take(&mut snapshot.profiles);
        Self {
            records: snapshot.into_records(),
            profiles,
        }
    }
}

/// Catalog held entirely in memory.
///
/// Queries read a shared snapshot; [`InMemoryCatalog::replace`] swaps in a
/// new one without disturbing queries already running.
pub struct InMemoryCatalog {
    contents: RwLock<Contents>,
}

impl InMemoryCatalog {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            contents: RwLock::new(snapshot.into()),
        }
    }

    /// Load a catalog file. `.toml` files are read as TOML, anything else
    /// as JSON.
    pub fn from_path(path: &Path) -> Result<Self, DomainError> {
        let snapshot = Self::read_snapshot(path)?;
        let cpus = snapshot.count(RecordKind::Component(Category::Cpu));
        let prebuilt = snapshot.count(RecordKind::Prebuilt);
        let catalog = Self::new(snapshot);
        info!(
            path = ?path,
            records = catalog.len(),
            cpus,
            prebuilt,
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse a catalog file without installing it.
    pub fn read_snapshot(path: &Path) -> Result<CatalogSnapshot, DomainError> {
        let content = fs::read_to_string(path).map_err(|e| {
            DomainError::CatalogUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let snapshot = if is_toml {
            toml::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        };

        snapshot.map_err(|e| {
            DomainError::CatalogUnavailable(format!("malformed catalog {}: {}", path.display(), e))
        })
    }

    /// Swap in a new snapshot.
    pub fn replace(&self, snapshot: CatalogSnapshot) {
        *self.contents.write() = snapshot.into();
        debug!(records = self.len(), "Catalog replaced");
    }

    /// Total number of listings, prebuilt systems included.
    pub fn len(&self) -> usize {
        self.contents.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CatalogStore for InMemoryCatalog {
    fn query(&self, query: &Query) -> Result<Vec<Record>, DomainError> {
        let contents = self.contents.read();
        let results = query.apply(&contents.records);
        debug!(
            kind = ?query.kind,
            predicates = query.predicates.len(),
            matched = results.len(),
            "Catalog query"
        );
        Ok(results)
    }

    fn manufacturers(&self, category: Category) -> Result<Vec<String>, DomainError> {
        let contents = self.contents.read();
        let kind = RecordKind::Component(category);
        let names: BTreeSet<String> = contents
            .records
            .iter()
            .filter(|r| r.kind() == kind)
            .map(|r| r.listing().manufacturer.clone())
            .collect();
        Ok(names.into_iter().collect())
    }

    fn profile_requirements(
        &self,
        profile: Profile,
    ) -> Result<Option<ProfileRequirements>, DomainError> {
        let contents = self.contents.read();
        Ok(contents
            .profiles
            .iter()
            .find(|p| p.profile == profile)
            .cloned())
    }
}
