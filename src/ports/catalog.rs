use crate::domain::{Category, DomainError, FromRecord, Profile, ProfileRequirements, Query, Record};

/// Port for read-only catalog lookups.
///
/// Implementations must report store-level faults as
/// [`DomainError::CatalogUnavailable`]; an empty result means "no match".
pub trait CatalogStore: Send + Sync {
    /// Run a query and return matching records in query order.
    fn query(&self, query: &Query) -> Result<Vec<Record>, DomainError>;

    /// Distinct manufacturers listed for a category, sorted.
    fn manufacturers(&self, category: Category) -> Result<Vec<String>, DomainError>;

    /// Minimum specs for pre-assembled systems of a profile, if the catalog
    /// defines them.
    fn profile_requirements(
        &self,
        profile: Profile,
    ) -> Result<Option<ProfileRequirements>, DomainError>;
}

/// Run `query` and convert the results into typed records.
///
/// Records of any other type are dropped.
pub fn fetch<T: FromRecord>(store: &dyn CatalogStore, query: &Query) -> Result<Vec<T>, DomainError> {
    Ok(store
        .query(query)?
        .into_iter()
        .filter_map(T::from_record)
        .collect())
}

/// Like [`fetch`] but returns only the first match.
pub fn fetch_first<T: FromRecord>(
    store: &dyn CatalogStore,
    query: &Query,
) -> Result<Option<T>, DomainError> {
    Ok(fetch(store, query)?.into_iter().next())
}
