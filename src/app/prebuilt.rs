use tracing::{debug, info};

use crate::domain::{Budget, DomainError, PrebuiltSystem, Profile};
use crate::ports::{fetch_first, CatalogStore};

use super::stages;

/// Searches pre-assembled systems against a profile's minimum specs.
pub struct PrebuiltFinder<'a> {
    catalog: &'a dyn CatalogStore,
}

impl<'a> PrebuiltFinder<'a> {
    pub fn new(catalog: &'a dyn CatalogStore) -> Self {
        Self { catalog }
    }

    /// Most expensive qualifying system within `budget`, best rated first on
    /// equal price. `None` when the profile has no requirements listed or
    /// nothing qualifies.
    pub fn best(
        &self,
        profile: Profile,
        budget: Budget,
    ) -> Result<Option<PrebuiltSystem>, DomainError> {
        self.next(profile, budget, &[])
    }

    /// Like [`PrebuiltFinder::best`] but never returns a name in `excluded`.
    pub fn next(
        &self,
        profile: Profile,
        budget: Budget,
        excluded: &[String],
    ) -> Result<Option<PrebuiltSystem>, DomainError> {
        let Some(requirements) = self.catalog.profile_requirements(profile)? else {
            debug!(profile = %profile, "No prebuilt requirements for profile");
            return Ok(None);
        };

        let query = stages::prebuilt_query(&requirements, budget.amount(), excluded);
        let found: Option<PrebuiltSystem> = fetch_first(self.catalog, &query)?;

        info!(
            profile = %profile,
            budget = budget.amount(),
            excluded = excluded.len(),
            found = found.as_ref().map(|s| s.listing.name.as_str()).unwrap_or("none"),
            "Prebuilt search"
        );
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryCatalog;
    use crate::domain::{CatalogSnapshot, Listing, ProfileRequirements};

    fn system(name: &str, price: u64, rating: f64, graphics: &str) -> PrebuiltSystem {
        PrebuiltSystem {
            listing: Listing {
                name: name.to_string(),
                manufacturer: "Acme".to_string(),
                price,
                rating: Some(rating),
                link: None,
            },
            os: None,
            processor: "Hexa".to_string(),
            cores: 6,
            threads: Some(12),
            clock_ghz: None,
            graphics_type: graphics.to_string(),
            graphics_model: None,
            video_memory_gb: None,
            ram_gb: 16,
            ram_type: Some("DDR4".to_string()),
            ssd_gb: 512,
            hdd_gb: None,
        }
    }

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(CatalogSnapshot {
            prebuilt: vec![
                system("Budget Box", 45_000, 4.1, "Integrated"),
                system("Arena", 70_000, 4.3, "Discrete"),
                system("Arena Plus", 70_000, 4.8, "Discrete"),
                system("Titan", 150_000, 5.0, "Discrete"),
            ],
            profiles: vec![ProfileRequirements {
                profile: Profile::Gaming,
                min_cpu_cores: 6,
                min_ram_gb: 16,
                min_ssd_gb: 512,
                gpu_required: true,
            }],
            ..Default::default()
        })
    }

    #[test]
    fn test_best_prefers_price_then_rating() {
        let catalog = catalog();
        let finder = PrebuiltFinder::new(&catalog);
        let best = finder
            .best(Profile::Gaming, Budget::new(100_000).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(best.listing.name, "Arena Plus");
    }

    #[test]
    fn test_next_skips_shown() {
        let catalog = catalog();
        let finder = PrebuiltFinder::new(&catalog);
        let budget = Budget::new(100_000).unwrap();

        let shown = vec!["Arena Plus".to_string()];
        let next = finder.next(Profile::Gaming, budget, &shown).unwrap().unwrap();
        assert_eq!(next.listing.name, "Arena");

        let shown = vec!["Arena Plus".to_string(), "Arena".to_string()];
        assert!(finder.next(Profile::Gaming, budget, &shown).unwrap().is_none());
    }

    #[test]
    fn test_unknown_profile_has_no_result() {
        let catalog = catalog();
        let finder = PrebuiltFinder::new(&catalog);
        assert!(finder
            .best(Profile::Office, Budget::new(100_000).unwrap())
            .unwrap()
            .is_none());
    }
}
