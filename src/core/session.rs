//! Data-access seam and per-invocation session cache
//!
//! Commands never talk to storage directly. They receive a [`Session`] that
//! owns a [`FoodRepository`], memoizes the first full load, and drops the
//! memoized tables whenever a write goes through it, so a load that follows
//! a mutation always sees the write.

use crate::core::dataset::Dataset;
use crate::core::store::StoreError;
use crate::entities::{FoodListing, NewFoodListing, NewProvider, Provider};

/// Storage operations the dashboard needs
pub trait FoodRepository {
    /// Fetch every row of the four tables
    fn load(&self) -> Result<Dataset, StoreError>;

    /// Insert a provider, returning the assigned identity
    fn insert_provider(&self, provider: &NewProvider) -> Result<i64, StoreError>;

    /// Set one provider's contact, returning rows affected
    fn update_provider_contact(&self, provider_id: i64, contact: &str) -> Result<usize, StoreError>;

    /// Delete one provider, returning rows affected
    fn delete_provider(&self, provider_id: i64) -> Result<usize, StoreError>;

    /// Insert a food listing, returning the assigned identity
    fn insert_food(&self, food: &NewFoodListing) -> Result<i64, StoreError>;

    /// Delete one food listing, returning rows affected
    fn delete_food(&self, food_id: i64) -> Result<usize, StoreError>;
}

/// Memoizing wrapper around a repository
pub struct Session<R: FoodRepository> {
    repo: R,
    cached: Option<Dataset>,
}

impl<R: FoodRepository> Session<R> {
    pub fn new(repo: R) -> Self {
        Self { repo, cached: None }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// The loaded tables, fetching them on first use
    pub fn dataset(&mut self) -> Result<&Dataset, StoreError> {
        if self.cached.is_none() {
            log::debug!("session cache empty, loading tables");
            self.cached = Some(self.repo.load()?);
        }
        Ok(self.cached.get_or_insert_with(Dataset::default))
    }

    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }

    /// Drop the memoized tables; the next [`Session::dataset`] call re-fetches
    pub fn invalidate(&mut self) {
        if self.cached.take().is_some() {
            log::debug!("session cache invalidated");
        }
    }

    pub fn add_provider(&mut self, provider: NewProvider) -> Result<Provider, StoreError> {
        let result = self.repo.insert_provider(&provider);
        self.invalidate();
        result.map(|id| provider.with_id(id))
    }

    pub fn update_provider_contact(&mut self, provider_id: i64, contact: &str) -> Result<usize, StoreError> {
        let result = self.repo.update_provider_contact(provider_id, contact);
        self.invalidate();
        result
    }

    pub fn delete_provider(&mut self, provider_id: i64) -> Result<usize, StoreError> {
        let result = self.repo.delete_provider(provider_id);
        self.invalidate();
        result
    }

    pub fn add_food(&mut self, food: NewFoodListing) -> Result<FoodListing, StoreError> {
        let result = self.repo.insert_food(&food);
        self.invalidate();
        result.map(|id| food.with_id(id))
    }

    pub fn delete_food(&mut self, food_id: i64) -> Result<usize, StoreError> {
        let result = self.repo.delete_food(food_id);
        self.invalidate();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// In-memory repository that counts loads
    #[derive(Default)]
    struct MemoryRepo {
        data: RefCell<Dataset>,
        loads: Cell<usize>,
    }

    impl FoodRepository for MemoryRepo {
        fn load(&self) -> Result<Dataset, StoreError> {
            self.loads.set(self.loads.get() + 1);
            Ok(self.data.borrow().clone())
        }

        fn insert_provider(&self, provider: &NewProvider) -> Result<i64, StoreError> {
            let mut data = self.data.borrow_mut();
            let id = data.providers.iter().map(|p| p.id).max().unwrap_or(0) + 1;
            data.providers.push(provider.clone().with_id(id));
            Ok(id)
        }

        fn update_provider_contact(&self, provider_id: i64, contact: &str) -> Result<usize, StoreError> {
            let mut data = self.data.borrow_mut();
            let mut affected = 0;
            for p in data.providers.iter_mut().filter(|p| p.id == provider_id) {
                p.contact = contact.to_string();
                affected += 1;
            }
            Ok(affected)
        }

        fn delete_provider(&self, provider_id: i64) -> Result<usize, StoreError> {
            let mut data = self.data.borrow_mut();
            let before = data.providers.len();
            data.providers.retain(|p| p.id != provider_id);
            Ok(before - data.providers.len())
        }

        fn insert_food(&self, food: &NewFoodListing) -> Result<i64, StoreError> {
            let mut data = self.data.borrow_mut();
            let id = data.food.iter().map(|f| f.id).max().unwrap_or(0) + 1;
            data.food.push(food.clone().with_id(id));
            Ok(id)
        }

        fn delete_food(&self, food_id: i64) -> Result<usize, StoreError> {
            let mut data = self.data.borrow_mut();
            let before = data.food.len();
            data.food.retain(|f| f.id != food_id);
            Ok(before - data.food.len())
        }
    }

    /// Repository whose writes are always rejected
    #[derive(Default)]
    struct RejectingRepo {
        loads: Cell<usize>,
    }

    impl RejectingRepo {
        fn rejected(operation: &'static str) -> StoreError {
            StoreError::WriteFailed {
                operation,
                source: rusqlite::Error::QueryReturnedNoRows,
            }
        }
    }

    impl FoodRepository for RejectingRepo {
        fn load(&self) -> Result<Dataset, StoreError> {
            self.loads.set(self.loads.get() + 1);
            Ok(Dataset::default())
        }

        fn insert_provider(&self, _provider: &NewProvider) -> Result<i64, StoreError> {
            Err(Self::rejected("insert provider"))
        }

        fn update_provider_contact(&self, _provider_id: i64, _contact: &str) -> Result<usize, StoreError> {
            Err(Self::rejected("update provider contact"))
        }

        fn delete_provider(&self, _provider_id: i64) -> Result<usize, StoreError> {
            Err(Self::rejected("delete provider"))
        }

        fn insert_food(&self, _food: &NewFoodListing) -> Result<i64, StoreError> {
            Err(Self::rejected("insert food listing"))
        }

        fn delete_food(&self, _food_id: i64) -> Result<usize, StoreError> {
            Err(Self::rejected("delete food listing"))
        }
    }

    #[test]
    fn test_dataset_is_memoized() {
        let mut session = Session::new(MemoryRepo::default());
        assert!(!session.is_cached());

        session.dataset().unwrap();
        session.dataset().unwrap();

        assert!(session.is_cached());
        assert_eq!(session.repository().loads.get(), 1);
    }

    #[test]
    fn test_write_invalidates_cache() {
        let mut session = Session::new(MemoryRepo::default());
        assert!(session.dataset().unwrap().providers.is_empty());

        let added = session
            .add_provider(NewProvider::new("A", "Bakery", "1 Road", "X", "555"))
            .unwrap();
        assert!(!session.is_cached());

        let dataset = session.dataset().unwrap();
        assert_eq!(dataset.providers, vec![added]);
        assert_eq!(session.repository().loads.get(), 2);
    }

    #[test]
    fn test_update_then_reload_sees_new_contact() {
        let mut session = Session::new(MemoryRepo::default());
        let p = session
            .add_provider(NewProvider::new("A", "Bakery", "1 Road", "X", "old"))
            .unwrap();
        session.dataset().unwrap();

        assert_eq!(session.update_provider_contact(p.id, "new").unwrap(), 1);
        assert_eq!(session.dataset().unwrap().provider(p.id).unwrap().contact, "new");
    }

    #[test]
    fn test_delete_reports_rows_affected() {
        let mut session = Session::new(MemoryRepo::default());
        let p = session
            .add_provider(NewProvider::new("A", "Bakery", "1 Road", "X", "c"))
            .unwrap();
        assert_eq!(session.delete_provider(p.id).unwrap(), 1);
        assert_eq!(session.delete_provider(p.id).unwrap(), 0);
        assert_eq!(session.delete_food(7).unwrap(), 0);
    }

    #[test]
    fn test_explicit_invalidate() {
        let mut session = Session::new(MemoryRepo::default());
        session.dataset().unwrap();
        session.invalidate();
        session.dataset().unwrap();
        assert_eq!(session.repository().loads.get(), 2);
    }

    #[test]
    fn test_failed_write_still_invalidates_cache() {
        let mut session = Session::new(RejectingRepo::default());

        session.dataset().unwrap();
        let err = session.delete_provider(1).unwrap_err();
        assert!(err.is_write_failure());
        assert!(!session.is_cached());

        session.dataset().unwrap();
        assert!(session
            .add_provider(NewProvider::new("A", "Bakery", "1 Road", "X", "c"))
            .is_err());
        assert!(!session.is_cached());

        session.dataset().unwrap();
        assert_eq!(session.repository().loads.get(), 3);
    }
}
