//! Brand-scoped access to an open record session.

use crate::record::store::RecordSession;
use crate::record::{BrandRecord, RecordError, RecordFilter};

use super::Brand;

/// A brand bound to an open session.
///
/// Every operation targets that brand's collection only.
pub struct BrandHandle<'s, S: RecordSession> {
    brand: Brand,
    session: &'s mut S,
}

impl<'s, S: RecordSession> BrandHandle<'s, S> {
    /// Binds `brand` to `session`.
    pub fn new(brand: Brand, session: &'s mut S) -> Self {
        Self { brand, session }
    }

    /// Resolves a brand name and binds it to `session`.
    pub fn resolve(name: &str, session: &'s mut S) -> Result<Self, RecordError> {
        Brand::resolve(name)
            .map(|brand| Self::new(brand, session))
            .ok_or_else(|| RecordError::InvalidBrand(name.to_string()))
    }

    /// The bound brand.
    #[must_use]
    pub const fn brand(&self) -> Brand {
        self.brand
    }

    /// Find a record by id.
    pub async fn find_by_id(&mut self, id: i32) -> Result<Option<BrandRecord>, RecordError> {
        self.session.find_by_id(self.brand, id).await
    }

    /// List records matching the filter.
    pub async fn query(&mut self, filter: &RecordFilter) -> Result<Vec<BrandRecord>, RecordError> {
        self.session.query(self.brand, filter).await
    }

    /// First record (lowest id) matching the filter.
    pub async fn first(
        &mut self,
        filter: &RecordFilter,
    ) -> Result<Option<BrandRecord>, RecordError> {
        Ok(self.query(filter).await?.into_iter().next())
    }

    /// Insert a new record.
    pub async fn add(&mut self, record: BrandRecord) -> Result<BrandRecord, RecordError> {
        self.session.add(self.brand, record).await
    }

    /// Overwrite an existing record.
    pub async fn update_in_place(
        &mut self,
        record: BrandRecord,
    ) -> Result<BrandRecord, RecordError> {
        self.session.update_in_place(self.brand, record).await
    }
}
