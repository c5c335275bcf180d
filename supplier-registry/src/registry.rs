//! Concurrent in-memory supplier store

use crate::documents::{FileCandidate, UploadPolicy, UploadSimulator, UploadedFile};
use crate::error::{RegistryError, Result};
use crate::filter::SupplierFilter;
use crate::validation::SupplierForm;
use chrono::Utc;
use dashmap::DashMap;
use esg_core::{
    aggregate, summarize, ComplianceFlags, DashboardStats, Document, ReportSummary, Supplier,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// In-memory supplier store
///
/// Score and risk tier are kept in step with the stored flags because every
/// flag change goes through `Supplier::set_flags`.
#[derive(Clone, Default)]
pub struct SupplierRegistry {
    suppliers: Arc<DashMap<Uuid, Supplier>>,
}

impl SupplierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-filled with existing records
    pub fn with_suppliers(suppliers: impl IntoIterator<Item = Supplier>) -> Self {
        let registry = Self::new();
        for supplier in suppliers {
            registry.suppliers.insert(supplier.id(), supplier);
        }
        info!("Loaded {} suppliers", registry.len());
        registry
    }

    pub fn len(&self) -> usize {
        self.suppliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
    }

    /// Add a new supplier
    pub fn create(&self, form: &SupplierForm, flags: ComplianceFlags) -> Result<Supplier> {
        let form = form.validated()?;
        let supplier = Supplier::new(
            Uuid::new_v4(),
            form.name,
            form.country,
            form.category,
            flags,
            Utc::now(),
        );

        info!(
            "Added supplier {} ({}) score={} risk={}",
            supplier.name(),
            supplier.id(),
            supplier.esg_score(),
            supplier.risk_level()
        );
        self.suppliers.insert(supplier.id(), supplier.clone());
        Ok(supplier)
    }

    pub fn get(&self, id: Uuid) -> Result<Supplier> {
        self.suppliers
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(RegistryError::SupplierNotFound(id))
    }

    /// All suppliers, ordered by name
    pub fn list(&self) -> Vec<Supplier> {
        let mut suppliers: Vec<Supplier> = self
            .suppliers
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        suppliers.sort_by(|a, b| {
            a.name()
                .to_lowercase()
                .cmp(&b.name().to_lowercase())
                .then_with(|| a.id().cmp(&b.id()))
        });
        suppliers
    }

    pub fn filtered(&self, filter: &SupplierFilter) -> Vec<Supplier> {
        self.list()
            .into_iter()
            .filter(|supplier| filter.matches(supplier))
            .collect()
    }

    /// Edit name, country and category
    pub fn update_details(&self, id: Uuid, form: &SupplierForm) -> Result<Supplier> {
        let form = form.validated()?;
        self.modify(id, |supplier| {
            supplier.set_details(form.name, form.country, form.category, Utc::now())
        })
    }

    /// Replace compliance flags; score and risk tier are re-derived
    pub fn update_flags(&self, id: Uuid, flags: ComplianceFlags) -> Result<Supplier> {
        let updated = self.modify(id, |supplier| supplier.set_flags(flags, Utc::now()))?;
        info!(
            "Re-scored supplier {}: score={} risk={}",
            id,
            updated.esg_score(),
            updated.risk_level()
        );
        Ok(updated)
    }

    pub fn attach_document(&self, id: Uuid, document: Document) -> Result<Supplier> {
        debug!("Attaching {} to supplier {}", document.name, id);
        self.modify(id, |supplier| supplier.attach_document(document, Utc::now()))
    }

    /// Screen, upload and attach a batch of documents. Files failing the
    /// type or size check are skipped and returned alongside the supplier.
    pub async fn upload_documents(
        &self,
        id: Uuid,
        files: Vec<FileCandidate>,
        policy: UploadPolicy,
        simulator: &UploadSimulator,
    ) -> Result<(Supplier, Vec<RegistryError>)> {
        // Fail before simulating anything for an unknown supplier
        self.get(id)?;

        let screening = policy.screen(files)?;
        let mut uploads: Vec<UploadedFile> = screening
            .accepted
            .iter()
            .map(|(file, kind)| UploadedFile::start(file, *kind))
            .collect();

        let mut rng = StdRng::from_entropy();
        simulator.run(&mut uploads, &mut rng).await;

        let mut supplier = self.get(id)?;
        for document in uploads.into_iter().filter_map(UploadedFile::into_document) {
            supplier = self.attach_document(id, document)?;
        }

        if !screening.rejected.is_empty() {
            warn!(
                "{} files rejected for supplier {}",
                screening.rejected.len(),
                id
            );
        }
        Ok((supplier, screening.rejected))
    }

    pub fn remove(&self, id: Uuid) -> Result<Supplier> {
        let (_, supplier) = self
            .suppliers
            .remove(&id)
            .ok_or(RegistryError::SupplierNotFound(id))?;
        info!("Removed supplier {} ({})", supplier.name(), id);
        Ok(supplier)
    }

    /// Dashboard counts over the current collection
    pub fn stats(&self) -> DashboardStats {
        aggregate(&self.list())
    }

    /// Report figures over the current collection
    pub fn summary(&self) -> ReportSummary {
        summarize(&self.list())
    }

    fn modify(&self, id: Uuid, change: impl FnOnce(&mut Supplier)) -> Result<Supplier> {
        let mut entry = self
            .suppliers
            .get_mut(&id)
            .ok_or(RegistryError::SupplierNotFound(id))?;
        change(entry.value_mut());
        Ok(entry.value().clone())
    }
}
