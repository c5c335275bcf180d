//! Supplier registry for the ESG dashboard
//!
//! Holds suppliers in memory and keeps their scores current. Also covers
//! form validation, search and filters, document uploads and exports.

pub mod config;
pub mod documents;
pub mod error;
pub mod export;
pub mod filter;
pub mod mock_data;
pub mod registry;
pub mod validation;

pub use config::{Config, ExportConfig, UploadConfig};
pub use documents::{FileCandidate, UploadPolicy, UploadSimulator, UploadStatus, UploadedFile};
pub use error::RegistryError;
pub use export::{ExportError, ExportFormat, ExportMetadata, Exporter};
pub use filter::SupplierFilter;
pub use registry::SupplierRegistry;
pub use validation::{FieldError, FormField, SupplierForm};
