pub mod catalog;
pub mod error;
pub mod filter;
pub mod interval;
pub mod pdf;
pub mod schedule;
pub mod service;

pub use crate::catalog::{Catalog, PlantRecord};
pub use crate::error::{CatalogError, ExportError};
pub use crate::interval::Interval;
pub use crate::schedule::{Field, Schedule, ScheduleLine};
pub use crate::service::{CareGuide, CareGuideBuilder};
