//! Service layer providing the catalog's business rules on top of models.
//! - Separates business logic from data access (`CatalogRepository`).
//! - Computes aggregate counts at read time.
//! - Maps store failures onto `ServiceError`.

pub mod errors;
pub mod pagination;
pub mod catalog;
#[cfg(test)]
pub mod test_support;
