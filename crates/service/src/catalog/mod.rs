//! Catalog module: menus own submenus, submenus own dishes.
//!
//! Layers: `domain` (inputs and views), `repository` (persistence trait and
//! in-memory mock), `repo` (SeaORM implementation), `aggregate` (read-time
//! counts) and `service` (business rules).

pub mod aggregate;
pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::CatalogService;
