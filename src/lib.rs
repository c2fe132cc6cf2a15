//! Customer demographics data layer
//!
//! Demographic categories (`customer_demographics`) and the links between
//! customers and categories (`customer_customer_demo`), persisted with SeaORM.
//! All modules are exposed for integration testing.

pub mod demographic_sync;
pub mod entities;
pub mod errors;
pub mod settings;
pub mod storage;
