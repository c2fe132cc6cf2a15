pub mod builders;
pub mod db;

pub use builders::DemographicBuilder;
pub use db::TestDb;
