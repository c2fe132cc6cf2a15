pub mod customer_customer_demo;
pub mod customer_demographic;

pub use customer_customer_demo::Entity as CustomerCustomerDemo;
pub use customer_demographic::Entity as CustomerDemographic;
