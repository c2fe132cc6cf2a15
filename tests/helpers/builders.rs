use demographics::storage::{self, CustomerDemographic};
use sea_orm::DatabaseConnection;

/// Builder for creating test demographic categories with linked customers
pub struct DemographicBuilder {
    customer_type_id: String,
    customer_desc: Option<String>,
    customers: Vec<String>,
}

impl DemographicBuilder {
    pub fn new(customer_type_id: &str) -> Self {
        Self {
            customer_type_id: customer_type_id.to_string(),
            customer_desc: Some(format!("{} customers", customer_type_id)),
            customers: Vec::new(),
        }
    }

    pub fn with_desc(mut self, desc: &str) -> Self {
        self.customer_desc = Some(desc.to_string());
        self
    }

    pub fn without_desc(mut self) -> Self {
        self.customer_desc = None;
        self
    }

    pub fn with_customer(mut self, customer_id: &str) -> Self {
        self.customers.push(customer_id.to_string());
        self
    }

    pub fn with_customers(mut self, count: usize) -> Self {
        self.customers.extend((0..count).map(|i| format!("CUST{:04}", i)));
        self
    }

    pub async fn create(self, db: &DatabaseConnection) -> CustomerDemographic {
        let mut record = CustomerDemographic::with_id(self.customer_type_id.as_str());
        record.set_customer_desc(self.customer_desc);

        let created = storage::create_demographic(db, &record)
            .await
            .expect("Failed to create test demographic");

        for customer_id in &self.customers {
            storage::link_customer(db, customer_id, &self.customer_type_id)
                .await
                .expect("Failed to link test customer");
        }

        created
    }
}
