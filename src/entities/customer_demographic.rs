use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer_demographics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "String(StringLen::N(10))")]
    pub customer_type_id: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub customer_desc: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::customer_customer_demo::Entity")]
    CustomerCustomerDemo,
}

impl Related<super::customer_customer_demo::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomerCustomerDemo.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
