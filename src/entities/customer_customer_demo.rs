use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer_customer_demo")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub customer_id: String,
    #[sea_orm(primary_key, auto_increment = false, column_type = "String(StringLen::N(10))")]
    pub customer_type_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer_demographic::Entity",
        from = "Column::CustomerTypeId",
        to = "super::customer_demographic::Column::CustomerTypeId",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    CustomerDemographic,
}

impl Related<super::customer_demographic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomerDemographic.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
