use crate::entities;
use crate::errors::StoreError;
use crate::settings::{Database as DbCfg, DeletePolicy};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};

/// A demographic category together with the customer links loaded for it.
///
/// This is a passive holder: identifier length and uniqueness are enforced by
/// the store at write time. The link collection is always present; it is only
/// filled by [`get_demographic_with_demos`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDemographic {
    customer_type_id: String,
    customer_desc: Option<String>,
    #[serde(default)]
    customer_customer_demos: Vec<CustomerCustomerDemo>,
}

/// One customer linked to one demographic category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerCustomerDemo {
    pub customer_id: String,
    pub customer_type_id: String,
}

impl CustomerDemographic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(customer_type_id: impl Into<String>) -> Self {
        Self {
            customer_type_id: customer_type_id.into(),
            ..Self::default()
        }
    }

    pub fn customer_type_id(&self) -> &str {
        &self.customer_type_id
    }

    pub fn set_customer_type_id(&mut self, customer_type_id: impl Into<String>) {
        self.customer_type_id = customer_type_id.into();
    }

    pub fn customer_desc(&self) -> Option<&str> {
        self.customer_desc.as_deref()
    }

    pub fn set_customer_desc(&mut self, customer_desc: Option<String>) {
        self.customer_desc = customer_desc;
    }

    pub fn customer_customer_demos(&self) -> &[CustomerCustomerDemo] {
        &self.customer_customer_demos
    }

    pub fn customer_customer_demos_mut(&mut self) -> &mut Vec<CustomerCustomerDemo> {
        &mut self.customer_customer_demos
    }
}

impl From<entities::customer_demographic::Model> for CustomerDemographic {
    fn from(model: entities::customer_demographic::Model) -> Self {
        Self {
            customer_type_id: model.customer_type_id,
            customer_desc: model.customer_desc,
            customer_customer_demos: Vec::new(),
        }
    }
}

impl From<entities::customer_customer_demo::Model> for CustomerCustomerDemo {
    fn from(model: entities::customer_customer_demo::Model) -> Self {
        Self {
            customer_id: model.customer_id,
            customer_type_id: model.customer_type_id,
        }
    }
}

pub async fn init(cfg: &DbCfg) -> Result<DatabaseConnection, StoreError> {
    let db = Database::connect(&cfg.url).await?;
    Migrator::up(&db, None).await?;
    tracing::debug!("Database migrations applied");
    Ok(db)
}

// Customer demographic functions

/// Insert a new demographic category.
///
/// Only the identifier and description are written; links are separate rows
/// created with [`link_customer`].
pub async fn create_demographic(
    db: &DatabaseConnection,
    record: &CustomerDemographic,
) -> Result<CustomerDemographic, StoreError> {
    let demographic = entities::customer_demographic::ActiveModel {
        customer_type_id: Set(record.customer_type_id.clone()),
        customer_desc: Set(record.customer_desc.clone()),
    };

    let model = demographic
        .insert(db)
        .await
        .map_err(|e| StoreError::from_write(e, &record.customer_type_id))?;

    Ok(model.into())
}

pub async fn get_demographic(
    db: &DatabaseConnection,
    customer_type_id: &str,
) -> Result<Option<CustomerDemographic>, StoreError> {
    use entities::customer_demographic::Entity;

    let model = Entity::find_by_id(customer_type_id).one(db).await?;
    Ok(model.map(CustomerDemographic::from))
}

/// Load a demographic category and, with a second query, all of its links.
pub async fn get_demographic_with_demos(
    db: &DatabaseConnection,
    customer_type_id: &str,
) -> Result<Option<CustomerDemographic>, StoreError> {
    use entities::customer_customer_demo::{Column as DemoColumn, Entity as DemoEntity};
    use entities::customer_demographic::Entity;

    let Some(model) = Entity::find_by_id(customer_type_id).one(db).await? else {
        return Ok(None);
    };

    let demos = model
        .find_related(DemoEntity)
        .order_by_asc(DemoColumn::CustomerId)
        .all(db)
        .await?;

    let mut record = CustomerDemographic::from(model);
    record.customer_customer_demos = demos.into_iter().map(Into::into).collect();
    Ok(Some(record))
}

pub async fn list_demographics(
    db: &DatabaseConnection,
) -> Result<Vec<CustomerDemographic>, StoreError> {
    use entities::customer_demographic::{Column, Entity};

    let models = Entity::find()
        .order_by_asc(Column::CustomerTypeId)
        .all(db)
        .await?;

    Ok(models.into_iter().map(Into::into).collect())
}

/// Replace the description of an existing demographic category.
pub async fn update_demographic_desc(
    db: &DatabaseConnection,
    customer_type_id: &str,
    customer_desc: Option<String>,
) -> Result<(), StoreError> {
    use entities::customer_demographic::Entity;

    let demographic = Entity::find_by_id(customer_type_id)
        .one(db)
        .await?
        .ok_or_else(|| {
            StoreError::NotFound(format!("Customer demographic: {}", customer_type_id))
        })?;

    let mut active: entities::customer_demographic::ActiveModel = demographic.into();
    active.customer_desc = Set(customer_desc);
    active.update(db).await?;

    Ok(())
}

/// Insert or update a demographic category keyed by its identifier.
pub async fn save_demographic(
    db: &DatabaseConnection,
    record: &CustomerDemographic,
) -> Result<(), StoreError> {
    use entities::customer_demographic::{Column, Entity};
    use sea_orm::sea_query::OnConflict;

    let demographic = entities::customer_demographic::ActiveModel {
        customer_type_id: Set(record.customer_type_id.clone()),
        customer_desc: Set(record.customer_desc.clone()),
    };

    Entity::insert(demographic)
        .on_conflict(
            OnConflict::column(Column::CustomerTypeId)
                .update_column(Column::CustomerDesc)
                .to_owned(),
        )
        .exec_without_returning(db)
        .await
        .map_err(|e| StoreError::from_write(e, &record.customer_type_id))?;

    Ok(())
}

/// Delete a demographic category, returning how many customer links were
/// removed with it.
///
/// With [`DeletePolicy::Restrict`] the delete fails with
/// [`StoreError::StillReferenced`] while any link exists and nothing is
/// changed. With [`DeletePolicy::Cascade`] the links are removed first, in the
/// same transaction.
pub async fn delete_demographic(
    db: &DatabaseConnection,
    customer_type_id: &str,
    policy: DeletePolicy,
) -> Result<u64, StoreError> {
    use entities::customer_customer_demo::{Column as DemoColumn, Entity as DemoEntity};
    use entities::customer_demographic::Entity;

    let txn = db.begin().await?;

    if Entity::find_by_id(customer_type_id).one(&txn).await?.is_none() {
        return Err(StoreError::NotFound(format!(
            "Customer demographic: {}",
            customer_type_id
        )));
    }

    let links = DemoEntity::find()
        .filter(DemoColumn::CustomerTypeId.eq(customer_type_id))
        .count(&txn)
        .await?;

    let removed = match policy {
        DeletePolicy::Restrict if links > 0 => {
            return Err(StoreError::StillReferenced {
                customer_type_id: customer_type_id.to_string(),
                links,
            });
        }
        DeletePolicy::Restrict => 0,
        DeletePolicy::Cascade => {
            DemoEntity::delete_many()
                .filter(DemoColumn::CustomerTypeId.eq(customer_type_id))
                .exec(&txn)
                .await?
                .rows_affected
        }
    };

    Entity::delete_by_id(customer_type_id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(
        customer_type_id,
        removed_links = removed,
        "Deleted customer demographic"
    );

    Ok(removed)
}

// Customer link functions

pub async fn link_customer(
    db: &DatabaseConnection,
    customer_id: &str,
    customer_type_id: &str,
) -> Result<CustomerCustomerDemo, StoreError> {
    use sea_orm::SqlErr;

    let link = entities::customer_customer_demo::ActiveModel {
        customer_id: Set(customer_id.to_string()),
        customer_type_id: Set(customer_type_id.to_string()),
    };

    let model = link.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            StoreError::Duplicate(format!("{}/{}", customer_id, customer_type_id))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            StoreError::MissingDemographic(customer_type_id.to_string())
        }
        _ => StoreError::Db(e),
    })?;

    Ok(model.into())
}

/// Remove a customer link. Returns `false` when there was nothing to remove.
pub async fn unlink_customer(
    db: &DatabaseConnection,
    customer_id: &str,
    customer_type_id: &str,
) -> Result<bool, StoreError> {
    use entities::customer_customer_demo::Entity;

    let result = Entity::delete_by_id((customer_id.to_string(), customer_type_id.to_string()))
        .exec(db)
        .await?;

    Ok(result.rows_affected > 0)
}

pub async fn get_demos_by_type(
    db: &DatabaseConnection,
    customer_type_id: &str,
) -> Result<Vec<CustomerCustomerDemo>, StoreError> {
    use entities::customer_customer_demo::{Column, Entity};

    let demos = Entity::find()
        .filter(Column::CustomerTypeId.eq(customer_type_id))
        .order_by_asc(Column::CustomerId)
        .all(db)
        .await?;

    Ok(demos.into_iter().map(Into::into).collect())
}

pub async fn get_demos_by_customer(
    db: &DatabaseConnection,
    customer_id: &str,
) -> Result<Vec<CustomerCustomerDemo>, StoreError> {
    use entities::customer_customer_demo::{Column, Entity};

    let demos = Entity::find()
        .filter(Column::CustomerId.eq(customer_id))
        .order_by_asc(Column::CustomerTypeId)
        .all(db)
        .await?;

    Ok(demos.into_iter().map(Into::into).collect())
}

pub async fn count_demos_by_type(
    db: &DatabaseConnection,
    customer_type_id: &str,
) -> Result<u64, StoreError> {
    use entities::customer_customer_demo::{Column, Entity};

    let count = Entity::find()
        .filter(Column::CustomerTypeId.eq(customer_type_id))
        .count(db)
        .await?;

    Ok(count)
}
