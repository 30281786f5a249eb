use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::item::errors::FieldError;
use crate::domain::item::errors::ItemError;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemDescription;
use crate::domain::item::models::ItemId;
use crate::domain::item::models::ItemName;
use crate::domain::item::models::NewItem;
use crate::domain::item::ports::ItemRepository;

pub struct PostgresItemRepository {
    pool: PgPool,
}

impl PostgresItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ItemRow {
    id: i64,
    name: String,
    description: String,
}

impl TryFrom<ItemRow> for Item {
    type Error = ItemError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let invalid =
            |e: FieldError| ItemError::DatabaseError(format!("Stored item {} is invalid: {}", id, e));

        Ok(Item {
            id: ItemId(row.id),
            name: ItemName::new(row.name).map_err(invalid)?,
            description: ItemDescription::new(row.description).map_err(invalid)?,
        })
    }
}

fn database_error(e: sqlx::Error) -> ItemError {
    ItemError::DatabaseError(e.to_string())
}

#[async_trait]
impl ItemRepository for PostgresItemRepository {
    async fn create(&self, item: NewItem) -> Result<Item, ItemError> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO inventory_items (name, description)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(item.name.as_str())
        .bind(item.description.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(item.with_id(ItemId(row.0)))
    }

    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, ItemError> {
        let row: Option<ItemRow> = sqlx::query_as(
            r#"
            SELECT id, name, description
            FROM inventory_items
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Item::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Item>, ItemError> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            r#"
            SELECT id, name, description
            FROM inventory_items
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Item::try_from).collect()
    }

    async fn update(&self, item: Item) -> Result<Item, ItemError> {
        let result = sqlx::query(
            r#"
            UPDATE inventory_items
            SET name = $2, description = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(item.id.0)
        .bind(item.name.as_str())
        .bind(item.description.as_str())
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ItemError::NotFound(item.id));
        }

        Ok(item)
    }

    async fn delete(&self, id: &ItemId) -> Result<(), ItemError> {
        let result = sqlx::query(
            r#"
            DELETE FROM inventory_items
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ItemError::NotFound(*id));
        }

        Ok(())
    }
}
