use async_trait::async_trait;
use common::{GoodsId, Money};
use domain::{Goods, GoodsLookup, LookupError};
use sqlx::{PgPool, Row, postgres::PgRow};

/// Goods lookup backed by the `goods` table.
#[derive(Clone)]
pub struct PostgresGoodsCatalog {
    pool: PgPool,
}

impl PostgresGoodsCatalog {
    /// Creates a new catalog over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts or replaces a goods row.
    pub async fn upsert(&self, goods: &Goods) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO goods (id, name, price_cents)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, price_cents = EXCLUDED.price_cents
            "#,
        )
        .bind(goods.id.value())
        .bind(&goods.name)
        .bind(goods.price.cents())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn row_to_goods(row: PgRow) -> Result<Goods, sqlx::Error> {
        Ok(Goods::new(
            GoodsId::new(row.try_get("id")?),
            row.try_get::<String, _>("name")?,
            Money::from_cents(row.try_get("price_cents")?),
        ))
    }
}

#[async_trait]
impl GoodsLookup for PostgresGoodsCatalog {
    #[tracing::instrument(skip(self))]
    async fn require_goods(&self, goods_id: GoodsId) -> Result<Goods, LookupError> {
        let row = sqlx::query("SELECT id, name, price_cents FROM goods WHERE id = $1")
            .bind(goods_id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| LookupError::Backend(Box::new(e)))?
            .ok_or(LookupError::NotFound(goods_id))?;

        Self::row_to_goods(row).map_err(|e| LookupError::Backend(Box::new(e)))
    }
}
