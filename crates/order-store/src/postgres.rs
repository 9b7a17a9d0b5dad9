use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{BuyerId, GoodsId, Money, OrderId};
use domain::{Order, OrderRepository, OrderStatus, RepositoryError};
use sqlx::{PgPool, Row, postgres::PgRow};

/// PostgreSQL-backed order repository.
#[derive(Clone)]
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    /// Creates a new PostgreSQL order repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_order(row: PgRow) -> Result<Order, RepositoryError> {
        let id = OrderId::new(row.try_get("id").map_err(backend)?);

        let item_count: i64 = row.try_get("item_count").map_err(backend)?;
        let item_count = u32::try_from(item_count).map_err(|_| RepositoryError::Corrupt {
            id,
            reason: format!("item_count {item_count} out of range"),
        })?;

        let status: String = row.try_get("status").map_err(backend)?;
        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| RepositoryError::Corrupt {
                id,
                reason: e.to_string(),
            })?;

        let created_at: DateTime<Utc> = row.try_get("created_at").map_err(backend)?;

        Order::restore(
            id,
            BuyerId::new(row.try_get("buyer_id").map_err(backend)?),
            GoodsId::new(row.try_get("goods_id").map_err(backend)?),
            item_count,
            Money::from_cents(row.try_get("unit_price_cents").map_err(backend)?),
            status,
            created_at,
        )
        .map_err(|e| RepositoryError::Corrupt {
            id,
            reason: e.to_string(),
        })
    }
}

fn backend(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Backend(Box::new(err))
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    #[tracing::instrument(skip(self, order), fields(buyer_id = %order.buyer_id()))]
    async fn create(&self, order: &mut Order) -> Result<(), RepositoryError> {
        if let Some(id) = order.id() {
            return Err(RepositoryError::AlreadyPersisted(id));
        }

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO orders (buyer_id, goods_id, item_count, unit_price_cents, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(order.buyer_id().value())
        .bind(order.goods_id().value())
        .bind(i64::from(order.item_count()))
        .bind(order.unit_price().cents())
        .bind(order.status().as_str())
        .bind(order.created_at())
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;

        order.assign_id(OrderId::new(id));
        tracing::debug!(order_id = id, "order row inserted");

        Ok(())
    }

    #[tracing::instrument(skip(self, order), fields(order_id = ?order.id()))]
    async fn enable(&self, order: &Order) -> Result<bool, RepositoryError> {
        let id = order.id().ok_or(RepositoryError::NotPersisted)?;

        // Only a CREATED row matches, so at most one concurrent caller wins.
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status = $3
            "#,
        )
        .bind(id.value())
        .bind(OrderStatus::Enabled.as_str())
        .bind(OrderStatus::Created.as_str())
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        if result.rows_affected() > 0 {
            Ok(true)
        } else {
            Err(RepositoryError::EnableFailure(id))
        }
    }

    async fn find(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, buyer_id, goods_id, item_count, unit_price_cents, status, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.map(Self::row_to_order).transpose()
    }
}
