//! PostgreSQL-backed collaborators for the order lifecycle.

pub mod goods;
pub mod postgres;

pub use goods::PostgresGoodsCatalog;
pub use postgres::PostgresOrderRepository;
