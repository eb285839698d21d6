use crate::data::database::Database;
use crate::data::models::product::Product;
use crate::data::models::variant::ProductVariant;
use crate::data::repos::traits::store::{CatalogStore, StoreError};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::pooled_connection::deadpool::Object;
use diesel_async::{AsyncMysqlConnection, RunQueryDsl};

pub struct CatalogRepo {}

impl CatalogRepo {
    pub fn new() -> Self {
        CatalogRepo {}
    }
}

#[async_trait]
impl CatalogStore for CatalogRepo {
    async fn get_product(&self, id: i32) -> Result<Option<Product>, StoreError> {
        use crate::data::models::schema::products::dsl::{product_id, products};

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db
            .get_connection()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        match products
            .filter(product_id.eq(id))
            .first::<Product>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }

    async fn get_variant(
        &self,
        id: i32,
        color_query: Option<&str>,
        size_query: Option<&str>,
    ) -> Result<Option<ProductVariant>, StoreError> {
        use crate::data::models::schema::product_variants::dsl::{
            color, product_id, product_variants, size,
        };

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db
            .get_connection()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        // NULL columns only match an absent color/size, never a concrete one.
        let mut query = product_variants
            .filter(product_id.eq(id))
            .into_boxed::<diesel::mysql::Mysql>();
        query = match color_query {
            Some(c) => query.filter(color.eq(c.to_owned())),
            None => query.filter(color.is_null()),
        };
        query = match size_query {
            Some(s) => query.filter(size.eq(s.to_owned())),
            None => query.filter(size.is_null()),
        };

        match query.first::<ProductVariant>(&mut conn).await {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }
}

impl Default for CatalogRepo {
    fn default() -> Self {
        Self::new()
    }
}
