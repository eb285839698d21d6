use crate::data::database::Database;
use crate::data::models::order::{NewOrder, Order};
use crate::data::models::order_item::{NewOrderItem, OrderItem};
use crate::data::repos::traits::store::{OrderDraft, OrderItemDraft, OrderStore, StoreError};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::pooled_connection::deadpool::Object;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncMysqlConnection, RunQueryDsl};

/// Carries commit-time stock failures out of the transaction closure.
enum TxError {
    InsufficientStock(String),
    Diesel(result::Error),
}

impl From<result::Error> for TxError {
    fn from(e: result::Error) -> Self {
        TxError::Diesel(e)
    }
}

pub struct OrderRepo {}

impl OrderRepo {
    pub fn new() -> Self {
        OrderRepo {}
    }
}

#[async_trait]
impl OrderStore for OrderRepo {
    async fn create_order_and_items(
        &self,
        draft: OrderDraft,
        items: &[OrderItemDraft],
    ) -> Result<i32, StoreError> {
        use crate::data::models::schema::order_items::dsl::order_items;
        use crate::data::models::schema::orders::dsl::orders;
        use crate::data::models::schema::product_variants::dsl::{
            product_variants, stock as variant_stock, variant_id as variant_id_col,
        };
        use crate::data::models::schema::products::dsl::{
            name as product_name_col, product_id as product_id_col, products,
            stock as product_stock,
        };

        let db = Database::new().await;
        let mut conn = db
            .get_connection()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let address_json = serde_json::to_string(&draft.shipping_address)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let item_drafts: Vec<OrderItemDraft> = items.to_vec();

        let created = conn
            .transaction::<i32, TxError, _>(|connection| {
                async move {
                    let new_order = NewOrder {
                        user_id: draft.user_id,
                        guest_email: draft.guest_email.as_deref(),
                        payment_intent_id: &draft.payment_intent_id,
                        total_amount: draft.total_amount.clone(),
                        shipping_address: &address_json,
                    };

                    diesel::insert_into(orders)
                        .values(&new_order)
                        .execute(connection)
                        .await?;

                    let new_id: i32 = diesel::select(diesel::dsl::sql::<
                        diesel::sql_types::Integer,
                    >("LAST_INSERT_ID()"))
                    .get_result(connection)
                    .await?;

                    let new_items: Vec<NewOrderItem> = item_drafts
                        .iter()
                        .map(|it| NewOrderItem {
                            order_id: new_id,
                            product_id: it.product_id,
                            variant_id: it.variant_id,
                            quantity: it.quantity,
                            unit_price: it.unit_price.clone(),
                        })
                        .collect();

                    diesel::insert_into(order_items)
                        .values(&new_items)
                        .execute(connection)
                        .await?;

                    // Guarded decrements enforce the stock invariant at commit
                    // time; zero affected rows aborts the whole transaction.
                    for it in &item_drafts {
                        let affected = diesel::update(
                            products
                                .filter(product_id_col.eq(it.product_id))
                                .filter(product_stock.ge(it.quantity)),
                        )
                        .set(product_stock.eq(product_stock - it.quantity))
                        .execute(connection)
                        .await?;

                        if affected == 0 {
                            let name: Option<String> = products
                                .filter(product_id_col.eq(it.product_id))
                                .select(product_name_col)
                                .first(connection)
                                .await
                                .optional()?;
                            return Err(TxError::InsufficientStock(
                                name.unwrap_or_else(|| format!("product {}", it.product_id)),
                            ));
                        }

                        if let Some(vid) = it.variant_id {
                            let affected = diesel::update(
                                product_variants
                                    .filter(variant_id_col.eq(vid))
                                    .filter(variant_stock.ge(it.quantity)),
                            )
                            .set(variant_stock.eq(variant_stock - it.quantity))
                            .execute(connection)
                            .await?;

                            if affected == 0 {
                                let name: Option<String> = products
                                    .filter(product_id_col.eq(it.product_id))
                                    .select(product_name_col)
                                    .first(connection)
                                    .await
                                    .optional()?;
                                return Err(TxError::InsufficientStock(
                                    name.unwrap_or_else(|| {
                                        format!("product {}", it.product_id)
                                    }),
                                ));
                            }
                        }
                    }

                    Ok(new_id)
                }
                .scope_boxed()
            })
            .await;

        match created {
            Ok(id) => Ok(id),
            Err(TxError::InsufficientStock(name)) => {
                Err(StoreError::InsufficientStock { product_name: name })
            }
            Err(TxError::Diesel(result::Error::DatabaseError(
                result::DatabaseErrorKind::UniqueViolation,
                _,
            ))) => Err(StoreError::DuplicatePaymentIntent),
            Err(TxError::Diesel(e)) => Err(StoreError::Backend(e.to_string())),
        }
    }

    async fn get_by_id(
        &self,
        id: i32,
    ) -> Result<Option<(Order, Vec<OrderItem>)>, StoreError> {
        use crate::data::models::schema::order_items::dsl::{
            order_id as item_order_id, order_items,
        };
        use crate::data::models::schema::orders::dsl::{order_id, orders};

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db
            .get_connection()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let order = match orders
            .filter(order_id.eq(id))
            .first::<Order>(&mut conn)
            .await
        {
            Ok(value) => value,
            Err(result::Error::NotFound) => return Ok(None),
            Err(e) => return Err(StoreError::Backend(e.to_string())),
        };

        let items = order_items
            .filter(item_order_id.eq(id))
            .load::<OrderItem>(&mut conn)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(Some((order, items)))
    }

    async fn get_by_payment_intent(&self, intent_id: &str) -> Result<Option<Order>, StoreError> {
        use crate::data::models::schema::orders::dsl::{orders, payment_intent_id};

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db
            .get_connection()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        match orders
            .filter(payment_intent_id.eq(intent_id.to_owned()))
            .first::<Order>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }
}

impl Default for OrderRepo {
    fn default() -> Self {
        Self::new()
    }
}
