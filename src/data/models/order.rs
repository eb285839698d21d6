use crate::data::models::schema::*;
use bigdecimal::BigDecimal;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = orders)]
#[diesel(primary_key(order_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Order {
    pub order_id: i32,
    pub user_id: Option<i32>,
    pub guest_email: Option<String>,
    pub payment_intent_id: String,
    pub total_amount: BigDecimal,
    pub shipping_address: String,
    pub created_at: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = orders)]
pub struct NewOrder<'a> {
    pub user_id: Option<i32>,
    pub guest_email: Option<&'a str>,
    pub payment_intent_id: &'a str,
    pub total_amount: BigDecimal,
    pub shipping_address: &'a str,
}
