use crate::data::models::product::Product;
use crate::data::models::schema::*;
use diesel::prelude::*;

/// A color/size combination with its own stock count. `None` in color or
/// size is a real value ("no color"/"no size"), not a wildcard.
#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = product_variants)]
#[diesel(primary_key(variant_id))]
#[diesel(belongs_to(Product, foreign_key = product_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct ProductVariant {
    pub variant_id: i32,
    pub product_id: i32,
    pub color: Option<String>,
    pub size: Option<String>,
    pub stock: i32,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}
