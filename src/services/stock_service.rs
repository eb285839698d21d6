use crate::data::models::product::Product;
use crate::data::repos::traits::store::CatalogStoreRef;
use crate::services::cart::{CartLine, PricedLine};
use crate::services::errors::CheckoutError;

/// Pre-flight cart validation against catalog stock. Advisory only: the
/// atomic order-creation operation re-checks stock at commit time, closing
/// the race between this check and the purchase.
pub struct StockService {
    catalog: CatalogStoreRef,
}

impl StockService {
    pub fn new(catalog: CatalogStoreRef) -> Self {
        StockService { catalog }
    }

    /// Resolves each line against the catalog and checks requested quantity
    /// against aggregate product stock, then against the variant's own stock
    /// when the line names a color and/or size.
    pub async fn validate_cart(
        &self,
        lines: &[CartLine],
    ) -> Result<Vec<PricedLine>, CheckoutError> {
        self.resolve_cart(lines, true).await
    }

    /// Resolves variants and captures unit prices without the stock check.
    /// Used by finalization, where the total must be recomputed server-side
    /// but stock enforcement belongs to the commit.
    pub async fn price_cart(&self, lines: &[CartLine]) -> Result<Vec<PricedLine>, CheckoutError> {
        self.resolve_cart(lines, false).await
    }

    async fn resolve_cart(
        &self,
        lines: &[CartLine],
        check_stock: bool,
    ) -> Result<Vec<PricedLine>, CheckoutError> {
        let mut priced = Vec::with_capacity(lines.len());

        for line in lines {
            if line.quantity < 1 {
                return Err(CheckoutError::InvalidQuantity {
                    product_id: line.product_id,
                });
            }

            let product: Product = self
                .catalog
                .get_product(line.product_id)
                .await?
                .ok_or(CheckoutError::ProductNotFound {
                    product_id: line.product_id,
                })?;

            if check_stock && line.quantity > product.stock {
                return Err(CheckoutError::InsufficientStock {
                    product_name: product.name,
                });
            }

            let mut variant_id = None;
            if line.color.is_some() || line.size.is_some() {
                let variant = self
                    .catalog
                    .get_variant(line.product_id, line.color.as_deref(), line.size.as_deref())
                    .await?
                    .ok_or(CheckoutError::ProductNotFound {
                        product_id: line.product_id,
                    })?;

                if check_stock && line.quantity > variant.stock {
                    return Err(CheckoutError::InsufficientStock {
                        product_name: product.name,
                    });
                }

                variant_id = Some(variant.variant_id);
            }

            priced.push(PricedLine {
                product_id: line.product_id,
                variant_id,
                quantity: line.quantity,
                unit_price: product.price.clone(),
            });
        }

        Ok(priced)
    }
}
