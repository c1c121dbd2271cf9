//! Checkout — cart totals and WhatsApp handoff
//!
//! The cart lives in the browser; checkout renders it into an order
//! message and a `wa.me` link the storefront opens in a new tab. Prices
//! are whole rupees throughout, formatted with Indian digit grouping.

use shared::models::{CartLine, CheckoutRequest, CheckoutResponse, Product};
use sqlx::SqlitePool;
use url::Url;

use crate::db::repository::product;
use crate::utils::{AppError, AppResult};

/// One resolved cart line
struct OrderLine {
    product: Product,
    quantity: i64,
}

/// Format a rupee amount with Indian digit grouping: ₹12,34,567.
pub fn format_price(rupees: i64) -> String {
    let negative = rupees < 0;
    let digits = rupees.unsigned_abs().to_string();

    let mut grouped = String::new();
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        grouped.push(c);
        let remaining = len - i - 1;
        // Separators fall before the last 3 digits, then every 2
        if remaining > 0 && (remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0)) {
            grouped.push(',');
        }
    }

    if negative {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

/// Build the `https://wa.me/<number>?text=...` link.
///
/// Non-digit characters in the configured number are stripped; the message
/// is carried as a URL-encoded query parameter.
pub fn whatsapp_link(number: &str, message: &str) -> AppResult<String> {
    let clean: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    if clean.is_empty() {
        return Err(AppError::internal("WhatsApp number is not configured"));
    }

    let url = Url::parse_with_params(&format!("https://wa.me/{clean}"), &[("text", message)])
        .map_err(|e| AppError::internal(format!("Failed to build WhatsApp link: {e}")))?;
    Ok(url.to_string())
}

fn order_message(store_name: &str, lines: &[OrderLine], total: i64) -> String {
    let greeting =
        format!("Hello! I'd like to order the following items from {store_name}:\n\n");

    let items_list = lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let line_total = line.product.price * line.quantity;
            format!(
                "{}. {} (Qty: {}) - {}",
                index + 1,
                line.product.name,
                line.quantity,
                format_price(line_total)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let footer = format!(
        "\n\nTotal: {}\n\nPlease confirm availability and provide payment details.\n\nThank you!",
        format_price(total)
    );

    format!("{greeting}{items_list}{footer}")
}

async fn resolve_lines(pool: &SqlitePool, items: &[CartLine]) -> AppResult<Vec<OrderLine>> {
    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        if item.quantity < 1 {
            return Err(AppError::validation("quantity must be at least 1"));
        }
        // Unpublished products must not be orderable either
        let product = product::find_published_by_id(pool, item.product_id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::not_found(format!("Product {}", item.product_id)))?;
        lines.push(OrderLine {
            product,
            quantity: item.quantity,
        });
    }
    Ok(lines)
}

/// Resolve the cart against the catalog and build the handoff payload.
pub async fn prepare_checkout(
    pool: &SqlitePool,
    req: &CheckoutRequest,
    store_name: &str,
    whatsapp_number: &str,
) -> AppResult<CheckoutResponse> {
    if req.items.is_empty() {
        return Err(AppError::validation("cart is empty"));
    }

    let lines = resolve_lines(pool, &req.items).await?;
    let total: i64 = lines
        .iter()
        .map(|line| line.product.price * line.quantity)
        .sum();

    let message = order_message(store_name, &lines, total);
    let url = whatsapp_link(whatsapp_number, &message)?;

    Ok(CheckoutResponse {
        message,
        url,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::product::tests::{seed_product, test_pool};

    #[test]
    fn format_price_uses_indian_grouping() {
        assert_eq!(format_price(0), "₹0");
        assert_eq!(format_price(999), "₹999");
        assert_eq!(format_price(1_000), "₹1,000");
        assert_eq!(format_price(99_999), "₹99,999");
        assert_eq!(format_price(100_000), "₹1,00,000");
        assert_eq!(format_price(1_234_567), "₹12,34,567");
        assert_eq!(format_price(-4_999), "-₹4,999");
    }

    #[test]
    fn whatsapp_link_cleans_number_and_encodes_message() {
        let url = whatsapp_link("+91 62812-87188", "Hello & welcome").unwrap();
        assert!(url.starts_with("https://wa.me/916281287188?text="));
        assert!(!url.contains(' '));
        // The ampersand in the message must be encoded, not a parameter split
        assert!(url.contains("%26"));

        assert!(whatsapp_link("no digits", "hi").is_err());
    }

    #[tokio::test]
    async fn checkout_totals_and_message_cover_every_line() {
        let pool = test_pool().await;
        seed_product(&pool, 1, "Banarasi Saree", None, None, true).await;
        seed_product(&pool, 2, "Chanderi Saree", None, None, true).await;
        sqlx::query("UPDATE products SET price = 2500 WHERE id = 1")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("UPDATE products SET price = 1200 WHERE id = 2")
            .execute(&pool)
            .await
            .unwrap();

        let req = CheckoutRequest {
            items: vec![
                CartLine {
                    product_id: 1,
                    quantity: 2,
                },
                CartLine {
                    product_id: 2,
                    quantity: 1,
                },
            ],
        };

        let res = prepare_checkout(&pool, &req, "Lotus Aura", "916281287188")
            .await
            .unwrap();

        assert_eq!(res.total, 6200);
        assert!(res.message.contains("1. Banarasi Saree (Qty: 2) - ₹5,000"));
        assert!(res.message.contains("2. Chanderi Saree (Qty: 1) - ₹1,200"));
        assert!(res.message.contains("Total: ₹6,200"));
        assert!(res.url.starts_with("https://wa.me/916281287188?text="));
    }

    #[tokio::test]
    async fn checkout_rejects_unknown_and_unpublished_products() {
        let pool = test_pool().await;
        seed_product(&pool, 1, "Hidden", None, None, false).await;

        let unknown = prepare_checkout(
            &pool,
            &CheckoutRequest {
                items: vec![CartLine {
                    product_id: 99,
                    quantity: 1,
                }],
            },
            "Lotus Aura",
            "916281287188",
        )
        .await;
        assert!(matches!(unknown, Err(AppError::NotFound(_))));

        let hidden = prepare_checkout(
            &pool,
            &CheckoutRequest {
                items: vec![CartLine {
                    product_id: 1,
                    quantity: 1,
                }],
            },
            "Lotus Aura",
            "916281287188",
        )
        .await;
        assert!(matches!(hidden, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn checkout_rejects_empty_cart_and_zero_quantity() {
        let pool = test_pool().await;
        seed_product(&pool, 1, "Saree", None, None, true).await;

        let empty = prepare_checkout(
            &pool,
            &CheckoutRequest { items: vec![] },
            "Lotus Aura",
            "916281287188",
        )
        .await;
        assert!(matches!(empty, Err(AppError::Validation(_))));

        let zero = prepare_checkout(
            &pool,
            &CheckoutRequest {
                items: vec![CartLine {
                    product_id: 1,
                    quantity: 0,
                }],
            },
            "Lotus Aura",
            "916281287188",
        )
        .await;
        assert!(matches!(zero, Err(AppError::Validation(_))));
    }
}
