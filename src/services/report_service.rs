//! Read-only aggregate reports. Every figure is computed by the store with
//! `GROUP BY`/`SUM`; statuses are matched by name through `OrderStatusKind`.

use chrono::{DateTime, Months, Utc};

use crate::{
    dto::reports::{
        InventoryFilter, InventoryStat, PopularProduct, ProductAnalytics, SalesStatistic,
        TopSpender,
    },
    error::AppResult,
    response::ApiResponse,
    services::status_rules::OrderStatusKind,
    state::AppState,
};

const ANALYTICS_MONTHS: u32 = 12;
const ANALYTICS_LIMIT: i64 = 10;
const POPULAR_MONTHS: u32 = 3;

/// Start of a lookback window of `months` calendar months ending at `now`.
pub fn months_ago(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(months))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Users ranked by what they spent on delivered orders inside the window.
/// Users without spend in the window are left out.
pub async fn top_spenders(
    state: &AppState,
    months: u32,
    limit: u32,
) -> AppResult<ApiResponse<Vec<TopSpender>>> {
    let since = months_ago(Utc::now(), months);
    let rows = sqlx::query_as::<_, TopSpender>(
        r#"
        SELECT u.id AS user_id,
               u.email,
               u.first_name,
               u.last_name,
               COALESCE(SUM(od.quantity * od.price_per_unit), 0) AS total_spent,
               COUNT(DISTINCT o.id) AS order_count,
               CAST(COALESCE(SUM(od.quantity * od.price_per_unit), 0) AS REAL)
                   / COUNT(DISTINCT o.id) AS avg_order_value
        FROM users u
        JOIN orders o ON o.user_id = u.id
        JOIN order_statuses s ON s.id = o.status_id
        LEFT JOIN order_details od ON od.order_id = o.id
        WHERE s.name = ?1 AND o.order_date >= ?2
        GROUP BY u.id, u.email, u.first_name, u.last_name
        HAVING total_spent > 0
        ORDER BY total_spent DESC, u.id ASC
        LIMIT ?3
        "#,
    )
    .bind(OrderStatusKind::Delivered.name())
    .bind(since)
    .bind(i64::from(limit))
    .fetch_all(&state.pool)
    .await?;

    tracing::debug!(months, limit, rows = rows.len(), "top spenders");
    Ok(ApiResponse::list("Top spenders", rows))
}

/// Products with delivered sales in the last year and at least one review,
/// ranked by revenue. Review figures cover all time.
pub async fn product_analytics(state: &AppState) -> AppResult<ApiResponse<Vec<ProductAnalytics>>> {
    let since = months_ago(Utc::now(), ANALYTICS_MONTHS);
    let rows = sqlx::query_as::<_, ProductAnalytics>(
        r#"
        WITH sales AS (
            SELECT od.product_id,
                   COUNT(DISTINCT o.id) AS total_orders,
                   SUM(od.quantity) AS total_sold,
                   SUM(od.quantity * od.price_per_unit) AS total_revenue
            FROM order_details od
            JOIN orders o ON o.id = od.order_id
            JOIN order_statuses s ON s.id = o.status_id
            WHERE s.name = ?1 AND o.order_date >= ?2
            GROUP BY od.product_id
        ),
        review_stats AS (
            SELECT product_id,
                   COUNT(id) AS total_reviews,
                   AVG(CAST(rating AS REAL)) AS avg_rating
            FROM reviews
            GROUP BY product_id
        )
        SELECT p.id AS product_id,
               p.name,
               sales.total_orders,
               sales.total_sold,
               sales.total_revenue,
               CAST(sales.total_sold AS REAL) / sales.total_orders AS avg_order_quantity,
               review_stats.total_reviews,
               review_stats.avg_rating,
               p.stock_quantity AS current_stock
        FROM products p
        JOIN sales ON sales.product_id = p.id
        JOIN review_stats ON review_stats.product_id = p.id
        ORDER BY sales.total_revenue DESC, p.id ASC
        LIMIT ?3
        "#,
    )
    .bind(OrderStatusKind::Delivered.name())
    .bind(since)
    .bind(ANALYTICS_LIMIT)
    .fetch_all(&state.pool)
    .await?;

    tracing::debug!(rows = rows.len(), "product analytics");
    Ok(ApiResponse::list("Product analytics", rows))
}

/// Units sold and revenue per product inside the window, excluding cancelled
/// orders, next to the stock held across all warehouses.
pub async fn sales_statistics(
    state: &AppState,
    months: u32,
    limit: u32,
) -> AppResult<ApiResponse<Vec<SalesStatistic>>> {
    let since = months_ago(Utc::now(), months);
    let rows = sqlx::query_as::<_, SalesStatistic>(
        r#"
        WITH sales AS (
            SELECT od.product_id,
                   SUM(od.quantity) AS total_sold,
                   SUM(od.quantity * od.price_per_unit) AS total_revenue
            FROM order_details od
            JOIN orders o ON o.id = od.order_id
            JOIN order_statuses s ON s.id = o.status_id
            WHERE s.name <> ?1 AND o.order_date >= ?2
            GROUP BY od.product_id
        ),
        stock AS (
            SELECT product_id, SUM(quantity) AS total_stock
            FROM inventory
            GROUP BY product_id
        )
        SELECT p.id AS product_id,
               p.name,
               sales.total_sold,
               sales.total_revenue,
               COALESCE(stock.total_stock, 0) AS total_stock
        FROM products p
        JOIN sales ON sales.product_id = p.id
        LEFT JOIN stock ON stock.product_id = p.id
        ORDER BY sales.total_sold DESC, p.id ASC
        LIMIT ?3
        "#,
    )
    .bind(OrderStatusKind::Cancelled.name())
    .bind(since)
    .bind(i64::from(limit))
    .fetch_all(&state.pool)
    .await?;

    tracing::debug!(months, limit, rows = rows.len(), "sales statistics");
    Ok(ApiResponse::list("Sales statistics", rows))
}

/// Best sellers of the last three months, cancelled orders excluded.
pub async fn popular_products(
    state: &AppState,
    limit: u32,
) -> AppResult<ApiResponse<Vec<PopularProduct>>> {
    let since = months_ago(Utc::now(), POPULAR_MONTHS);
    let rows = sqlx::query_as::<_, PopularProduct>(
        r#"
        SELECT p.id AS product_id,
               p.name,
               SUM(od.quantity) AS total_sold,
               SUM(od.quantity * od.price_per_unit) AS total_revenue
        FROM products p
        JOIN order_details od ON od.product_id = p.id
        JOIN orders o ON o.id = od.order_id
        JOIN order_statuses s ON s.id = o.status_id
        WHERE s.name <> ?1 AND o.order_date >= ?2
        GROUP BY p.id, p.name
        ORDER BY total_sold DESC, p.id ASC
        LIMIT ?3
        "#,
    )
    .bind(OrderStatusKind::Cancelled.name())
    .bind(since)
    .bind(i64::from(limit))
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::list("Popular products", rows))
}

/// Available products with their total stock and a per-warehouse listing,
/// sorted by name.
pub async fn inventory_stats(
    state: &AppState,
    filter: InventoryFilter,
) -> AppResult<ApiResponse<Vec<InventoryStat>>> {
    let rows = sqlx::query_as::<_, InventoryStat>(
        r#"
        SELECT p.id AS product_id,
               p.name,
               p.price,
               COALESCE(SUM(i.quantity), 0) AS total_quantity,
               COALESCE(GROUP_CONCAT(w.name || ' (' || i.quantity || ')', ', '), '') AS warehouses
        FROM products p
        LEFT JOIN inventory i ON i.product_id = p.id
        LEFT JOIN warehouses w ON w.id = i.warehouse_id
        WHERE p.is_available = 1
        GROUP BY p.id, p.name, p.price
        HAVING ?1 = 'all' OR COALESCE(SUM(i.quantity), 0) > 30 OR COALESCE(SUM(i.quantity), 0) = 0
        ORDER BY p.name ASC, p.id ASC
        "#,
    )
    .bind(match filter {
        InventoryFilter::Legacy => "legacy",
        InventoryFilter::All => "all",
    })
    .fetch_all(&state.pool)
    .await?;

    debug_assert!(rows.iter().all(|row| filter.keeps(row.total_quantity)));
    tracing::debug!(?filter, rows = rows.len(), "inventory stats");
    Ok(ApiResponse::list("Inventory stats", rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn window_start_moves_back_whole_months() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(
            months_ago(now, 3),
            Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn window_start_clamps_to_month_end() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap();
        assert_eq!(
            months_ago(now, 1),
            Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap()
        );
    }
}
