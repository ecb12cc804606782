mod common;

use std::collections::HashMap;

use chrono::{Duration, Utc};
use electronics_store_api::{
    dto::{
        inventory::CreateInventoryRequest, reports::InventoryFilter,
        reviews::CreateReviewRequest, warehouses::CreateWarehouseRequest,
    },
    services::{
        inventory_service, order_service, report_service, review_service,
        status_rules::OrderStatusKind, warehouse_service,
    },
    state::AppState,
};

use proptest::prelude::*;

use common::{
    create_category, create_payment_method, create_product, data, place_order, setup_state,
    shopper,
};

async fn backdate_order(state: &AppState, order_id: i32, days: i64) -> anyhow::Result<()> {
    sqlx::query("UPDATE orders SET order_date = ?1 WHERE id = ?2")
        .bind(Utc::now() - Duration::days(days))
        .bind(order_id)
        .execute(&state.pool)
        .await?;
    Ok(())
}

async fn create_warehouse(state: &AppState, name: &str) -> anyhow::Result<i32> {
    let warehouse = data(
        warehouse_service::create_warehouse(
            state,
            CreateWarehouseRequest {
                name: name.to_string(),
                address: "1 Depot Road".to_string(),
                phone: "+100".to_string(),
                manager_name: "Kim".to_string(),
            },
        )
        .await?,
    )?;
    Ok(warehouse.id)
}

async fn stock(
    state: &AppState,
    product_id: i32,
    warehouse_id: i32,
    quantity: i32,
) -> anyhow::Result<()> {
    inventory_service::create_inventory_item(
        state,
        CreateInventoryRequest {
            product_id,
            warehouse_id,
            quantity,
            last_restock_date: None,
        },
    )
    .await?;
    Ok(())
}

#[tokio::test]
async fn top_spenders_count_only_recent_delivered_orders() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let card = create_payment_method(&state, "Card").await?;
    let category = create_category(&state, "Phones").await?;
    let phone = create_product(&state, category, "Phone", 5_000).await?;
    let tablet = create_product(&state, category, "Tablet", 30_000).await?;
    let delivered = order_service::status_id_for(&state.orm, OrderStatusKind::Delivered).await?;

    let alice = shopper(&state, "alice@example.com", card).await?;
    place_order(&state, &alice, &[(phone, 2, 5_000)], Some(delivered)).await?;
    place_order(&state, &alice, &[(phone, 2, 5_000)], Some(delivered)).await?;

    let bob = shopper(&state, "bob@example.com", card).await?;
    place_order(&state, &bob, &[(tablet, 1, 30_000)], Some(delivered)).await?;

    let carol = shopper(&state, "carol@example.com", card).await?;
    place_order(&state, &carol, &[(tablet, 5, 30_000)], None).await?;
    let old = place_order(&state, &carol, &[(tablet, 5, 30_000)], Some(delivered)).await?;
    backdate_order(&state, old.order.id, 150).await?;

    let rows = data(report_service::top_spenders(&state, 3, 10).await?)?;
    let ranking: Vec<(&str, i64, i64)> = rows
        .iter()
        .map(|r| (r.email.as_str(), r.total_spent, r.order_count))
        .collect();
    assert_eq!(
        ranking,
        vec![("bob@example.com", 30_000, 1), ("alice@example.com", 20_000, 2)]
    );
    assert!((rows[1].avg_order_value - 10_000.0).abs() < f64::EPSILON);
    assert!(rows.windows(2).all(|w| w[0].total_spent >= w[1].total_spent));

    let wider = data(report_service::top_spenders(&state, 6, 10).await?)?;
    assert_eq!(wider[0].email, "carol@example.com");
    assert_eq!(wider[0].total_spent, 150_000);

    let limited = data(report_service::top_spenders(&state, 3, 1).await?)?;
    assert_eq!(limited.len(), 1);
    Ok(())
}

#[tokio::test]
async fn sales_reports_skip_cancelled_orders() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let card = create_payment_method(&state, "Card").await?;
    let category = create_category(&state, "Audio").await?;
    let speaker = create_product(&state, category, "Speaker", 7_900).await?;
    let cable = create_product(&state, category, "Cable", 900).await?;
    let cancelled = order_service::status_id_for(&state.orm, OrderStatusKind::Cancelled).await?;
    let central = create_warehouse(&state, "Central").await?;
    let outlet = create_warehouse(&state, "Outlet").await?;
    stock(&state, speaker, central, 12).await?;
    stock(&state, speaker, outlet, 3).await?;

    let buyer = shopper(&state, "sales@example.com", card).await?;
    place_order(&state, &buyer, &[(speaker, 2, 7_900), (cable, 5, 900)], None).await?;
    place_order(&state, &buyer, &[(speaker, 50, 7_900)], Some(cancelled)).await?;

    let stats = data(report_service::sales_statistics(&state, 6, 10).await?)?;
    let summary: Vec<(i32, i64, i64, i64)> = stats
        .iter()
        .map(|s| (s.product_id, s.total_sold, s.total_revenue, s.total_stock))
        .collect();
    assert_eq!(
        summary,
        vec![(cable, 5, 4_500, 0), (speaker, 2, 15_800, 15)]
    );

    let popular = data(report_service::popular_products(&state, 1).await?)?;
    assert_eq!(popular.len(), 1);
    assert_eq!(popular[0].product_id, cable);
    Ok(())
}

#[tokio::test]
async fn analytics_needs_delivered_sales_and_reviews() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let card = create_payment_method(&state, "Card").await?;
    let category = create_category(&state, "Laptops").await?;
    let reviewed = create_product(&state, category, "Reviewed", 100_000).await?;
    let silent = create_product(&state, category, "Silent", 90_000).await?;
    let delivered = order_service::status_id_for(&state.orm, OrderStatusKind::Delivered).await?;

    let buyer = shopper(&state, "critic@example.com", card).await?;
    place_order(
        &state,
        &buyer,
        &[(reviewed, 1, 100_000), (silent, 1, 90_000)],
        Some(delivered),
    )
    .await?;
    place_order(&state, &buyer, &[(reviewed, 3, 100_000)], Some(delivered)).await?;
    for rating in [4, 5] {
        review_service::create_review(
            &state,
            CreateReviewRequest {
                product_id: reviewed,
                user_id: buyer.user_id,
                rating,
                comment: None,
            },
        )
        .await?;
    }

    let rows = data(report_service::product_analytics(&state).await?)?;
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.product_id, reviewed);
    assert_eq!((row.total_orders, row.total_sold, row.total_revenue), (2, 4, 400_000));
    assert!((row.avg_order_quantity - 2.0).abs() < f64::EPSILON);
    assert_eq!(row.total_reviews, 2);
    assert!((row.avg_rating - 4.5).abs() < f64::EPSILON);
    assert_eq!(row.current_stock, 10);
    Ok(())
}

#[tokio::test]
async fn low_stock_is_strictly_below_threshold() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let category = create_category(&state, "Audio").await?;
    let first = create_product(&state, category, "Earbuds", 4_900).await?;
    let second = create_product(&state, category, "Speaker", 7_900).await?;
    let warehouse = create_warehouse(&state, "Central").await?;
    stock(&state, first, warehouse, 5).await?;
    stock(&state, second, warehouse, 15).await?;

    let low = data(inventory_service::low_stock(&state, 10).await?)?;
    let products: Vec<i32> = low.iter().map(|l| l.product_id).collect();
    assert_eq!(products, vec![first]);
    assert_eq!(low[0].warehouse_name, "Central");

    let at_five = data(inventory_service::low_stock(&state, 5).await?)?;
    assert!(at_five.is_empty());

    let scoped = data(warehouse_service::warehouse_low_stock(&state, warehouse, 20).await?)?;
    assert_eq!(scoped.len(), 2);
    Ok(())
}

#[tokio::test]
async fn inventory_stats_filter_modes() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let category = create_category(&state, "Mixed").await?;
    let plenty = create_product(&state, category, "A Plenty", 1_000).await?;
    let some = create_product(&state, category, "B Some", 1_000).await?;
    let none = create_product(&state, category, "C None", 1_000).await?;
    let central = create_warehouse(&state, "Central").await?;
    let outlet = create_warehouse(&state, "Outlet").await?;
    stock(&state, plenty, central, 20).await?;
    stock(&state, plenty, outlet, 15).await?;
    stock(&state, some, central, 30).await?;

    let legacy = data(report_service::inventory_stats(&state, InventoryFilter::Legacy).await?)?;
    let kept: Vec<(i32, i64)> = legacy.iter().map(|s| (s.product_id, s.total_quantity)).collect();
    assert_eq!(kept, vec![(plenty, 35), (none, 0)]);
    assert!(legacy[0].warehouses.contains("Central (20)"));
    assert!(legacy[0].warehouses.contains("Outlet (15)"));
    assert_eq!(legacy[1].warehouses, "");

    let all = data(report_service::inventory_stats(&state, InventoryFilter::All).await?)?;
    let ids: Vec<i32> = all.iter().map(|s| s.product_id).collect();
    assert_eq!(ids, vec![plenty, some, none]);
    Ok(())
}

const PRICES: [i64; 3] = [1_999, 5_000, 129_900];
// Order ages in days, each well clear of the three and six month window edges.
const AGES: [i64; 8] = [0, 5, 30, 60, 85, 100, 170, 250];

#[derive(Debug, Clone)]
struct GeneratedOrder {
    buyer: usize,
    status: usize,
    age: usize,
    lines: Vec<(usize, i32)>,
}

fn generated_order() -> impl Strategy<Value = GeneratedOrder> {
    (
        0usize..3,
        0usize..OrderStatusKind::ALL.len(),
        0usize..AGES.len(),
        prop::collection::vec((0usize..PRICES.len(), 1i32..5), 1..4),
    )
        .prop_map(|(buyer, status, age, lines)| GeneratedOrder {
            buyer,
            status,
            age,
            lines,
        })
}

fn order_value(order: &GeneratedOrder) -> i64 {
    order
        .lines
        .iter()
        .map(|&(product, quantity)| i64::from(quantity) * PRICES[product])
        .sum()
}

/// `(product index, units, revenue)` per product, most units first.
fn units_by_product<'a>(
    orders: impl Iterator<Item = &'a GeneratedOrder>,
) -> Vec<(usize, i64, i64)> {
    let mut totals: HashMap<usize, (i64, i64)> = HashMap::new();
    for order in orders {
        for &(product, quantity) in &order.lines {
            let entry = totals.entry(product).or_default();
            entry.0 += i64::from(quantity);
            entry.1 += i64::from(quantity) * PRICES[product];
        }
    }
    let mut rows: Vec<(usize, i64, i64)> = totals
        .into_iter()
        .map(|(product, (units, revenue))| (product, units, revenue))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    rows
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10))]

    #[test]
    fn reports_match_in_process_reductions(
        orders in prop::collection::vec(generated_order(), 0..10)
    ) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let (state, _dir) = setup_state().await.unwrap();
            let card = create_payment_method(&state, "Card").await.unwrap();
            let category = create_category(&state, "Mixed").await.unwrap();
            let mut products = Vec::new();
            for (i, price) in PRICES.iter().enumerate() {
                products.push(
                    create_product(&state, category, &format!("Item {i}"), *price)
                        .await
                        .unwrap(),
                );
            }
            let mut buyers = Vec::new();
            for n in 0..3 {
                buyers.push(
                    shopper(&state, &format!("buyer{n}@example.com"), card)
                        .await
                        .unwrap(),
                );
            }
            let mut statuses = Vec::new();
            for kind in OrderStatusKind::ALL {
                statuses.push(order_service::status_id_for(&state.orm, kind).await.unwrap());
            }

            for order in &orders {
                let lines: Vec<(i32, i32, i64)> = order
                    .lines
                    .iter()
                    .map(|&(product, quantity)| (products[product], quantity, PRICES[product]))
                    .collect();
                let placed = place_order(
                    &state,
                    &buyers[order.buyer],
                    &lines,
                    Some(statuses[order.status]),
                )
                .await
                .unwrap();
                backdate_order(&state, placed.order.id, AGES[order.age]).await.unwrap();
            }

            let now = Utc::now();
            let within = |order: &GeneratedOrder, months: u32| {
                now - Duration::days(AGES[order.age]) >= report_service::months_ago(now, months)
            };
            let kind_of = |order: &GeneratedOrder| OrderStatusKind::ALL[order.status];

            // Top spenders over three months, delivered orders only.
            let mut spend: HashMap<i32, (i64, i64)> = HashMap::new();
            for order in orders
                .iter()
                .filter(|&o| kind_of(o) == OrderStatusKind::Delivered && within(o, 3))
            {
                let entry = spend.entry(buyers[order.buyer].user_id).or_default();
                entry.0 += order_value(order);
                entry.1 += 1;
            }
            let mut expected: Vec<(i32, i64, i64)> = spend
                .into_iter()
                .map(|(user_id, (total, count))| (user_id, total, count))
                .collect();
            expected.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

            let spenders =
                data(report_service::top_spenders(&state, 3, 10).await.unwrap()).unwrap();
            let actual: Vec<(i32, i64, i64)> = spenders
                .iter()
                .map(|row| (row.user_id, row.total_spent, row.order_count))
                .collect();
            assert_eq!(actual, expected);
            assert!(spenders.iter().all(|row| row.total_spent > 0));
            assert!(spenders.windows(2).all(|pair| {
                pair[0].total_spent > pair[1].total_spent
                    || (pair[0].total_spent == pair[1].total_spent
                        && pair[0].user_id < pair[1].user_id)
            }));
            for row in &spenders {
                let average = row.total_spent as f64 / row.order_count as f64;
                assert!((row.avg_order_value - average).abs() < 1e-6);
            }

            // Sales statistics over six months, cancelled orders excluded.
            let expected: Vec<(i32, i64, i64, i64)> = units_by_product(
                orders
                    .iter()
                    .filter(|&o| kind_of(o) != OrderStatusKind::Cancelled && within(o, 6)),
            )
            .into_iter()
            .map(|(product, units, revenue)| (products[product], units, revenue, 0))
            .collect();
            let sales =
                data(report_service::sales_statistics(&state, 6, 10).await.unwrap()).unwrap();
            let actual: Vec<(i32, i64, i64, i64)> = sales
                .iter()
                .map(|row| (row.product_id, row.total_sold, row.total_revenue, row.total_stock))
                .collect();
            assert_eq!(actual, expected);

            // Popular products use a fixed three month window.
            let expected: Vec<(i32, i64, i64)> = units_by_product(
                orders
                    .iter()
                    .filter(|&o| kind_of(o) != OrderStatusKind::Cancelled && within(o, 3)),
            )
            .into_iter()
            .map(|(product, units, revenue)| (products[product], units, revenue))
            .collect();
            let popular =
                data(report_service::popular_products(&state, 10).await.unwrap()).unwrap();
            let actual: Vec<(i32, i64, i64)> = popular
                .iter()
                .map(|row| (row.product_id, row.total_sold, row.total_revenue))
                .collect();
            assert_eq!(actual, expected);
        });
    }
}
