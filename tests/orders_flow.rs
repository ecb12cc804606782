mod common;

use electronics_store_api::{
    dto::orders::{AddOrderDetailRequest, CreateOrderRequest, OrderLineRequest, UpdateOrderRequest},
    error::AppError,
    services::{
        order_service,
        status_rules::{OrderStatusKind, StatusPolicy},
    },
};

use common::{
    create_address, create_category, create_payment_method, create_product, create_user, data,
    place_order, setup_state, shopper,
};

#[tokio::test]
async fn order_total_is_the_sum_of_its_lines() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let card = create_payment_method(&state, "Card").await?;
    let buyer = shopper(&state, "buyer@example.com", card).await?;
    let category = create_category(&state, "Laptops").await?;
    let laptop = create_product(&state, category, "Ultrabook", 129_900).await?;
    let mouse = create_product(&state, category, "Mouse", 2_500).await?;

    let placed = place_order(
        &state,
        &buyer,
        &[(laptop, 1, 129_900), (mouse, 2, 2_500)],
        None,
    )
    .await?;
    assert_eq!(placed.order.total_price, 134_900);
    assert_eq!(placed.details.len(), 2);

    let pending = order_service::status_id_for(&state.orm, OrderStatusKind::Pending).await?;
    assert_eq!(placed.order.status_id, pending);

    let fetched = data(order_service::get_order(&state, placed.order.id).await?)?;
    assert_eq!(fetched.order, placed.order);
    assert_eq!(fetched.details, placed.details);
    Ok(())
}

#[tokio::test]
async fn lines_default_to_the_current_product_price() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let card = create_payment_method(&state, "Card").await?;
    let buyer = shopper(&state, "snapshot@example.com", card).await?;
    let category = create_category(&state, "Audio").await?;
    let speaker = create_product(&state, category, "Speaker", 7_900).await?;

    let placed = data(
        order_service::create_order(
            &state,
            CreateOrderRequest {
                user_id: buyer.user_id,
                payment_method_id: card,
                shipping_address_id: buyer.address_id,
                status_id: None,
                delivery_price: 500,
                tracking_number: None,
                notes: Some("leave at the door".to_string()),
                total_price: Some(15_800),
                items: vec![OrderLineRequest {
                    product_id: speaker,
                    quantity: 2,
                    price_per_unit: None,
                }],
            },
        )
        .await?,
    )?;
    assert_eq!(placed.details[0].price_per_unit, 7_900);
    assert_eq!(placed.order.total_price, 15_800);
    assert_eq!(placed.order.delivery_price, 500);
    Ok(())
}

#[tokio::test]
async fn mismatched_total_or_foreign_address_is_rejected() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let card = create_payment_method(&state, "Card").await?;
    let buyer = shopper(&state, "strict@example.com", card).await?;
    let stranger = create_user(&state, "stranger@example.com").await?;
    let stranger_address = create_address(&state, stranger, true).await?;
    let category = create_category(&state, "Audio").await?;
    let speaker = create_product(&state, category, "Speaker", 7_900).await?;

    let request = |address_id: i32, total_price: Option<i64>| CreateOrderRequest {
        user_id: buyer.user_id,
        payment_method_id: card,
        shipping_address_id: address_id,
        status_id: None,
        delivery_price: 0,
        tracking_number: None,
        notes: None,
        total_price,
        items: vec![OrderLineRequest {
            product_id: speaker,
            quantity: 1,
            price_per_unit: Some(7_900),
        }],
    };

    let err = order_service::create_order(&state, request(buyer.address_id, Some(1)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = order_service::create_order(&state, request(stranger_address, None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let orders = data(order_service::list_orders(&state).await?)?;
    assert!(orders.is_empty());
    Ok(())
}

#[tokio::test]
async fn adding_a_detail_recomputes_the_total() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let card = create_payment_method(&state, "Card").await?;
    let buyer = shopper(&state, "grow@example.com", card).await?;
    let category = create_category(&state, "Phones").await?;
    let phone = create_product(&state, category, "Phone", 50_000).await?;
    let case = create_product(&state, category, "Case", 1_500).await?;

    let placed = place_order(&state, &buyer, &[(phone, 1, 50_000)], None).await?;
    let grown = data(
        order_service::add_order_detail(
            &state,
            AddOrderDetailRequest {
                order_id: placed.order.id,
                product_id: case,
                quantity: 2,
                price_per_unit: None,
            },
        )
        .await?,
    )?;
    assert_eq!(grown.order.total_price, 53_000);
    assert_eq!(grown.details.len(), 2);

    let details = data(order_service::order_details(&state, placed.order.id).await?)?;
    let line_totals: Vec<i64> = details.iter().map(|d| d.line_total).collect();
    assert_eq!(line_totals, vec![50_000, 3_000]);
    assert_eq!(
        details[1].product.as_ref().map(|p| p.name.as_str()),
        Some("Case")
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_checkouts_by_different_users_all_succeed() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let card = create_payment_method(&state, "Card").await?;
    let category = create_category(&state, "Laptops").await?;
    let laptop = create_product(&state, category, "Ultrabook", 129_900).await?;

    let mut buyers = Vec::new();
    for n in 0..8 {
        buyers.push(shopper(&state, &format!("rush{n}@example.com"), card).await?);
    }

    let mut handles = Vec::new();
    for buyer in buyers {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            place_order(&state, &buyer, &[(laptop, 1, 129_900)], None).await
        }));
    }
    for handle in handles {
        let placed = handle.await??;
        assert_eq!(placed.order.total_price, 129_900);
    }

    let orders = data(order_service::list_orders(&state).await?)?;
    assert_eq!(orders.len(), 8);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_details_on_one_order_keep_the_total() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let card = create_payment_method(&state, "Card").await?;
    let buyer = shopper(&state, "bulk@example.com", card).await?;
    let category = create_category(&state, "Cables").await?;
    let cable = create_product(&state, category, "USB-C cable", 1_200).await?;
    let placed = place_order(&state, &buyer, &[(cable, 1, 1_200)], None).await?;
    let order_id = placed.order.id;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            order_service::add_order_detail(
                &state,
                AddOrderDetailRequest {
                    order_id,
                    product_id: cable,
                    quantity: 2,
                    price_per_unit: None,
                },
            )
            .await
        }));
    }
    for handle in handles {
        handle.await??;
    }

    let order = data(order_service::get_order(&state, order_id).await?)?;
    assert_eq!(order.details.len(), 9);
    assert_eq!(order.order.total_price, 1_200 + 8 * 2 * 1_200);
    Ok(())
}

#[tokio::test]
async fn strict_policy_walks_the_lifecycle() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let card = create_payment_method(&state, "Card").await?;
    let buyer = shopper(&state, "life@example.com", card).await?;
    let category = create_category(&state, "Phones").await?;
    let phone = create_product(&state, category, "Phone", 50_000).await?;
    let placed = place_order(&state, &buyer, &[(phone, 1, 50_000)], None).await?;
    let order_id = placed.order.id;

    let delivered = order_service::status_id_for(&state.orm, OrderStatusKind::Delivered).await?;
    let err = order_service::update_order_status(&state, order_id, delivered)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    for kind in [
        OrderStatusKind::Processing,
        OrderStatusKind::Shipped,
        OrderStatusKind::Delivered,
    ] {
        let next = order_service::status_id_for(&state.orm, kind).await?;
        let resp = order_service::update_order_status(&state, order_id, next).await?;
        assert_eq!(resp.message, "Status updated");
        assert_eq!(data(resp)?.status_id, next);
    }

    let unchanged = order_service::update_order_status(&state, order_id, delivered).await?;
    assert_eq!(unchanged.message, "Status unchanged");

    let cancelled = order_service::status_id_for(&state.orm, OrderStatusKind::Cancelled).await?;
    let err = order_service::update_order(
        &state,
        order_id,
        UpdateOrderRequest {
            status_id: Some(cancelled),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = order_service::update_order_status(&state, order_id, 999)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn legacy_policy_allows_any_move() -> anyhow::Result<()> {
    let (mut state, _dir) = setup_state().await?;
    state.status_policy = StatusPolicy::Legacy;
    let card = create_payment_method(&state, "Card").await?;
    let buyer = shopper(&state, "legacy@example.com", card).await?;
    let category = create_category(&state, "Phones").await?;
    let phone = create_product(&state, category, "Phone", 50_000).await?;

    let cancelled = order_service::status_id_for(&state.orm, OrderStatusKind::Cancelled).await?;
    let pending = order_service::status_id_for(&state.orm, OrderStatusKind::Pending).await?;
    let placed = place_order(&state, &buyer, &[(phone, 1, 50_000)], Some(cancelled)).await?;

    let revived =
        data(order_service::update_order_status(&state, placed.order.id, pending).await?)?;
    assert_eq!(revived.status_id, pending);
    Ok(())
}

#[tokio::test]
async fn user_orders_carry_names_and_lines() -> anyhow::Result<()> {
    let (state, _dir) = setup_state().await?;
    let card = create_payment_method(&state, "Card").await?;
    let buyer = shopper(&state, "history@example.com", card).await?;
    let category = create_category(&state, "Audio").await?;
    let speaker = create_product(&state, category, "Speaker", 7_900).await?;
    let cable = create_product(&state, category, "Cable", 900).await?;

    let first = place_order(&state, &buyer, &[(speaker, 1, 7_900)], None).await?;
    let second = place_order(&state, &buyer, &[(speaker, 2, 7_900), (cable, 3, 900)], None).await?;

    let orders = data(order_service::user_orders(&state, buyer.user_id).await?)?;
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].order_id, second.order.id);
    assert_eq!(orders[1].order_id, first.order.id);

    let latest = &orders[0];
    assert_eq!(latest.status, "Pending");
    assert_eq!(latest.payment_method, "Card");
    assert_eq!(latest.products_count, 2);
    assert_eq!(latest.total_items, 5);
    assert_eq!(latest.total_price, 2 * 7_900 + 3 * 900);
    let names: Vec<&str> = latest.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Speaker", "Cable"]);

    let err = order_service::user_orders(&state, 999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    Ok(())
}
