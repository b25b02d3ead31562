//! End-to-end: boots pos-server on a random local port and drives it
//! through the client.

use pos_client::models::{
    Availability, BillCreate, BillUpdate, CategoryCreate, DiningTableCreate, DiningTableQuery,
    MenuCreate, MenuQuery, OrderCreate, OrderItemCreate, OrderItemInput, OrderQuery,
    OrderStatus, OrderUpdate, PayOrderRequest, PaymentMethod, PaymentStatus, Role, UserCreate,
    ZoneCreate,
};
use pos_client::{ClientConfig, ClientError, ErrorCode, HttpClient};
use pos_server::{Config, ServerState, build_app};

async fn spawn_server() -> String {
    let state = ServerState::initialize(&Config::for_testing()).await.unwrap();
    let app = build_app(&state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn admin_client(base_url: &str) -> HttpClient {
    let mut client = ClientConfig::new(base_url).build().unwrap();
    client.login("admin", "admin123").await.unwrap();
    client
}

/// Returns (menu id, second menu id, table id)
async fn seed(client: &HttpClient) -> (i64, i64, i64) {
    let category = client
        .create_category(&CategoryCreate {
            name: "Mains".into(),
            status: Availability::Available,
        })
        .await
        .unwrap();
    let noodles = client
        .create_menu(&MenuCreate {
            category_id: category.id,
            name: "Noodles".into(),
            description: Some("Hand pulled".into()),
            image_url: None,
            price: 12.5,
            status: Availability::Available,
        })
        .await
        .unwrap();
    let tea = client
        .create_menu(&MenuCreate {
            category_id: category.id,
            name: "Tea".into(),
            description: None,
            image_url: None,
            price: 2.25,
            status: Availability::Available,
        })
        .await
        .unwrap();
    let zone = client
        .create_zone(&ZoneCreate {
            name: "Hall".into(),
            status: Availability::Available,
        })
        .await
        .unwrap();
    let table = client
        .create_table(&DiningTableCreate {
            table_number: "A1".into(),
            zone_id: zone.id,
            status: Availability::Available,
        })
        .await
        .unwrap();
    (noodles.id, tea.id, table.id)
}

#[tokio::test]
async fn test_health_without_login() {
    let base_url = spawn_server().await;
    let client = ClientConfig::new(&base_url).build().unwrap();
    let health = client.health().await.unwrap();
    assert_eq!(health.status, "healthy");

    let err = client.list_zones().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized { .. }));
    assert_eq!(err.code(), Some(ErrorCode::NotAuthenticated));
}

#[tokio::test]
async fn test_browser_order_workflow() {
    let base_url = spawn_server().await;
    let client = admin_client(&base_url).await;
    let (noodles, tea, table_id) = seed(&client).await;

    let menus = client
        .list_menus(&MenuQuery {
            name: Some("Tea".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(menus.len(), 1);
    assert_eq!(menus[0].category_name.as_deref(), Some("Mains"));

    let tables = client
        .list_tables(&DiningTableQuery::default())
        .await
        .unwrap();
    assert_eq!(tables[0].zone_name.as_deref(), Some("Hall"));

    // Order with two noodles; prices come from the menu
    let created = client
        .create_order(&OrderCreate {
            table_id,
            user_id: None,
            status: None,
            order_items: vec![OrderItemInput {
                menu_id: noodles,
                quantity: 2,
                price: None,
            }],
        })
        .await
        .unwrap();
    let order_id = created.order_id;
    assert_eq!(created.order.order.status, OrderStatus::Pending);
    assert_eq!(created.order.total_amount, 25.0);

    // Adding a line moves it to updated
    client
        .create_order_item(&OrderItemCreate {
            order_id,
            menu_id: tea,
            quantity: 2,
            price: None,
        })
        .await
        .unwrap();
    let detail = client.get_order(order_id).await.unwrap();
    assert_eq!(detail.order.status, OrderStatus::Updated);
    assert_eq!(detail.total_amount, 29.5);
    assert_eq!(client.list_order_items(Some(order_id)).await.unwrap().len(), 2);

    // Pending bill, then paid through PATCH
    let bill = client
        .create_bill(&BillCreate {
            order_id,
            total_amount: None,
            payment_status: PaymentStatus::Pending,
            payment_method: None,
            received_amount: None,
            payment_time: None,
        })
        .await
        .unwrap();
    assert_eq!(bill.total_amount, 29.5);

    let paid = client
        .update_bill(
            bill.id,
            &BillUpdate {
                payment_status: Some(PaymentStatus::Paid),
                payment_method: Some(PaymentMethod::Transfer),
                received_amount: Some(29.5),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(paid.payment_status, PaymentStatus::Paid);
    assert!(paid.payment_time.is_some());

    let order = client
        .update_order(
            order_id,
            &OrderUpdate {
                status: Some(OrderStatus::Paid),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(order.order.status, OrderStatus::Paid);

    // Paid orders are locked
    let err = client
        .create_order_item(&OrderItemCreate {
            order_id,
            menu_id: tea,
            quantity: 1,
            price: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::OrderAlreadyPaid));

    let paid_orders = client
        .list_orders(&OrderQuery {
            status: Some(OrderStatus::Paid),
            table_id: None,
        })
        .await
        .unwrap();
    assert_eq!(paid_orders.len(), 1);
    assert_eq!(paid_orders[0].total_amount, 29.5);

    let stats = client.dashboard().await.unwrap();
    assert_eq!(stats.total_sales, 29.5);
    assert_eq!(stats.total_bills, 1);
}

#[tokio::test]
async fn test_cashier_pays_but_cannot_manage() {
    let base_url = spawn_server().await;
    let admin = admin_client(&base_url).await;
    let (noodles, _, table_id) = seed(&admin).await;

    admin
        .create_cashier(&UserCreate {
            first_name: "Cam".into(),
            last_name: "Cashier".into(),
            email: Some("cam@example.com".into()),
            phone: None,
            username: "cam".into(),
            password: "cashier1".into(),
            role: Role::Cashier,
        })
        .await
        .unwrap();

    let mut cashier = ClientConfig::new(&base_url).build().unwrap();
    let login = cashier.login("cam", "cashier1").await.unwrap();
    assert_eq!(login.user.role, Role::Cashier);
    assert!(login.user.permissions.iter().any(|p| p == "orders:manage"));

    let err = cashier
        .set_menu_status(noodles, Availability::Unavailable)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Forbidden { .. }));

    let created = cashier
        .create_order(&OrderCreate {
            table_id,
            user_id: None,
            status: None,
            order_items: vec![OrderItemInput {
                menu_id: noodles,
                quantity: 1,
                price: None,
            }],
        })
        .await
        .unwrap();
    assert_eq!(created.order.order.user_id, login.user.id);

    let err = cashier
        .pay_order(
            created.order_id,
            &PayOrderRequest {
                received_amount: 10.0,
                payment_method: PaymentMethod::Cash,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::PaymentInsufficientAmount));

    let receipt = cashier
        .pay_order(
            created.order_id,
            &PayOrderRequest {
                received_amount: 20.0,
                payment_method: PaymentMethod::Cash,
            },
        )
        .await
        .unwrap();
    assert_eq!(receipt.bill.change_amount, Some(7.5));

    // Voiding a paid bill is admin only
    let err = cashier.delete_bill(receipt.bill.id).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::PermissionDenied));
    assert!(admin.delete_bill(receipt.bill.id).await.unwrap());
    let reopened = admin.get_order(created.order_id).await.unwrap();
    assert_eq!(reopened.order.status, OrderStatus::Updated);
}
