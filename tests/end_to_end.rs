//! End-to-end tests over a real listener, driven through the SDK.

use std::time::Duration;

use futures_util::future::join_all;
use gateway_sdk::{Endpoint, GatewayClient, ListQuery};
use serde_json::json;

use api_gateway::config::UserServiceConfig;
use api_gateway::rpc::ConnectionError;
use api_gateway::GrpcClient;

mod common;

use common::{closed_port, spawn_gateway, test_config, Mocks};

#[tokio::test]
async fn test_concurrent_creates_do_not_interfere() {
    const CUSTOMERS: usize = 20;
    const SELLERS: usize = 15;

    let mocks = Mocks::with_latency(Some(Duration::from_millis(20)));
    let gateway = spawn_gateway(test_config(), mocks.client()).await;
    let client = GatewayClient::new(&gateway.base_url);

    let customer_calls = (0..CUSTOMERS).map(|i| {
        let body = json!({
            "name": format!("c{i}"),
            "phone": "+998901234567",
            "email": format!("c{i}@example.com"),
        });
        let client = &client;
        async move { (format!("c{i}"), client.create(&Endpoint::CUSTOMER, &body).await) }
    });
    let seller_calls = (0..SELLERS).map(|i| {
        let body = json!({
            "name": format!("s{i}"),
            "phone": "+998901234567",
            "email": format!("s{i}@example.com"),
        });
        let client = &client;
        async move { (format!("s{i}"), client.create(&Endpoint::SELLER, &body).await) }
    });

    let (customers, sellers) = tokio::join!(join_all(customer_calls), join_all(seller_calls));

    for (name, result) in customers {
        let response = result.unwrap();
        assert!(response.is_success());
        assert_eq!(response.body["name"], name);
        assert_eq!(response.body["id"], format!("customer-{name}"));
    }
    for (name, result) in sellers {
        let response = result.unwrap();
        assert!(response.is_success());
        assert_eq!(response.body["name"], name);
        assert_eq!(response.body["id"], format!("seller-{name}"));
    }

    let customer_creates = mocks.customer.creates.lock().unwrap();
    let seller_creates = mocks.seller.creates.lock().unwrap();
    assert_eq!(customer_creates.len(), CUSTOMERS);
    assert_eq!(seller_creates.len(), SELLERS);
    assert!(customer_creates.iter().all(|c| c.name.starts_with('c')));
    assert!(seller_creates.iter().all(|s| s.name.starts_with('s')));

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_sdk_round_trip_through_every_operation() {
    let mocks = Mocks::new();
    let gateway = spawn_gateway(test_config(), mocks.client()).await;
    let client = GatewayClient::new(&gateway.base_url);

    let list = client
        .list(
            &Endpoint::CUSTOMER,
            &ListQuery {
                search: Some("ann".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(list.is_success());

    let update = client
        .update(
            &Endpoint::CUSTOMER,
            "42",
            &json!({"name": "Ann", "phone": "+998901234567", "email": "ann@example.com"}),
        )
        .await
        .unwrap();
    assert_eq!(update.body["id"], "42");

    let get = client.get_by_id(&Endpoint::BRANCH, "b-7").await.unwrap();
    assert!(get.is_success());

    let delete = client.delete(&Endpoint::SHOP, "s-3").await.unwrap();
    assert!(delete.is_success());
    assert_eq!(delete.body, json!({}));

    let bad_page = client
        .list(
            &Endpoint::SYSTEM_USER,
            &ListQuery {
                page: Some("two".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(bad_page.status.as_u16(), 400);

    assert_eq!(mocks.customer.lists.lock().unwrap()[0].search, "ann");
    assert_eq!(mocks.branch.gets.lock().unwrap()[0].id, "b-7");
    assert_eq!(mocks.shop.deletes.lock().unwrap()[0].id, "s-3");
    assert_eq!(mocks.system_user.call_count(), 0);

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_sdk_ids_with_reserved_characters_stay_one_segment() {
    let mocks = Mocks::new();
    let gateway = spawn_gateway(test_config(), mocks.client()).await;
    let client = GatewayClient::new(&gateway.base_url);

    let response = client.get_by_id(&Endpoint::BRANCH, "b/7?x#y").await.unwrap();
    assert!(response.is_success(), "got {}", response.status);
    assert_eq!(mocks.branch.gets.lock().unwrap()[0].id, "b/7?x#y");

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_api_key_through_sdk() {
    let mocks = Mocks::new();
    let mut config = test_config();
    config.http.api_key = Some("s3cret".to_string());
    let gateway = spawn_gateway(config, mocks.client()).await;

    let anonymous = GatewayClient::new(&gateway.base_url);
    let denied = anonymous.get_by_id(&Endpoint::SELLER, "1").await.unwrap();
    assert_eq!(denied.status.as_u16(), 401);

    let authorized = GatewayClient::new(&gateway.base_url).with_api_key("s3cret");
    let allowed = authorized.get_by_id(&Endpoint::SELLER, "1").await.unwrap();
    assert!(allowed.is_success());

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_disconnected_backend_returns_503() {
    let gateway = spawn_gateway(test_config(), GrpcClient::disconnected("dial failed")).await;
    let client = GatewayClient::new(&gateway.base_url);

    let response = client.get_by_id(&Endpoint::CUSTOMER, "1").await.unwrap();
    assert_eq!(response.status.as_u16(), 503);
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .contains("dial failed"));

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_backend_yields_server_error() {
    let backend = UserServiceConfig {
        host: "127.0.0.1".to_string(),
        port: closed_port().await.to_string(),
        connect_timeout_ms: 500,
        rpc_timeout_ms: 2_000,
    };
    let grpc = GrpcClient::connect_lazy(&backend).unwrap();
    let gateway = spawn_gateway(test_config(), grpc).await;
    let client = GatewayClient::new(&gateway.base_url);

    let response = client
        .list(&Endpoint::SHOP, &ListQuery::default())
        .await
        .unwrap();
    assert!(response.status.is_server_error(), "got {}", response.status);
    assert_eq!(response.body["description"], "failed to list shop");

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_connect_reports_dial_failure() {
    let backend = UserServiceConfig {
        host: "127.0.0.1".to_string(),
        port: closed_port().await.to_string(),
        connect_timeout_ms: 500,
        rpc_timeout_ms: 1_000,
    };

    let err = GrpcClient::connect(&backend).await.unwrap_err();
    assert!(matches!(err, ConnectionError::Dial { .. }));
    assert!(err.to_string().contains("127.0.0.1"));
}

#[tokio::test]
async fn test_shutdown_trigger_stops_server() {
    let gateway = spawn_gateway(test_config(), Mocks::new().client()).await;
    let client = GatewayClient::new(&gateway.base_url);
    assert!(client
        .get_by_id(&Endpoint::CUSTOMER, "1")
        .await
        .unwrap()
        .is_success());

    gateway.shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), gateway.handle)
        .await
        .expect("server did not stop");
    assert!(result.unwrap().is_ok());
}
