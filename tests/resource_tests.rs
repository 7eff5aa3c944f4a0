//! Trading, watchlist, streaming and command table tests against a mock
//! Tradier server.

mod common;

use common::{client_for, setup_mock_server};
use rust_decimal_macros::dec;
use serde_json::json;
use tradier_rs::api::EventsQuery;
use tradier_rs::client::Params;
use tradier_rs::commands::CommandTable;
use tradier_rs::models::{OrderChange, OrderDuration, OrderRequest, OrderSide, OrderType};
use tradier_rs::{AccountId, Endpoint, Error, OrderId, WatchlistId};
use wiremock::matchers::{body_string, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FORM: &str = "application/x-www-form-urlencoded";

async fn body_of_first_request(server: &MockServer) -> String {
    let requests = server.received_requests().await.unwrap();
    String::from_utf8(requests[0].body.clone()).unwrap()
}

fn watchlist_body(symbols: &[&str]) -> serde_json::Value {
    let items: Vec<_> = symbols
        .iter()
        .map(|s| json!({ "symbol": s, "id": s.to_lowercase() }))
        .collect();
    json!({
        "watchlist": {
            "name": "Tech",
            "id": "tech",
            "public_id": "public-1kqfyt9dk",
            "items": { "item": items }
        }
    })
}

#[tokio::test]
async fn test_create_order_sends_form_body() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts/VA000001/orders"))
        .and(header("content-type", FORM))
        .and(body_string(
            "class=equity&symbol=AAPL&side=buy&quantity=10&type=limit&duration=day&price=150.5",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "order": { "id": 257459, "status": "ok", "partner_id": "c4998eb7-06e8-4820-a7ab-55d9760065fb" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Endpoint::Production);
    let order = OrderRequest::equity("AAPL", OrderSide::Buy, dec!(10))
        .order_type(OrderType::Limit)
        .duration(OrderDuration::Day)
        .price(dec!(150.50));

    let ack = client
        .orders()
        .create(&AccountId::new("VA000001"), order)
        .await
        .unwrap();

    assert_eq!(ack.id, Some(257459));
    assert_eq!(ack.status, "ok");
}

#[tokio::test]
async fn test_preview_flag_overrides_caller_value() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts/VA000001/orders"))
        .and(body_string_contains("preview=true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "order": {
                "status": "ok",
                "commission": 0.0,
                "cost": 1505.0,
                "fees": 0.0,
                "symbol": "AAPL",
                "quantity": 10.0,
                "side": "buy",
                "type": "limit",
                "duration": "day",
                "result": true,
                "order_cost": 1505.0,
                "margin_change": 0.0,
                "request_date": "2019-05-08T15:22:13.425",
                "extended_hours": false,
                "class": "equity",
                "strategy": "equity",
                "day_trades": 0
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Endpoint::Production);
    let order = Params::from(OrderRequest::equity("AAPL", OrderSide::Buy, dec!(10)))
        .with("preview", false);

    let preview = client
        .orders()
        .preview(&AccountId::new("VA000001"), order)
        .await
        .unwrap();

    assert_eq!(preview.cost, Some(dec!(1505)));
    assert_eq!(preview.result, Some(true));
    assert!(preview.extra.contains_key("strategy"));

    let body = body_of_first_request(&server).await;
    assert!(!body.contains("preview=false"));
    assert_eq!(body.matches("preview=").count(), 1);
}

#[tokio::test]
async fn test_change_order_puts_form_body() {
    let server = setup_mock_server().await;
    Mock::given(method("PUT"))
        .and(path("/v1/accounts/VA000001/orders/257459"))
        .and(header("content-type", FORM))
        .and(body_string("type=limit&price=151"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "order": { "id": 257459, "status": "ok" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Endpoint::Production);
    let change = OrderChange {
        order_type: Some(OrderType::Limit),
        price: Some(dec!(151)),
        ..Default::default()
    };

    let ack = client
        .orders()
        .change(&AccountId::new("VA000001"), &OrderId::new("257459"), change)
        .await
        .unwrap();
    assert_eq!(ack.id, Some(257459));
}

#[tokio::test]
async fn test_cancel_order_is_a_delete() {
    let server = setup_mock_server().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/accounts/VA000001/orders/257459"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "order": { "id": 257459, "status": "ok" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Endpoint::Production);
    let ack = client
        .orders()
        .cancel(&AccountId::new("VA000001"), &OrderId::new("257459"))
        .await
        .unwrap();
    assert_eq!(ack.status, "ok");
}

#[tokio::test]
async fn test_rejected_order_carries_validation_errors() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts/VA000001/orders"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": { "error": ["Invalid quantity", "Invalid side"] }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, Endpoint::Production);
    let err = client
        .orders()
        .create(&AccountId::new("VA000001"), "class=equity&symbol=AAPL")
        .await
        .unwrap_err();

    match err {
        Error::Api { status, message, .. } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid quantity; Invalid side");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_watchlist_crud() {
    let server = setup_mock_server().await;
    let client = client_for(&server, Endpoint::Production);
    let id = WatchlistId::new("tech");

    Mock::given(method("POST"))
        .and(path("/v1/watchlists"))
        .and(body_string("name=Tech&symbols=AAPL%2CMSFT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(watchlist_body(&["AAPL", "MSFT"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/watchlists/tech"))
        .respond_with(ResponseTemplate::new(200).set_body_json(watchlist_body(&["AAPL", "MSFT"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/watchlists/tech"))
        .and(body_string("name=Tech&symbols=NVDA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(watchlist_body(&["NVDA"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/watchlists/tech/symbols"))
        .and(body_string("symbols=AMD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(watchlist_body(&["NVDA", "AMD"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/watchlists/tech/symbols/NVDA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(watchlist_body(&["AMD"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/watchlists/tech"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "watchlists": { "watchlist": { "name": "default", "id": "default", "public_id": "public-2" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let watchlists = client.watchlists();

    let created = watchlists.create("Tech", ["AAPL", "MSFT"]).await.unwrap();
    assert_eq!(created.watchlist_id(), id);

    let fetched = watchlists.get(&id).await.unwrap();
    assert_eq!(fetched.symbols(), vec!["AAPL", "MSFT"]);

    let updated = watchlists.update(&id, "Tech", "NVDA").await.unwrap();
    assert_eq!(updated.symbols(), vec!["NVDA"]);

    let added = watchlists.add_symbols(&id, "AMD").await.unwrap();
    assert_eq!(added.symbols(), vec!["NVDA", "AMD"]);

    let removed = watchlists.remove_symbol(&id, "NVDA").await.unwrap();
    assert_eq!(removed.symbols(), vec!["AMD"]);

    let remaining = watchlists.delete(&id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining.iter().next().unwrap().id, "default");
}

#[tokio::test]
async fn test_empty_watchlist_items() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/v1/watchlists/empty"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "watchlist": { "name": "Empty", "id": "empty", "public_id": "public-3", "items": "null" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, Endpoint::Production);
    let watchlist = client.watchlists().get(&WatchlistId::new("empty")).await.unwrap();
    assert!(watchlist.symbols().is_empty());
}

#[tokio::test]
async fn test_streaming_session_and_events() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/v1/markets/events/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stream": {
                "url": "https://stream.tradier.com/v1/markets/events",
                "sessionid": "c8638963-a6d4-4fb9-9bc6-e25fbd8c60c3"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/stream/markets/events"))
        .and(body_string_contains("sessionid=c8638963-a6d4-4fb9-9bc6-e25fbd8c60c3"))
        .and(body_string_contains("symbols=SPY"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "{\"type\":\"trade\",\"symbol\":\"SPY\",\"price\":\"281.84\"}\n",
        ))
        .expect(1)
        .mount(&server)
        .await;

    // Session creation stays on the client's endpoint; events use stream.
    let client = client_for(&server, Endpoint::Production);
    let session = client.streaming().create_session().await.unwrap();
    assert_eq!(session.sessionid, "c8638963-a6d4-4fb9-9bc6-e25fbd8c60c3");

    let events = client
        .streaming()
        .events(EventsQuery::new(session.sessionid, "SPY").filter("trade"))
        .await
        .unwrap();
    assert!(events.contains("\"symbol\":\"SPY\""));
}

#[tokio::test]
async fn test_command_table_runs_actions() {
    let server = setup_mock_server().await;
    let quote = json!({ "symbol": "AAPL", "last": 150.25 });
    Mock::given(method("GET"))
        .and(path("/v1/markets/quotes"))
        .and(query_param("symbols", "AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "quotes": { "quote": quote }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/markets/calendar"))
        .and(query_param("month", "5"))
        .and(query_param("year", "2019"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "calendar": {
                "month": 5,
                "year": 2019,
                "days": { "day": [
                    { "date": "2019-05-01", "status": "open", "open": { "start": "09:30", "end": "16:00" } },
                    { "date": "2019-05-04", "status": "closed", "description": "Market is closed" }
                ]}
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, Endpoint::Production);
    let table = CommandTable::standard();

    let payload = table
        .get("quote")
        .unwrap()
        .call(&client, &["AAPL".to_string()])
        .await
        .unwrap();
    assert_eq!(payload["symbol"], "AAPL");

    let payload = table
        .get("calendar")
        .unwrap()
        .call(&client, &["5".to_string(), "2019".to_string()])
        .await
        .unwrap();
    assert_eq!(payload["days"]["day"].as_array().unwrap().len(), 2);

    assert!(table.get("getQuote").is_none());
}
