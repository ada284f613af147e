//! YahooProvider against a local mock of the chart endpoint.

use chrono::NaiveDate;
use httpmock::prelude::*;
use indexclose_core::data::{DataError, DataProvider, DataSource, FetchRequest, YahooProvider};

const FIXTURE: &str = include_str!("fixtures/gspc_chart_1988.json");

fn request() -> FetchRequest {
    FetchRequest {
        symbol: "^GSPC".into(),
        start: NaiveDate::from_ymd_opt(1988, 1, 1).unwrap(),
        end: NaiveDate::from_ymd_opt(1988, 1, 31).unwrap(),
    }
}

#[test]
fn fetches_daily_quotes_from_chart_endpoint() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .query_param("interval", "1d")
            .query_param("period1", "567993600")
            .query_param("includeAdjustedClose", "true");
        then.status(200)
            .header("content-type", "application/json")
            .body(FIXTURE);
    });

    let provider = YahooProvider::with_base_url(server.base_url()).unwrap();
    let result = provider.fetch(&request()).unwrap();

    mock.assert();
    assert_eq!(result.symbol, "^GSPC");
    assert_eq!(result.source, DataSource::YahooFinance);

    // 11 timestamps in the fixture, one of them an all-null placeholder
    assert_eq!(result.quotes.len(), 10);
    assert_eq!(
        result.quotes[0].date,
        NaiveDate::from_ymd_opt(1988, 1, 4).unwrap()
    );
    assert_eq!(result.quotes[0].close, Some(255.94000244140625));
    assert_eq!(
        result.quotes.last().unwrap().date,
        NaiveDate::from_ymd_opt(1988, 1, 15).unwrap()
    );
    for pair in result.quotes.windows(2) {
        assert!(pair[0].date < pair[1].date);
    }
}

#[test]
fn http_404_is_symbol_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET);
        then.status(404).body(
            r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#,
        );
    });

    let provider = YahooProvider::with_base_url(server.base_url()).unwrap();
    match provider.fetch(&request()) {
        Err(DataError::SymbolNotFound { symbol }) => assert_eq!(symbol, "^GSPC"),
        other => panic!("expected SymbolNotFound, got: {other:?}"),
    }
}

#[test]
fn http_429_reports_retry_after() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET);
        then.status(429).header("retry-after", "30");
    });

    let provider = YahooProvider::with_base_url(server.base_url()).unwrap();
    match provider.fetch(&request()) {
        Err(DataError::RateLimited { retry_after_secs }) => assert_eq!(retry_after_secs, 30),
        other => panic!("expected RateLimited, got: {other:?}"),
    }
}

#[test]
fn http_401_is_authentication_required() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET);
        then.status(401);
    });

    let provider = YahooProvider::with_base_url(server.base_url()).unwrap();
    assert!(matches!(
        provider.fetch(&request()),
        Err(DataError::AuthenticationRequired(_))
    ));
}

#[test]
fn server_error_is_not_retried() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET);
        then.status(503);
    });

    let provider = YahooProvider::with_base_url(server.base_url()).unwrap();
    match provider.fetch(&request()) {
        Err(DataError::HttpStatus { status, symbol }) => {
            assert_eq!(status, 503);
            assert_eq!(symbol, "^GSPC");
        }
        other => panic!("expected HttpStatus, got: {other:?}"),
    }
    mock.assert();
}

#[test]
fn malformed_body_is_format_change() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET);
        then.status(200).body("<html>not json</html>");
    });

    let provider = YahooProvider::with_base_url(server.base_url()).unwrap();
    assert!(matches!(
        provider.fetch(&request()),
        Err(DataError::ResponseFormatChanged(_))
    ));
}

#[test]
fn closed_port_is_network_unreachable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let provider = YahooProvider::with_base_url(format!("http://{addr}")).unwrap();
    assert!(matches!(
        provider.fetch(&request()),
        Err(DataError::NetworkUnreachable(_))
    ));
}
