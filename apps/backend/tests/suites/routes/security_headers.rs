use actix_web::test;

use crate::support::create_test_app;
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn hardening_headers_on_success_and_error() {
    let app = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;

    for uri in ["/health", "/api/banks/nope"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        let headers = resp.headers();
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff", "{uri}");
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY", "{uri}");
        assert_eq!(headers.get("cache-control").unwrap(), "no-store", "{uri}");
        assert!(headers.contains_key("strict-transport-security"), "{uri}");
        assert!(headers.contains_key("referrer-policy"), "{uri}");
        assert!(headers
            .get("content-security-policy")
            .unwrap()
            .to_str()
            .unwrap()
            .contains("default-src 'none'"));
        assert!(headers.contains_key("x-trace-id"), "{uri}");
    }
}
