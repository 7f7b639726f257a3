//! Tests for account and API-key operations.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::testkit::{MockTransport, blocking_client_with, client_with, success_response};

const BASE: &str = "https://api.submodel.ai/api/v1";

mod account_routes {
    use super::*;

    #[tokio::test]
    async fn register_posts_the_credentials() {
        let transport = Arc::new(MockTransport::success());
        let client = client_with(Arc::clone(&transport));

        let session = client.session().unwrap();
        session.auth().register("alice", "pw-1").await.unwrap();

        let request = transport.only_request();
        assert_eq!(request.method, http::Method::POST);
        assert_eq!(request.url.as_str(), format!("{BASE}/user/reg"));
        let body: Value = serde_json::from_slice(&request.body.unwrap()).unwrap();
        assert_eq!(body, json!({"username": "alice", "password": "pw-1"}));
    }

    #[tokio::test]
    async fn login_posts_the_credentials() {
        let transport = Arc::new(MockTransport::success());
        let client = client_with(Arc::clone(&transport));

        let session = client.session().unwrap();
        session.auth().login("alice", "pw-1").await.unwrap();

        let request = transport.only_request();
        assert_eq!(request.url.as_str(), format!("{BASE}/user/login"));
        let body: Value = serde_json::from_slice(&request.body.unwrap()).unwrap();
        assert_eq!(body, json!({"username": "alice", "password": "pw-1"}));
    }

    #[tokio::test]
    async fn parameterless_operations_hit_their_routes() {
        let transport = Arc::new(MockTransport::new(vec![
            Ok(success_response(Value::Null)),
            Ok(success_response(Value::Null)),
            Ok(success_response(Value::Null)),
            Ok(success_response(Value::Null)),
        ]));
        let client = client_with(Arc::clone(&transport));

        let session = client.session().unwrap();
        let auth = session.auth();
        auth.logout().await.unwrap();
        auth.user_info().await.unwrap();
        auth.generate_api_key().await.unwrap();
        auth.list_api_keys().await.unwrap();

        let urls: Vec<String> = transport
            .captured_requests()
            .iter()
            .map(|r| r.url.to_string())
            .collect();
        assert_eq!(
            urls,
            [
                format!("{BASE}/user/logout"),
                format!("{BASE}/user/info"),
                format!("{BASE}/user/generate_api_key"),
                format!("{BASE}/user/list_api_key"),
            ]
        );
    }
}

mod api_key_routes {
    use super::*;

    #[tokio::test]
    async fn remove_api_key_embeds_the_key_in_the_path() {
        let transport = Arc::new(MockTransport::success());
        let client = client_with(Arc::clone(&transport));

        let session = client.session().unwrap();
        session.auth().remove_api_key("key-9").await.unwrap();

        let request = transport.only_request();
        assert_eq!(request.method, http::Method::GET);
        assert_eq!(
            request.url.as_str(),
            format!("{BASE}/user/remove_api_key/key-9")
        );
    }

    #[tokio::test]
    async fn set_api_key_active_spells_the_flag_lowercase() {
        for (active, spelled) in [(true, "true"), (false, "false")] {
            let transport = Arc::new(MockTransport::success());
            let client = client_with(Arc::clone(&transport));

            let session = client.session().unwrap();
            session
                .auth()
                .set_api_key_active("key-9", active)
                .await
                .unwrap();

            assert_eq!(
                transport.only_request().url.as_str(),
                format!("{BASE}/user/active_api_key/key-9/{spelled}")
            );
        }
    }
}

mod blocking_twin {
    use super::*;

    #[test]
    fn register_posts_the_credentials() {
        let transport = Arc::new(MockTransport::success());
        let client = blocking_client_with(Arc::clone(&transport));

        client.auth().register("alice", "pw-1").unwrap();

        let request = transport.only_request();
        assert_eq!(request.method, http::Method::POST);
        assert_eq!(request.url.as_str(), format!("{BASE}/user/reg"));
    }

    #[test]
    fn set_api_key_active_spells_the_flag_lowercase() {
        let transport = Arc::new(MockTransport::success());
        let client = blocking_client_with(Arc::clone(&transport));

        client.auth().set_api_key_active("key-9", false).unwrap();

        assert_eq!(
            transport.only_request().url.as_str(),
            format!("{BASE}/user/active_api_key/key-9/false")
        );
    }
}
