//! Tests for device, area, and bare-metal operations.

use std::str::FromStr;
use std::sync::Arc;

use super::device::{DEFAULT_PROJECT, DeviceAction};
use crate::testkit::{MockTransport, blocking_client_with, client_with};
use crate::{Error, Query};

const BASE: &str = "https://api.submodel.ai/api/v1";

mod actions {
    use super::*;

    #[test]
    fn wire_spellings_match_the_service() {
        assert_eq!(DeviceAction::Run.as_str(), "run");
        // this resource spells it with an underscore
        assert_eq!(DeviceAction::SetLabel.as_str(), "set_label");
        assert_eq!(DeviceAction::ResetToken.as_str(), "reset_token");
        assert_eq!(DeviceAction::SetStatus.as_str(), "set_status");
    }

    #[test]
    fn from_str_round_trips_every_action() {
        for action in DeviceAction::ALL {
            assert_eq!(DeviceAction::from_str(action.as_str()).unwrap(), action);
        }
    }

    #[test]
    fn from_str_rejects_instance_only_spellings() {
        let err = DeviceAction::from_str("setlabel").unwrap_err();

        match err {
            Error::Validation(message) => {
                assert!(message.contains("setlabel"));
                assert!(message.contains("set_label"));
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }
}

mod device_routes {
    use super::*;

    #[tokio::test]
    async fn list_drops_the_search_parameter_when_absent() {
        let transport = Arc::new(MockTransport::success());
        let client = client_with(Arc::clone(&transport));

        let session = client.session().unwrap();
        session.devices().list(1, 10, None).await.unwrap();

        assert_eq!(
            transport.only_request().url.as_str(),
            format!("{BASE}/device/list?page=1&limit=10")
        );
    }

    #[tokio::test]
    async fn list_carries_the_search_parameter_when_present() {
        let transport = Arc::new(MockTransport::success());
        let client = client_with(Arc::clone(&transport));

        let session = client.session().unwrap();
        session.devices().list(1, 10, Some("h100")).await.unwrap();

        assert_eq!(
            transport.only_request().url.as_str(),
            format!("{BASE}/device/list?page=1&limit=10&search=h100")
        );
    }

    #[tokio::test]
    async fn detail_embeds_the_device_id() {
        let transport = Arc::new(MockTransport::success());
        let client = client_with(Arc::clone(&transport));

        let session = client.session().unwrap();
        session.devices().detail("d-7").await.unwrap();

        assert_eq!(
            transport.only_request().url.as_str(),
            format!("{BASE}/device/detail/d-7")
        );
    }

    #[tokio::test]
    async fn control_defaults_to_the_global_project() {
        let transport = Arc::new(MockTransport::success());
        let client = client_with(Arc::clone(&transport));

        let session = client.session().unwrap();
        session
            .devices()
            .control(DeviceAction::Stop, "d-7")
            .await
            .unwrap();

        let request = transport.only_request();
        assert_eq!(request.method, http::Method::GET);
        assert_eq!(
            request.url.as_str(),
            format!("{BASE}/device/action/stop/d-7/{DEFAULT_PROJECT}")
        );
    }

    #[tokio::test]
    async fn control_with_carries_project_and_parameters_in_the_query() {
        let transport = Arc::new(MockTransport::success());
        let client = client_with(Arc::clone(&transport));

        let session = client.session().unwrap();
        session
            .devices()
            .control_with(
                DeviceAction::SetLabel,
                "d-7",
                "proj-1",
                Query::new().pair("label", "edge"),
            )
            .await
            .unwrap();

        assert_eq!(
            transport.only_request().url.as_str(),
            format!("{BASE}/device/action/set_label/d-7/proj-1?label=edge")
        );
    }
}

mod area_routes {
    use super::*;

    #[tokio::test]
    async fn list_is_paginated() {
        let transport = Arc::new(MockTransport::success());
        let client = client_with(Arc::clone(&transport));

        let session = client.session().unwrap();
        session.areas().list(3, 25).await.unwrap();

        assert_eq!(
            transport.only_request().url.as_str(),
            format!("{BASE}/area/list?page=3&limit=25")
        );
    }

    #[tokio::test]
    async fn detail_embeds_the_area_id() {
        let transport = Arc::new(MockTransport::success());
        let client = client_with(Arc::clone(&transport));

        let session = client.session().unwrap();
        session.areas().detail("as-01").await.unwrap();

        assert_eq!(
            transport.only_request().url.as_str(),
            format!("{BASE}/area/detail/as-01")
        );
    }
}

mod baremetal_routes {
    use super::*;

    #[tokio::test]
    async fn list_pins_the_baremetal_mode() {
        let transport = Arc::new(MockTransport::success());
        let client = client_with(Arc::clone(&transport));

        let session = client.session().unwrap();
        session.baremetal().list(1, 10).await.unwrap();

        assert_eq!(
            transport.only_request().url.as_str(),
            format!("{BASE}/baremetal/list?page=1&limit=10&mode=baremetal")
        );
    }
}

mod blocking_twin {
    use super::*;

    #[test]
    fn device_control_defaults_to_the_global_project() {
        let transport = Arc::new(MockTransport::success());
        let client = blocking_client_with(Arc::clone(&transport));

        client.devices().control(DeviceAction::Run, "d-7").unwrap();

        assert_eq!(
            transport.only_request().url.as_str(),
            format!("{BASE}/device/action/run/d-7/global")
        );
    }

    #[test]
    fn area_list_is_paginated() {
        let transport = Arc::new(MockTransport::success());
        let client = blocking_client_with(Arc::clone(&transport));

        client.areas().list(1, 10).unwrap();

        assert_eq!(
            transport.only_request().url.as_str(),
            format!("{BASE}/area/list?page=1&limit=10")
        );
    }

    #[test]
    fn baremetal_list_pins_the_baremetal_mode() {
        let transport = Arc::new(MockTransport::success());
        let client = blocking_client_with(Arc::clone(&transport));

        client.baremetal().list(2, 5).unwrap();

        assert_eq!(
            transport.only_request().url.as_str(),
            format!("{BASE}/baremetal/list?page=2&limit=5&mode=baremetal")
        );
    }
}
