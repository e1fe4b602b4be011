//! Integration tests for net crate

#[cfg(test)]
mod tests {
    use dna_events::{channel, AppEvent, FetchEvent};
    use dna_net::*;
    use httpmock::prelude::*;
    use std::time::Duration;
    use tempfile::tempdir;

    fn client() -> NetClient {
        NetClient::new(NetConfig {
            timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            probe_timeout: Duration::from_secs(1),
            ..NetConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_falls_back_to_second_endpoint() {
        let primary = MockServer::start_async().await;
        let secondary = MockServer::start_async().await;
        let (tx, mut rx) = channel();

        let missing = primary
            .mock_async(|when, then| {
                when.method(GET).path("/mesh/relay.py");
                then.status(404);
            })
            .await;
        let served = secondary
            .mock_async(|when, then| {
                when.method(GET).path("/packages/mesh/relay.py");
                then.status(200).body("print('relay')");
            })
            .await;

        let endpoints = vec![primary.base_url(), secondary.url("/packages/")];
        let fetched = fetch_with_fallback(&client(), "/mesh/relay.py", &endpoints, &tx)
            .await
            .unwrap();

        missing.assert_async().await;
        served.assert_async().await;
        assert_eq!(fetched.bytes, b"print('relay')");
        assert_eq!(fetched.endpoint, endpoints[1]);

        let mut failed = 0;
        let mut succeeded = 0;
        while let Ok(event) = rx.try_recv() {
            match event {
                AppEvent::Fetch(FetchEvent::EndpointFailed { .. }) => failed += 1,
                AppEvent::Fetch(FetchEvent::Succeeded { .. }) => succeeded += 1,
                _ => {}
            }
        }
        assert_eq!((failed, succeeded), (1, 1));
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let primary = MockServer::start_async().await;
        let secondary = MockServer::start_async().await;
        let (tx, _rx) = channel();

        primary
            .mock_async(|when, then| {
                when.method(GET).path("/a.py");
                then.status(200).body("primary");
            })
            .await;
        let untouched = secondary
            .mock_async(|when, then| {
                when.method(GET).path("/a.py");
                then.status(200).body("secondary");
            })
            .await;

        let endpoints = vec![primary.base_url(), secondary.base_url()];
        let fetched = fetch_with_fallback(&client(), "a.py", &endpoints, &tx)
            .await
            .unwrap();

        assert_eq!(fetched.bytes, b"primary");
        assert_eq!(untouched.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_local_directory_endpoint() {
        let temp = tempdir().unwrap();
        tokio::fs::create_dir_all(temp.path().join("nested"))
            .await
            .unwrap();
        tokio::fs::write(temp.path().join("nested/x.dna"), b"organism")
            .await
            .unwrap();
        let (tx, _rx) = channel();

        let endpoints = vec![
            "http://127.0.0.1:1".to_string(),
            temp.path().display().to_string(),
        ];
        let fetched = fetch_with_fallback(&client(), "nested/x.dna", &endpoints, &tx)
            .await
            .unwrap();
        assert_eq!(fetched.bytes, b"organism");
        assert_eq!(fetched.endpoint, endpoints[1]);
    }

    #[tokio::test]
    async fn test_all_endpoints_fail() {
        let temp = tempdir().unwrap();
        let (tx, mut rx) = channel();
        let endpoints = vec![
            temp.path().join("a").display().to_string(),
            temp.path().join("b").display().to_string(),
        ];

        let err = fetch_with_fallback(&client(), "gone.py", &endpoints, &tx)
            .await
            .unwrap_err();
        match err {
            dna_errors::Error::Network(dna_errors::NetworkError::AllEndpointsFailed {
                attempts,
                path,
                last_error,
            }) => {
                assert_eq!(attempts, 2);
                assert_eq!(path, "gone.py");
                assert!(last_error.contains("gone.py"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let mut exhausted = false;
        while let Ok(event) = rx.try_recv() {
            if matches!(event, AppEvent::Fetch(FetchEvent::Exhausted { .. })) {
                exhausted = true;
            }
        }
        assert!(exhausted);
    }

    #[tokio::test]
    async fn test_no_endpoints() {
        let (tx, _rx) = channel();
        let err = fetch_with_fallback(&client(), "a.py", &[], &tx)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            dna_errors::Error::Network(dna_errors::NetworkError::NoEndpoints)
        ));
    }

    #[tokio::test]
    async fn test_probe() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200);
            })
            .await;
        let (tx, _rx) = channel();
        let client = client();

        assert!(probe_endpoint(&client, &server.url("/"), &tx).await);
        assert!(!probe_endpoint(&client, "http://127.0.0.1:1", &tx).await);

        let temp = tempdir().unwrap();
        assert!(Transport::probe(&client, &temp.path().display().to_string()).await);
        assert!(!Transport::probe(&client, "/definitely/not/here").await);
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/broken.py");
                then.status(500);
            })
            .await;

        let err = client()
            .get_bytes(&server.url("/broken.py"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            dna_errors::Error::Network(dna_errors::NetworkError::HttpError { status: 500, .. })
        ));
    }
}
