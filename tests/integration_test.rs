use mockito::{Matcher, Server};
use wolfram_alpha::api::params::{ResultFormat, Units};
use wolfram_alpha::api::{ApiType, ClientConfig, ClientFactory, FullResultsClient, SimpleRequest};
use wolfram_alpha::WolframError;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_api_type_from_str() {
    assert_eq!(ApiType::from_str("full"), Some(ApiType::Full));
    assert_eq!(ApiType::from_str("query"), Some(ApiType::Full));
    assert_eq!(ApiType::from_str("simple"), Some(ApiType::Simple));
    assert_eq!(ApiType::from_str("short"), Some(ApiType::ShortAnswers));
    assert_eq!(ApiType::from_str("spoken"), Some(ApiType::Spoken));
    assert_eq!(ApiType::from_str("invalid"), None);
}

#[test]
fn test_api_type_paths() {
    assert_eq!(ApiType::Full.path(), "/v2/query");
    assert_eq!(ApiType::Simple.path(), "/v1/simple");
    assert_eq!(ApiType::ShortAnswers.path(), "/v1/result");
    assert_eq!(ApiType::Spoken.path(), "/v1/spoken");
}

const PI_ENVELOPE: &str = r#"{
    "queryresult": {
        "success": true,
        "error": false,
        "numpods": 2,
        "version": "2.6",
        "timing": 1.1,
        "timedout": "",
        "pod": [
            {
                "title": "Input",
                "error": false,
                "position": 100,
                "scanner": "Identity",
                "id": "Input",
                "numsubpods": 1,
                "subpod": {"title": "", "plaintext": "pi"}
            },
            {
                "title": "Decimal approximation",
                "error": false,
                "position": 200,
                "scanner": "Numeric",
                "id": "DecimalApproximation",
                "numsubpods": 1,
                "primary": true,
                "subpod": {"title": "", "plaintext": "3.14159265358979323846..."}
            }
        ]
    }
}"#;

#[tokio::test]
async fn test_full_results_end_to_end() {
    init_logs();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v2/query")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("input".to_string(), "pi".to_string()),
            Matcher::UrlEncoded("appid".to_string(), "DEMO".to_string()),
            Matcher::UrlEncoded("output".to_string(), "json".to_string()),
            Matcher::UrlEncoded("format".to_string(), "plaintext,image".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PI_ENVELOPE)
        .create_async()
        .await;

    let client = ClientFactory::full_results_client_with_url(server.url());
    let result = client
        .selector()
        .with_result_formats(&[ResultFormat::Plaintext, ResultFormat::Image])
        .get_results("pi", "DEMO")
        .await
        .expect("query should succeed");

    mock.assert_async().await;
    assert!(result.success);
    assert_eq!(result.numpods, 2);
    assert_eq!(result.pods.len(), 2);
    assert!(result.is_consistent());
    assert_eq!(
        result.primary_pod().map(|pod| pod.id.as_str()),
        Some("DecimalApproximation")
    );
}

#[tokio::test]
async fn test_pod_state_replay_round_trip() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v2/query")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("input".to_string(), "pi".to_string()),
            Matcher::UrlEncoded(
                "podstate".to_string(),
                "decimalapproximation__more digits".to_string(),
            ),
        ]))
        .with_status(200)
        .with_body(PI_ENVELOPE)
        .create_async()
        .await;

    let client = ClientFactory::full_results_client_with_url(server.url());
    let result = client
        .get_full_results_for_pod_states(
            "pi",
            "DEMO",
            &["DecimalApproximation__More digits".to_string()],
        )
        .await
        .expect("query should succeed");

    mock.assert_async().await;
    assert!(result.success);
}

#[tokio::test]
async fn test_invalid_app_id_maps_to_typed_error() {
    init_logs();
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v2/query")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body("Error 1: Invalid appid")
        .create_async()
        .await;

    let client = ClientFactory::full_results_client_with_url(server.url());
    let error = client
        .get_full_results_for_formats("pi", "BROKEN", &[])
        .await
        .unwrap_err();

    assert!(matches!(error, WolframError::InvalidAppId));
}

#[tokio::test]
async fn test_missing_app_id_maps_to_typed_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v2/query")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body("Error 2: Appid missing")
        .create_async()
        .await;

    let client = ClientFactory::full_results_client_with_url(server.url());
    let error = client
        .get_full_results_for_formats("pi", "", &[])
        .await
        .unwrap_err();

    assert!(matches!(error, WolframError::MissingAppId));
}

#[tokio::test]
async fn test_unrecognized_error_body_is_preserved() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/result")
        .match_query(Matcher::Any)
        .with_status(501)
        .with_body("Wolfram|Alpha did not understand your input")
        .create_async()
        .await;

    let client = ClientFactory::short_answers_client_with_url(server.url());
    let error = client
        .get_short_answer("gibberish input", "DEMO", None)
        .await
        .unwrap_err();

    match error {
        WolframError::Api { status, body } => {
            assert_eq!(status, 501);
            assert_eq!(body, "Wolfram|Alpha did not understand your input");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unsuccessful_query_is_not_an_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v2/query")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"queryresult": {
                "success": false,
                "error": false,
                "numpods": 0,
                "version": "2.6",
                "timing": 0.2,
                "timedout": ""
            }}"#,
        )
        .create_async()
        .await;

    let client = ClientFactory::full_results_client_with_url(server.url());
    let result = client
        .get_full_results_for_formats("fff", "DEMO", &[])
        .await
        .expect("a well-formed failure document is a normal return value");

    assert!(!result.success);
    assert!(result.pods.is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v2/query")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>definitely not the document</html>")
        .create_async()
        .await;

    let client = ClientFactory::full_results_client_with_url(server.url());
    let error = client
        .get_full_results_for_formats("pi", "DEMO", &[])
        .await
        .unwrap_err();

    assert!(matches!(error, WolframError::Decode(_)));
}

#[tokio::test]
async fn test_empty_input_is_rejected_locally() {
    let client = FullResultsClient::new(ClientConfig::with_base_url("http://127.0.0.1:1"));
    let error = client
        .get_full_results_for_formats("", "DEMO", &[])
        .await
        .unwrap_err();

    assert!(matches!(error, WolframError::InvalidInput(_)));
}

#[tokio::test]
async fn test_async_pod_follow_up() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v2/asyncPod.jsp")
        .match_query(Matcher::UrlEncoded("id".to_string(), "MSP1234".to_string()))
        .with_status(200)
        .with_body(
            r#"{"pod": {
                "title": "Weather history & forecast",
                "error": false,
                "position": 300,
                "scanner": "Data",
                "id": "WeatherCharts:WeatherData",
                "numsubpods": 1,
                "subpod": {"title": "", "plaintext": "mostly cloudy"}
            }}"#,
        )
        .create_async()
        .await;

    let client = ClientFactory::full_results_client_with_url(server.url());
    let pod = client
        .load_pod_async(&format!("{}/api/v2/asyncPod.jsp?id=MSP1234", server.url()))
        .await
        .expect("async pod fetch should succeed");

    mock.assert_async().await;
    assert_eq!(pod.id, "WeatherCharts:WeatherData");
    assert_eq!(pod.subpods[0].plaintext.as_deref(), Some("mostly cloudy"));
}

#[tokio::test]
async fn test_short_answer_sends_default_timeout() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/result")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("i".to_string(), "What is 2+2?".to_string()),
            Matcher::UrlEncoded("appid".to_string(), "DEMO".to_string()),
            Matcher::UrlEncoded("units".to_string(), "metric".to_string()),
            Matcher::UrlEncoded("timeout".to_string(), "5".to_string()),
        ]))
        .with_status(200)
        .with_body("4")
        .create_async()
        .await;

    let client = ClientFactory::short_answers_client_with_url(server.url());
    let answer = client
        .get_short_answer("What is 2+2?", "DEMO", Some(Units::Metric))
        .await
        .expect("short answer should succeed");

    mock.assert_async().await;
    assert_eq!(answer, "4");
}

#[tokio::test]
async fn test_spoken_results_with_custom_timeout() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/spoken")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("i".to_string(), "What is 2+2?".to_string()),
            Matcher::UrlEncoded("timeout".to_string(), "10".to_string()),
        ]))
        .with_status(200)
        .with_body("The answer is 4")
        .create_async()
        .await;

    let client = ClientFactory::spoken_results_client_with_url(server.url());
    let answer = client
        .get_spoken_results_with_timeout("What is 2+2?", "DEMO", None, 10)
        .await
        .expect("spoken results should succeed");

    mock.assert_async().await;
    assert_eq!(answer, "The answer is 4");
}

#[tokio::test]
async fn test_simple_api_returns_raw_bytes() {
    // A GIF header is enough to prove the body is passed through untouched
    let image: &[u8] = &[0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x00, 0x01];

    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/simple")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("i".to_string(), "pi".to_string()),
            Matcher::UrlEncoded("appid".to_string(), "DEMO".to_string()),
            Matcher::UrlEncoded("width".to_string(), "800".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "image/gif")
        .with_body(image)
        .create_async()
        .await;

    let client = ClientFactory::simple_api_client_with_url(server.url());
    let request = SimpleRequest {
        width: Some(800),
        ..Default::default()
    };
    let bytes = client
        .query("pi", "DEMO", &request)
        .await
        .expect("simple query should succeed");

    mock.assert_async().await;
    assert_eq!(bytes, image);
}

#[tokio::test]
async fn test_assumption_replay_round_trip() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v2/query")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("input".to_string(), "pi".to_string()),
            Matcher::UrlEncoded("assumption".to_string(), "*c.pi-_*movie-".to_string()),
        ]))
        .with_status(200)
        .with_body(PI_ENVELOPE)
        .create_async()
        .await;

    let client = ClientFactory::full_results_client_with_url(server.url());
    let result = client
        .selector()
        .with_assumption("*C.pi-_*Movie-")
        .get_results("pi", "DEMO")
        .await
        .expect("query should succeed");

    mock.assert_async().await;
    assert!(result.success);
}
