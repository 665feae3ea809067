use asteroid_mining::client::{ChatCompletionsClient, PromptRequest, TextGenerator};
use asteroid_mining::config::LlmConfig;
use asteroid_mining::error::{GenerationError, TextGenerationError};
use asteroid_mining::generator::{AsteroidGenerator, FullAiGenerator};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serves exactly one canned HTTP response and hands back the raw request it received.
async fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });

    (format!("http://{}/v1", addr), handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let read = socket.read(&mut chunk).await.unwrap();
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);

        if let Some(header_end) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buffer[..header_end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buffer.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buffer).to_string()
}

fn llm_config(base_url: String) -> LlmConfig {
    LlmConfig {
        base_url,
        model: "test-model".to_string(),
        api_key_env: None,
        temperature: 0.2,
        timeout_seconds: 5,
        api_logging: false,
    }
}

fn completion(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-1",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    })
    .to_string()
}

#[tokio::test]
async fn sends_chat_request_and_returns_content() {
    let (base_url, server) = serve_once("200 OK", completion("Vesta-Rho")).await;
    let client = ChatCompletionsClient::new(&llm_config(base_url)).unwrap();

    let request = PromptRequest::new("You name asteroids.", "A {theme} name please").param("theme", "dusty");
    let reply = client.complete(&request).await.unwrap();
    assert_eq!(reply, "Vesta-Rho");

    let raw = server.await.unwrap();
    assert!(raw.starts_with("POST /v1/chat/completions"), "{}", raw);
    let body = &raw[raw.find("\r\n\r\n").unwrap() + 4..];
    let json: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(json["model"], "test-model");
    assert_eq!(json["messages"][0]["role"], "system");
    assert_eq!(json["messages"][0]["content"], "You name asteroids.");
    assert_eq!(json["messages"][1]["content"], "A dusty name please");
    assert!(json.get("response_format").is_none());
}

#[tokio::test]
async fn json_prompts_request_json_objects() {
    let (base_url, server) = serve_once("200 OK", completion("{}")).await;
    let client = ChatCompletionsClient::new(&llm_config(base_url)).unwrap();

    client.complete(&PromptRequest::new("sys", "user").json()).await.unwrap();

    let raw = server.await.unwrap();
    let body = &raw[raw.find("\r\n\r\n").unwrap() + 4..];
    let json: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(json["response_format"]["type"], "json_object");
}

#[tokio::test]
async fn sends_bearer_token_from_environment() {
    // Unique name, no other test reads it.
    unsafe { std::env::set_var("ASTEROID_MINING_TEST_KEY", "sk-test-123") };
    let (base_url, server) = serve_once("200 OK", completion("Nysa")).await;
    let mut config = llm_config(base_url);
    config.api_key_env = Some("ASTEROID_MINING_TEST_KEY".to_string());

    let client = ChatCompletionsClient::new(&config).unwrap();
    client.complete(&PromptRequest::new("sys", "user")).await.unwrap();

    let raw = server.await.unwrap().to_lowercase();
    assert!(raw.contains("authorization: bearer sk-test-123"), "{}", raw);
}

#[tokio::test]
async fn missing_api_key_is_reported_up_front() {
    let mut config = llm_config("http://127.0.0.1:9".to_string());
    config.api_key_env = Some("ASTEROID_MINING_TEST_UNSET_KEY".to_string());

    match ChatCompletionsClient::new(&config) {
        Err(TextGenerationError::MissingApiKey(var)) => assert_eq!(var, "ASTEROID_MINING_TEST_UNSET_KEY"),
        Err(other) => panic!("unexpected error {:?}", other),
        Ok(_) => panic!("client should not build without its key"),
    }
}

#[tokio::test]
async fn error_status_is_a_service_failure() {
    let (base_url, _server) = serve_once("429 Too Many Requests", r#"{"error":"rate limited"}"#.to_string()).await;
    let client = ChatCompletionsClient::new(&llm_config(base_url)).unwrap();

    match client.complete(&PromptRequest::new("sys", "user")).await {
        Err(TextGenerationError::Status { status, body }) => {
            assert_eq!(status, 429);
            assert!(body.contains("rate limited"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_choices_are_an_empty_response() {
    let (base_url, _server) = serve_once("200 OK", r#"{"choices":[]}"#.to_string()).await;
    let client = ChatCompletionsClient::new(&llm_config(base_url)).unwrap();

    assert!(matches!(
        client.complete(&PromptRequest::new("sys", "user")).await,
        Err(TextGenerationError::EmptyResponse)
    ));
}

#[tokio::test]
async fn unreachable_service_is_a_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ChatCompletionsClient::new(&llm_config(format!("http://{}", addr))).unwrap();
    assert!(matches!(
        client.complete(&PromptRequest::new("sys", "user")).await,
        Err(TextGenerationError::Request(_))
    ));
}

#[tokio::test]
async fn full_ai_over_http_distinguishes_failure_kinds() {
    let (base_url, _server) = serve_once("503 Service Unavailable", "{}".to_string()).await;
    let generator = FullAiGenerator::new(Arc::new(ChatCompletionsClient::new(&llm_config(base_url)).unwrap()));
    assert!(matches!(generator.generate().await, Err(GenerationError::ServiceUnavailable(_))));

    let (base_url, _server) = serve_once("200 OK", completion("not json at all")).await;
    let generator = FullAiGenerator::new(Arc::new(ChatCompletionsClient::new(&llm_config(base_url)).unwrap()));
    assert!(matches!(generator.generate().await, Err(GenerationError::MalformedOutput { .. })));
}
