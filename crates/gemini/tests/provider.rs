//! Tests for the Gemini backend: headers, endpoints and model calls.

use pisces_gemini::{BASE_URL, Gemini};

#[test]
fn api_sets_key_and_content_type() {
    let provider = Gemini::api(reqwest::Client::new(), "test-key").expect("gemini provider");

    let key = provider.headers().get("x-goog-api-key").expect("api key");
    assert_eq!(key.to_str().unwrap(), "test-key");
    let ct = provider
        .headers()
        .get("content-type")
        .expect("content-type");
    assert_eq!(ct.to_str().unwrap(), "application/json");
}

#[test]
fn api_endpoints() {
    let provider = Gemini::api(reqwest::Client::new(), "k").expect("gemini provider");
    assert_eq!(
        provider.endpoint("gemini-1.5-flash-latest", false),
        format!("{BASE_URL}/models/gemini-1.5-flash-latest:generateContent")
    );
    assert_eq!(
        provider.endpoint("gemini-1.5-flash-latest", true),
        format!("{BASE_URL}/models/gemini-1.5-flash-latest:streamGenerateContent?alt=sse")
    );
}

#[test]
fn custom_base_trims_trailing_slash() {
    let provider = Gemini::custom(reqwest::Client::new(), "k", "http://localhost:8080/v1/")
        .expect("gemini provider");
    assert_eq!(
        provider.endpoint("m", false),
        "http://localhost:8080/v1/models/m:generateContent"
    );
}

#[test]
fn invalid_key_is_rejected() {
    assert!(Gemini::api(reqwest::Client::new(), "bad\nkey").is_err());
}

mod http {
    //! Model calls against a local HTTP server.

    use futures_util::StreamExt;
    use pcore::{Content, Model, Request};
    use pisces_gemini::Gemini;
    use std::time::Duration;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::{TcpListener, TcpStream},
        task::JoinHandle,
    };

    const SSE: &str = "text/event-stream";
    const JSON: &str = "application/json";

    /// Serve one request, answering with `chunks` as separate HTTP chunks.
    ///
    /// Returns the base URL and a handle yielding the raw request.
    async fn serve(
        status: &'static str,
        content_type: &'static str,
        chunks: Vec<Vec<u8>>,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let head = format!(
                "HTTP/1.1 {status}\r\ncontent-type: {content_type}\r\n\
                 transfer-encoding: chunked\r\nconnection: close\r\n\r\n"
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            for chunk in chunks {
                socket
                    .write_all(format!("{:x}\r\n", chunk.len()).as_bytes())
                    .await
                    .unwrap();
                socket.write_all(&chunk).await.unwrap();
                socket.write_all(b"\r\n").await.unwrap();
                socket.flush().await.unwrap();
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
            socket.write_all(b"0\r\n\r\n").await.unwrap();
            socket.flush().await.unwrap();
            request
        });
        (format!("http://{addr}/v1"), handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut read = [0u8; 4096];
        let head_end = loop {
            let n = socket.read(&mut read).await.unwrap();
            assert!(n > 0, "connection closed before request head");
            buf.extend_from_slice(&read[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
        let length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        while buf.len() < head_end + length {
            let n = socket.read(&mut read).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&read[..n]);
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn event(text: &str) -> Vec<u8> {
        format!(
            "data: {{\"candidates\": [{{\"content\": {{\"parts\": [{{\"text\": {}}}], \"role\": \"model\"}}}}]}}\n\n",
            serde_json::to_string(text).unwrap()
        )
        .into_bytes()
    }

    fn client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    fn request() -> Request {
        Request::new("m")
            .with_content(Content::user("hi"))
            .with_temperature(0.7)
    }

    async fn stream_texts(provider: &Gemini) -> Vec<Result<String, String>> {
        provider
            .stream(request())
            .map(|item| {
                item.map(|chunk| chunk.text().unwrap_or_default())
                    .map_err(|e| e.to_string())
            })
            .collect()
            .await
    }

    #[tokio::test]
    async fn send_returns_first_candidate() {
        let body = br#"{
            "candidates": [{"content": {"parts": [{"text": "Hello!"}], "role": "model"}, "finishReason": "STOP"}],
            "usageMetadata": {"promptTokenCount": 2, "candidatesTokenCount": 3, "totalTokenCount": 5}
        }"#;
        let (base, server) = serve("200 OK", JSON, vec![body.to_vec()]).await;
        let provider = Gemini::custom(client(), "test-key", &base).unwrap();

        let response = provider.send(&request()).await.unwrap();
        assert_eq!(response.text().as_deref(), Some("Hello!"));
        assert_eq!(response.usage.unwrap().total_tokens, 5);

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /v1/models/m:generateContent HTTP/1.1"));
        assert!(raw.to_lowercase().contains("x-goog-api-key: test-key"));
        assert!(raw.contains(r#""generationConfig":{"temperature":0.7}"#));
    }

    #[tokio::test]
    async fn send_surfaces_error_message() {
        let body = br#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        let (base, _server) = serve("400 Bad Request", JSON, vec![body.to_vec()]).await;
        let provider = Gemini::custom(client(), "k", &base).unwrap();

        let err = provider.send(&request()).await.unwrap_err();
        assert_eq!(err.to_string(), "API key not valid.");
    }

    #[tokio::test]
    async fn send_reports_status_without_error_body() {
        let (base, _server) = serve(
            "503 Service Unavailable",
            "text/plain",
            vec![b"overloaded".to_vec()],
        )
        .await;
        let provider = Gemini::custom(client(), "k", &base).unwrap();

        let err = provider.send(&request()).await.unwrap_err().to_string();
        assert!(err.contains("503"), "{err}");
        assert!(err.contains("overloaded"), "{err}");
    }

    #[tokio::test]
    async fn stream_yields_each_event() {
        let (base, server) = serve(
            "200 OK",
            SSE,
            vec![event("Why"), event(" did..."), event(" chicken?")],
        )
        .await;
        let provider = Gemini::custom(client(), "k", &base).unwrap();

        let texts = stream_texts(&provider).await;
        assert_eq!(
            texts,
            vec![
                Ok("Why".to_owned()),
                Ok(" did...".to_owned()),
                Ok(" chicken?".to_owned()),
            ]
        );
        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /v1/models/m:streamGenerateContent?alt=sse HTTP/1.1"));
    }

    #[tokio::test]
    async fn stream_keeps_multibyte_text_split_across_reads() {
        let body = event("café");
        let split = body.iter().position(|&byte| byte == 0xc3).unwrap() + 1;
        let (base, _server) = serve(
            "200 OK",
            SSE,
            vec![body[..split].to_vec(), body[split..].to_vec()],
        )
        .await;
        let provider = Gemini::custom(client(), "k", &base).unwrap();

        let texts = stream_texts(&provider).await;
        assert_eq!(texts, vec![Ok("café".to_owned())]);
    }

    #[tokio::test]
    async fn stream_parses_final_block_without_blank_line() {
        let mut last = event("end");
        last.truncate(last.len() - 2);
        let (base, _server) = serve("200 OK", SSE, vec![event("start "), last]).await;
        let provider = Gemini::custom(client(), "k", &base).unwrap();

        let texts = stream_texts(&provider).await;
        assert_eq!(texts, vec![Ok("start ".to_owned()), Ok("end".to_owned())]);
    }

    #[tokio::test]
    async fn stream_ends_on_in_band_error() {
        let error = b"data: {\"error\": {\"code\": 429, \"message\": \"quota exceeded\"}}\n\n".to_vec();
        let (base, _server) =
            serve("200 OK", SSE, vec![event("partial"), error, event("never")]).await;
        let provider = Gemini::custom(client(), "k", &base).unwrap();

        let texts = stream_texts(&provider).await;
        assert_eq!(
            texts,
            vec![Ok("partial".to_owned()), Err("quota exceeded".to_owned())]
        );
    }

    #[tokio::test]
    async fn stream_fails_on_error_status() {
        let body = br#"{"error": {"code": 429, "message": "Resource has been exhausted"}}"#;
        let (base, _server) = serve("429 Too Many Requests", JSON, vec![body.to_vec()]).await;
        let provider = Gemini::custom(client(), "k", &base).unwrap();

        let texts = stream_texts(&provider).await;
        assert_eq!(texts, vec![Err("Resource has been exhausted".to_owned())]);
    }
}
