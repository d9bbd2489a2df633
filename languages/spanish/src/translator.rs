use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tr_core::preprocess::{DefaultPreprocessor, Preprocessor};
use tr_translator::{LanguageCode, TranslateError, Translation, Translator, looks_like_verb};

/// Spanish ↔ English through the free MyMemory API
#[derive(Clone)]
pub struct MyMemoryTranslator {
    client: reqwest::Client,
    api_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponse {
    response_data: ResponseData,
    response_status: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    translated_text: String,
}

impl MyMemoryTranslator {
    pub fn new(api_url: String, timeout: Duration) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_url })
    }
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        let text = DefaultPreprocessor.process(text);
        if text.is_empty() {
            return Err(TranslateError::EmptyInput);
        }

        if !self
            .supported_languages()
            .iter()
            .any(|(f, t)| *f == from && *t == to)
        {
            return Err(TranslateError::UnsupportedLanguagePair { from, to });
        }

        let langpair = format!("{from}|{to}");
        let params = [("q", text.as_str()), ("langpair", langpair.as_str())];

        let response = self
            .client
            .get(&self.api_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslateError::Timeout
                } else {
                    TranslateError::NetworkError(e)
                }
            })?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let parsed = parse_response(&body)?;

        Ok(Translation {
            is_verb: looks_like_verb(&text, &from),
            original: text,
            text: parsed,
            from,
            to,
            provider: "mymemory".to_string(),
        })
    }

    fn supported_languages(&self) -> Vec<(LanguageCode, LanguageCode)> {
        vec![
            ("es".to_string(), "en".to_string()),
            ("en".to_string(), "es".to_string()),
        ]
    }
}

/// Translated text out of a MyMemory body. `responseStatus` arrives as a
/// number or a string depending on the error path.
fn parse_response(body: &str) -> Result<String, TranslateError> {
    let response: MyMemoryResponse =
        serde_json::from_str(body).map_err(|e| TranslateError::ParseError(e.to_string()))?;

    let status = match &response.response_status {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    };

    match status {
        Some(200) => Ok(response.response_data.translated_text),
        Some(429) => Err(TranslateError::RateLimitExceeded),
        other => Err(TranslateError::ApiError(format!(
            "translation failed with status {}: {}",
            other.map(|s| s.to_string()).unwrap_or_else(|| "unknown".to_string()),
            response.response_data.translated_text
        ))),
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    use super::*;

    async fn serve_json(status: &str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let _ = tx.send(request.lines().next().unwrap_or_default().to_string());
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        (format!("http://{addr}/get"), rx)
    }

    #[test]
    fn parses_successful_body() {
        let body = r#"{"responseData":{"translatedText":"to walk","match":1},"responseStatus":200}"#;
        assert_eq!(parse_response(body).unwrap(), "to walk");
    }

    #[test]
    fn api_level_failure_is_an_error() {
        let body = r#"{"responseData":{"translatedText":"INVALID LANGUAGE PAIR"},"responseStatus":"403"}"#;
        let err = parse_response(body).unwrap_err();
        assert!(matches!(err, TranslateError::ApiError(msg) if msg.contains("403")));
    }

    #[test]
    fn malformed_body_is_a_parse_error() {
        assert!(matches!(
            parse_response("<html>oops</html>"),
            Err(TranslateError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn blank_input_is_rejected_before_any_request() {
        // unroutable url: any request attempt would fail differently
        let translator =
            MyMemoryTranslator::new("http://127.0.0.1:9/get".to_string(), Duration::from_secs(1))
                .unwrap();
        let err = translator
            .translate("   ", "es".to_string(), "en".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::EmptyInput));
    }

    #[tokio::test]
    async fn unsupported_pair_is_rejected() {
        let translator =
            MyMemoryTranslator::new("http://127.0.0.1:9/get".to_string(), Duration::from_secs(1))
                .unwrap();
        let err = translator
            .translate("hola", "es".to_string(), "fr".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::UnsupportedLanguagePair { .. }));
    }

    #[tokio::test]
    async fn translates_through_the_api() {
        let (url, request) = serve_json(
            "200 OK",
            r#"{"responseData":{"translatedText":"to walk"},"responseStatus":200}"#,
        )
        .await;
        let translator = MyMemoryTranslator::new(url, Duration::from_secs(5)).unwrap();

        let translation = translator
            .translate("  caminar ", "es".to_string(), "en".to_string())
            .await
            .unwrap();

        assert_eq!(translation.text, "to walk");
        assert_eq!(translation.original, "caminar");
        assert!(translation.is_verb);
        assert_eq!(
            request.await.unwrap(),
            "GET /get?q=caminar&langpair=es%7Cen HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn http_failure_is_an_api_error() {
        let (url, _) = serve_json("500 Internal Server Error", "{}").await;
        let translator = MyMemoryTranslator::new(url, Duration::from_secs(5)).unwrap();

        let err = translator
            .translate("the cat", "en".to_string(), "es".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::ApiError(_)));
    }
}
