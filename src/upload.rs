//! Upload of the yearly payload to the analytics endpoint

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ureq::Agent;

use crate::config::Endpoints;
use crate::history::YearData;

/// Request body
#[derive(Debug, Clone, Serialize)]
pub struct UploadPayload {
    pub data: Vec<YearData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

/// Successful response body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub id: String,
    pub access_token: String,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("failed to encode upload payload: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to reach {url}: {source}")]
    Transport { url: String, source: ureq::Error },
    #[error("upload rejected with HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected upload response: {0}")]
    InvalidResponse(String),
}

/// POST the payload once and parse the response
///
/// There is no retry: any failure is returned to the caller.
pub fn upload(endpoints: &Endpoints, payload: &UploadPayload) -> Result<UploadResponse, UploadError> {
    let url = endpoints.api_url.as_str();
    let body = serde_json::to_string(payload)?;
    let transport = |source| UploadError::Transport {
        url: url.to_string(),
        source,
    };

    log::info!(
        "Uploading {} year(s) of changes to {}",
        payload.data.len(),
        url
    );

    // Non-2xx responses are handled below so their body can be reported
    let config = Agent::config_builder().http_status_as_error(false).build();
    let agent = Agent::new_with_config(config);

    let mut response = agent
        .post(url)
        .header("Content-Type", "application/json")
        .header("Accept", "application/json")
        .send(body.as_str())
        .map_err(transport)?;

    let status = response.status();
    let text = response
        .body_mut()
        .read_to_string()
        .map_err(transport)?;

    if !status.is_success() {
        return Err(UploadError::Status {
            status: status.as_u16(),
            body: text.trim().to_string(),
        });
    }

    serde_json::from_str(&text).map_err(|e| UploadError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::Change;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Serve one canned HTTP response; the thread yields the request body
    fn serve_once(status_line: &str, body: &str) -> (Endpoints, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);

            let mut content_length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
            }

            let mut request_body = vec![0; content_length];
            reader.read_exact(&mut request_body).unwrap();

            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            String::from_utf8(request_body).unwrap()
        });

        let endpoints = Endpoints::with_site(&format!("http://{}/", addr)).unwrap();
        (endpoints, handle)
    }

    fn payload(github: Option<&str>) -> UploadPayload {
        UploadPayload {
            data: vec![YearData {
                year: 2024,
                changes: vec![Change {
                    file: "/home/u/main.rs".to_string(),
                    timestamp: 1_705_000_000_000,
                }],
            }],
            github: github.map(str::to_string),
        }
    }

    #[test]
    fn test_payload_omits_missing_github() {
        let json = serde_json::to_value(payload(None)).unwrap();
        assert!(json.get("github").is_none());
        assert_eq!(json["data"][0]["year"], 2024);
        assert_eq!(json["data"][0]["changes"][0]["file"], "/home/u/main.rs");

        let json = serde_json::to_value(payload(Some("octocat"))).unwrap();
        assert_eq!(json["github"], "octocat");
    }

    #[test]
    fn test_upload_success() {
        let (endpoints, server) =
            serve_once("200 OK", r#"{"id":"abc123","accessToken":"secret"}"#);

        let response = upload(&endpoints, &payload(Some("octocat"))).unwrap();
        assert_eq!(
            response,
            UploadResponse {
                id: "abc123".to_string(),
                access_token: "secret".to_string(),
            }
        );

        let sent: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
        assert_eq!(sent["github"], "octocat");
        assert_eq!(sent["data"][0]["changes"][0]["timestamp"], 1_705_000_000_000i64);
    }

    #[test]
    fn test_upload_non_2xx_is_error() {
        let (endpoints, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#);

        let err = upload(&endpoints, &payload(None)).unwrap_err();
        match &err {
            UploadError::Status { status, body } => {
                assert_eq!(*status, 500);
                assert!(body.contains("boom"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
        assert!(err.to_string().contains("HTTP 500"));
        server.join().unwrap();
    }

    #[test]
    fn test_upload_unparsable_response() {
        let (endpoints, server) = serve_once("200 OK", "<html>not json</html>");

        let err = upload(&endpoints, &payload(None)).unwrap_err();
        assert!(matches!(err, UploadError::InvalidResponse(_)));
        server.join().unwrap();
    }

    #[test]
    fn test_upload_missing_fields() {
        let (endpoints, server) = serve_once("201 Created", r#"{"id":"abc123"}"#);

        let err = upload(&endpoints, &payload(None)).unwrap_err();
        assert!(matches!(err, UploadError::InvalidResponse(_)));
        server.join().unwrap();
    }
}
