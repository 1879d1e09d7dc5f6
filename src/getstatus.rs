use reqwest::blocking::Client;
use reqwest::{Method, header};
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::status::StatusResponse;

const USER_AGENT: &str = concat!("mlsort/", env!("CARGO_PKG_VERSION"));

/// One blocking GET against the status endpoint. Any failure ends the run.
pub fn request(config: &Config) -> Result<StatusResponse> {
    let url = config.status_url.as_str();
    debug!("Fetching mirror statistics from {url}");
    let client = Client::builder()
        .timeout(config.timeout())
        .build()
        .map_err(|e| Error::network(url, e))?;
    let body = client
        .request(Method::GET, url)
        .header(header::USER_AGENT, USER_AGENT)
        .header(header::ACCEPT, "application/json")
        .send()
        .and_then(|resp| resp.error_for_status())
        .and_then(|resp| resp.text())
        .map_err(|e| Error::network(url, e))?;
    decode(url, &body)
}

pub fn decode(url: &str, body: &str) -> Result<StatusResponse> {
    let status = serde_json::from_str::<StatusResponse>(body)
        .map_err(|e| Error::network(url, format!("malformed status document: {e}")))?;
    debug!(
        "{} mirror urls reported, last check {} ({} checks, every {}s, cutoff {}s, version {})",
        status.urls.len(),
        status.last_check.as_deref().unwrap_or("unknown"),
        status.num_checks.unwrap_or_default(),
        status.check_frequency.unwrap_or_default(),
        status.cutoff.unwrap_or_default(),
        status.version.unwrap_or_default(),
    );
    Ok(status)
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    /// Serves exactly one canned response and returns its base url.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}/mirrors/status/json/")
    }

    fn config_for(url: String) -> Config {
        Config {
            status_url: url,
            timeout_secs: 5,
            ..Config::default()
        }
    }

    #[test]
    fn fetches_and_decodes() {
        let url = serve_once(
            "200 OK",
            r#"{"urls": [{"url": "http://a.example.org/", "completion_pct": 1.0, "score": 2.5}]}"#,
        );
        let status = request(&config_for(url)).unwrap();
        assert_eq!(status.urls.len(), 1);
        assert_eq!(status.urls[0].score, Some(2.5));
    }

    #[test]
    fn server_error_is_a_network_error() {
        let url = serve_once("503 Service Unavailable", "{}");
        assert!(matches!(
            request(&config_for(url)),
            Err(Error::Network { .. })
        ));
    }

    #[test]
    fn malformed_body_is_a_network_error() {
        let url = serve_once("200 OK", "<html>not json</html>");
        assert!(matches!(
            request(&config_for(url)),
            Err(Error::Network { .. })
        ));
    }

    #[test]
    fn connection_refused_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        assert!(matches!(
            request(&config_for(format!("http://{addr}/"))),
            Err(Error::Network { .. })
        ));
    }

    #[test]
    fn missing_urls_array() {
        assert!(decode("http://x/", r#"{"version": 3}"#).is_err());
    }
}
