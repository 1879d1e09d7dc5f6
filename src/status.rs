use serde::{Deserialize, Deserializer};

#[derive(Deserialize, PartialEq, Debug)]
pub struct StatusResponse {
    #[serde(default)]
    pub cutoff: Option<u64>,
    #[serde(default)]
    pub last_check: Option<String>,
    #[serde(default)]
    pub num_checks: Option<u64>,
    #[serde(default)]
    pub check_frequency: Option<u64>,
    #[serde(default)]
    pub version: Option<u32>,
    pub urls: Vec<RemoteRecord>,
}

/// One mirror url as reported by the status endpoint.
#[derive(Deserialize, PartialEq, Debug, Clone, Default)]
pub struct RemoteRecord {
    pub url: String,
    pub protocol: Option<String>,
    pub last_sync: Option<String>,
    /// Never-checked mirrors report `null`; those count as 0.
    #[serde(deserialize_with = "null_as_zero")]
    pub completion_pct: f64,
    pub delay: Option<i64>,
    pub duration_avg: Option<f64>,
    pub duration_stddev: Option<f64>,
    pub score: Option<f64>,
    pub active: Option<bool>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub isos: Option<bool>,
    pub ipv4: Option<bool>,
    pub ipv6: Option<bool>,
    pub details: Option<String>,
}

impl RemoteRecord {
    pub fn is_complete(&self) -> bool {
        self.completion_pct == 1.0
    }
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

#[test]
fn missing_completion_is_an_error() {
    assert!(serde_json::from_str::<RemoteRecord>(r#"{"url": "http://a.example.org/"}"#).is_err());
    let record =
        serde_json::from_str::<RemoteRecord>(r#"{"url": "http://a/", "completion_pct": null}"#)
            .unwrap();
    assert_eq!(record.completion_pct, 0.0);
}

#[test]
fn test() {
    let json = serde_json::from_str::<StatusResponse>(
        r#"
{
  "cutoff": 86400,
  "last_check": "2026-10-19T08:21:04.118Z",
  "num_checks": 97,
  "check_frequency": 895,
  "urls": [
    {
      "url": "https://a.example.org/archlinux/",
      "protocol": "https",
      "last_sync": "2026-10-19T07:41:12Z",
      "completion_pct": 1.0,
      "delay": 2745,
      "duration_avg": 0.35,
      "duration_stddev": 0.12,
      "score": 1.23,
      "active": true,
      "country": "Germany",
      "country_code": "DE",
      "isos": true,
      "ipv4": true,
      "ipv6": false,
      "details": "https://archlinux.org/mirrors/a.example.org/1/"
    },
    {
      "url": "rsync://b.example.org/archlinux/",
      "protocol": "rsync",
      "last_sync": null,
      "completion_pct": 0.4,
      "delay": null,
      "duration_avg": null,
      "duration_stddev": null,
      "score": null,
      "some_new_field": 3
    }
  ],
  "version": 3
}
"#,
    )
    .unwrap();
    assert_eq!(json.num_checks, Some(97));
    assert_eq!(json.version, Some(3));
    assert_eq!(
        json.urls,
        vec![
            RemoteRecord {
                url: "https://a.example.org/archlinux/".to_string(),
                protocol: Some("https".to_string()),
                last_sync: Some("2026-10-19T07:41:12Z".to_string()),
                completion_pct: 1.0,
                delay: Some(2745),
                duration_avg: Some(0.35),
                duration_stddev: Some(0.12),
                score: Some(1.23),
                active: Some(true),
                country: Some("Germany".to_string()),
                country_code: Some("DE".to_string()),
                isos: Some(true),
                ipv4: Some(true),
                ipv6: Some(false),
                details: Some("https://archlinux.org/mirrors/a.example.org/1/".to_string()),
            },
            RemoteRecord {
                url: "rsync://b.example.org/archlinux/".to_string(),
                protocol: Some("rsync".to_string()),
                completion_pct: 0.4,
                ..RemoteRecord::default()
            }
        ]
    );
    assert!(json.urls[0].is_complete());
    assert!(!json.urls[1].is_complete());
}
