use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The object the model is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeddingInfo {
    pub thumbnail: String,
    pub groom: String,
    pub bride: String,
    /// ISO-8601 local date-time, no timezone.
    pub datetime: String,
    pub location: String,
}

impl WeddingInfo {
    /// Canned answer served by the sample endpoint.
    pub fn sample() -> Self {
        Self {
            thumbnail: "https://lh3.googleusercontent.com/0R0eXLYFAdshrgHOqXSujoVHcD7z76dBJJzpci2DLJ8cZxUtTWnYuNrFDGX8LNC8VVrpRLoCEf0_RVT4BTpBeY5GgoaRg6OHeP4ZfeWlYA=s1200".to_string(),
            groom: "차땡땡".to_string(),
            bride: "한땡땡".to_string(),
            datetime: "2025-04-11T11:00:00".to_string(),
            location: "JK아트컨벤션 4층 아트리움홀, 서울 영등포구 문래동3가 55-16".to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Invalid request body. Expected JSON object.")]
    NotAnObject,

    #[error("Invalid 'link' format. Expected a link starting with http or https.\n{0}")]
    InvalidLink(String),
}

/// Body of the extraction endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseVoucherRequest {
    pub link: String,
}

impl ParseVoucherRequest {
    /// Parse and validate a raw request body.
    pub fn from_body(body: &[u8]) -> Result<Self, RequestError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| RequestError::NotAnObject)?;
        let Value::Object(mut object) = value else {
            return Err(RequestError::NotAnObject);
        };

        match object.remove("link") {
            Some(Value::String(link)) if link.starts_with("http") => Ok(Self { link }),
            Some(Value::String(link)) => Err(RequestError::InvalidLink(link)),
            Some(other) => Err(RequestError::InvalidLink(other.to_string())),
            None => Err(RequestError::InvalidLink(Value::Null.to_string())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let request =
            ParseVoucherRequest::from_body(br#"{"link": "https://toourguest.com/cards/abc"}"#)
                .unwrap();
        assert_eq!(request.link, "https://toourguest.com/cards/abc");
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let request =
            ParseVoucherRequest::from_body(br#"{"link": "http://a.b", "lang": "ko"}"#).unwrap();
        assert_eq!(request.link, "http://a.b");
    }

    #[test]
    fn test_non_json_body() {
        assert_eq!(
            ParseVoucherRequest::from_body(b"link=https://a.b"),
            Err(RequestError::NotAnObject)
        );
        assert_eq!(
            ParseVoucherRequest::from_body(b""),
            Err(RequestError::NotAnObject)
        );
    }

    #[test]
    fn test_json_that_is_not_an_object() {
        assert_eq!(
            ParseVoucherRequest::from_body(br#"["https://a.b"]"#),
            Err(RequestError::NotAnObject)
        );
        assert_eq!(
            ParseVoucherRequest::from_body(br#""https://a.b""#),
            Err(RequestError::NotAnObject)
        );
    }

    #[test]
    fn test_bad_link_is_echoed() {
        let err = ParseVoucherRequest::from_body(br#"{"link": "ftp://x"}"#).unwrap_err();
        assert_eq!(err, RequestError::InvalidLink("ftp://x".to_string()));
        assert!(err.to_string().ends_with("\nftp://x"));
    }

    #[test]
    fn test_missing_or_non_string_link() {
        assert_eq!(
            ParseVoucherRequest::from_body(b"{}"),
            Err(RequestError::InvalidLink("null".to_string()))
        );
        assert_eq!(
            ParseVoucherRequest::from_body(br#"{"link": 42}"#),
            Err(RequestError::InvalidLink("42".to_string()))
        );
    }

    #[test]
    fn test_error_response_omits_missing_note() {
        let body = serde_json::to_string(&ErrorResponse {
            error: "boom".to_string(),
            note: None,
        })
        .unwrap();
        assert_eq!(body, r#"{"error":"boom"}"#);
    }

    #[test]
    fn test_sample_matches_schema() {
        let value = serde_json::to_value(WeddingInfo::sample()).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, ["bride", "datetime", "groom", "location", "thumbnail"]);
    }
}
