use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Grouping request as it travels over the wire.
///
/// The mode fields are signed so that `0` or negative values reach the
/// validation gate and produce a proper message instead of a decode error.
/// Integers beyond `i64::MAX` saturate, which the gate then reports as out
/// of bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingRequest {
    pub participants: Vec<String>,
    #[serde(
        default,
        deserialize_with = "saturating_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub group_size: Option<i64>,
    #[serde(
        default,
        deserialize_with = "saturating_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub num_groups: Option<i64>,
}

fn saturating_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<serde_json::Number>::deserialize(deserializer)?
        .map(|number| {
            number
                .as_i64()
                .or_else(|| number.as_u64().map(|_| i64::MAX))
                .ok_or_else(|| {
                    D::Error::custom(format!("invalid value: {number}, expected an integer"))
                })
        })
        .transpose()
}

impl GroupingRequest {
    pub fn by_size(participants: Vec<String>, group_size: i64) -> Self {
        Self {
            participants,
            group_size: Some(group_size),
            num_groups: None,
        }
    }

    pub fn by_count(participants: Vec<String>, num_groups: i64) -> Self {
        Self {
            participants,
            group_size: None,
            num_groups: Some(num_groups),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum GroupingMode {
    /// At most this many members per group; the last group may be short.
    #[serde(rename = "size")]
    BySize(usize),
    /// Exactly this many groups, sizes differing by at most one.
    #[serde(rename = "count")]
    ByCount(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRequest {
    pub participants: Vec<String>,
    pub mode: GroupingMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingResult {
    pub groups: Vec<Vec<String>>,
}

impl GroupingResult {
    pub fn total_members(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub message: String,
}

impl ErrorEnvelope {
    pub const VALIDATION: &'static str = "validation_error";
    pub const INVALID_REQUEST: &'static str = "invalid_request";
    pub const NETWORK: &'static str = "network_error";
    pub const INTERNAL: &'static str = "internal_error";
    pub const UPSTREAM: &'static str = "upstream_error";
    pub const PAYLOAD_TOO_LARGE: &'static str = "payload_too_large";

    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(Self::VALIDATION, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(Self::INVALID_REQUEST, message)
    }

    pub fn network() -> Self {
        Self::new(Self::NETWORK, "failed to reach shuffle service")
    }

    pub fn internal() -> Self {
        Self::new(Self::INTERNAL, "unexpected error")
    }

    pub fn payload_too_large(limit: usize) -> Self {
        Self::new(
            Self::PAYLOAD_TOO_LARGE,
            format!("request body exceeds {limit} bytes"),
        )
    }

    /// Reads an error body from the compute service. Missing fields (or a
    /// body that is not JSON at all) fall back to a generic tag and message.
    pub fn from_upstream_body(body: &[u8]) -> Self {
        #[derive(Deserialize)]
        struct Partial {
            error: Option<String>,
            message: Option<String>,
        }

        let partial = serde_json::from_slice::<Partial>(body).ok();
        let (error, message) = match partial {
            Some(p) => (p.error, p.message.filter(|m| !m.is_empty())),
            None => (None, None),
        };

        Self::new(
            error.unwrap_or_else(|| Self::UPSTREAM.to_string()),
            message.unwrap_or_else(|| "shuffle failed".to_string()),
        )
    }
}

/// Body of a 503 from the restaurant routes. Carries only a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailableBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    pub genre: Option<String>,
    #[serde(rename = "imageUrl", alias = "image_url")]
    pub image_url: Option<String>,
    pub rating: Option<f64>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantList {
    pub restaurants: Vec<Restaurant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreList {
    pub genres: Vec<String>,
}

/// Trims every name and drops the ones that end up empty.
pub fn normalize_participants<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| {
            let trimmed = name.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect()
}

/// Parses the one-name-per-line text form into normalized participants.
pub fn parse_participants(raw: &str) -> Vec<String> {
    normalize_participants(raw.lines())
}
