use reqwest::{header, Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Pinned Klaviyo REST API revision, sent with every request.
pub const KLAVIYO_API_REVISION: &str = "2024-06-15";

const DUPLICATE_PROFILE_CODE: &str = "duplicate_profile";

#[derive(Debug)]
pub struct KlaviyoClient {
    pub http_client: Client,
    pub url: reqwest::Url,
    api_key: SecretString,
}

/// Outcome of a profile-create call, decoded once at the network boundary.
/// Klaviyo reports an already-existing profile as an error entry carrying the
/// existing id in its metadata, so that case is a resolution, not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileOutcome {
    Created(String),
    Duplicate(String),
    Unresolved,
}

/// Submission fields forwarded to Klaviyo. Values are passed through with
/// whatever JSON type the caller submitted, never coerced or validated.
#[derive(Debug)]
pub struct ProfileAttributes<'a> {
    pub email: &'a Value,
    pub first_name: &'a Value,
    pub zipcode: &'a Value,
    pub birthday: &'a Value,
}

impl KlaviyoClient {
    // TODO: outbound calls carry no timeout, so a hung Klaviyo call blocks its
    // request indefinitely.
    pub fn new<S: AsRef<str>>(url: S, api_key: SecretString) -> Result<Self> {
        let url =
            reqwest::Url::parse(url.as_ref()).map_err(|e| Error::UrlParsing(e.to_string()))?;

        let http_client = Client::builder().build()?;

        Ok(KlaviyoClient {
            http_client,
            url,
            api_key,
        })
    }

    /// Creates a profile from the submitted fields, or resolves the id of an
    /// already-existing one from the `duplicate_profile` error metadata.
    pub async fn create_profile(&self, profile: &ProfileAttributes<'_>) -> Result<ProfileOutcome> {
        let url = self
            .url
            .join("api/profiles/")
            .map_err(|e| Error::UrlParsing(e.to_string()))?;

        let body = ProfileCreateBody {
            data: ProfileCreateData {
                kind: "profile",
                attributes: WireAttributes {
                    email: profile.email,
                    first_name: profile.first_name,
                    location: WireLocation {
                        zip: profile.zipcode,
                    },
                    properties: WireProperties {
                        zipcode: profile.zipcode,
                        birthday: profile.birthday,
                    },
                },
            },
        };

        // The duplicate case arrives on a non-2xx status, so the body gets
        // decoded regardless of what the status line says.
        let resp: ProfileResponse = self.post(url).json(&body).send().await?.json().await?;

        let outcome = match resp {
            // A success body can arrive without an id; that resolves nothing.
            ProfileResponse::Success { data } => data
                .id
                .map(ProfileOutcome::Created)
                .unwrap_or(ProfileOutcome::Unresolved),
            ProfileResponse::Failure { errors } => errors
                .into_iter()
                .find(|er| er.code == DUPLICATE_PROFILE_CODE)
                .and_then(|er| er.meta.duplicate_profile_id)
                .map(ProfileOutcome::Duplicate)
                .unwrap_or(ProfileOutcome::Unresolved),
        };

        Ok(outcome)
    }

    /// Attaches a resolved profile to one of the configured mailing lists.
    pub async fn add_profile_to_list(&self, list_id: &str, profile_id: &str) -> Result<()> {
        let url = self
            .url
            .join(&format!("api/lists/{list_id}/relationships/profiles/"))
            .map_err(|e| Error::UrlParsing(e.to_string()))?;

        let body = ListRelationshipBody {
            data: [ProfileRef {
                kind: "profile",
                id: profile_id,
            }],
        };

        let resp = self.post(url).json(&body).send().await?;

        // Klaviyo normally answers this endpoint with 204 no-content; it is
        // checked explicitly alongside the generic success range.
        let status = resp.status();
        if status.is_success() || status == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            Err(Error::ListRejected(status))
        }
    }

    fn post(&self, url: reqwest::Url) -> reqwest::RequestBuilder {
        self.http_client
            .post(url)
            .header(header::ACCEPT, "application/json")
            .header("revision", KLAVIYO_API_REVISION)
            .header(
                header::AUTHORIZATION,
                format!("Klaviyo-API-Key {}", self.api_key.expose_secret()),
            )
    }
}

// ###################################
// ->   WIRE TYPES
// ###################################

#[derive(Serialize)]
struct ProfileCreateBody<'a> {
    data: ProfileCreateData<'a>,
}

#[derive(Serialize)]
struct ProfileCreateData<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    attributes: WireAttributes<'a>,
}

#[derive(Serialize)]
struct WireAttributes<'a> {
    email: &'a Value,
    first_name: &'a Value,
    location: WireLocation<'a>,
    properties: WireProperties<'a>,
}

#[derive(Serialize)]
struct WireLocation<'a> {
    zip: &'a Value,
}

// The zip travels twice: once as the location zip, once as a custom property,
// next to the birthday.
#[derive(Serialize)]
struct WireProperties<'a> {
    zipcode: &'a Value,
    birthday: &'a Value,
}

#[derive(Serialize)]
struct ListRelationshipBody<'a> {
    data: [ProfileRef<'a>; 1],
}

#[derive(Serialize)]
struct ProfileRef<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    id: &'a str,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProfileResponse {
    Success { data: ProfileResponseData },
    Failure { errors: Vec<ProfileResponseError> },
}

#[derive(Deserialize)]
struct ProfileResponseData {
    id: Option<String>,
}

#[derive(Deserialize)]
struct ProfileResponseError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    meta: ProfileResponseErrorMeta,
}

#[derive(Deserialize, Default)]
struct ProfileResponseErrorMeta {
    duplicate_profile_id: Option<String>,
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("url parsing error: {0}")]
    UrlParsing(String),
    #[error("klaviyo rejected the list relationship request: {0}")]
    ListRejected(StatusCode),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
