//! Firestore REST document store.
//!
//! Every write goes through `documents:commit` so that each call is one
//! atomic request. Membership uses a server-side `appendMissingElements`
//! transform (array union); archives use an `exists: false` precondition.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::daily_content::date_key;
use crate::domain::{AppError, DailyContent, FirestoreConfig, GroupIdentity, UserId};
use crate::ports::{ArchiveWrite, ContentStore, MembershipStore};

const ACCESS_TOKEN_ENV: &str = "FIRESTORE_ACCESS_TOKEN";

#[derive(Clone)]
pub struct FirestoreStore {
    /// `projects/{project}/databases/{database}/documents`
    documents_root: String,
    api_base: String,
    daily_document: String,
    archive_collection: String,
    groups_collection: String,
    access_token: Option<String>,
    client: Client,
}

impl std::fmt::Debug for FirestoreStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreStore")
            .field("api_base", &self.api_base)
            .field("documents_root", &self.documents_root)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl FirestoreStore {
    pub fn new(config: &FirestoreConfig, access_token: Option<String>) -> Result<Self, AppError> {
        let project_id = config.require_project_id()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            documents_root: format!("projects/{}/databases/{}/documents", project_id, config.database),
            api_base: config.api_url.as_str().trim_end_matches('/').to_string(),
            daily_document: config.daily_document.clone(),
            archive_collection: config.archive_collection.clone(),
            groups_collection: config.groups_collection.clone(),
            access_token,
            client,
        })
    }

    /// Create with the optional bearer token from `FIRESTORE_ACCESS_TOKEN`.
    pub fn from_env_with_config(config: &FirestoreConfig) -> Result<Self, AppError> {
        let token = std::env::var(ACCESS_TOKEN_ENV).ok().filter(|t| !t.trim().is_empty());
        Self::new(config, token)
    }

    fn document_name(&self, path: &str) -> String {
        format!("{}/{}", self.documents_root, path)
    }

    fn url(&self, suffix: &str) -> Result<Url, AppError> {
        Url::parse(&format!("{}/{}", self.api_base, suffix))
            .map_err(|e| AppError::InvalidConfig(format!("Invalid Firestore URL: {}", e)))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn commit(&self, writes: Vec<Value>) -> Result<(), AppError> {
        let url = self.url(&format!("{}:commit", self.documents_root))?;
        let request = self.authorize(self.client.post(url)).json(&json!({ "writes": writes }));
        let response = request.send().map_err(transport_error)?;
        check_status(response).map(|_| ())
    }

    fn get_document(&self, path: &str) -> Result<Option<Document>, AppError> {
        let url = self.url(&self.document_name(path))?;
        let response = self.authorize(self.client.get(url)).send().map_err(transport_error)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response)?;
        let document = response.json::<Document>().map_err(|e| AppError::StoreRequestFailed {
            status: 200,
            message: format!("Failed to parse document '{}': {}", path, e),
        })?;
        Ok(Some(document))
    }

    fn archive_path(&self, date: NaiveDate) -> String {
        format!("{}/{}", self.archive_collection, date_key(date))
    }

    fn group_path(&self, group: &GroupIdentity) -> String {
        format!("{}/{}", self.groups_collection, group.name())
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    AppError::StoreUnavailable(format!("HTTP request failed: {}", err))
}

fn check_status(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().unwrap_or_else(|_| "Unknown error".to_string());
    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        Err(AppError::StoreUnavailable(format!("status {}: {}", status.as_u16(), message)))
    } else {
        Err(AppError::StoreRequestFailed { status: status.as_u16(), message })
    }
}

fn malformed_document(path: &str, reason: &str) -> AppError {
    AppError::StoreRequestFailed {
        status: 200,
        message: format!("Malformed document '{}': {}", path, reason),
    }
}

fn is_already_exists(err: &AppError) -> bool {
    match err {
        AppError::StoreRequestFailed { status, message } => {
            *status == 409 || message.contains("ALREADY_EXISTS")
        }
        _ => false,
    }
}

fn content_fields(content: &DailyContent) -> Value {
    json!({
        "questions": {
            "arrayValue": {
                "values": content
                    .questions()
                    .iter()
                    .map(|q| json!({ "stringValue": q }))
                    .collect::<Vec<_>>()
            }
        },
        "date": { "stringValue": content.date_key() },
        "createdAt": {
            "timestampValue": content.created_at().to_rfc3339_opts(SecondsFormat::Millis, true)
        },
    })
}

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    fields: HashMap<String, FieldValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldValue {
    #[serde(default)]
    string_value: Option<String>,
    #[serde(default)]
    timestamp_value: Option<String>,
    #[serde(default)]
    array_value: Option<ArrayValue>,
}

#[derive(Debug, Default, Deserialize)]
struct ArrayValue {
    #[serde(default)]
    values: Vec<FieldValue>,
}

impl Document {
    fn strings(&self, field: &str) -> Vec<String> {
        self.fields
            .get(field)
            .and_then(|value| value.array_value.as_ref())
            .map(|array| array.values.iter().filter_map(|v| v.string_value.clone()).collect())
            .unwrap_or_default()
    }

    fn timestamp(&self, field: &str) -> Option<DateTime<Utc>> {
        let raw = self.fields.get(field)?.timestamp_value.as_deref()?;
        DateTime::parse_from_rfc3339(raw).ok().map(|ts| ts.with_timezone(&Utc))
    }
}

impl ContentStore for FirestoreStore {
    fn put_daily(&self, content: &DailyContent) -> Result<(), AppError> {
        self.commit(vec![json!({
            "update": {
                "name": self.document_name(&self.daily_document),
                "fields": content_fields(content),
            }
        })])?;
        info!(document = %self.daily_document, date = %content.date_key(), "stored daily questions");
        Ok(())
    }

    fn put_archive(&self, content: &DailyContent) -> Result<ArchiveWrite, AppError> {
        let path = self.archive_path(content.date());
        let result = self.commit(vec![json!({
            "update": {
                "name": self.document_name(&path),
                "fields": content_fields(content),
            },
            "currentDocument": { "exists": false },
        })]);

        match result {
            Ok(()) => {
                info!(document = %path, "archived questions");
                Ok(ArchiveWrite::Created)
            }
            Err(err) if is_already_exists(&err) => {
                debug!(document = %path, "archive exists; comparing content");
                match self.get_archive(content.date())? {
                    Some(existing) if existing.same_batch(content) => Ok(ArchiveWrite::Unchanged),
                    _ => Err(AppError::ArchiveConflict { date: content.date_key() }),
                }
            }
            Err(err) => Err(err),
        }
    }

    fn get_archive(&self, date: NaiveDate) -> Result<Option<DailyContent>, AppError> {
        let path = self.archive_path(date);
        let Some(document) = self.get_document(&path)? else {
            return Ok(None);
        };
        let questions = document.strings("questions");
        if questions.is_empty() {
            return Err(malformed_document(&path, "no questions"));
        }
        let created_at = document
            .timestamp("createdAt")
            .ok_or_else(|| malformed_document(&path, "missing or invalid createdAt"))?;
        Ok(Some(DailyContent::restore(date, questions, created_at)))
    }
}

impl MembershipStore for FirestoreStore {
    fn add_member(&self, group: &GroupIdentity, user: &UserId) -> Result<(), AppError> {
        // Empty mask: existing fields are kept, the transform merges into `members`.
        self.commit(vec![json!({
            "update": { "name": self.document_name(&self.group_path(group)), "fields": {} },
            "updateMask": { "fieldPaths": [] },
            "updateTransforms": [{
                "fieldPath": "members",
                "appendMissingElements": { "values": [{ "stringValue": user.as_str() }] },
            }],
        })])?;
        debug!(group = %group, user = %user, "registered member");
        Ok(())
    }

    fn members(&self, group: &GroupIdentity) -> Result<BTreeSet<UserId>, AppError> {
        let Some(document) = self.get_document(&self.group_path(group))? else {
            return Ok(BTreeSet::new());
        };
        Ok(document
            .strings("members")
            .into_iter()
            .filter_map(|raw| match UserId::new(&raw) {
                Ok(user) => Some(user),
                Err(_) => {
                    warn!(group = %group, member = %raw, "skipping malformed member id");
                    None
                }
            })
            .collect())
    }
}
