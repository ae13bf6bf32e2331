//! Drive file API client.

use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;

use crate::error::{DriveError, Result};
use crate::models::{ApiErrorResponse, FileEntity, FileListResponse, WebToken};
use crate::path;

/// Default base URL for the drive API.
pub const DEFAULT_API_BASE: &str = "https://api.aliyundrive.com";

/// Page size for directory listings.
const LIST_PAGE_LIMIT: u32 = 100;

/// Remote file metadata operations used by path resolution.
#[async_trait]
pub trait DriveClient: Send + Sync {
    /// Look up a single entry by canonical path.
    async fn lookup_by_path(&self, drive_id: &str, path: &str) -> Result<FileEntity>;

    /// List the children of the directory at `path`.
    async fn list_by_path(&self, drive_id: &str, path: &str) -> Result<Vec<FileEntity>>;

    /// Swap in a new credential for subsequent requests.
    fn update_credential(&self, token: WebToken);
}

#[derive(Serialize)]
struct GetByPathRequest<'a> {
    drive_id: &'a str,
    file_path: &'a str,
}

#[derive(Serialize)]
struct ListRequest<'a> {
    drive_id: &'a str,
    parent_file_id: &'a str,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    marker: Option<&'a str>,
}

/// HTTP implementation of [`DriveClient`].
pub struct HttpDriveClient {
    api_base: String,
    http: Client,
    token: RwLock<WebToken>,
}

impl HttpDriveClient {
    /// Create a new client against `api_base`.
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            http: Client::new(),
            token: RwLock::new(WebToken::default()),
        }
    }

    /// The credential currently used for requests.
    pub fn current_token(&self) -> WebToken {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn access_token(&self) -> String {
        self.current_token().access_token
    }

    async fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Response> {
        let response = self
            .http
            .post(format!("{}{}", self.api_base, endpoint))
            .bearer_auth(self.access_token())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&error_body) {
                return Err(DriveError::ApiError {
                    status: status.as_u16(),
                    message: format!("{}: {}", api_error.code, api_error.message),
                });
            }
            return Err(DriveError::ApiError {
                status: status.as_u16(),
                message: error_body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl DriveClient for HttpDriveClient {
    async fn lookup_by_path(&self, drive_id: &str, file_path: &str) -> Result<FileEntity> {
        if file_path == path::ROOT {
            return Ok(FileEntity {
                file_id: "root".to_string(),
                name: path::ROOT.to_string(),
                file_type: crate::models::FileType::Folder,
                size: None,
                parent_file_id: None,
                updated_at: None,
                path: Some(path::ROOT.to_string()),
            });
        }

        let request = GetByPathRequest {
            drive_id,
            file_path,
        };
        let response = self
            .post("/adrive/v1/file/get_by_path", &request)
            .await
            .map_err(|e| match e {
                DriveError::ApiError { status: 404, .. } => {
                    DriveError::FileNotFound(file_path.to_string())
                }
                other => other,
            })?;

        let mut entity: FileEntity = response.json().await?;
        entity.path = Some(file_path.to_string());
        Ok(entity)
    }

    async fn list_by_path(&self, drive_id: &str, dir_path: &str) -> Result<Vec<FileEntity>> {
        let dir = self.lookup_by_path(drive_id, dir_path).await?;
        if !dir.is_folder() {
            return Err(DriveError::FileNotFound(format!("{} is not a directory", dir_path)));
        }

        let mut all_files = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let request = ListRequest {
                drive_id,
                parent_file_id: &dir.file_id,
                limit: LIST_PAGE_LIMIT,
                marker: marker.as_deref(),
            };
            let list_response: FileListResponse =
                self.post("/adrive/v1/file/list", &request).await?.json().await?;

            all_files.extend(list_response.items.into_iter().map(|mut entity| {
                entity.path = Some(path::join(dir_path, &entity.name));
                entity
            }));

            match list_response.next_marker {
                Some(next) if !next.is_empty() => marker = Some(next),
                _ => break,
            }
        }

        Ok(all_files)
    }

    fn update_credential(&self, token: WebToken) {
        match self.token.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }
}
