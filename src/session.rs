//! The active user and the live client handle it drives.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::DriveClient;
use crate::models::WebToken;
use crate::path;

/// Persisted state of one logged-in account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: String,
    #[serde(default)]
    pub nickname: String,
    pub file_drive_id: String,
    #[serde(default)]
    pub resource_drive_id: String,
    #[serde(default = "root_dir")]
    pub workdir: String,
    #[serde(default = "root_dir")]
    pub resource_workdir: String,
    pub web_token: WebToken,
}

fn root_dir() -> String {
    path::ROOT.to_string()
}

/// The account driving the current invocation.
///
/// Owns its [`UserRecord`] and, once connected, a shared handle to the live
/// API client whose credential must track `record.web_token`.
#[derive(Clone, Default)]
pub struct Session {
    pub record: UserRecord,
    client: Option<Arc<dyn DriveClient>>,
}

impl Session {
    pub fn new(record: UserRecord) -> Self {
        Self {
            record,
            client: None,
        }
    }

    /// Attach a live client, pushing the current token into it.
    pub fn with_client(mut self, client: Arc<dyn DriveClient>) -> Self {
        client.update_credential(self.record.web_token.clone());
        self.client = Some(client);
        self
    }

    pub fn client(&self) -> Option<&Arc<dyn DriveClient>> {
        self.client.as_ref()
    }

    pub fn web_token(&self) -> &WebToken {
        &self.record.web_token
    }

    /// Replace the token and propagate it to the live client.
    pub fn set_web_token(&mut self, token: WebToken) {
        if let Some(client) = &self.client {
            client.update_credential(token.clone());
        }
        self.record.web_token = token;
    }

    /// Working directory for the given drive. Unknown drives start at root.
    pub fn workdir_for(&self, drive_id: &str) -> &str {
        if drive_id == self.record.file_drive_id {
            &self.record.workdir
        } else if !self.record.resource_drive_id.is_empty()
            && drive_id == self.record.resource_drive_id
        {
            &self.record.resource_workdir
        } else {
            path::ROOT
        }
    }

    /// Resolve a user-typed path on `drive_id` into a canonical path.
    pub fn path_join(&self, drive_id: &str, user_path: &str) -> String {
        path::join(self.workdir_for(drive_id), user_path)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.record.user_id)
            .field("file_drive_id", &self.record.file_drive_id)
            .field("connected", &self.client.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> UserRecord {
        UserRecord {
            user_id: "u1".to_string(),
            file_drive_id: "d-file".to_string(),
            resource_drive_id: "d-res".to_string(),
            workdir: "/work".to_string(),
            resource_workdir: "/albums".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_path_join_uses_drive_workdir() {
        let session = Session::new(record());
        assert_eq!(session.path_join("d-file", "a.txt"), "/work/a.txt");
        assert_eq!(session.path_join("d-res", "pic.jpg"), "/albums/pic.jpg");
        assert_eq!(session.path_join("other", "x"), "/x");
    }

    #[test]
    fn test_path_join_absolute_and_dotdot() {
        let session = Session::new(record());
        assert_eq!(session.path_join("d-file", "/abs//p/"), "/abs/p");
        assert_eq!(session.path_join("d-file", "../../up"), "/up");
    }

    #[test]
    fn test_record_defaults_workdirs_to_root() {
        let json = r#"{
            "user_id": "u1",
            "file_drive_id": "d1",
            "web_token": {"access_token": "a", "refresh_token": "r", "expire_time": ""}
        }"#;
        let record: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.workdir, "/");
        assert_eq!(record.resource_workdir, "/");
    }

    #[test]
    fn test_set_web_token_without_client() {
        let mut session = Session::new(record());
        let token = WebToken {
            access_token: "new".to_string(),
            ..Default::default()
        };
        session.set_web_token(token);
        assert_eq!(session.web_token().access_token, "new");
    }
}
