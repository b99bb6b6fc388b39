//! Remote sync adapter.
//!
//! Mirrors the local SQLite file to a Drive-style remote store with
//! whole-file semantics: one app folder, one database file inside it,
//! re-uploaded in full after every local write. Last writer wins; there is
//! no reconciliation.
//!
//! The adapter is an optional collaborator. A [`SyncSession`] produces the
//! after-write closure that [`crate::db::Database::set_after_write`]
//! installs; hook failures are logged and swallowed there, so a broken
//! remote never loses a local write.

use crate::constants::APP_NAME;
use crate::db::AfterWriteHook;
use crate::errors::{AppError, AppResult};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempPath;
use tracing::{debug, info};

/// Folder created in the remote drive to hold the journal file.
pub const REMOTE_FOLDER_NAME: &str = "Confide Journal";

/// Name of the database file inside the remote folder.
pub const REMOTE_DB_FILENAME: &str = "confide_journal.db";

const FOLDER_MIME: &str = "application/vnd.google-apps.folder";
const DB_MIME: &str = "application/x-sqlite3";

/// Opaque credentials obtained from the token exchange.
#[derive(Clone)]
pub struct Credentials {
    pub access_token: String,
    /// Display label for the signed-in account, when the token endpoint
    /// provides one.
    pub user_label: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"***REDACTED***")
            .field("user_label", &self.user_label)
            .finish()
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    user_label: Option<String>,
}

#[derive(Deserialize)]
struct FileResource {
    id: String,
}

#[derive(Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileResource>,
}

/// Client for the Drive-style remote API.
///
/// `api_base` serves metadata and downloads (`{api_base}/files`),
/// `upload_base` serves content uploads, and `token_url` is the opaque
/// code-for-credentials exchange endpoint.
pub struct SyncClient {
    api_base: String,
    upload_base: String,
    token_url: String,
    client: Client,
}

impl SyncClient {
    pub fn new(api_base: &str, upload_base: &str, token_url: &str) -> Self {
        SyncClient {
            api_base: api_base.trim_end_matches('/').to_string(),
            upload_base: upload_base.trim_end_matches('/').to_string(),
            token_url: token_url.to_string(),
            client: Client::new(),
        }
    }

    /// Exchanges an authorization code for credentials.
    ///
    /// The exchange is opaque: one POST, one token back. Refresh and scope
    /// mechanics belong to the remote, not to us.
    pub fn exchange_code(&self, auth_code: &str) -> AppResult<Credentials> {
        debug!("Exchanging authorization code for credentials");

        let response = self
            .client
            .post(&self.token_url)
            .json(&json!({ "code": auth_code, "grant_type": "authorization_code" }))
            .send()
            .map_err(|e| AppError::Sync(format!("token exchange failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Sync(format!(
                "token exchange rejected (HTTP {})",
                response.status().as_u16()
            )));
        }

        let token: TokenResponse = response
            .json()
            .map_err(|e| AppError::Sync(format!("malformed token response: {}", e)))?;

        Ok(Credentials {
            access_token: token.access_token,
            user_label: token
                .user_label
                .unwrap_or_else(|| format!("Signed in to {}", APP_NAME)),
        })
    }

    /// Starts a sync session: finds or creates the remote folder and
    /// database file, and materializes the database locally.
    ///
    /// When the remote file exists its content is downloaded to a fresh
    /// tempfile; otherwise an empty local file is created and the first
    /// after-write upload will create the remote copy.
    pub fn begin_session(self: &Arc<Self>, creds: &Credentials) -> AppResult<SyncSession> {
        let folder_id = self.find_or_create_folder(creds)?;
        let file_id = self.find_db_file(creds, &folder_id)?;

        let temp = tempfile::Builder::new()
            .suffix(".db")
            .tempfile()
            .map_err(AppError::Io)?;
        let temp_path = temp.into_temp_path();

        match &file_id {
            Some(id) => {
                self.download_file(creds, id, &temp_path)?;
                info!("Downloaded remote journal to {:?}", &*temp_path);
            }
            None => {
                // Leave the tempfile empty; schema init creates the tables.
                info!("No remote journal yet, starting from an empty file");
            }
        }

        Ok(SyncSession {
            client: Arc::clone(self),
            creds: creds.clone(),
            folder_id,
            local_path: temp_path.to_path_buf(),
            user_label: creds.user_label.clone(),
            _temp: temp_path,
        })
    }

    fn bearer(&self, creds: &Credentials) -> String {
        format!("Bearer {}", creds.access_token)
    }

    fn list_files(&self, creds: &Credentials, query: &str) -> AppResult<Vec<FileResource>> {
        let response = self
            .client
            .get(format!("{}/files", self.api_base))
            .header("Authorization", self.bearer(creds))
            .query(&[("q", query), ("fields", "files(id, name)")])
            .send()
            .map_err(|e| AppError::Sync(format!("remote listing failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Sync(format!(
                "remote listing rejected (HTTP {})",
                response.status().as_u16()
            )));
        }

        let list: FileList = response
            .json()
            .map_err(|e| AppError::Sync(format!("malformed file list: {}", e)))?;
        Ok(list.files)
    }

    fn find_or_create_folder(&self, creds: &Credentials) -> AppResult<String> {
        let query = format!(
            "mimeType='{}' and name='{}' and trashed=false",
            FOLDER_MIME, REMOTE_FOLDER_NAME
        );
        if let Some(folder) = self.list_files(creds, &query)?.into_iter().next() {
            debug!("Found existing remote folder {}", folder.id);
            return Ok(folder.id);
        }

        let response = self
            .client
            .post(format!("{}/files", self.api_base))
            .header("Authorization", self.bearer(creds))
            .json(&json!({ "name": REMOTE_FOLDER_NAME, "mimeType": FOLDER_MIME }))
            .send()
            .map_err(|e| AppError::Sync(format!("folder creation failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Sync(format!(
                "folder creation rejected (HTTP {})",
                response.status().as_u16()
            )));
        }

        let folder: FileResource = response
            .json()
            .map_err(|e| AppError::Sync(format!("malformed folder response: {}", e)))?;
        info!("Created remote folder {}", folder.id);
        Ok(folder.id)
    }

    fn find_db_file(&self, creds: &Credentials, folder_id: &str) -> AppResult<Option<String>> {
        let query = format!(
            "'{}' in parents and name='{}' and trashed=false",
            folder_id, REMOTE_DB_FILENAME
        );
        Ok(self
            .list_files(creds, &query)?
            .into_iter()
            .next()
            .map(|f| f.id))
    }

    fn download_file(&self, creds: &Credentials, file_id: &str, dest: &Path) -> AppResult<()> {
        let response = self
            .client
            .get(format!("{}/files/{}", self.api_base, file_id))
            .header("Authorization", self.bearer(creds))
            .query(&[("alt", "media")])
            .send()
            .map_err(|e| AppError::Sync(format!("download failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Sync(format!(
                "download rejected (HTTP {})",
                response.status().as_u16()
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| AppError::Sync(format!("download read failed: {}", e)))?;
        fs::write(dest, &bytes).map_err(AppError::Io)?;
        Ok(())
    }

    fn upload_file(
        &self,
        creds: &Credentials,
        folder_id: &str,
        local_path: &Path,
    ) -> AppResult<()> {
        if !local_path.exists() {
            return Ok(());
        }
        let bytes = fs::read(local_path).map_err(AppError::Io)?;

        // Re-resolve the remote file each time: the first upload after an
        // empty-start session creates it.
        let file_id = self.find_db_file(creds, folder_id)?;

        let response = match &file_id {
            Some(id) => self
                .client
                .patch(format!("{}/files/{}", self.upload_base, id))
                .header("Authorization", self.bearer(creds))
                .header("Content-Type", DB_MIME)
                .query(&[("uploadType", "media")])
                .body(bytes)
                .send(),
            None => {
                let metadata = json!({ "name": REMOTE_DB_FILENAME, "parents": [folder_id] });
                let form = reqwest::blocking::multipart::Form::new()
                    .part(
                        "metadata",
                        reqwest::blocking::multipart::Part::text(metadata.to_string())
                            .mime_str("application/json")
                            .map_err(|e| AppError::Sync(format!("upload metadata: {}", e)))?,
                    )
                    .part(
                        "media",
                        reqwest::blocking::multipart::Part::bytes(bytes)
                            .mime_str(DB_MIME)
                            .map_err(|e| AppError::Sync(format!("upload media: {}", e)))?,
                    );
                self.client
                    .post(format!("{}/files", self.upload_base))
                    .header("Authorization", self.bearer(creds))
                    .query(&[("uploadType", "multipart")])
                    .multipart(form)
                    .send()
            }
        }
        .map_err(|e| AppError::Sync(format!("upload failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Sync(format!(
                "upload rejected (HTTP {})",
                response.status().as_u16()
            )));
        }

        debug!("Uploaded journal file ({})", local_path.display());
        Ok(())
    }
}

/// A live sync session: the local working copy of the remote journal plus
/// the upload side of the mirror.
pub struct SyncSession {
    client: Arc<SyncClient>,
    creds: Credentials,
    folder_id: String,
    local_path: PathBuf,
    pub user_label: String,
    // Keeps the tempfile alive for the life of the session.
    _temp: TempPath,
}

impl SyncSession {
    /// Path of the local working copy. Open the database here.
    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    /// Builds the after-write closure that re-uploads the whole file.
    ///
    /// Intended for [`crate::db::Database::set_after_write`]; errors it
    /// returns are logged and swallowed there.
    pub fn upload_hook(&self) -> AfterWriteHook {
        let client = Arc::clone(&self.client);
        let creds = self.creds.clone();
        let folder_id = self.folder_id.clone();
        let local_path = self.local_path.clone();
        Box::new(move || client.upload_file(&creds, &folder_id, &local_path))
    }
}
