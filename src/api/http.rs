use std::io::{self, Write};
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::Url;

use crate::config::ServerConfig;
use crate::error::{ConfigError, DownloadError, LoadError};
use crate::model::{BackupDescriptor, TreeNode};

use super::{parse_backup_list, BulkDownloadRequest, DownloadRequest, Endpoints, RestoreApi};

/// Blocking HTTP implementation of [`RestoreApi`].
pub struct HttpRestoreApi {
    client: Client,
    endpoints: Endpoints,
    timeout: Duration,
}

impl HttpRestoreApi {
    pub fn new(config: &ServerConfig) -> Result<Self, ConfigError> {
        let base = config.base_url()?;
        let timeout = Duration::from_secs(config.timeout_secs);

        let mut headers = HeaderMap::new();
        if let Some(cookie) = config.session_cookie.as_deref().filter(|c| !c.is_empty()) {
            let value = HeaderValue::from_str(cookie).map_err(|_| {
                ConfigError::Invalid("session_cookie contains invalid characters".into())
            })?;
            headers.insert(COOKIE, value);
        }

        // Downloads may run long; only metadata requests carry the timeout.
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(None::<Duration>)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(headers)
            .user_agent(concat!("restore-browser/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::Invalid(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoints: Endpoints::new(base),
            timeout,
        })
    }

    fn fetch(&self, url: Url) -> Result<Vec<u8>, LoadError> {
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .map_err(|source| LoadError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().map_err(|source| LoadError::Http {
            url: url.to_string(),
            source,
        })?;
        Ok(body.to_vec())
    }

    fn stream(url: &Url, response: reqwest::Result<Response>, out: &mut dyn Write) -> Result<u64, DownloadError> {
        let mut response = response.map_err(|source| DownloadError::Http {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status,
            });
        }

        let written = io::copy(&mut response, out)?;
        out.flush()?;
        Ok(written)
    }
}

impl RestoreApi for HttpRestoreApi {
    fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn list_backups(&self) -> Result<Vec<BackupDescriptor>, LoadError> {
        let body = self.fetch(self.endpoints.backups())?;
        parse_backup_list(&body)
    }

    fn load_tree(&self, backup: &BackupDescriptor) -> Result<TreeNode, LoadError> {
        let body = self.fetch(self.endpoints.files(backup))?;
        TreeNode::from_json(&body)
    }

    fn download_file(
        &self,
        request: &DownloadRequest,
        out: &mut dyn Write,
    ) -> Result<u64, DownloadError> {
        tracing::debug!(url = %request.url, "GET download");
        let response = self.client.get(request.url.clone()).send();
        Self::stream(&request.url, response, out)
    }

    fn download_bulk(
        &self,
        request: &BulkDownloadRequest,
        out: &mut dyn Write,
    ) -> Result<u64, DownloadError> {
        tracing::debug!(url = %request.url, paths = request.paths.len(), "POST download");
        let response = self
            .client
            .post(request.url.clone())
            .form(&request.form_fields())
            .send();
        Self::stream(&request.url, response, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_configured_base() {
        let config = ServerConfig {
            base_url: "http://nas.local:8080/".to_string(),
            ..ServerConfig::default()
        };
        let api = HttpRestoreApi::new(&config).unwrap();
        assert_eq!(
            api.endpoints().backups().as_str(),
            "http://nas.local:8080/api/restore/backups"
        );
    }

    #[test]
    fn test_new_rejects_bad_cookie() {
        let config = ServerConfig {
            session_cookie: Some("session=abc\ndef".to_string()),
            ..ServerConfig::default()
        };
        assert!(matches!(
            HttpRestoreApi::new(&config),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_unreachable_server_is_load_error() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let config = ServerConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..ServerConfig::default()
        };
        let api = HttpRestoreApi::new(&config).unwrap();
        assert!(matches!(api.list_backups(), Err(LoadError::Http { .. })));
    }
}
