//! Cloud disk backend
//!
//! Implements [`ObjectStore`] against the Yandex.Disk REST API. Objects
//! live in the application folder (`app:` prefix). Downloads and uploads
//! are two-phase: the API first hands out a pre-signed link envelope
//! (`{ href, method }`), then the bytes are transferred against that link
//! without the auth header.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Method;
use serde::Deserialize;

use super::{ObjectStore, RemoteError};

const API_BASE: &str = "https://cloud-api.yandex.net";

/// A pre-signed transfer link handed out by the API
#[derive(Debug, Deserialize)]
struct LinkEnvelope {
    href: String,
    method: String,
}

/// Remote object store backed by a cloud disk application folder
pub struct DiskStore {
    client: Client,
    access_token: String,
    base_url: String,
}

impl DiskStore {
    /// Create a store and verify the credentials with an application
    /// folder probe
    pub fn new(access_token: impl Into<String>) -> Result<Self, RemoteError> {
        let store = Self::unchecked(access_token);
        store.check()?;
        Ok(store)
    }

    /// Create a store without the credential probe
    pub fn unchecked(access_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            access_token: access_token.into(),
            base_url: API_BASE.to_string(),
        }
    }

    fn app_path(path: &str) -> String {
        format!("app:{path}")
    }

    fn api(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn send(&self, req: RequestBuilder) -> Result<Response, RemoteError> {
        req.header("Authorization", format!("OAuth {}", self.access_token))
            .header("Accept", "application/json")
            .send()
            .map_err(RemoteError::transport)
    }

    fn check(&self) -> Result<(), RemoteError> {
        let resp = self.send(
            self.client
                .get(self.api("/v1/disk/resources"))
                .query(&[("path", "app:/")]),
        )?;
        if !resp.status().is_success() {
            return Err(response_error(resp));
        }
        Ok(())
    }

    fn request_link(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<LinkEnvelope, RemoteError> {
        let resp = self.send(self.client.get(self.api(endpoint)).query(query))?;
        if !resp.status().is_success() {
            return Err(response_error(resp));
        }
        resp.json::<LinkEnvelope>().map_err(RemoteError::transport)
    }

    fn transfer(&self, link: &LinkEnvelope, body: Option<Vec<u8>>) -> Result<Response, RemoteError> {
        let method = Method::from_bytes(link.method.as_bytes())
            .map_err(|_| RemoteError::transport(format!("bad transfer method: {}", link.method)))?;

        // Pre-signed link: no auth header on the second phase
        let mut req = self.client.request(method, &link.href);
        if let Some(body) = body {
            req = req.body(body);
        }

        let resp = req.send().map_err(RemoteError::transport)?;
        if !resp.status().is_success() {
            return Err(response_error(resp));
        }
        Ok(resp)
    }
}

fn response_error(resp: Response) -> RemoteError {
    let status = resp.status().as_u16();
    let body = resp.text().unwrap_or_else(|e| e.to_string());
    RemoteError::status(status, body)
}

impl ObjectStore for DiskStore {
    fn exists(&self, path: &str) -> Result<bool, RemoteError> {
        let resp = self.send(
            self.client
                .get(self.api("/v1/disk/resources"))
                .query(&[("path", Self::app_path(path))]),
        )?;

        match resp.status().as_u16() {
            404 => Ok(false),
            code if (200..300).contains(&code) => Ok(true),
            _ => Err(response_error(resp)),
        }
    }

    fn rename(&self, src: &str, dst: &str) -> Result<(), RemoteError> {
        let resp = self.send(
            self.client
                .post(self.api("/v1/disk/resources/move"))
                .query(&[
                    ("from", Self::app_path(src)),
                    ("path", Self::app_path(dst)),
                    ("overwrite", "true".to_string()),
                ]),
        )?;

        if !resp.status().is_success() {
            return Err(response_error(resp));
        }
        Ok(())
    }

    fn fetch(&self, path: &str) -> Result<Vec<u8>, RemoteError> {
        let link = self.request_link(
            "/v1/disk/resources/download",
            &[("path", Self::app_path(path))],
        )?;
        let resp = self.transfer(&link, None)?;
        let bytes = resp.bytes().map_err(RemoteError::transport)?;
        Ok(bytes.to_vec())
    }

    fn put(&self, path: &str, data: &[u8]) -> Result<(), RemoteError> {
        let link = self.request_link(
            "/v1/disk/resources/upload",
            &[
                ("path", Self::app_path(path)),
                ("overwrite", "true".to_string()),
            ],
        )?;
        self.transfer(&link, Some(data.to_vec()))?;
        Ok(())
    }
}
