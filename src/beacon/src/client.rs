//! REST client for the standard beacon node API.

use crate::api::BeaconNode;
use crate::chain_config::ChainConfig;
use crate::errors::BeaconError;
use crate::types::{
    DataResponse, ErrorMessage, Fork, Genesis, NodeVersion, SyncStatus, Validator, ValidatorInfo,
};
use async_trait::async_trait;
use ethdo_core::types::SignedVoluntaryExit;
use ethdo_core::PublicKey;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, trace};

/// Request body for looking validators up by id.
#[derive(Serialize)]
struct ValidatorIds<'a> {
    ids: Vec<&'a str>,
}

/// Body of the node version endpoint.
#[derive(Deserialize)]
struct VersionData {
    version: String,
}

/// A connection to a beacon node.
#[derive(Clone, Debug)]
pub struct BeaconClient {
    /// The HTTP client
    client: Client,
    /// Base URL without a trailing slash
    base: String,
}

impl BeaconClient {
    /// Creates a client for `address`.
    ///
    /// An address without a scheme is taken to be plain HTTP. Every request
    /// made by the client is bounded by `timeout`.
    pub fn connect(address: &str, timeout: Duration) -> Result<Self, BeaconError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(BeaconError::NoConnection);
        }

        let url = if address.contains("://") {
            address.to_string()
        } else {
            format!("http://{}", address)
        };
        Url::parse(&url).map_err(|e| BeaconError::InvalidEndpoint(format!("{}: {}", url, e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| BeaconError::ClientError(e.to_string()))?;

        debug!("Beacon client for {} with timeout {:?}", url, timeout);
        Ok(Self {
            client,
            base: url.trim_end_matches('/').to_string(),
        })
    }

    /// Gets the base URL of the node.
    pub fn address(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get<T: DeserializeOwned>(&self, context: &str, path: &str) -> Result<T, BeaconError> {
        trace!("GET {}", path);
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| request_failed(context, e))?;
        decode(context, response).await
    }

    async fn post<B, T>(&self, context: &str, path: &str, body: &B) -> Result<T, BeaconError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        trace!("POST {}", path);
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| request_failed(context, e))?;
        decode(context, response).await
    }
}

fn request_failed(context: &str, err: reqwest::Error) -> BeaconError {
    let message = if err.is_timeout() {
        "timed out".to_string()
    } else {
        err.to_string()
    };
    BeaconError::RequestFailed {
        context: context.to_string(),
        message,
    }
}

/// Fails on a non-success status, reading the node's error message if any.
async fn check_status(response: Response) -> Result<Response, BeaconError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            debug!("Failed to read error body of {} response: {}", status, e);
            String::new()
        }
    };
    let message = serde_json::from_str::<ErrorMessage>(&body)
        .map(|e| e.message)
        .unwrap_or(body);
    Err(BeaconError::ResponseError {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(context: &str, response: Response) -> Result<T, BeaconError> {
    let response = check_status(response).await?;
    let body = response
        .bytes()
        .await
        .map_err(|e| request_failed(context, e))?;
    let wrapped: DataResponse<T> = serde_json::from_slice(&body)
        .map_err(|e| BeaconError::DecodeError(format!("{}: {}", context, e)))?;
    Ok(wrapped.data)
}

#[async_trait]
impl BeaconNode for BeaconClient {
    async fn fetch_chain_config(&self) -> Result<ChainConfig, BeaconError> {
        let raw: BTreeMap<String, serde_json::Value> = self
            .get("failed to obtain chain configuration", "/eth/v1/config/spec")
            .await?;
        ChainConfig::from_raw(raw.iter())
    }

    async fn fetch_genesis(&self) -> Result<Genesis, BeaconError> {
        self.get("failed to obtain genesis", "/eth/v1/beacon/genesis")
            .await
    }

    async fn fetch_fork(&self) -> Result<Fork, BeaconError> {
        self.get("failed to obtain fork", "/eth/v1/beacon/states/head/fork")
            .await
    }

    async fn fetch_version(&self) -> Result<NodeVersion, BeaconError> {
        let data: VersionData = self
            .get("failed to obtain node version", "/eth/v1/node/version")
            .await?;
        Ok(NodeVersion::parse(&data.version))
    }

    async fn fetch_sync_status(&self) -> Result<SyncStatus, BeaconError> {
        self.get("failed to obtain sync status", "/eth/v1/node/syncing")
            .await
    }

    async fn fetch_validator(&self, pubkey: &PublicKey) -> Result<Validator, BeaconError> {
        let path = format!("/eth/v1/beacon/states/head/validators/{}", pubkey);
        match self
            .get::<ValidatorInfo>("failed to obtain validator", &path)
            .await
        {
            Ok(info) => Ok(info.validator),
            Err(BeaconError::ResponseError { status: 404, .. }) => {
                Err(BeaconError::ValidatorNotFound(pubkey.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    async fn fetch_validator_info(
        &self,
        pubkey: &PublicKey,
    ) -> Result<ValidatorInfo, BeaconError> {
        let id = pubkey.to_string();
        let body = ValidatorIds { ids: vec![&id] };
        let infos: Vec<ValidatorInfo> = self
            .post(
                "failed to obtain validator information",
                "/eth/v1/beacon/states/head/validators",
                &body,
            )
            .await?;
        // One id was asked for, so only the first answer matters.
        infos
            .into_iter()
            .next()
            .ok_or_else(|| BeaconError::ValidatorNotFound(pubkey.to_string()))
    }

    async fn submit_voluntary_exit(&self, exit: &SignedVoluntaryExit) -> Result<(), BeaconError> {
        let context = "failed to submit voluntary exit";
        debug!("Submitting {}", exit.message);
        let response = self
            .client
            .post(self.url("/eth/v1/beacon/pool/voluntary_exits"))
            .json(exit)
            .send()
            .await
            .map_err(|e| request_failed(context, e))?;
        check_status(response).await?;
        Ok(())
    }
}
