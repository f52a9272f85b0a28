use std::io::Write;
use std::time::Duration;

use chrono::{DateTime, Utc};
use qingcloud::binder::bind_parameters_into;
use qingcloud::signer::API_ENDPOINT;
use qingcloud::{ParameterSet, QingCloudError, assemble_url, debug, info, sign, warn};
use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::commands::InstanceCommand;
use crate::config::Config;
use crate::output::pretty_json;
use crate::validation::{VALID_ZONES, ensure_one_of};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
pub const API_VERSION: &str = "1";
pub const SIGNATURE_VERSION: &str = "1";
pub const DEFAULT_SIGNATURE_METHOD: &str = "HmacSHA256";
const TIME_STAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Raw API reply.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Signs instance commands and sends them to the API endpoint.
pub struct Dispatcher {
    config: Config,
    endpoint: String,
    client: Client,
}

impl Dispatcher {
    pub fn new(config: Config) -> Result<Self, QingCloudError> {
        Self::with_endpoint(config, API_ENDPOINT)
    }

    /// `endpoint` must end where the query string begins, e.g. `http://host/iaas/?`.
    pub fn with_endpoint(config: Config, endpoint: impl Into<String>) -> Result<Self, QingCloudError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| QingCloudError::from_transport_error(e, "building HTTP client"))?;

        Ok(Dispatcher {
            config,
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Parameters every request carries. Fails when the configured zone is
    /// not one the API serves.
    pub fn common_parameters(
        &self,
        action: &str,
        now: DateTime<Utc>,
    ) -> Result<ParameterSet, QingCloudError> {
        ensure_one_of("zone", &self.config.zone.as_str(), VALID_ZONES)?;

        let mut params = ParameterSet::new();
        params.set("action", action);
        params.set("zone", self.config.zone.as_str());
        params.set("time_stamp", now.format(TIME_STAMP_FORMAT).to_string());
        params.set("access_key_id", self.config.access_key_id.as_str());
        params.set("version", API_VERSION);
        params.set("signature_method", DEFAULT_SIGNATURE_METHOD);
        params.set("signature_version", SIGNATURE_VERSION);
        Ok(params)
    }

    /// Validates `command`, merges its parameters over the common set and
    /// returns the signed request URL.
    pub fn prepare<C: InstanceCommand>(
        &self,
        command: &mut C,
        now: DateTime<Utc>,
    ) -> Result<String, QingCloudError> {
        let mut params = self.common_parameters(C::ACTION, now)?;
        command.validate()?;
        bind_parameters_into(&*command, &mut params)?;

        let token = sign(&params, self.config.secret_access_key.as_bytes())?;
        debug!("Prepared {} with {} parameters", C::ACTION, params.len());
        Ok(assemble_url(&self.endpoint, &params, &token))
    }

    /// Issues a GET for `url` and reads the whole body.
    pub fn send(&self, url: &str) -> Result<ApiResponse, QingCloudError> {
        let context = format!("GET {}", self.endpoint);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| QingCloudError::from_transport_error(e.without_url(), &context))?;

        let status = response.status();
        let body = response
            .bytes()
            .map_err(|e| QingCloudError::from_transport_error(e.without_url(), &context))?
            .to_vec();
        info!("{context} returned {status} with {} bytes", body.len());
        Ok(ApiResponse { status, body })
    }

    /// Full round trip: prepare, send, write the pretty-printed reply to
    /// `out`. A non-success status is reported after the body is written.
    pub fn dispatch<C: InstanceCommand, W: Write>(
        &self,
        command: &mut C,
        out: &mut W,
    ) -> Result<ApiResponse, QingCloudError> {
        let url = self.prepare(command, Utc::now())?;
        let response = self.send(&url)?;

        writeln!(out, "{}", pretty_json(&response.body))
            .map_err(|e| QingCloudError::from_transport_error(e, "writing response"))?;

        if !response.status.is_success() {
            warn!("{} failed with HTTP status {}", C::ACTION, response.status);
            return Err(QingCloudError::TransportFailure {
                context: C::ACTION.to_string(),
                reason: format!("HTTP status {}", response.status),
            });
        }
        Ok(response)
    }
}
