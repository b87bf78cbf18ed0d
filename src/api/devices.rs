use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use super::client::{fetch_records, ClientConfig, DirectoryProvider};
use super::http_client::create_custom_client;
use super::types::{DirectoryRecord, LookupOutcome, LookupResponse};
use super::Mode;
use crate::error::{LookupError, Result};
use crate::output::formatter;

const COMPUTERS_PATH: &str = "/computers";
const QUERY_PARAM: &str = "name";

/// Provider for managed device records, queried by machine name
pub struct DeviceProvider {
    config: ClientConfig,
    http_client: Client,
}

impl DeviceProvider {
    pub fn new(config: ClientConfig) -> Self {
        let http_client = create_custom_client(config.timeout, &config.user_agent);
        Self {
            config,
            http_client,
        }
    }
}

#[async_trait]
impl DirectoryProvider for DeviceProvider {
    async fn lookup(&self, query: &str) -> Result<LookupOutcome> {
        if self.config.token.is_empty() {
            return Err(LookupError::NoToken);
        }

        let records = fetch_records(
            &self.http_client,
            &self.config,
            COMPUTERS_PATH,
            (QUERY_PARAM, query),
        )
        .await?;

        // Entries without a service principal are stubs the directory
        // returns for unknown machine names
        let records: Vec<DirectoryRecord> = records
            .into_iter()
            .filter(|r| r.has("name") && r.has("serviceprincipalname"))
            .collect();

        if records.is_empty() {
            debug!("Device lookup for `{}` matched nothing.", query);
            return Ok(LookupOutcome::NotFound);
        }

        debug!(
            "Device lookup for `{}` matched {} record(s).",
            query,
            records.len()
        );
        Ok(LookupOutcome::Found(LookupResponse::new(
            records, "computers",
        )))
    }

    fn identity(&self, record: &DirectoryRecord) -> Option<String> {
        record.first_str("name").map(str::to_owned)
    }

    fn label(&self, record: &DirectoryRecord) -> String {
        let device = DeviceRecord::new(record);
        format!(
            "{} ({})",
            device.name().unwrap_or("Unknown"),
            device.dns_host_name().unwrap_or("?")
        )
    }

    fn report(&self, record: &DirectoryRecord) -> Result<String> {
        formatter::format_device_report(&DeviceRecord::new(record))
    }

    fn mode(&self) -> Mode {
        Mode::Device
    }

    fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn is_configured(&self) -> bool {
        !self.config.token.is_empty()
    }
}

/// Typed read-only view over the device attributes the report cares about
pub struct DeviceRecord<'a> {
    record: &'a DirectoryRecord,
}

impl<'a> DeviceRecord<'a> {
    pub fn new(record: &'a DirectoryRecord) -> Self {
        Self { record }
    }

    pub fn name(&self) -> Option<&str> {
        self.record.first_str("name")
    }

    pub fn dns_host_name(&self) -> Option<&str> {
        self.record.first_str("dnshostname")
    }

    pub fn description(&self) -> Option<&str> {
        self.record.first_str("description")
    }

    pub fn managed_by(&self) -> Option<&str> {
        self.record.first_str("managedby")
    }

    pub fn operating_system(&self) -> Option<&str> {
        self.record.first_str("operatingsystem")
    }

    pub fn operating_system_version(&self) -> Option<&str> {
        self.record.first_str("operatingsystemversion")
    }

    pub fn distinguished_name(&self) -> Option<&str> {
        self.record.first_str("distinguishedname")
    }

    pub fn adspath(&self) -> Option<&str> {
        self.record.first_str("adspath")
    }
}
