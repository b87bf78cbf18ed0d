use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use super::client::{fetch_records, ClientConfig, DirectoryProvider};
use super::http_client::create_custom_client;
use super::types::{DirectoryRecord, LookupOutcome, LookupResponse};
use super::Mode;
use crate::error::{LookupError, Result};
use crate::output::formatter;

const USERS_PATH: &str = "/users";
const QUERY_PARAM: &str = "netid";

/// Provider for directory user records, queried by NetID
pub struct UserProvider {
    config: ClientConfig,
    http_client: Client,
}

impl UserProvider {
    pub fn new(config: ClientConfig) -> Self {
        let http_client = create_custom_client(config.timeout, &config.user_agent);
        Self {
            config,
            http_client,
        }
    }
}

#[async_trait]
impl DirectoryProvider for UserProvider {
    async fn lookup(&self, query: &str) -> Result<LookupOutcome> {
        if self.config.token.is_empty() {
            return Err(LookupError::NoToken);
        }

        let records = fetch_records(
            &self.http_client,
            &self.config,
            USERS_PATH,
            (QUERY_PARAM, query),
        )
        .await?;

        // Entries without a common name are placeholders the directory
        // returns for unresolvable NetIDs
        let records: Vec<DirectoryRecord> =
            records.into_iter().filter(|r| r.has("cn")).collect();

        if records.is_empty() {
            debug!("User lookup for `{}` matched nothing.", query);
            return Ok(LookupOutcome::NotFound);
        }

        debug!("User lookup for `{}` matched {} record(s).", query, records.len());
        Ok(LookupOutcome::Found(LookupResponse::new(records, "users")))
    }

    fn identity(&self, record: &DirectoryRecord) -> Option<String> {
        record.first_str("cn").map(str::to_owned)
    }

    fn label(&self, record: &DirectoryRecord) -> String {
        let user = UserRecord::new(record);
        format!(
            "{} ({})",
            user.display_name().unwrap_or("Unknown"),
            user.cn().unwrap_or("?")
        )
    }

    fn report(&self, record: &DirectoryRecord) -> Result<String> {
        formatter::format_user_report(&UserRecord::new(record))
    }

    fn mode(&self) -> Mode {
        Mode::User
    }

    fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn is_configured(&self) -> bool {
        !self.config.token.is_empty()
    }
}

/// Typed read-only view over the user attributes the report cares about
pub struct UserRecord<'a> {
    record: &'a DirectoryRecord,
}

impl<'a> UserRecord<'a> {
    pub fn new(record: &'a DirectoryRecord) -> Self {
        Self { record }
    }

    pub fn cn(&self) -> Option<&str> {
        self.record.first_str("cn")
    }

    pub fn display_name(&self) -> Option<&str> {
        self.record.first_str("displayname")
    }

    pub fn principal_name(&self) -> Option<&str> {
        self.record.first_str("userprincipalname")
    }

    pub fn description(&self) -> Option<&str> {
        self.record.first_str("description")
    }

    pub fn mail(&self) -> Option<&str> {
        self.record.first_str("mail")
    }

    pub fn title(&self) -> Option<&str> {
        self.record.first_str("title")
    }

    pub fn department(&self) -> Option<&str> {
        self.record.first_str("department")
    }

    pub fn locality(&self) -> Option<&str> {
        self.record.first_str("l")
    }

    pub fn street_address(&self) -> Option<&str> {
        self.record.first_str("streetaddress")
    }

    pub fn member_of(&self) -> Vec<&str> {
        self.record.strs("memberof")
    }

    /// Whether the record carries employment attributes worth reporting.
    /// Students have an empty or literal `Student` title.
    pub fn is_employee(&self) -> bool {
        matches!(self.title(), Some(title) if !title.is_empty() && title != "Student")
    }
}
