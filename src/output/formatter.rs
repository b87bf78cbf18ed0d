use colored::*;

use crate::api::devices::DeviceRecord;
use crate::api::users::UserRecord;
use crate::error::{LookupError, Result};

fn missing(attr: &str) -> LookupError {
    LookupError::Parse(format!("record is missing the `{}` attribute", attr))
}

/// Render the multi-line report for a user record
pub fn format_user_report(user: &UserRecord) -> Result<String> {
    let display_name = user.display_name().ok_or_else(|| missing("displayName"))?;
    let principal = user.principal_name().ok_or_else(|| missing("userPrincipalName"))?;
    let mail = user.mail().ok_or_else(|| missing("mail"))?;

    let mut result = format!(
        "{} {}",
        format!("👨 {}", display_name).blue(),
        format!("({})", principal).dimmed()
    );

    if let Some(description) = user.description() {
        result.push('\n');
        result.push_str(&clean_description(description, display_name));
    }

    result.push_str(&format!("\n\n{}\n{}", "Email:".blue().bold(), mail));

    if user.is_employee() {
        result.push_str(&format!("\n\n{}", "Employee Information:".blue().bold()));
        result.push_str(&format!("\n{}", user.department().unwrap_or("-")));
        result.push_str(&format!("\n{}", user.title().unwrap_or("-")));

        let address = match (user.locality(), user.street_address()) {
            (Some(locality), Some(street)) => Some(format!("{}, {}", locality, street)),
            (Some(locality), None) => Some(locality.to_string()),
            (None, Some(street)) => Some(street.to_string()),
            (None, None) => None,
        };
        if let Some(address) = address {
            result.push_str(&format!("\n{}", address));
        }
    }

    let groups: Vec<String> = user
        .member_of()
        .iter()
        .map(|dn| group_container_path(dn))
        .collect();
    if !groups.is_empty() {
        result.push_str(&format!(
            "\n\n{}\n ▬ {}",
            "Groups:".blue().bold(),
            groups.join("\n ▬ ")
        ));
    }

    Ok(result)
}

/// Render the multi-line report for a device record
pub fn format_device_report(device: &DeviceRecord) -> Result<String> {
    let name = device.name().ok_or_else(|| missing("name"))?;
    let dns_name = device.dns_host_name().ok_or_else(|| missing("dNSHostName"))?;

    let mut result = format!(
        "{} {}",
        format!("💻 {}", name).blue(),
        format!("({})", dns_name).dimmed()
    );

    if let Some(description) = device.description() {
        result.push('\n');
        result.push_str(description);
    }

    if let Some(owner) = device.managed_by().and_then(managed_by_cn) {
        result.push_str(&format!("\n\n{}\n{}", "Managed By:".blue().bold(), owner));
    }

    if let Some(os) = device.operating_system() {
        let version = device
            .operating_system_version()
            .map(normalize_os_version)
            .unwrap_or_else(|| "-".to_string());
        result.push_str(&format!(
            "\n\n{}\n{} ({})",
            "Operating System:".blue().bold(),
            os,
            version
        ));
    }

    if let Some(ou) = device.distinguished_name().and_then(parent_ou) {
        result.push_str(&format!(
            "\n\n{}\n{}",
            "Active Directory OU:".blue().bold(),
            ou
        ));
    }

    if let Some(path) = device.adspath() {
        result.push_str(&format!(
            "\n\n{}\n{}",
            "Active Directory Path:".blue().bold(),
            device_container_path(path)
        ));
    }

    Ok(result.trim().to_string())
}

/// Strip the boilerplate prefix the directory prepends to user descriptions.
/// `"John Smith (Student) - Junior - School of Engineering"` renders as just
/// the segment after the first separator.
fn clean_description(description: &str, display_name: &str) -> String {
    if let Some((_, rest)) = description.split_once(display_name) {
        if let Some(segment) = rest.split(" - ").nth(1) {
            return segment.trim().to_string();
        }
    }
    description.to_string()
}

/// Render a `memberOf` DN as its deduplicated container path, outermost
/// first, with the domain components dropped
fn group_container_path(dn: &str) -> String {
    let mut components: Vec<&str> = dn.split(',').collect();
    components.reverse();

    let mut seen: Vec<&str> = Vec::new();
    for component in components.into_iter().skip(5) {
        let value = component.split('=').nth(1).unwrap_or(component);
        if !seen.contains(&value) {
            seen.push(value);
        }
    }

    seen.join(" -> ")
}

/// Owner CN from a `managedBy` DN
fn managed_by_cn(dn: &str) -> Option<&str> {
    dn.split(',').next()?.strip_prefix("CN=")
}

/// OS version strings come in as `"10.0 (19044)"`; strip the parens and
/// separate the parts with dashes
fn normalize_os_version(version: &str) -> String {
    version
        .replace(['(', ')'], "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" - ")
}

/// The OU the entry sits in, taken from its distinguished name
fn parent_ou(dn: &str) -> Option<&str> {
    dn.split(',').nth(1)?.strip_prefix("OU=")
}

/// Render an `aDSPath` as the OU chain from the domain root down
fn device_container_path(adspath: &str) -> String {
    let mut components: Vec<&str> = adspath.split(',').skip(1).collect();
    components.reverse();

    components
        .into_iter()
        .skip(4)
        .map(|component| component.split("OU=").nth(1).unwrap_or(component))
        .collect::<Vec<_>>()
        .join(" -> ")
}
