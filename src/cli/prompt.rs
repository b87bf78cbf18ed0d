use colored::*;
use dialoguer::{theme::ColorfulTheme, Select};

use crate::api::client::DirectoryProvider;
use crate::api::types::DirectoryRecord;
use crate::error::{LookupError, Result};

/// Pick the record the report should describe. An exact identity match wins
/// without interaction; otherwise the user chooses from the candidate list.
/// Sits between fetch and format so the formatting step stays pure.
pub fn disambiguate<'a>(
    provider: &dyn DirectoryProvider,
    query: &str,
    records: &'a [DirectoryRecord],
) -> Result<&'a DirectoryRecord> {
    if let Some(exact) = find_exact(provider, query, records) {
        return Ok(exact);
    }

    println!(
        "🔍 Found {} matching {} record(s) for {}",
        records.len(),
        provider.mode().as_str(),
        format!("\"{}\"", query).green()
    );

    let candidates = candidates(provider, records);
    let labels: Vec<&str> = candidates.iter().map(|(label, _)| label.as_str()).collect();

    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select the record you want to inspect")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| LookupError::Prompt(e.to_string()))?;

    Ok(candidates[choice].1)
}

/// The record whose identity attribute equals the query, if any
pub fn find_exact<'a>(
    provider: &dyn DirectoryProvider,
    query: &str,
    records: &'a [DirectoryRecord],
) -> Option<&'a DirectoryRecord> {
    records
        .iter()
        .find(|record| provider.identity(record).as_deref() == Some(query))
}

/// Labeled candidates sorted by identity
pub fn candidates<'a>(
    provider: &dyn DirectoryProvider,
    records: &'a [DirectoryRecord],
) -> Vec<(String, &'a DirectoryRecord)> {
    let mut out: Vec<(String, &'a DirectoryRecord)> = records
        .iter()
        .map(|record| (provider.label(record), record))
        .collect();

    out.sort_by_key(|(_, record)| provider.identity(record).unwrap_or_default());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::ClientConfig;
    use crate::api::users::UserProvider;

    fn user(cn: &str, display_name: &str) -> DirectoryRecord {
        serde_json::from_str(&format!(
            r#"{{"properties": {{"cn": ["{}"], "displayname": ["{}"]}}}}"#,
            cn, display_name
        ))
        .unwrap()
    }

    #[test]
    fn test_find_exact_matches_identity() {
        let provider = UserProvider::new(ClientConfig::default());
        let records = vec![user("jsm12345", "John Smith"), user("jsm12346", "Jane Smith")];

        let found = find_exact(&provider, "jsm12346", &records).unwrap();
        assert_eq!(found.first_str("displayname"), Some("Jane Smith"));
        assert!(find_exact(&provider, "zzz00000", &records).is_none());
    }

    #[test]
    fn test_candidates_sorted_by_identity() {
        let provider = UserProvider::new(ClientConfig::default());
        let records = vec![
            user("jsm12346", "Jane Smith"),
            user("abc54321", "Alice Chen"),
            user("jsm12345", "John Smith"),
        ];

        let candidates = candidates(&provider, &records);
        let labels: Vec<&str> = candidates.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Alice Chen (abc54321)",
                "John Smith (jsm12345)",
                "Jane Smith (jsm12346)"
            ]
        );
    }
}
