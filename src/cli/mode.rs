use crate::api::Mode;

/// Which lookup, if any, an invocation selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// No identifier was supplied; show usage
    None,
    /// Exactly one identifier was supplied
    Single(Mode, String),
    /// More than one identifier was supplied
    Ambiguous,
}

/// Resolve the lookup mode from the three mutually-exclusive identifier
/// flags. Pure; empty strings count as absent.
pub fn resolve(user: Option<&str>, device: Option<&str>, group: Option<&str>) -> Selection {
    let mut picks: Vec<(Mode, String)> = Vec::new();

    if let Some(value) = present(user) {
        picks.push((Mode::User, value));
    }
    if let Some(value) = present(device) {
        picks.push((Mode::Device, value));
    }
    if let Some(value) = present(group) {
        picks.push((Mode::Group, value));
    }

    match picks.len() {
        0 => Selection::None,
        1 => {
            let (mode, value) = picks.remove(0);
            Selection::Single(mode, value)
        }
        _ => Selection::Ambiguous,
    }
}

fn present(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_input_resolves_to_none() {
        assert_eq!(resolve(None, None, None), Selection::None);
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        assert_eq!(resolve(Some(""), Some(""), None), Selection::None);
        assert_eq!(
            resolve(Some(""), Some("LIB-KIOSK-01"), None),
            Selection::Single(Mode::Device, "LIB-KIOSK-01".to_string())
        );
    }

    #[test]
    fn test_single_input_resolves_to_its_mode() {
        assert_eq!(
            resolve(Some("jsm12345"), None, None),
            Selection::Single(Mode::User, "jsm12345".to_string())
        );
        assert_eq!(
            resolve(None, Some("LIB-KIOSK-01"), None),
            Selection::Single(Mode::Device, "LIB-KIOSK-01".to_string())
        );
        assert_eq!(
            resolve(None, None, Some("Lab Admins")),
            Selection::Single(Mode::Group, "Lab Admins".to_string())
        );
    }

    #[test]
    fn test_overlapping_input_is_ambiguous() {
        assert_eq!(
            resolve(Some("jsm12345"), Some("LIB-KIOSK-01"), None),
            Selection::Ambiguous
        );
        assert_eq!(
            resolve(Some("jsm12345"), None, Some("Lab Admins")),
            Selection::Ambiguous
        );
        assert_eq!(
            resolve(None, Some("LIB-KIOSK-01"), Some("Lab Admins")),
            Selection::Ambiguous
        );
        assert_eq!(
            resolve(Some("a"), Some("b"), Some("c")),
            Selection::Ambiguous
        );
    }
}
