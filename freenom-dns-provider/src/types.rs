use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::providers::PROVIDER_NAME;

// ============ DNS Record Types ============

/// Record types offered by the panel's record editor.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.), which is also
/// the label the panel renders in its type column and expects in its forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Location record.
    Loc,
    /// Mail exchange record.
    Mx,
    /// Naming authority pointer record.
    Naptr,
    /// Responsible person record.
    Rp,
    /// Text record.
    Txt,
}

impl RecordType {
    /// The label used on the wire and on the page.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Loc => "LOC",
            Self::Mx => "MX",
            Self::Naptr => "NAPTR",
            Self::Rp => "RP",
            Self::Txt => "TXT",
        }
    }

    /// Parse a type label, case-insensitively. Returns `None` for labels the panel does not offer.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_uppercase().as_str() {
            "A" => Some(Self::A),
            "AAAA" => Some(Self::Aaaa),
            "CNAME" => Some(Self::Cname),
            "LOC" => Some(Self::Loc),
            "MX" => Some(Self::Mx),
            "NAPTR" => Some(Self::Naptr),
            "RP" => Some(Self::Rp),
            "TXT" => Some(Self::Txt),
            _ => None,
        }
    }

    /// Whether the panel stores a priority for this type.
    pub fn has_priority(self) -> bool {
        matches!(self, Self::Mx)
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| ProviderError::InvalidParameter {
            provider: PROVIDER_NAME.to_string(),
            param: "type".to_string(),
            detail: format!("unsupported record type: {s}"),
        })
    }
}

/// A DNS record as the panel shows it.
///
/// Two records are equal iff type, name, value, TTL and priority are all equal,
/// with an absent priority and a zero priority treated as the same value.
/// The panel exposes no record id, so equality is the only identity a record has.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Owner name, relative to the zone (empty for the apex).
    pub name: String,
    /// Record value.
    pub value: String,
    /// Time to live in seconds.
    pub ttl: u32,
    /// Priority, meaningful for MX only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

impl Record {
    pub fn new(
        record_type: RecordType,
        name: impl Into<String>,
        value: impl Into<String>,
        ttl: u32,
    ) -> Self {
        Self {
            record_type,
            name: name.into(),
            value: value.into(),
            ttl,
            priority: None,
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: u16) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Priority with absent mapped to zero.
    pub fn effective_priority(&self) -> u16 {
        self.priority.unwrap_or(0)
    }

    /// Whether `other` occupies the same type+name slot.
    pub fn same_slot(&self, other: &Self) -> bool {
        self.record_type == other.record_type && self.name == other.name
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.same_slot(other)
            && self.value == other.value
            && self.ttl == other.ttl
            && self.effective_priority() == other.effective_priority()
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.record_type.hash(state);
        self.name.hash(state);
        self.value.hash(state);
        self.ttl.hash(state);
        self.effective_priority().hash(state);
    }
}

/// One-line form: `TYPE NAME TTL VALUE`, with the priority appended for MX.
///
/// The apex is written as `@`.
impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = if self.name.is_empty() { "@" } else { &self.name };
        write!(f, "{} {} {} {}", self.record_type, name, self.ttl, self.value)?;
        if self.record_type.has_priority() {
            write!(f, " {}", self.effective_priority())?;
        }
        Ok(())
    }
}

impl FromStr for Record {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |detail: String| ProviderError::InvalidParameter {
            provider: PROVIDER_NAME.to_string(),
            param: "record".to_string(),
            detail,
        };

        let mut rest = s.trim();
        let (Some(type_str), Some(name), Some(ttl_str)) = (
            take_field(&mut rest),
            take_field(&mut rest),
            take_field(&mut rest),
        ) else {
            return Err(invalid(format!(
                "expected 'TYPE NAME TTL VALUE [PRIORITY]', got '{s}'"
            )));
        };

        let record_type: RecordType = type_str.parse()?;
        let ttl: u32 = ttl_str
            .parse()
            .map_err(|_| invalid(format!("TTL is not a number: {ttl_str}")))?;
        let name = if name == "@" { "" } else { name };

        let mut value = rest.trim();
        let mut priority = None;
        if record_type.has_priority()
            && let Some((head, tail)) = value.rsplit_once(char::is_whitespace)
            && let Ok(p) = tail.parse::<u16>()
        {
            value = head.trim_end();
            priority = Some(p);
        }

        if value.is_empty() {
            return Err(invalid(format!("missing record value in '{s}'")));
        }

        Ok(Self {
            record_type,
            name: name.to_string(),
            value: value.to_string(),
            ttl,
            priority,
        })
    }
}

fn take_field<'a>(rest: &mut &'a str) -> Option<&'a str> {
    let trimmed = rest.trim_start();
    let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
    let (field, tail) = trimmed.split_at(end);
    *rest = tail;
    (!field.is_empty()).then_some(field)
}

// ============ Zone Types ============

/// A domain registered to the authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Domain name (e.g., `"example.tk"`).
    pub name: String,
    /// Numeric domain identifier scraped from the manage link.
    pub id: String,
}

// ============ Session Types ============

/// Authentication state of the shared cookie session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No login has succeeded yet, or the last call proved the session unusable.
    #[default]
    Unauthenticated,
    /// A login succeeded and nothing has contradicted it since.
    Authenticated,
}

// ============ Credential Types ============

/// Validation error for account credentials.
///
/// Returned when credential fields are missing or empty.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    MissingField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field is present but empty/whitespace-only.
    EmptyField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { label, .. } => write!(f, "Missing required field: {label}"),
            Self::EmptyField { label, .. } => write!(f, "Field must not be empty: {label}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Client-area login.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Account e-mail address.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Credentials {
    /// Construct credentials from a `HashMap`, validating required fields.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialValidationError`] if a required field is missing or empty.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self, CredentialValidationError> {
        Ok(Self {
            username: Self::get_required_field(map, "username", "Username")?,
            password: Self::get_required_field(map, "password", "Password")?,
        })
    }

    /// Validate that both fields are non-empty.
    pub fn validate(&self) -> Result<(), CredentialValidationError> {
        let map: HashMap<String, String> = [
            ("username".to_string(), self.username.clone()),
            ("password".to_string(), self.password.clone()),
        ]
        .into();
        Self::from_map(&map).map(|_| ())
    }

    /// Obtain required fields from `HashMap` and verify that it is not empty
    fn get_required_field(
        map: &HashMap<String, String>,
        key: &str,
        label: &str,
    ) -> Result<String, CredentialValidationError> {
        match map.get(key) {
            None => Err(CredentialValidationError::MissingField {
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) => Ok(v.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    // ============ Record equality ============

    #[test]
    fn absent_and_zero_priority_are_equal() {
        let a = Record::new(RecordType::A, "www", "1.1.1.1", 300);
        let b = Record::new(RecordType::A, "www", "1.1.1.1", 300).with_priority(0);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn ttl_difference_breaks_equality() {
        let a = Record::new(RecordType::A, "www", "1.1.1.1", 300);
        let b = Record::new(RecordType::A, "www", "1.1.1.1", 600);
        assert_ne!(a, b);
        assert!(a.same_slot(&b));
    }

    // ============ Record text form ============

    #[test]
    fn parse_a_record() {
        let res: Result<Record, _> = "A www 3600 1.2.3.4".parse();
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(rec) = res else {
            return;
        };
        assert_eq!(rec, Record::new(RecordType::A, "www", "1.2.3.4", 3600));
    }

    #[test]
    fn parse_mx_record_with_priority() {
        let res: Result<Record, _> = "mx @ 300 mail.example.tk 10".parse();
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(rec) = res else {
            return;
        };
        assert_eq!(rec.record_type, RecordType::Mx);
        assert_eq!(rec.name, "");
        assert_eq!(rec.value, "mail.example.tk");
        assert_eq!(rec.priority, Some(10));
    }

    #[test]
    fn parse_txt_keeps_spaces_in_value() {
        let res: Result<Record, _> = "TXT @ 300 v=spf1 include:example.tk -all".parse();
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(rec) = res else {
            return;
        };
        assert_eq!(rec.value, "v=spf1 include:example.tk -all");
        assert_eq!(rec.priority, None);
    }

    #[test]
    fn parse_rejects_unknown_type() {
        let res: Result<Record, _> = "SRV _sip 300 target".parse();
        assert!(matches!(
            res,
            Err(ProviderError::InvalidParameter { ref param, .. }) if param == "type"
        ));
    }

    #[test]
    fn parse_rejects_bad_ttl_and_missing_value() {
        assert!("A www soon 1.2.3.4".parse::<Record>().is_err());
        assert!("A www 300".parse::<Record>().is_err());
    }

    #[test]
    fn display_matches_parse_form() {
        let rec = Record::new(RecordType::Mx, "", "mx.example.tk", 300).with_priority(5);
        assert_eq!(rec.to_string(), "MX @ 300 mx.example.tk 5");
        let a = Record::new(RecordType::A, "www", "1.2.3.4", 600);
        assert_eq!(a.to_string(), "A www 600 1.2.3.4");
    }

    #[test]
    fn record_serializes_type_uppercase() {
        let rec = Record::new(RecordType::Aaaa, "v6", "::1", 300);
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"type\":\"AAAA\""));
        assert!(!json.contains("priority"));
    }

    // ============ Credentials ============

    #[test]
    fn credentials_from_map() {
        let map: HashMap<String, String> = [
            ("username".to_string(), "me@example.com".to_string()),
            ("password".to_string(), "hunter2".to_string()),
        ]
        .into();
        let res = Credentials::from_map(&map);
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(cred) = res else {
            return;
        };
        assert_eq!(cred.username, "me@example.com");
        assert!(!format!("{cred:?}").contains("hunter2"));
    }

    #[test]
    fn credentials_missing_and_empty_fields() {
        let map: HashMap<String, String> =
            [("username".to_string(), "me@example.com".to_string())].into();
        assert!(matches!(
            Credentials::from_map(&map),
            Err(CredentialValidationError::MissingField { ref field, .. }) if field == "password"
        ));

        let cred = Credentials {
            username: "  ".to_string(),
            password: "x".to_string(),
        };
        let err = cred.validate().unwrap_err();
        assert_eq!(err.to_string(), "Field must not be empty: Username");
    }
}
