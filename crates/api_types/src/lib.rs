use serde::{Deserialize, Deserializer, Serialize};

/// Scalar the API may send either as a JSON number or as a string.
///
/// Django REST Framework renders `DecimalField` values as strings unless
/// `COERCE_DECIMAL_TO_STRING` is disabled, and primary keys may be integers
/// or UUIDs, so both shapes are accepted and kept as text.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Text(String),
    Number(serde_json::Number),
}

impl NumberOrText {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

/// Opaque resource identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        NumberOrText::deserialize(deserializer).map(|raw| Self(raw.into_text()))
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decimal amount exactly as the server wrote it (e.g. `"40.50"` or `40.5`).
///
/// Conversion into minor units is left to the consumer so that no precision is
/// lost through `f64`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Amount(String);

impl Amount {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        NumberOrText::deserialize(deserializer).map(|raw| Self(raw.into_text()))
    }
}

pub mod transaction {
    use chrono::NaiveDate;

    use super::*;

    pub const UNCATEGORIZED: &str = "Uncategorized";

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum TransactionType {
        Income,
        Expense,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CategoryRef {
        #[serde(default)]
        pub id: Option<Identifier>,
        pub name: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Transaction {
        pub id: Identifier,
        #[serde(default)]
        pub title: String,
        /// Non-negative magnitude; `kind` carries the direction.
        pub amount: Amount,
        #[serde(rename = "type")]
        pub kind: TransactionType,
        #[serde(default)]
        pub category: Option<CategoryRef>,
        /// Calendar date of the transaction.
        #[serde(deserialize_with = "calendar_date::deserialize")]
        pub date: NaiveDate,
    }

    impl Transaction {
        pub fn category_name(&self) -> &str {
            self.category
                .as_ref()
                .map(|c| c.name.as_str())
                .unwrap_or(UNCATEGORIZED)
        }
    }

    /// Query string for `GET /transactions/`.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct TransactionQuery {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub limit: Option<u32>,
    }

    /// Paginated list envelope (`{count, next, previous, results}`).
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct TransactionPage {
        #[serde(default)]
        pub count: Option<u64>,
        #[serde(default)]
        pub next: Option<String>,
        #[serde(default)]
        pub previous: Option<String>,
        pub results: Vec<Transaction>,
    }

    /// Lenient date decoding for the `date` field.
    ///
    /// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (the date is taken in the
    /// timestamp's own offset) and naive `YYYY-MM-DDTHH:MM:SS` timestamps.
    pub mod calendar_date {
        use chrono::{DateTime, NaiveDate, NaiveDateTime};
        use serde::{Deserialize, Deserializer};

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
            let raw = String::deserialize(deserializer)?;
            parse(&raw).map_err(serde::de::Error::custom)
        }

        pub fn parse(raw: &str) -> Result<NaiveDate, String> {
            let raw = raw.trim();
            if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                return Ok(date);
            }
            if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
                return Ok(dt.date_naive());
            }
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|dt| dt.date())
                .map_err(|_| format!("invalid date: {raw}"))
        }
    }
}

pub mod auth {
    use super::*;

    /// Body of `POST /users/`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub email: String,
        pub phone: String,
        pub first_name: String,
        pub last_name: String,
        pub password: String,
    }

    /// Whatever the server echoes back after registration.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct UserView {
        pub id: Option<Identifier>,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub first_name: Option<String>,
        pub last_name: Option<String>,
    }

    /// Body of `POST /token/`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Credentials {
        pub email: String,
        pub password: String,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct TokenPair {
        pub access: Option<String>,
        pub refresh: Option<String>,
    }

    /// Body of `POST /password-reset/`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct PasswordResetRequest {
        pub email: String,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct PasswordResetAck {
        pub detail: Option<String>,
    }
}

pub mod error {
    use serde_json::{Map, Value};

    use super::*;

    /// Error payload returned by the API.
    ///
    /// Either `{"detail": "..."}` or a field map such as
    /// `{"email": ["user with this email already exists."]}`.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ErrorBody(pub Map<String, Value>);

    impl ErrorBody {
        pub fn detail(&self) -> Option<&str> {
            self.0.get("detail").and_then(Value::as_str)
        }

        /// First message of the first field, in server order.
        pub fn first_field_error(&self) -> Option<&str> {
            match self.0.values().next()? {
                Value::String(message) => Some(message.as_str()),
                Value::Array(items) => items.first().and_then(Value::as_str),
                _ => None,
            }
        }

        /// `detail` if present, otherwise the first field error.
        pub fn message(&self) -> Option<&str> {
            self.detail().or_else(|| self.first_field_error())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        error::ErrorBody,
        transaction::{TransactionPage, TransactionType, UNCATEGORIZED},
    };
    use chrono::NaiveDate;

    #[test]
    fn page_accepts_string_and_number_amounts() {
        let page: TransactionPage = serde_json::from_str(
            r#"{
                "count": 2,
                "next": null,
                "previous": null,
                "results": [
                    {"id": 1, "title": "Salary", "amount": "1200.00", "type": "income",
                     "category": {"id": 3, "name": "Job"}, "date": "2026-10-01"},
                    {"id": "a1", "title": "Lunch", "amount": 12.5, "type": "expense",
                     "category": {"name": "Food"}, "date": "2026-10-02T13:05:00+02:00"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].amount.as_str(), "1200.00");
        assert_eq!(page.results[0].id.as_str(), "1");
        assert_eq!(page.results[1].amount.as_str(), "12.5");
        assert_eq!(page.results[1].kind, TransactionType::Expense);
        assert_eq!(
            page.results[1].date,
            NaiveDate::from_ymd_opt(2026, 10, 2).unwrap()
        );
    }

    #[test]
    fn timestamp_keeps_its_own_offset_date() {
        let page: TransactionPage = serde_json::from_str(
            r#"{"results": [{"id": 9, "amount": "1", "type": "income",
                "date": "2026-03-31T23:30:00-05:00"}]}"#,
        )
        .unwrap();
        assert_eq!(
            page.results[0].date,
            NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()
        );
        assert_eq!(page.results[0].category_name(), UNCATEGORIZED);
    }

    #[test]
    fn rejects_garbage_date() {
        let res = serde_json::from_str::<TransactionPage>(
            r#"{"results": [{"id": 9, "amount": "1", "type": "income", "date": "yesterday"}]}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn error_body_prefers_detail() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"email": ["taken"], "detail": "No active account"}"#)
                .unwrap();
        assert_eq!(body.message(), Some("No active account"));
    }

    #[test]
    fn error_body_falls_back_to_first_field_in_server_order() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"phone": ["Enter a valid phone."], "email": ["user with this email already exists."]}"#,
        )
        .unwrap();
        assert_eq!(body.detail(), None);
        assert_eq!(body.message(), Some("Enter a valid phone."));
    }

    #[test]
    fn empty_error_body_has_no_message() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.message(), None);
    }
}
