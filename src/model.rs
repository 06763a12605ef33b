use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DraftError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    pub fn from_form_value(value: &str) -> Self {
        match value {
            "income" => TransactionType::Income,
            _ => TransactionType::Expense,
        }
    }
}

/// A single income or expense record.
///
/// `id` is the creation time in milliseconds and is unique within the
/// repository (see [crate::repository::TransactionRepository::next_id]).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    /// `None` when the stored date was blank or unreadable.
    #[serde(
        default,
        deserialize_with = "deserialize_date",
        serialize_with = "serialize_date"
    )]
    pub date: Option<NaiveDate>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredAmount {
    Number(f64),
    Text(String),
}

/// Older data stored the raw form text, so amounts may arrive as strings.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match StoredAmount::deserialize(deserializer)? {
        StoredAmount::Number(value) => value,
        StoredAmount::Text(text) => match text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                tracing::warn!("Stored amount {text:?} is not a number, loading it as 0");
                0.0
            }
        },
    };

    Ok(amount)
}

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A cleared date input used to be saved as `""`, so a record may carry a
/// date that does not parse. It loads as undated instead of failing the list.
fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    match NaiveDate::parse_from_str(text, DATE_FORMAT) {
        Ok(date) => Ok(Some(date)),
        Err(err) => {
            tracing::warn!("Stored date {text:?} is unreadable ({err}), loading it as undated");
            Ok(None)
        }
    }
}

fn serialize_date<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
        None => serializer.serialize_str(""),
    }
}

/// Raw field values from the transaction entry form.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionDraft {
    pub amount: String,
    pub kind: TransactionType,
    pub category: String,
    pub date: String,
}

impl TransactionDraft {
    /// Validate the form fields and build a transaction with the given id.
    pub fn into_transaction(self, id: i64) -> Result<Transaction, DraftError> {
        let amount_text = self.amount.trim();
        if amount_text.is_empty() {
            return Err(DraftError::MissingField("amount"));
        }

        let amount = amount_text
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or(DraftError::InvalidAmount)?;
        if amount < 0.0 {
            return Err(DraftError::NegativeAmount);
        }

        let category = self.category.trim();
        if category.is_empty() {
            return Err(DraftError::MissingField("category"));
        }

        let date_text = self.date.trim();
        if date_text.is_empty() {
            return Err(DraftError::MissingField("date"));
        }
        let date = NaiveDate::parse_from_str(date_text, DATE_FORMAT)
            .map_err(|_| DraftError::InvalidDate)?;

        Ok(Transaction {
            id,
            amount,
            kind: self.kind,
            category: category.to_string(),
            date: Some(date),
        })
    }
}
