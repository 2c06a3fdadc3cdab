//! Payment transactions, read-only in the console.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Pending,
    #[serde(alias = "success", alias = "succeeded", alias = "paid")]
    Completed,
    Failed,
    Refunded,
    #[serde(other)]
    Unknown,
}

impl TransactionStatus {
    pub const FILTERABLE: [TransactionStatus; 4] = [
        TransactionStatus::Pending,
        TransactionStatus::Completed,
        TransactionStatus::Failed,
        TransactionStatus::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Refunded => "refunded",
            TransactionStatus::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Completed => "Completed",
            TransactionStatus::Failed => "Failed",
            TransactionStatus::Refunded => "Refunded",
            TransactionStatus::Unknown => "Unknown",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::FILTERABLE
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub user: UserSummary,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default, alias = "gateway")]
    pub provider: Option<String>,
    #[serde(default, alias = "transactionId", alias = "paymentId")]
    pub reference: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_currency() -> String {
    "INR".to_string()
}

impl Transaction {
    pub fn formatted_amount(&self) -> String {
        format_amount(self.amount, &self.currency)
    }
}

/// `1234.5, "USD"` → `"USD 1,234.50"`.
pub fn format_amount(amount: f64, currency: &str) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if negative { "-" } else { "" };
    format!("{currency} {sign}{grouped}.{:02}", cents % 100)
}

/// Sum of completed transactions.
pub fn completed_total(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|t| t.status == TransactionStatus::Completed)
        .map(|t| t.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_aliases() {
        let t: Transaction = serde_json::from_value(json!({
            "_id": "t1",
            "amount": 499.0,
            "status": "success",
            "transactionId": "pay_123"
        }))
        .unwrap();
        assert_eq!(t.status, TransactionStatus::Completed);
        assert_eq!(t.reference.as_deref(), Some("pay_123"));
        assert_eq!(t.currency, "INR");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1234.5, "USD"), "USD 1,234.50");
        assert_eq!(format_amount(0.0, "INR"), "INR 0.00");
        assert_eq!(format_amount(1_000_000.0, "EUR"), "EUR 1,000,000.00");
        assert_eq!(format_amount(-12.5, "USD"), "USD -12.50");
    }

    #[test]
    fn test_completed_total_ignores_other_statuses() {
        let mk = |amount: f64, status: TransactionStatus| Transaction {
            id: String::new(),
            user: UserSummary::default(),
            amount,
            currency: "INR".into(),
            status,
            provider: None,
            reference: None,
            description: None,
            created_at: None,
        };
        let list = vec![
            mk(100.0, TransactionStatus::Completed),
            mk(50.0, TransactionStatus::Failed),
            mk(25.5, TransactionStatus::Completed),
        ];
        assert_eq!(completed_total(&list), 125.5);
    }
}
