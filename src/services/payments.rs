use crate::{error::Result, types::TripItinerary};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Success,
    Declined,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub status: PaymentStatus,
    pub transaction_id: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub status: String,
    pub reference: String,
    pub ticket_count: usize,
}

/// Payment and inventory booking provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync + std::fmt::Debug {
    async fn process_payment(&self, amount: f64, details: &Value) -> Result<PaymentReceipt>;

    async fn book(&self, itinerary: &TripItinerary) -> Result<BookingConfirmation>;
}

/// Always approves; references are random.
#[derive(Debug, Default, Clone)]
pub struct MockPaymentGateway;

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self
    }
}

pub(crate) fn short_reference(prefix: &str) -> String {
    let raw = uuid::Uuid::new_v4().simple().to_string();
    format!("{}{}", prefix, &raw[..8])
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn process_payment(&self, amount: f64, _details: &Value) -> Result<PaymentReceipt> {
        Ok(PaymentReceipt {
            status: PaymentStatus::Success,
            transaction_id: short_reference("TXN_"),
            amount,
            timestamp: Utc::now(),
        })
    }

    async fn book(&self, itinerary: &TripItinerary) -> Result<BookingConfirmation> {
        Ok(BookingConfirmation {
            status: "confirmed".to_string(),
            reference: short_reference("EMT_"),
            ticket_count: itinerary.items.len(),
        })
    }
}
