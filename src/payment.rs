//! Payment redirect flow for Ampora
//!
//! On session end the client asks the backend for a payment-initialization
//! hash, then constructs the redirect form submitted to the external gateway.
//! The gateway protocol (field names and their order) is fixed by the
//! provider; the gateway confirms payment to the backend, never to this
//! client.

use crate::config::PaymentConfig;
use crate::error::{AmporaError, Result};
use crate::logging::get_logger;
use serde::{Deserialize, Serialize};

/// Payment-initialization request sent to the backend hash endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HashRequest {
    pub order_id: String,

    /// Amount already formatted to two decimals
    pub amount: String,

    pub currency: String,
}

/// Backend response carrying the merchant id and integrity hash
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashResponse {
    #[serde(default)]
    pub merchant_id: String,

    #[serde(default)]
    pub hash: String,
}

/// Customer details the gateway requires on its checkout page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
}

/// The redirect form to submit to the gateway: target URL plus hidden
/// fields in the order the provider expects them.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutForm {
    pub action: String,
    pub fields: Vec<(String, String)>,
}

impl CheckoutForm {
    /// Value of a field by name, if present
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Generate a charging order id from the current time
pub fn charging_order_id() -> String {
    format!("CHARGING_{}", chrono::Utc::now().timestamp_millis())
}

/// Format a bill amount the way the gateway expects it
pub fn format_amount(bill: f64) -> String {
    format!("{:.2}", bill)
}

/// Build the gateway redirect form from an issued hash.
///
/// `charging_payment_id` travels in `custom_1` so the backend can correlate
/// the gateway's server-to-server notification with the charging session.
pub fn build_checkout_form(
    config: &PaymentConfig,
    order_id: &str,
    amount: &str,
    charging_payment_id: &str,
    customer: &Customer,
    issued: &HashResponse,
) -> CheckoutForm {
    let f = |k: &str, v: &str| (k.to_string(), v.to_string());
    CheckoutForm {
        action: config.checkout_url.clone(),
        fields: vec![
            f("merchant_id", &issued.merchant_id),
            f("return_url", &config.return_url),
            f("cancel_url", &config.cancel_url),
            f("notify_url", &config.notify_url),
            f("order_id", order_id),
            f("items", &config.item_label),
            f("currency", &config.currency),
            f("amount", amount),
            f("custom_1", charging_payment_id),
            f("first_name", &customer.first_name),
            f("last_name", &customer.last_name),
            f("email", &customer.email),
            f("phone", &customer.phone),
            f("address", &customer.address),
            f("city", &customer.city),
            f("country", &customer.country),
            f("hash", &issued.hash),
        ],
    }
}

/// Client for the backend payment-initialization endpoint
pub struct PaymentClient {
    base_url: String,
    config: PaymentConfig,
    client: reqwest::Client,
    logger: crate::logging::StructuredLogger,
}

impl PaymentClient {
    pub fn new(base_url: String, config: PaymentConfig, timeout_secs: u64) -> Result<Self> {
        let logger = get_logger("payment");
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            base_url,
            config,
            client,
            logger,
        })
    }

    /// Request an integrity hash for one checkout
    pub async fn request_hash(&self, order_id: &str, amount: &str) -> Result<HashResponse> {
        let url = format!(
            "{}/api/payment/payhere/hash",
            self.base_url.trim_end_matches('/')
        );
        let body = HashRequest {
            order_id: order_id.to_string(),
            amount: amount.to_string(),
            currency: self.config.currency.clone(),
        };

        let resp = self.client.post(&url).json(&body).send().await?;
        if !resp.status().is_success() {
            return Err(AmporaError::payment(format!(
                "Hash endpoint returned {}",
                resp.status()
            )));
        }

        let issued: HashResponse = resp.json().await?;
        if issued.hash.is_empty() {
            return Err(AmporaError::payment("Backend issued an empty hash"));
        }
        Ok(issued)
    }

    /// Full checkout preparation: order id, hash request, redirect form
    pub async fn init_checkout(
        &self,
        charging_payment_id: &str,
        bill: f64,
        customer: &Customer,
    ) -> Result<CheckoutForm> {
        let order_id = charging_order_id();
        let amount = format_amount(bill);
        let issued = self.request_hash(&order_id, &amount).await?;
        self.logger.info(&format!(
            "Prepared checkout {} for {} {}",
            order_id, amount, self.config.currency
        ));
        Ok(build_checkout_form(
            &self.config,
            &order_id,
            &amount,
            charging_payment_id,
            customer,
            &issued,
        ))
    }
}
