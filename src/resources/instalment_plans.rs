//! Instalment plan query resource.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use super::Resource;
use crate::{
    adapter::{HttpMethod, build_query_path},
    error::Result,
};

/// One instalment plan offered for a purchase amount.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalmentPlan {
    /// Number of monthly rates.
    #[serde(default)]
    pub number_of_rates: Option<u32>,
    /// Effective yearly interest rate in percent.
    #[serde(default)]
    pub effective_interest_rate: Option<f64>,
    /// Nominal yearly interest rate in percent.
    #[serde(default)]
    pub nominal_interest_rate: Option<f64>,
    /// Purchase amount plus interest.
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    /// Amount of each monthly rate.
    #[serde(default)]
    pub monthly_rate: Option<Decimal>,
    /// Amount of the final rate.
    #[serde(default)]
    pub last_rate: Option<Decimal>,
}

/// Query for the instalment plans available for an amount.
///
/// Fetched via GET with query parameters under the instalment payment
/// type; never created or updated.
#[derive(Debug, Clone)]
pub struct InstalmentPlans {
    /// Purchase amount to finance.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Effective yearly interest rate in percent.
    pub effective_interest: Decimal,
    /// Order date the plans are calculated for.
    pub order_date: Option<NaiveDate>,
    /// Plans returned by the gateway.
    pub plans: Vec<InstalmentPlan>,
}

impl InstalmentPlans {
    /// Creates a plans query.
    #[must_use]
    pub fn new(
        amount: Decimal,
        currency: impl Into<String>,
        effective_interest: Decimal,
        order_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            amount,
            currency: currency.into(),
            effective_interest,
            order_date,
            plans: Vec::new(),
        }
    }
}

impl Resource for InstalmentPlans {
    fn resource_path(&self) -> String {
        let amount = self.amount.to_string();
        let effective_interest = self.effective_interest.to_string();
        let mut params = vec![
            ("amount", amount.as_str()),
            ("currency", self.currency.as_str()),
            ("effectiveInterest", effective_interest.as_str()),
        ];
        let order_date = self.order_date.map(|d| d.format("%Y-%m-%d").to_string());
        if let Some(order_date) = &order_date {
            params.push(("orderDate", order_date.as_str()));
        }
        build_query_path("types/hire-purchase-direct-debit/plans", &params)
    }

    fn id(&self) -> Option<&str> {
        None
    }

    fn set_id(&mut self, _id: String) {}

    fn expose(&self) -> Result<Value> {
        Ok(Value::Object(serde_json::Map::new()))
    }

    fn handle_response(&mut self, body: &Value, _method: HttpMethod) {
        if let Some(plans) = body.get("plans") {
            if let Ok(parsed) = serde_json::from_value(plans.clone()) {
                self.plans = parsed;
            }
        }
    }
}
