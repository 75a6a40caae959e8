//! Direct-debit based payment types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::resources::json;

/// Bank account data for SEPA direct debit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectDebit {
    /// IBAN of the account to debit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    /// BIC of the account's bank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,
    /// Account holder name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder: Option<String>,
}

impl DirectDebit {
    /// Creates direct debit data from an IBAN.
    #[must_use]
    pub fn new(iban: impl Into<String>) -> Self {
        Self { iban: Some(iban.into()), ..Self::default() }
    }

    pub(crate) fn merge_from(&mut self, body: &Value) {
        json::merge_str(&mut self.iban, body, "iban");
        json::merge_str(&mut self.bic, body, "bic");
        json::merge_str(&mut self.holder, body, "holder");
    }
}

/// Instalment purchase backed by direct debit.
///
/// Carries the account data plus the instalment terms the customer chose
/// from the fetched [plans](crate::resources::InstalmentPlans).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HirePurchaseDirectDebit {
    /// IBAN of the account to debit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    /// BIC of the account's bank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,
    /// Account holder name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder: Option<String>,
    /// Number of instalment rates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_rates: Option<u32>,
    /// Effective yearly interest rate in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_interest_rate: Option<f64>,
    /// Nominal yearly interest rate in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nominal_interest_rate: Option<f64>,
    /// Cash value of the purchase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_purchase_amount: Option<Decimal>,
    /// Interest over the full term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_interest_amount: Option<Decimal>,
    /// Purchase amount plus interest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
    /// Amount of each monthly rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_rate: Option<Decimal>,
    /// Date of the purchase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_purchase: Option<NaiveDate>,
}

impl HirePurchaseDirectDebit {
    pub(crate) fn merge_from(&mut self, body: &Value) {
        json::merge_str(&mut self.iban, body, "iban");
        json::merge_str(&mut self.bic, body, "bic");
        json::merge_str(&mut self.holder, body, "holder");
        json::merge_u32(&mut self.number_of_rates, body, "numberOfRates");
        json::merge_decimal(&mut self.total_purchase_amount, body, "totalPurchaseAmount");
        json::merge_decimal(&mut self.total_interest_amount, body, "totalInterestAmount");
        json::merge_decimal(&mut self.total_amount, body, "totalAmount");
        json::merge_decimal(&mut self.monthly_rate, body, "monthlyRate");

        if let Some(rate) = body.get("effectiveInterestRate").and_then(Value::as_f64) {
            self.effective_interest_rate = Some(rate);
        }
        if let Some(rate) = body.get("nominalInterestRate").and_then(Value::as_f64) {
            self.nominal_interest_rate = Some(rate);
        }
        if let Some(date) = body.get("dayOfPurchase").and_then(Value::as_str) {
            if let Ok(parsed) = date.parse() {
                self.day_of_purchase = Some(parsed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_direct_debit_serialize() {
        let mut dd = DirectDebit::new("DE89370400440532013000");
        dd.holder = Some("Max Mustermann".to_owned());
        assert_eq!(
            serde_json::to_value(&dd).unwrap(),
            json!({"iban": "DE89370400440532013000", "holder": "Max Mustermann"})
        );
    }

    #[test]
    fn test_direct_debit_merge() {
        let mut dd = DirectDebit::new("DE89370400440532013000");
        dd.merge_from(&json!({"iban": "DE89***3000", "bic": "COBADEFFXXX"}));
        assert_eq!(dd.iban.as_deref(), Some("DE89***3000"));
        assert_eq!(dd.bic.as_deref(), Some("COBADEFFXXX"));
    }

    #[test]
    fn test_hire_purchase_merge() {
        let mut hdd = HirePurchaseDirectDebit::default();
        hdd.merge_from(&json!({
            "iban": "DE89370400440532013000",
            "numberOfRates": 6,
            "effectiveInterestRate": 4.99,
            "totalAmount": 105.73,
            "monthlyRate": 17.62,
            "dayOfPurchase": "2026-08-07"
        }));

        assert_eq!(hdd.number_of_rates, Some(6));
        assert_eq!(hdd.effective_interest_rate, Some(4.99));
        assert_eq!(hdd.monthly_rate, Some(Decimal::try_from(17.62).unwrap()));
        assert_eq!(hdd.day_of_purchase, NaiveDate::from_ymd_opt(2026, 8, 7));
    }

    #[test]
    fn test_hire_purchase_serializes_terms() {
        let hdd = HirePurchaseDirectDebit {
            iban: Some("DE89370400440532013000".to_owned()),
            number_of_rates: Some(6),
            effective_interest_rate: Some(4.99),
            ..HirePurchaseDirectDebit::default()
        };
        let value = serde_json::to_value(&hdd).unwrap();
        assert_eq!(value["numberOfRates"], 6);
        assert_eq!(value["effectiveInterestRate"], 4.99);
        assert!(value.get("monthlyRate").is_none());
    }
}
