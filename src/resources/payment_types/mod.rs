//! Payment types: the payment methods a transaction can run on.
//!
//! Each type is created under `types/<kebab-case-type-name>` and afterwards
//! referenced by its id (`s-crd-…`, `p-sdd-…`). The short code embedded in
//! the id identifies the kind, which is how a type fetched by id gets
//! dispatched to the right variant.

use serde_json::Value;

use super::{Resource, json};
use crate::{
    adapter::HttpMethod,
    error::{MgwError, Result},
};

mod card;
mod direct_debit;
mod simple;

pub use card::Card;
pub use direct_debit::{DirectDebit, HirePurchaseDirectDebit};
pub use simple::{Eps, Ideal, Paypal};

/// Per-kind data of a payment type.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentTypeVariant {
    /// Credit or debit card.
    Card(Card),
    /// SEPA direct debit.
    SepaDirectDebit(DirectDebit),
    /// SEPA direct debit with payment guarantee.
    SepaDirectDebitGuaranteed(DirectDebit),
    /// Invoice (pay after delivery).
    Invoice,
    /// Invoice with payment guarantee.
    InvoiceGuaranteed,
    /// Factored invoice.
    InvoiceFactoring,
    /// Sofort bank transfer redirect.
    Sofort,
    /// Giropay redirect.
    Giropay,
    /// Przelewy24 redirect.
    Przelewy24,
    /// PayPal wallet.
    Paypal(Paypal),
    /// iDEAL bank redirect.
    Ideal(Ideal),
    /// EPS bank redirect.
    Eps(Eps),
    /// Alipay wallet.
    Alipay,
    /// WeChat Pay wallet.
    Wechatpay,
    /// Instalment purchase backed by direct debit.
    HirePurchaseDirectDebit(HirePurchaseDirectDebit),
}

impl PaymentTypeVariant {
    /// Name of the variant as written in this crate, the source of the
    /// kebab-case wire path.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Card(_) => "Card",
            Self::SepaDirectDebit(_) => "SepaDirectDebit",
            Self::SepaDirectDebitGuaranteed(_) => "SepaDirectDebitGuaranteed",
            Self::Invoice => "Invoice",
            Self::InvoiceGuaranteed => "InvoiceGuaranteed",
            Self::InvoiceFactoring => "InvoiceFactoring",
            Self::Sofort => "Sofort",
            Self::Giropay => "Giropay",
            Self::Przelewy24 => "Przelewy24",
            Self::Paypal(_) => "Paypal",
            Self::Ideal(_) => "Ideal",
            Self::Eps(_) => "Eps",
            Self::Alipay => "Alipay",
            Self::Wechatpay => "Wechatpay",
            Self::HirePurchaseDirectDebit(_) => "HirePurchaseDirectDebit",
        }
    }

    /// Short code the gateway embeds in type ids.
    #[must_use]
    pub const fn short_code(&self) -> &'static str {
        match self {
            Self::Card(_) => "crd",
            Self::SepaDirectDebit(_) => "sdd",
            Self::SepaDirectDebitGuaranteed(_) => "ddg",
            Self::Invoice => "ivc",
            Self::InvoiceGuaranteed => "ivg",
            Self::InvoiceFactoring => "ivf",
            Self::Sofort => "sft",
            Self::Giropay => "gro",
            Self::Przelewy24 => "p24",
            Self::Paypal(_) => "ppl",
            Self::Ideal(_) => "idl",
            Self::Eps(_) => "eps",
            Self::Alipay => "ali",
            Self::Wechatpay => "wcp",
            Self::HirePurchaseDirectDebit(_) => "hdd",
        }
    }

    fn from_short_code(code: &str) -> Option<Self> {
        match code {
            "crd" => Some(Self::Card(Card::default())),
            "sdd" => Some(Self::SepaDirectDebit(DirectDebit::default())),
            "ddg" => Some(Self::SepaDirectDebitGuaranteed(DirectDebit::default())),
            "ivc" => Some(Self::Invoice),
            "ivg" => Some(Self::InvoiceGuaranteed),
            "ivf" => Some(Self::InvoiceFactoring),
            "sft" => Some(Self::Sofort),
            "gro" => Some(Self::Giropay),
            "p24" => Some(Self::Przelewy24),
            "ppl" => Some(Self::Paypal(Paypal::default())),
            "idl" => Some(Self::Ideal(Ideal::default())),
            "eps" => Some(Self::Eps(Eps::default())),
            "ali" => Some(Self::Alipay),
            "wcp" => Some(Self::Wechatpay),
            "hdd" => Some(Self::HirePurchaseDirectDebit(HirePurchaseDirectDebit::default())),
            _ => None,
        }
    }
}

/// Converts a type name like `SepaDirectDebit` to its wire form
/// `sepa-direct-debit`.
#[must_use]
pub(crate) fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// A payment method resource.
///
/// Holds the gateway-assigned id plus the per-kind data. Construct with the
/// kind helpers ([`PaymentType::card`], [`PaymentType::sofort`], …) or
/// dispatch an existing id with [`PaymentType::from_type_id`].
#[derive(Debug, Clone)]
pub struct PaymentType {
    id: Option<String>,
    /// Per-kind payment data.
    pub variant: PaymentTypeVariant,
}

impl PaymentType {
    /// Wraps variant data into a type resource.
    #[must_use]
    pub fn new(variant: PaymentTypeVariant) -> Self {
        Self { id: None, variant }
    }

    /// A card type.
    #[must_use]
    pub fn card(card: Card) -> Self {
        Self::new(PaymentTypeVariant::Card(card))
    }

    /// A SEPA direct debit type.
    #[must_use]
    pub fn sepa_direct_debit(direct_debit: DirectDebit) -> Self {
        Self::new(PaymentTypeVariant::SepaDirectDebit(direct_debit))
    }

    /// A guaranteed SEPA direct debit type.
    #[must_use]
    pub fn sepa_direct_debit_guaranteed(direct_debit: DirectDebit) -> Self {
        Self::new(PaymentTypeVariant::SepaDirectDebitGuaranteed(direct_debit))
    }

    /// An invoice type.
    #[must_use]
    pub fn invoice() -> Self {
        Self::new(PaymentTypeVariant::Invoice)
    }

    /// A guaranteed invoice type.
    #[must_use]
    pub fn invoice_guaranteed() -> Self {
        Self::new(PaymentTypeVariant::InvoiceGuaranteed)
    }

    /// A factored invoice type.
    #[must_use]
    pub fn invoice_factoring() -> Self {
        Self::new(PaymentTypeVariant::InvoiceFactoring)
    }

    /// A Sofort redirect type.
    #[must_use]
    pub fn sofort() -> Self {
        Self::new(PaymentTypeVariant::Sofort)
    }

    /// A Giropay redirect type.
    #[must_use]
    pub fn giropay() -> Self {
        Self::new(PaymentTypeVariant::Giropay)
    }

    /// A Przelewy24 redirect type.
    #[must_use]
    pub fn przelewy24() -> Self {
        Self::new(PaymentTypeVariant::Przelewy24)
    }

    /// A PayPal type.
    #[must_use]
    pub fn paypal() -> Self {
        Self::new(PaymentTypeVariant::Paypal(Paypal::default()))
    }

    /// An iDEAL type for the given bank BIC.
    #[must_use]
    pub fn ideal(bic: impl Into<String>) -> Self {
        Self::new(PaymentTypeVariant::Ideal(Ideal { bic: Some(bic.into()) }))
    }

    /// An EPS type.
    #[must_use]
    pub fn eps() -> Self {
        Self::new(PaymentTypeVariant::Eps(Eps::default()))
    }

    /// An Alipay type.
    #[must_use]
    pub fn alipay() -> Self {
        Self::new(PaymentTypeVariant::Alipay)
    }

    /// A WeChat Pay type.
    #[must_use]
    pub fn wechatpay() -> Self {
        Self::new(PaymentTypeVariant::Wechatpay)
    }

    /// An instalment type.
    #[must_use]
    pub fn hire_purchase_direct_debit(data: HirePurchaseDirectDebit) -> Self {
        Self::new(PaymentTypeVariant::HirePurchaseDirectDebit(data))
    }

    /// Builds an empty type shell from a gateway type id by reading the
    /// embedded short code, e.g. `s-crd-9wmri5mdlqps` → card.
    ///
    /// # Errors
    ///
    /// Returns [`MgwError::UnexpectedResponse`] when the id carries no or
    /// an unknown short code.
    pub fn from_type_id(type_id: &str) -> Result<Self> {
        let code = type_id
            .split('-')
            .nth(1)
            .ok_or_else(|| MgwError::UnexpectedResponse(format!("malformed type id {type_id}")))?;
        let variant = PaymentTypeVariant::from_short_code(code).ok_or_else(|| {
            MgwError::UnexpectedResponse(format!("unknown payment type code {code} in {type_id}"))
        })?;
        Ok(Self { id: Some(type_id.to_owned()), variant })
    }

    /// Wire name of this type, e.g. `sepa-direct-debit`.
    #[must_use]
    pub fn type_path(&self) -> String {
        kebab_case(self.variant.name())
    }

    /// True if the type supports direct charges.
    #[must_use]
    pub const fn is_chargeable(&self) -> bool {
        !matches!(self.variant, PaymentTypeVariant::HirePurchaseDirectDebit(_))
    }

    /// True if the type supports authorize + later capture.
    #[must_use]
    pub const fn is_authorizable(&self) -> bool {
        matches!(
            self.variant,
            PaymentTypeVariant::Card(_)
                | PaymentTypeVariant::Paypal(_)
                | PaymentTypeVariant::HirePurchaseDirectDebit(_)
        )
    }

    /// True if booked transactions of this type can be canceled.
    #[must_use]
    pub const fn is_cancelable(&self) -> bool {
        !matches!(
            self.variant,
            PaymentTypeVariant::Alipay | PaymentTypeVariant::Wechatpay
        )
    }

    /// True if the type supports payouts (credit transfers to the
    /// customer).
    #[must_use]
    pub const fn is_payout_allowed(&self) -> bool {
        matches!(
            self.variant,
            PaymentTypeVariant::Card(_)
                | PaymentTypeVariant::SepaDirectDebit(_)
                | PaymentTypeVariant::SepaDirectDebitGuaranteed(_)
        )
    }

    /// Extra parameters the type contributes to its transactions' payloads.
    #[must_use]
    pub fn transaction_params(&self) -> serde_json::Map<String, Value> {
        let mut params = serde_json::Map::new();
        if let PaymentTypeVariant::HirePurchaseDirectDebit(data) = &self.variant {
            if let Some(rate) = data.effective_interest_rate {
                params.insert("effectiveInterestRate".to_owned(), serde_json::json!(rate));
            }
        }
        params
    }
}

impl Resource for PaymentType {
    fn resource_path(&self) -> String {
        format!("types/{}", self.type_path())
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn expose(&self) -> Result<Value> {
        let value = match &self.variant {
            PaymentTypeVariant::Card(card) => serde_json::to_value(card)?,
            PaymentTypeVariant::SepaDirectDebit(dd)
            | PaymentTypeVariant::SepaDirectDebitGuaranteed(dd) => serde_json::to_value(dd)?,
            PaymentTypeVariant::Paypal(paypal) => serde_json::to_value(paypal)?,
            PaymentTypeVariant::Ideal(ideal) => serde_json::to_value(ideal)?,
            PaymentTypeVariant::Eps(eps) => serde_json::to_value(eps)?,
            PaymentTypeVariant::HirePurchaseDirectDebit(data) => serde_json::to_value(data)?,
            PaymentTypeVariant::Invoice
            | PaymentTypeVariant::InvoiceGuaranteed
            | PaymentTypeVariant::InvoiceFactoring
            | PaymentTypeVariant::Sofort
            | PaymentTypeVariant::Giropay
            | PaymentTypeVariant::Przelewy24
            | PaymentTypeVariant::Alipay
            | PaymentTypeVariant::Wechatpay => Value::Object(serde_json::Map::new()),
        };
        Ok(value)
    }

    fn handle_response(&mut self, body: &Value, _method: HttpMethod) {
        match &mut self.variant {
            PaymentTypeVariant::Card(card) => card.merge_from(body),
            PaymentTypeVariant::SepaDirectDebit(dd)
            | PaymentTypeVariant::SepaDirectDebitGuaranteed(dd) => dd.merge_from(body),
            PaymentTypeVariant::Paypal(paypal) => {
                json::merge_str(&mut paypal.email, body, "email");
            }
            PaymentTypeVariant::Ideal(ideal) => json::merge_str(&mut ideal.bic, body, "bic"),
            PaymentTypeVariant::Eps(eps) => json::merge_str(&mut eps.bic, body, "bic"),
            PaymentTypeVariant::HirePurchaseDirectDebit(data) => data.merge_from(body),
            _ => {}
        }
    }
}
