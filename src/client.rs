//! The gateway client facade.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    adapter::{HttpAdapter, ReqwestAdapter},
    config::GatewayConfig,
    error::Result,
    resources::{
        Authorization, Basket, Cancellation, Charge, Customer, InstalmentPlans, Keypair, Metadata,
        Payment, PaymentType, Paypage, Payout, Shipment,
    },
    services::{ChargeOptions, PaymentService, ResourceService, TransactionOptions},
};

/// Entry point to the gateway API.
///
/// Owns the configuration and the HTTP adapter and hands out the two
/// services; the convenience methods below cover the common operations so
/// most integrations never touch the services directly.
///
/// # Examples
///
/// ```no_run
/// use mgw_sdk::{MgwClient, resources::payment_types::Card, services::TransactionOptions};
///
/// # async fn example() -> mgw_sdk::Result<()> {
/// let client = MgwClient::new("s-priv-2a10IfKd7vN9eGh4")?;
///
/// let mut card = mgw_sdk::resources::PaymentType::card(Card::new(
///     "4711100000000000",
///     "123",
///     "12/2030",
/// ));
/// let charge = client
///     .charge(
///         "119.00".parse().unwrap(),
///         "EUR",
///         &mut card,
///         "https://shop.example/return",
///         TransactionOptions::default(),
///     )
///     .await?;
///
/// println!("charged payment {:?}", charge.payment_id());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MgwClient<A: HttpAdapter = ReqwestAdapter> {
    config: GatewayConfig,
    adapter: A,
}

impl MgwClient<ReqwestAdapter> {
    /// Creates a client for the given private key against the production
    /// endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MgwError::InvalidKey`] for malformed keys.
    pub fn new(private_key: impl Into<String>) -> Result<Self> {
        Self::with_config(GatewayConfig::new(private_key))
    }

    /// Creates a client from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed keys or base URLs.
    pub fn with_config(config: GatewayConfig) -> Result<Self> {
        config.validate()?;
        let adapter = ReqwestAdapter::with_config(&config)?;
        Ok(Self { config, adapter })
    }
}

impl<A: HttpAdapter> MgwClient<A> {
    /// Creates a client with a custom HTTP adapter.
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed keys or base URLs.
    pub fn with_adapter(config: GatewayConfig, adapter: A) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, adapter })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The resource service for direct CRUD access.
    #[must_use]
    pub fn resources(&self) -> ResourceService<'_, A> {
        ResourceService::new(&self.adapter, &self.config)
    }

    /// The payment service for transaction orchestration.
    #[must_use]
    pub fn payments(&self) -> PaymentService<'_, A> {
        PaymentService::new(self.resources())
    }

    // Transactions

    /// See [`PaymentService::authorize`].
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn authorize(
        &self,
        amount: Decimal,
        currency: &str,
        payment_type: &mut PaymentType,
        return_url: &str,
        options: TransactionOptions,
    ) -> Result<Authorization> {
        self.payments()
            .authorize(amount, currency, payment_type, return_url, options)
            .await
    }

    /// See [`PaymentService::charge`].
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn charge(
        &self,
        amount: Decimal,
        currency: &str,
        payment_type: &mut PaymentType,
        return_url: &str,
        options: TransactionOptions,
    ) -> Result<Charge> {
        self.payments()
            .charge(amount, currency, payment_type, return_url, options)
            .await
    }

    /// See [`PaymentService::charge_authorization`].
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn charge_authorization(
        &self,
        payment_id: &str,
        amount: Option<Decimal>,
        options: ChargeOptions,
    ) -> Result<Charge> {
        self.payments().charge_authorization(payment_id, amount, options).await
    }

    /// See [`PaymentService::charge_payment`].
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn charge_payment(
        &self,
        payment: &Payment,
        amount: Option<Decimal>,
        options: ChargeOptions,
    ) -> Result<Charge> {
        self.payments().charge_payment(payment, amount, options).await
    }

    /// See [`PaymentService::cancel_authorization`].
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn cancel_authorization(
        &self,
        payment_id: &str,
        amount: Option<Decimal>,
    ) -> Result<Cancellation> {
        self.payments().cancel_authorization(payment_id, amount).await
    }

    /// See [`PaymentService::cancel_charge`].
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn cancel_charge(
        &self,
        payment_id: &str,
        charge_id: &str,
        amount: Option<Decimal>,
    ) -> Result<Cancellation> {
        self.payments().cancel_charge(payment_id, charge_id, amount).await
    }

    /// See [`PaymentService::payout`].
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn payout(
        &self,
        amount: Decimal,
        currency: &str,
        payment_type: &mut PaymentType,
        return_url: &str,
        options: TransactionOptions,
    ) -> Result<Payout> {
        self.payments()
            .payout(amount, currency, payment_type, return_url, options)
            .await
    }

    /// See [`PaymentService::ship`].
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn ship(
        &self,
        payment_id: &str,
        invoice_id: Option<String>,
        order_id: Option<String>,
    ) -> Result<Shipment> {
        self.payments().ship(payment_id, invoice_id, order_id).await
    }

    // Hosted payment page

    /// See [`PaymentService::init_pay_page_charge`].
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn init_pay_page_charge(
        &self,
        paypage: Paypage,
        customer: Option<Customer>,
        basket: Option<Basket>,
        metadata: Option<Metadata>,
    ) -> Result<Paypage> {
        self.payments()
            .init_pay_page_charge(paypage, customer, basket, metadata)
            .await
    }

    /// See [`PaymentService::init_pay_page_authorize`].
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn init_pay_page_authorize(
        &self,
        paypage: Paypage,
        customer: Option<Customer>,
        basket: Option<Basket>,
        metadata: Option<Metadata>,
    ) -> Result<Paypage> {
        self.payments()
            .init_pay_page_authorize(paypage, customer, basket, metadata)
            .await
    }

    /// See [`PaymentService::fetch_instalment_plans`].
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn fetch_instalment_plans(
        &self,
        amount: Decimal,
        currency: &str,
        effective_interest: Decimal,
        order_date: Option<NaiveDate>,
    ) -> Result<InstalmentPlans> {
        self.payments()
            .fetch_instalment_plans(amount, currency, effective_interest, order_date)
            .await
    }

    // Resource CRUD

    /// Creates a payment type at the gateway.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn create_payment_type(&self, payment_type: &mut PaymentType) -> Result<()> {
        self.resources().create(payment_type).await
    }

    /// Fetches a payment type by id.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn fetch_payment_type(&self, type_id: &str) -> Result<PaymentType> {
        self.resources().fetch_payment_type(type_id).await
    }

    /// Fetches a payment by id.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn fetch_payment(&self, payment_id: &str) -> Result<Payment> {
        self.resources().fetch_payment(payment_id).await
    }

    /// Fetches a single charge of a payment.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn fetch_charge(&self, payment_id: &str, charge_id: &str) -> Result<Charge> {
        self.resources().fetch_charge(payment_id, charge_id).await
    }

    /// Creates a customer.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn create_customer(&self, customer: &mut Customer) -> Result<()> {
        self.resources().create(customer).await
    }

    /// Fetches a customer by gateway id.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn fetch_customer(&self, customer_id: &str) -> Result<Customer> {
        self.resources().fetch_customer(customer_id).await
    }

    /// Updates a customer.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn update_customer(&self, customer: &mut Customer) -> Result<()> {
        self.resources().update(customer).await
    }

    /// Deletes a customer.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn delete_customer(&self, customer: &mut Customer) -> Result<()> {
        self.resources().delete(customer).await
    }

    /// Creates a basket.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn create_basket(&self, basket: &mut Basket) -> Result<()> {
        self.resources().create(basket).await
    }

    /// Fetches a basket by id.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn fetch_basket(&self, basket_id: &str) -> Result<Basket> {
        self.resources().fetch_basket(basket_id).await
    }

    /// Updates a basket.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn update_basket(&self, basket: &mut Basket) -> Result<()> {
        self.resources().update(basket).await
    }

    /// Creates a metadata resource.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn create_metadata(&self, metadata: &mut Metadata) -> Result<()> {
        self.resources().create(metadata).await
    }

    /// Fetches the keypair information for the configured private key.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`crate::MgwError::Api`].
    pub async fn fetch_keypair(&self) -> Result<Keypair> {
        self.resources().fetch_keypair().await
    }
}
