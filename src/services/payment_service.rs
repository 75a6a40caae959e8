//! High-level payment operations.
//!
//! Each operation assembles the resource graph (payment type, customer,
//! basket, metadata, transaction) and delegates persistence to the
//! resource service. Linked resources passed in without an id are created
//! on the fly, then referenced by id in the transaction payload.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::instrument;

use super::ResourceService;
use crate::{
    adapter::HttpAdapter,
    error::{MgwError, Result},
    resources::{
        Authorization, Basket, Cancellation, Charge, Customer, InstalmentPlans, Metadata, Payment,
        PaymentType, Paypage, PaypageAction, Payout, Resource, Shipment,
    },
};

/// Optional pieces of an authorize/charge/payout call.
///
/// Customer, basket and metadata given here without an id are created at
/// the gateway before the transaction is sent.
#[derive(Debug, Default)]
pub struct TransactionOptions {
    /// Customer to bill.
    pub customer: Option<Customer>,
    /// Basket for risk checks and invoice payment types.
    pub basket: Option<Basket>,
    /// Metadata attached to the payment.
    pub metadata: Option<Metadata>,
    /// Merchant-side order id.
    pub order_id: Option<String>,
    /// Merchant-side invoice id.
    pub invoice_id: Option<String>,
    /// Reference text shown to the customer.
    pub payment_reference: Option<String>,
    /// Overrides the key's 3-D Secure default.
    pub card_3ds: Option<bool>,
}

/// Optional pieces of a capture on an existing payment.
#[derive(Debug, Default)]
pub struct ChargeOptions {
    /// Merchant-side order id.
    pub order_id: Option<String>,
    /// Merchant-side invoice id.
    pub invoice_id: Option<String>,
    /// Reference text shown to the customer.
    pub payment_reference: Option<String>,
}

/// Composes the gateway's payment operations out of resources and the
/// resource service.
#[derive(Debug, Clone, Copy)]
pub struct PaymentService<'a, A: HttpAdapter> {
    resources: ResourceService<'a, A>,
}

impl<'a, A: HttpAdapter> PaymentService<'a, A> {
    /// Creates a payment service on top of a resource service.
    #[must_use]
    pub fn new(resources: ResourceService<'a, A>) -> Self {
        Self { resources }
    }

    /// The underlying resource service.
    #[must_use]
    pub fn resources(&self) -> &ResourceService<'a, A> {
        &self.resources
    }

    async fn ensure_created<R: Resource>(&self, resource: Option<R>) -> Result<Option<String>> {
        let Some(mut resource) = resource else {
            return Ok(None);
        };
        if resource.id().is_none() {
            self.resources.create(&mut resource).await?;
        }
        Ok(resource.id().map(str::to_owned))
    }

    async fn link_options(
        &self,
        transaction_resources: &mut crate::resources::ResourceIds,
        options: TransactionOptions,
    ) -> Result<(Option<String>, Option<String>, Option<String>, Option<bool>)> {
        transaction_resources.customer_id = self.ensure_created(options.customer).await?;
        transaction_resources.basket_id = self.ensure_created(options.basket).await?;
        transaction_resources.metadata_id = self.ensure_created(options.metadata).await?;
        Ok((options.order_id, options.invoice_id, options.payment_reference, options.card_3ds))
    }

    /// Reserves `amount` on `payment_type` for later capture.
    ///
    /// A payment type without an id is created first. The transaction
    /// carries any special parameters the type contributes.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`MgwError::Api`].
    #[instrument(skip(self, payment_type, options), fields(currency = %currency))]
    pub async fn authorize(
        &self,
        amount: Decimal,
        currency: &str,
        payment_type: &mut PaymentType,
        return_url: &str,
        options: TransactionOptions,
    ) -> Result<Authorization> {
        if payment_type.id().is_none() {
            self.resources.create(payment_type).await?;
        }
        let type_id = payment_type
            .id()
            .ok_or(MgwError::MissingResourceId("payment type"))?
            .to_owned();

        let mut authorization = Authorization::new(amount, currency, return_url);
        authorization.special_params = payment_type.transaction_params();
        authorization.resources.type_id = Some(type_id);
        let (order_id, invoice_id, payment_reference, card_3ds) =
            self.link_options(&mut authorization.resources, options).await?;
        authorization.order_id = order_id;
        authorization.invoice_id = invoice_id;
        authorization.payment_reference = payment_reference;
        authorization.card_3ds = card_3ds;

        self.resources.create(&mut authorization).await?;
        Ok(authorization)
    }

    /// Books `amount` directly on `payment_type`.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`MgwError::Api`].
    #[instrument(skip(self, payment_type, options), fields(currency = %currency))]
    pub async fn charge(
        &self,
        amount: Decimal,
        currency: &str,
        payment_type: &mut PaymentType,
        return_url: &str,
        options: TransactionOptions,
    ) -> Result<Charge> {
        if payment_type.id().is_none() {
            self.resources.create(payment_type).await?;
        }
        let type_id = payment_type
            .id()
            .ok_or(MgwError::MissingResourceId("payment type"))?
            .to_owned();

        let mut charge = Charge::new(amount, currency, return_url);
        charge.special_params = payment_type.transaction_params();
        charge.resources.type_id = Some(type_id);
        let (order_id, invoice_id, payment_reference, card_3ds) =
            self.link_options(&mut charge.resources, options).await?;
        charge.order_id = order_id;
        charge.invoice_id = invoice_id;
        charge.payment_reference = payment_reference;
        charge.card_3ds = card_3ds;

        self.resources.create(&mut charge).await?;
        Ok(charge)
    }

    /// Captures an authorized payment, fully (`amount` of `None`) or
    /// partially.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`MgwError::Api`].
    #[instrument(skip(self, options))]
    pub async fn charge_authorization(
        &self,
        payment_id: &str,
        amount: Option<Decimal>,
        options: ChargeOptions,
    ) -> Result<Charge> {
        let payment = self.resources.fetch_payment(payment_id).await?;
        self.charge_payment(&payment, amount, options).await
    }

    /// Captures on an already-known payment without re-fetching it.
    ///
    /// # Errors
    ///
    /// Returns [`MgwError::MissingResourceId`] if `payment` has no id;
    /// gateway rejections surface as [`MgwError::Api`].
    pub async fn charge_payment(
        &self,
        payment: &Payment,
        amount: Option<Decimal>,
        options: ChargeOptions,
    ) -> Result<Charge> {
        let payment_id = payment.id().ok_or(MgwError::MissingResourceId("payment"))?;
        let mut charge = Charge::capture(payment_id, amount);
        charge.order_id = options.order_id;
        charge.invoice_id = options.invoice_id;
        charge.payment_reference = options.payment_reference;
        self.resources.create(&mut charge).await?;
        Ok(charge)
    }

    /// Cancels the authorization of a payment (reversal), fully or
    /// partially.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`MgwError::Api`].
    #[instrument(skip(self))]
    pub async fn cancel_authorization(
        &self,
        payment_id: &str,
        amount: Option<Decimal>,
    ) -> Result<Cancellation> {
        let mut cancellation = Cancellation::reversal(payment_id, amount);
        self.resources.create(&mut cancellation).await?;
        Ok(cancellation)
    }

    /// Refunds a charge, fully or partially.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`MgwError::Api`].
    #[instrument(skip(self))]
    pub async fn cancel_charge(
        &self,
        payment_id: &str,
        charge_id: &str,
        amount: Option<Decimal>,
    ) -> Result<Cancellation> {
        let mut cancellation = Cancellation::refund(payment_id, charge_id, amount);
        self.resources.create(&mut cancellation).await?;
        Ok(cancellation)
    }

    /// Credits `amount` to the customer's payment type.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`MgwError::Api`].
    #[instrument(skip(self, payment_type, options), fields(currency = %currency))]
    pub async fn payout(
        &self,
        amount: Decimal,
        currency: &str,
        payment_type: &mut PaymentType,
        return_url: &str,
        options: TransactionOptions,
    ) -> Result<Payout> {
        if payment_type.id().is_none() {
            self.resources.create(payment_type).await?;
        }
        let type_id = payment_type
            .id()
            .ok_or(MgwError::MissingResourceId("payment type"))?
            .to_owned();

        let mut payout = Payout::new(amount, currency, return_url);
        payout.resources.type_id = Some(type_id);
        let (order_id, invoice_id, payment_reference, _card_3ds) =
            self.link_options(&mut payout.resources, options).await?;
        payout.order_id = order_id;
        payout.invoice_id = invoice_id;
        payout.payment_reference = payment_reference;

        self.resources.create(&mut payout).await?;
        Ok(payout)
    }

    /// Reports the goods of `payment_id` as shipped.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`MgwError::Api`].
    #[instrument(skip(self))]
    pub async fn ship(
        &self,
        payment_id: &str,
        invoice_id: Option<String>,
        order_id: Option<String>,
    ) -> Result<Shipment> {
        let mut shipment = Shipment::new(payment_id);
        shipment.invoice_id = invoice_id;
        shipment.order_id = order_id;
        self.resources.create(&mut shipment).await?;
        Ok(shipment)
    }

    /// Initializes a hosted payment page in charge mode.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`MgwError::Api`].
    pub async fn init_pay_page_charge(
        &self,
        paypage: Paypage,
        customer: Option<Customer>,
        basket: Option<Basket>,
        metadata: Option<Metadata>,
    ) -> Result<Paypage> {
        self.init_pay_page(paypage, PaypageAction::Charge, customer, basket, metadata)
            .await
    }

    /// Initializes a hosted payment page in authorize mode.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`MgwError::Api`].
    pub async fn init_pay_page_authorize(
        &self,
        paypage: Paypage,
        customer: Option<Customer>,
        basket: Option<Basket>,
        metadata: Option<Metadata>,
    ) -> Result<Paypage> {
        self.init_pay_page(paypage, PaypageAction::Authorize, customer, basket, metadata)
            .await
    }

    /// Creates the paypage for the requested transaction mode.
    ///
    /// A fresh payment shell is attached before creation; the gateway
    /// assigns its id, and the create response handling re-fetches it so
    /// the returned paypage carries the payment's current state.
    #[instrument(skip(self, paypage, customer, basket, metadata), fields(action = ?action))]
    async fn init_pay_page(
        &self,
        mut paypage: Paypage,
        action: PaypageAction,
        customer: Option<Customer>,
        basket: Option<Basket>,
        metadata: Option<Metadata>,
    ) -> Result<Paypage> {
        paypage.action = action;
        paypage.resources.customer_id = self.ensure_created(customer).await?;
        paypage.resources.basket_id = self.ensure_created(basket).await?;
        paypage.resources.metadata_id = self.ensure_created(metadata).await?;
        if paypage.payment.is_none() {
            paypage.payment = Some(Payment::new());
        }
        self.resources.create(&mut paypage).await?;
        Ok(paypage)
    }

    /// Fetches the instalment plans available for `amount`.
    ///
    /// # Errors
    ///
    /// Gateway rejections surface as [`MgwError::Api`].
    #[instrument(skip(self), fields(currency = %currency))]
    pub async fn fetch_instalment_plans(
        &self,
        amount: Decimal,
        currency: &str,
        effective_interest: Decimal,
        order_date: Option<NaiveDate>,
    ) -> Result<InstalmentPlans> {
        let mut plans = InstalmentPlans::new(amount, currency, effective_interest, order_date);
        self.resources.fetch(&mut plans).await?;
        Ok(plans)
    }
}
