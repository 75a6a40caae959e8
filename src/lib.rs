//! Rust client SDK for the MGW payment gateway REST API.
//!
//! The gateway models a checkout as a [`Payment`](resources::Payment) that
//! groups transactions (authorize, charge, cancel, shipment, payout) run on
//! a [`PaymentType`](resources::PaymentType). This crate mirrors those
//! resources as plain data structs, serializes them to the gateway's JSON
//! contract, and exposes convenience methods for every endpoint.
//!
//! # Quick start
//!
//! ```no_run
//! use mgw_sdk::{
//!     MgwClient,
//!     resources::{PaymentType, payment_types::Card},
//!     services::TransactionOptions,
//! };
//!
//! # async fn example() -> mgw_sdk::Result<()> {
//! let client = MgwClient::new("s-priv-2a10IfKd7vN9eGh4")?;
//!
//! // Create a card type and authorize an amount on it.
//! let mut card = PaymentType::card(Card::new("4711100000000000", "123", "12/2030"));
//! let authorization = client
//!     .authorize(
//!         "119.00".parse().unwrap(),
//!         "EUR",
//!         &mut card,
//!         "https://shop.example/return",
//!         TransactionOptions::default(),
//!     )
//!     .await?;
//!
//! // Capture the full amount later.
//! let payment_id = authorization.payment_id().expect("assigned by the gateway");
//! let charge = client
//!     .charge_authorization(payment_id, None, Default::default())
//!     .await?;
//! println!("captured charge {:?}", charge.status);
//! # Ok(())
//! # }
//! ```
//!
//! # Hosted payment page
//!
//! ```no_run
//! use mgw_sdk::{MgwClient, resources::Paypage};
//!
//! # async fn example() -> mgw_sdk::Result<()> {
//! let client = MgwClient::new("s-priv-2a10IfKd7vN9eGh4")?;
//!
//! let mut paypage = Paypage::new("119.00".parse().unwrap(), "EUR", "https://shop.example/return");
//! paypage.shop_name = Some("My Shop".to_owned());
//!
//! let paypage = client.init_pay_page_charge(paypage, None, None, None).await?;
//! println!("send the customer to {}", paypage.redirect_url.as_deref().unwrap_or_default());
//! # Ok(())
//! # }
//! ```
//!
//! # Error handling
//!
//! All operations return [`Result`]. Gateway rejections carry the vendor
//! error code verbatim plus both message audiences:
//!
//! ```no_run
//! use mgw_sdk::{MgwClient, MgwError, resources::PaymentType};
//!
//! # async fn example() {
//! # let client = MgwClient::new("s-priv-x").unwrap();
//! let mut giropay = PaymentType::giropay();
//! match client
//!     .authorize("1.00".parse().unwrap(), "EUR", &mut giropay, "https://r.example", Default::default())
//!     .await
//! {
//!     Ok(authorization) => println!("authorized: {:?}", authorization.status),
//!     Err(MgwError::Api { code, customer_message, .. }) => {
//!         // e.g. API.330.100.007: authorize not allowed for this type
//!         eprintln!("gateway rejected ({code}): {customer_message}");
//!     }
//!     Err(e) => eprintln!("transport problem: {e}"),
//! }
//! # }
//! ```
//!
//! # Module organization
//!
//! - [`client`]: the [`MgwClient`] facade
//! - [`resources`]: typed resources and their response mapping
//! - [`services`]: resource CRUD and payment orchestration
//! - [`adapter`]: HTTP transport abstraction (bring your own if needed)
//! - [`config`]: keys, endpoint, timeouts; env and TOML loading
//! - [`validators`]: API key format checks
//! - [`reliability`]: retry policy applied to idempotent fetches
//! - [`error`]: error types with the vendor's error codes

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod adapter;
pub mod client;
pub mod config;
pub mod error;
pub mod reliability;
pub mod resources;
pub mod services;
pub mod validators;

pub use client::MgwClient;
pub use config::GatewayConfig;
pub use error::{MgwError, Result};
