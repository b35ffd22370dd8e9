//! Notification dispatch across email, SMS and push.
//!
//! # Architecture
//!
//! Each channel has a delivery port (`EmailProvider`, `SmsProvider`,
//! `PushProvider`) implemented by provider adapters, and a service that
//! owns one port:
//!
//! - `EmailService`, `SmsService`, `PushService`: validate, render templated
//!   bodies, call the port and normalize the outcome into a `DeliveryResponse`
//! - `NotificationFacade`: bundles the services with user preferences
//!
//! A templated send always finishes rendering before the delivery request
//! is built; if rendering fails or no renderer is configured the port is
//! never called.

mod email;
mod facade;
pub mod mock;
mod pipeline;
mod provider;
mod push;
mod requests;
mod sms;
mod stats;
mod types;

pub use email::EmailService;
pub use facade::{NotificationFacade, NotificationFacadeBuilder};
pub use provider::{EmailProvider, ProviderError, PushProvider, SmsProvider};
pub use push::PushService;
pub use requests::{
    EmailAttachment, EmailRequest, EmailTemplateRequest, PushRequest, PushTemplateRequest,
    SmsRequest, SmsTemplateRequest,
};
pub use sms::SmsService;
pub use stats::{DispatchStats, DispatchStatsSnapshot};
pub use types::{Channel, DeliveryResponse, DeliveryStatus};
