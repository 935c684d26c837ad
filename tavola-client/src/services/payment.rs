//! Hosted checkout
//!
//! The backend creates a checkout session with the payment provider and
//! returns the page to send the customer to. Following that URL is the
//! caller's job.

use reqwest::Url;
use shared::Validate;
use shared::models::{CheckoutRequest, CheckoutSession};

use crate::client::HttpClient;
use crate::{ClientError, ClientResult};

/// Where to send the customer to pay
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRedirect {
    pub session_id: String,
    pub url: Url,
}

impl TryFrom<CheckoutSession> for CheckoutRedirect {
    type Error = ClientError;

    fn try_from(session: CheckoutSession) -> Result<Self, Self::Error> {
        let url = Url::parse(&session.url).map_err(|e| {
            ClientError::InvalidResponse(format!("Invalid checkout URL '{}': {e}", session.url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidResponse(format!(
                "Unsupported checkout URL scheme: {}",
                url.scheme()
            )));
        }
        Ok(Self {
            session_id: session.session_id,
            url,
        })
    }
}

service!(
    /// Payment API (`/payments`)
    PaymentService
);

impl<C: HttpClient> PaymentService<C> {
    pub async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> ClientResult<CheckoutRedirect> {
        request.validate()?;
        let session: CheckoutSession = self
            .ctx
            .http
            .post("/payments/checkout-session", request)
            .await?;
        tracing::info!(
            session_id = %session.session_id,
            cart_id = ?request.cart_id,
            reservation_id = ?request.reservation_id,
            "Checkout session created"
        );
        CheckoutRedirect::try_from(session)
    }
}
