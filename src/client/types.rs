//! Request and response payloads for the purchase-order API.
//!
//! These are transport shapes, not domain logic: the backend owns all
//! validation, the client passes fields through as-is.

use serde::{Deserialize, Serialize};

/// An authenticated user as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<String>,
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
}

impl User {
    /// Whether this user may manage other users.
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}

/// Credentials for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login payload: bearer token plus the user it belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// A purchase order. Field names match the backend's wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PurchaseOrder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub order_no: String,
    /// ISO date (YYYY-MM-DD).
    #[serde(default)]
    pub order_date: String,
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub broker: String,
    #[serde(default)]
    pub mill: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub bags: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub rate: String,
    #[serde(default)]
    pub terms_conditions: String,
}

/// The single company profile backing order headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CompanyProfile {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub gst_number: String,
    #[serde(default)]
    pub bank_details: String,
}

/// Payload for creating or updating a user.
#[derive(Debug, Clone, Serialize)]
pub struct UserPayload {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Payload for `POST /users/{id}/reset-password`.
#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}
