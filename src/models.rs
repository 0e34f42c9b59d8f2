use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    codec,
    entity::{orders, products},
    error::{AppError, AppResult},
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image: String,
    pub rating: f64,
    pub specs: Vec<String>,
    pub seller_id: Option<String>,
    pub seller_name: Option<String>,
}

impl TryFrom<products::Model> for Product {
    type Error = AppError;

    fn try_from(model: products::Model) -> AppResult<Self> {
        Ok(Self {
            specs: codec::decode(&model.specs)?,
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            category: model.category,
            image: model.image,
            rating: model.rating,
            seller_id: model.seller_id,
            seller_name: model.seller_name,
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Re-applying the current status is allowed and changes nothing.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        self == next
            || matches!(
                (self, next),
                (Pending, Shipped) | (Pending, Cancelled) | (Shipped, Delivered) | (Shipped, Cancelled)
            )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(OrderStatus::Pending),
            "Shipped" => Ok(OrderStatus::Shipped),
            "Delivered" => Ok(OrderStatus::Delivered),
            "Cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(AppError::BadRequest(format!("Invalid order status: {other}"))),
        }
    }
}

/// Snapshot of one cart line at checkout time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LineItem {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub seller_id: Option<String>,
    pub status: OrderStatus,
}

impl LineItem {
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub total: f64,
    pub status: OrderStatus,
    pub shipping_address: String,
    pub payment_method: String,
    pub items: Vec<LineItem>,
}

impl Order {
    /// Narrow the order to one seller's lines; `None` when the seller has none.
    pub fn for_seller(mut self, seller_id: &str) -> Option<Self> {
        self.items
            .retain(|item| item.seller_id.as_deref() == Some(seller_id));
        if self.items.is_empty() { None } else { Some(self) }
    }
}

impl TryFrom<orders::Model> for Order {
    type Error = AppError;

    fn try_from(model: orders::Model) -> AppResult<Self> {
        Ok(Self {
            items: codec::decode(&model.items)?,
            status: model.status.parse()?,
            id: model.id,
            user_id: model.user_id,
            date: model.date,
            total: model.total,
            shipping_address: model.shipping_address,
            payment_method: model.payment_method,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, sqlx::FromRow)]
pub struct Review {
    pub id: String,
    pub product_id: String,
    pub user_id: String,
    pub user_name: String,
    pub rating: i32,
    pub comment: String,
    pub date: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Seller,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
            Role::Admin => "admin",
        }
    }
}

/// User record as stored, secrets included. Never serialised.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: String,
    pub address: Option<String>,
    pub card_number: Option<String>,
    pub card_expiry: Option<String>,
    pub card_cvv: Option<String>,
    pub is_verified: bool,
    pub verification_token: Option<String>,
}

/// User as returned to clients: no password hash, no pending token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub address: Option<String>,
    #[serde(rename = "cardNumber")]
    pub card_number: Option<String>,
    #[serde(rename = "cardExpiry")]
    pub card_expiry: Option<String>,
    #[serde(rename = "cardCvv")]
    pub card_cvv: Option<String>,
    #[serde(rename = "isVerified")]
    pub is_verified: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role,
            address: row.address,
            card_number: row.card_number,
            card_expiry: row.card_expiry,
            card_cvv: row.card_cvv,
            is_verified: row.is_verified,
        }
    }
}
