use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{order_items, orders, product_images, products, site_contents};

/// Audience facet used for storefront filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Unisex,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unisex => "unisex",
        }
    }

    /// Facets a listing filtered by `self` must include. Unisex products
    /// show up in every gendered listing.
    pub fn audience(&self) -> Vec<Gender> {
        match self {
            Gender::Unisex => vec![Gender::Unisex],
            other => vec![*other, Gender::Unisex],
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "unisex" => Ok(Gender::Unisex),
            other => Err(format!("unknown gender '{other}'")),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Pending may move anywhere; Completed and Cancelled are terminal.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        match self {
            OrderStatus::Pending => true,
            terminal => *terminal == next,
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            _ => Err(format!("invalid order status '{s}'")),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed set of editable page blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentKey {
    Home,
    About,
}

impl ContentKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKey::Home => "home",
            ContentKey::About => "about",
        }
    }
}

impl FromStr for ContentKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(ContentKey::Home),
            "about" => Ok(ContentKey::About),
            other => Err(format!("unknown content key '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ProductImage {
    pub id: Uuid,
    pub url: String,
    pub display_order: i32,
}

impl From<product_images::Model> for ProductImage {
    fn from(model: product_images::Model) -> Self {
        Self {
            id: model.id,
            url: model.url,
            display_order: model.display_order,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    pub gender: String,
    pub category: String,
    pub description: String,
    pub images: Vec<ProductImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// `images` must already be sorted by display order.
    pub fn from_entity(model: products::Model, images: Vec<ProductImage>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            gender: model.gender,
            category: model.category,
            description: model.description,
            images,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub product_id: Option<Uuid>,
    pub product_name: String,
    #[schema(value_type = String, example = "10.00")]
    pub price: Decimal,
    pub quantity: i32,
    #[schema(value_type = String, example = "20.00")]
    pub line_total: Decimal,
    pub product_image_url: Option<String>,
}

impl From<order_items::Model> for OrderItem {
    fn from(model: order_items::Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            product_name: model.product_name,
            price: model.price,
            quantity: model.quantity,
            line_total: model.line_total,
            product_image_url: model.product_image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub contact_number: String,
    pub country: String,
    pub state_province: String,
    pub city: String,
    pub post_code: String,
    pub notes: Option<String>,
    #[schema(value_type = String, example = "25.00")]
    pub total_amount: Decimal,
    pub status: String,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn from_entity(model: orders::Model, items: Vec<OrderItem>) -> Self {
        Self {
            id: model.id,
            customer_name: model.customer_name,
            customer_email: model.customer_email,
            contact_number: model.contact_number,
            country: model.country,
            state_province: model.state_province,
            city: model.city,
            post_code: model.post_code,
            notes: model.notes,
            total_amount: model.total_amount,
            status: model.status,
            items,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SiteContent {
    pub key: String,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub hero_image_url: Option<String>,
    pub content_text: Option<String>,
    pub content_image1_url: Option<String>,
    pub content_image2_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<site_contents::Model> for SiteContent {
    fn from(model: site_contents::Model) -> Self {
        Self {
            key: model.key,
            hero_title: model.hero_title,
            hero_subtitle: model.hero_subtitle,
            hero_image_url: model.hero_image_url,
            content_text: model.content_text,
            content_image1_url: model.content_image1_url,
            content_image2_url: model.content_image2_url,
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gendered_audience_includes_unisex() {
        assert_eq!(Gender::Male.audience(), vec![Gender::Male, Gender::Unisex]);
        assert_eq!(
            Gender::Female.audience(),
            vec![Gender::Female, Gender::Unisex]
        );
        assert_eq!(Gender::Unisex.audience(), vec![Gender::Unisex]);
    }

    #[test]
    fn gender_parses_case_insensitively() {
        assert_eq!("Male".parse::<Gender>(), Ok(Gender::Male));
        assert_eq!(" unisex ".parse::<Gender>(), Ok(Gender::Unisex));
        assert!("kids".parse::<Gender>().is_err());
    }

    #[test]
    fn order_status_rejects_unknown_values() {
        assert_eq!("Completed".parse::<OrderStatus>(), Ok(OrderStatus::Completed));
        assert_eq!("pending".parse::<OrderStatus>(), Ok(OrderStatus::Pending));
        assert_eq!("canceled".parse::<OrderStatus>(), Ok(OrderStatus::Cancelled));
        assert!("shipped".parse::<OrderStatus>().is_err());
        assert!("".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn terminal_statuses_do_not_reopen() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Pending.can_transition_to(Pending));
        assert!(Completed.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Completed));
    }

    #[test]
    fn content_key_is_exact() {
        assert_eq!("home".parse::<ContentKey>(), Ok(ContentKey::Home));
        assert_eq!("about".parse::<ContentKey>(), Ok(ContentKey::About));
        assert!("Home".parse::<ContentKey>().is_err());
        assert!("faq".parse::<ContentKey>().is_err());
    }
}
