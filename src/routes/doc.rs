use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        analytics::{MonthlyRevenue, SellerAnalytics},
        auth::{GoogleLoginRequest, LoginRequest, RegisterRequest, RegisterResponse},
        cart::{AddToCartRequest, CartEntry},
        orders::{CheckoutRequest, CheckoutResponse, UpdateOrderStatusRequest},
        products::{CreateProductRequest, UpdateProductRequest},
        reviews::CreateReviewRequest,
        users::UpdateProfileRequest,
    },
    models::{LineItem, Order, OrderStatus, Product, Review, Role, User},
    response::{CreatedResponse, ErrorBody, MessageResponse, StatusResponse},
    routes::{admin, auth, cart, health, orders, products, reviews, seller, users},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "user_id",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-User-Id"))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::create_product,
        products::update_product,
        cart::get_cart,
        cart::add_to_cart,
        cart::clear_cart,
        orders::checkout,
        orders::list_orders,
        orders::update_order_status,
        seller::seller_orders,
        seller::analytics,
        reviews::list_reviews,
        reviews::create_review,
        users::get_profile,
        users::update_profile,
        auth::register,
        auth::login,
        auth::verify_email,
        auth::google_login,
        admin::list_users
    ),
    components(
        schemas(
            Product,
            Order,
            OrderStatus,
            LineItem,
            Review,
            Role,
            User,
            CartEntry,
            AddToCartRequest,
            CheckoutRequest,
            CheckoutResponse,
            UpdateOrderStatusRequest,
            CreateProductRequest,
            UpdateProductRequest,
            CreateReviewRequest,
            UpdateProfileRequest,
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            GoogleLoginRequest,
            SellerAnalytics,
            MonthlyRevenue,
            StatusResponse,
            CreatedResponse,
            MessageResponse,
            ErrorBody,
            health::HealthData
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Orders", description = "Checkout and order endpoints"),
        (name = "Seller", description = "Seller order and analytics endpoints"),
        (name = "Reviews", description = "Product review endpoints"),
        (name = "Users", description = "User profile endpoints"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
