use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse},
        content::ContentRequest,
        orders::{CreateOrderRequest, OrderLineRequest, OrderList, UpdateOrderStatusRequest},
        products::{
            AddImagesRequest, CreateProductRequest, ProductImageList, ProductList,
            UpdateProductRequest,
        },
    },
    models::{ContentKey, Gender, Order, OrderItem, OrderStatus, Product, ProductImage, SiteContent},
    response::{ApiResponse, Meta},
    routes::{admin, auth, config, content, health, orders, params, products},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::get_product,
        orders::create_order,
        content::get_content,
        config::contact_phone,
        config::image_service,
        auth::login,
        admin::list_products,
        admin::create_product,
        admin::get_product,
        admin::update_product,
        admin::delete_product,
        admin::add_product_images,
        admin::list_orders,
        admin::get_order,
        admin::update_order_status,
        admin::delete_order,
        admin::upsert_content
    ),
    components(
        schemas(
            Gender,
            OrderStatus,
            ContentKey,
            Product,
            ProductImage,
            Order,
            OrderItem,
            SiteContent,
            CreateProductRequest,
            UpdateProductRequest,
            AddImagesRequest,
            CreateOrderRequest,
            OrderLineRequest,
            UpdateOrderStatusRequest,
            ContentRequest,
            LoginRequest,
            LoginResponse,
            ProductList,
            ProductImageList,
            OrderList,
            config::ConfigValue,
            health::HealthData,
            params::Pagination,
            params::ProductQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<SiteContent>,
            ApiResponse<LoginResponse>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Public catalog"),
        (name = "Orders", description = "Checkout"),
        (name = "Content", description = "Public site content"),
        (name = "Config", description = "Client configuration"),
        (name = "Auth", description = "Admin login"),
        (name = "Admin", description = "Back-office endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
