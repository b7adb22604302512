use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use storefront_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{
        product_images::ActiveModel as ImageActive,
        products::{ActiveModel as ProductActive, Entity as Products},
        site_contents::{ActiveModel as ContentActive, Column as ContentCol, Entity as SiteContents},
    },
    models::{ContentKey, Gender},
    services::auth_service,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    match config.admin_seed() {
        Some((username, password)) => {
            let created = auth_service::seed_admin(&orm, username, password)
                .await
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;
            println!("Admin {username}: {}", if created { "created" } else { "already present" });
        }
        None => println!("Skipping admin: ADMIN_USERNAME/ADMIN_PASSWORD not set"),
    }

    seed_content(&orm).await?;
    seed_products(&orm).await?;

    println!("Seed completed");
    Ok(())
}

struct ContentSeed {
    key: ContentKey,
    hero_title: Option<&'static str>,
    hero_subtitle: Option<&'static str>,
    hero_image_url: Option<&'static str>,
    content_text: &'static str,
    content_image1_url: Option<&'static str>,
    content_image2_url: Option<&'static str>,
}

async fn seed_content(orm: &DatabaseConnection) -> anyhow::Result<()> {
    let blocks = [
        ContentSeed {
            key: ContentKey::Home,
            hero_title: Some("Welcome to Nexora"),
            hero_subtitle: Some("Fashion for every day"),
            hero_image_url: Some("/images/hero-placeholder.jpg"),
            content_text: "New arrivals every week across every category.",
            content_image1_url: None,
            content_image2_url: None,
        },
        ContentSeed {
            key: ContentKey::About,
            hero_title: None,
            hero_subtitle: None,
            hero_image_url: None,
            content_text: "We sell clothing and accessories for men, women and everyone in between.",
            content_image1_url: Some("/images/about-1-placeholder.jpg"),
            content_image2_url: Some("/images/about-2-placeholder.jpg"),
        },
    ];

    for block in blocks {
        let exists = SiteContents::find()
            .filter(ContentCol::Key.eq(block.key.as_str()))
            .one(orm)
            .await?
            .is_some();
        if exists {
            continue;
        }

        ContentActive {
            id: Set(Uuid::new_v4()),
            key: Set(block.key.as_str().to_string()),
            hero_title: Set(block.hero_title.map(str::to_string)),
            hero_subtitle: Set(block.hero_subtitle.map(str::to_string)),
            hero_image_url: Set(block.hero_image_url.map(str::to_string)),
            content_text: Set(Some(block.content_text.to_string())),
            content_image1_url: Set(block.content_image1_url.map(str::to_string)),
            content_image2_url: Set(block.content_image2_url.map(str::to_string)),
            updated_at: Set(Utc::now().into()),
        }
        .insert(orm)
        .await?;
        println!("Seeded {} content", block.key.as_str());
    }
    Ok(())
}

async fn seed_products(orm: &DatabaseConnection) -> anyhow::Result<()> {
    if Products::find().count(orm).await? > 0 {
        println!("Products already present, skipping");
        return Ok(());
    }

    let products = [
        (
            "Classic White T-Shirt",
            Decimal::new(2999, 2),
            Gender::Unisex,
            "T-Shirts",
            "Cotton crew neck t-shirt. Sizes S to XL.",
            "/images/products/tshirt-1.jpg",
        ),
        (
            "Slim Fit Jeans",
            Decimal::new(7999, 2),
            Gender::Male,
            "Trousers",
            "Stretch denim with a tapered leg. Waist 28 to 38.",
            "/images/products/jeans-1.jpg",
        ),
        (
            "Summer Wrap Dress",
            Decimal::new(8999, 2),
            Gender::Female,
            "Dresses",
            "Lightweight wrap dress. Sizes XS to L.",
            "/images/products/dress-1.jpg",
        ),
    ];

    let txn = orm.begin().await?;
    for (name, price, gender, category, description, image_url) in products {
        let product = ProductActive {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            price: Set(price),
            gender: Set(gender.as_str().to_string()),
            category: Set(category.to_string()),
            description: Set(description.to_string()),
            created_at: NotSet,
            updated_at: Set(None),
        }
        .insert(&txn)
        .await?;

        ImageActive {
            id: Set(Uuid::new_v4()),
            product_id: Set(product.id),
            url: Set(image_url.to_string()),
            display_order: Set(0),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;
    }
    txn.commit().await?;

    println!("Seeded products");
    Ok(())
}
