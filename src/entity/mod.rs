pub mod admin_users;
pub mod order_items;
pub mod orders;
pub mod product_images;
pub mod products;
pub mod site_contents;

pub use admin_users::Entity as AdminUsers;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use product_images::Entity as ProductImages;
pub use products::Entity as Products;
pub use site_contents::Entity as SiteContents;
