pub mod payments;
pub mod price_alerts;
pub mod profiles;
pub mod properties;
pub mod property_amenities;
pub mod property_images;
pub mod transactions;
pub mod wallets;

pub use payments::Entity as Payments;
pub use payments::Model as Payment;
pub use price_alerts::Entity as PriceAlerts;
pub use price_alerts::Model as PriceAlert;
pub use profiles::Entity as Profiles;
pub use profiles::Model as Profile;
pub use properties::Entity as Properties;
pub use properties::Model as Property;
pub use property_amenities::Entity as PropertyAmenities;
pub use property_images::Entity as PropertyImages;
pub use transactions::Entity as Transactions;
pub use wallets::Entity as Wallets;
