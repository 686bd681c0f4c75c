use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
    Email,
    FullName,
    Phone,
    AvatarUrl,
    Role,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Wallets {
    Table,
    Id,
    UserId,
    Balance,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Properties {
    Table,
    Id,
    UserId,
    Title,
    Description,
    PropertyType,
    Status,
    Price,
    Bedrooms,
    Bathrooms,
    SquareFeet,
    AdministrationFee,
    Address,
    City,
    CityKey,
    SearchKey,
    State,
    Country,
    ZipCode,
    Latitude,
    Longitude,
    PropertyIdCode,
    BankId,
    Featured,
    Views,
    PublicationStatus,
    IsFeaturedPaid,
    FeaturedUntil,
    PaidAt,
    PaymentReference,
    FeaturedPaymentReference,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PropertyImages {
    Table,
    Id,
    PropertyId,
    ImageUrl,
    IsPrimary,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PropertyAmenities {
    Table,
    Id,
    PropertyId,
    Amenity,
    AmenityKey,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PriceAlerts {
    Table,
    Id,
    UserId,
    PropertyType,
    City,
    MinPrice,
    MaxPrice,
    MinBedrooms,
    MaxBedrooms,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    Id,
    UserId,
    PropertyId,
    PaymentType,
    Amount,
    Currency,
    Status,
    BoldReference,
    BoldTransactionId,
    PaymentMethod,
    Metadata,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    UserId,
    WalletId,
    Amount,
    TransactionType,
    TransactionStatus,
    Description,
    PropertyId,
    CreatedAt,
    UpdatedAt,
}

fn uuid_pk<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).uuid().not_null().primary_key().to_owned()
}

fn created_at<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

// Enum-valued columns are short strings so the same schema runs on SQLite.
fn enum_col<T: IntoIden>(col: T, default: &str) -> ColumnDef {
    ColumnDef::new(col)
        .string_len(32)
        .not_null()
        .default(default)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // profiles
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(uuid_pk(Profiles::Id))
                    .col(ColumnDef::new(Profiles::Email).string().not_null())
                    .col(ColumnDef::new(Profiles::FullName).string_len(120).null())
                    .col(ColumnDef::new(Profiles::Phone).string_len(20).null())
                    .col(ColumnDef::new(Profiles::AvatarUrl).string().null())
                    .col(enum_col(Profiles::Role, "user"))
                    .col(created_at(Profiles::CreatedAt))
                    .col(created_at(Profiles::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_profiles_email")
                    .table(Profiles::Table)
                    .col(Profiles::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // wallets
        manager
            .create_table(
                Table::create()
                    .table(Wallets::Table)
                    .if_not_exists()
                    .col(uuid_pk(Wallets::Id))
                    .col(ColumnDef::new(Wallets::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Wallets::Balance)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Wallets::Balance).gte(0)),
                    )
                    .col(created_at(Wallets::CreatedAt))
                    .col(created_at(Wallets::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wallets_user_id")
                            .from(Wallets::Table, Wallets::UserId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_wallets_user_id")
                    .table(Wallets::Table)
                    .col(Wallets::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // properties
        manager
            .create_table(
                Table::create()
                    .table(Properties::Table)
                    .if_not_exists()
                    .col(uuid_pk(Properties::Id))
                    .col(ColumnDef::new(Properties::UserId).uuid().not_null())
                    .col(ColumnDef::new(Properties::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Properties::Description).text().null())
                    .col(enum_col(Properties::PropertyType, "house"))
                    .col(enum_col(Properties::Status, "for_sale"))
                    .col(ColumnDef::new(Properties::Price).big_integer().not_null())
                    .col(ColumnDef::new(Properties::Bedrooms).integer().null())
                    .col(ColumnDef::new(Properties::Bathrooms).integer().null())
                    .col(ColumnDef::new(Properties::SquareFeet).integer().null())
                    .col(
                        ColumnDef::new(Properties::AdministrationFee)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Properties::Address)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Properties::City).string_len(200).not_null())
                    .col(ColumnDef::new(Properties::CityKey).text().not_null())
                    .col(ColumnDef::new(Properties::SearchKey).text().not_null())
                    .col(ColumnDef::new(Properties::State).string().null())
                    .col(
                        ColumnDef::new(Properties::Country)
                            .string()
                            .not_null()
                            .default("Colombia"),
                    )
                    .col(ColumnDef::new(Properties::ZipCode).string().null())
                    .col(ColumnDef::new(Properties::Latitude).double().null())
                    .col(ColumnDef::new(Properties::Longitude).double().null())
                    .col(
                        ColumnDef::new(Properties::PropertyIdCode)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Properties::BankId).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Properties::Featured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Properties::Views)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(enum_col(Properties::PublicationStatus, "pending_payment"))
                    .col(
                        ColumnDef::new(Properties::IsFeaturedPaid)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Properties::FeaturedUntil)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Properties::PaidAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Properties::PaymentReference).string().null())
                    .col(
                        ColumnDef::new(Properties::FeaturedPaymentReference)
                            .string()
                            .null(),
                    )
                    .col(created_at(Properties::CreatedAt))
                    .col(created_at(Properties::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_properties_user_id")
                            .from(Properties::Table, Properties::UserId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_properties_property_id_code")
                    .table(Properties::Table)
                    .col(Properties::PropertyIdCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_properties_user_id")
                    .table(Properties::Table)
                    .col(Properties::UserId)
                    .to_owned(),
            )
            .await?;

        // public listing queries filter on publication status, newest first
        manager
            .create_index(
                Index::create()
                    .name("ix_properties_publication_created")
                    .table(Properties::Table)
                    .col(Properties::PublicationStatus)
                    .col(Properties::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // property_images
        manager
            .create_table(
                Table::create()
                    .table(PropertyImages::Table)
                    .if_not_exists()
                    .col(uuid_pk(PropertyImages::Id))
                    .col(ColumnDef::new(PropertyImages::PropertyId).uuid().not_null())
                    .col(ColumnDef::new(PropertyImages::ImageUrl).text().not_null())
                    .col(
                        ColumnDef::new(PropertyImages::IsPrimary)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(created_at(PropertyImages::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_images_property_id")
                            .from(PropertyImages::Table, PropertyImages::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_property_images_property_id")
                    .table(PropertyImages::Table)
                    .col(PropertyImages::PropertyId)
                    .to_owned(),
            )
            .await?;

        // property_amenities
        manager
            .create_table(
                Table::create()
                    .table(PropertyAmenities::Table)
                    .if_not_exists()
                    .col(uuid_pk(PropertyAmenities::Id))
                    .col(
                        ColumnDef::new(PropertyAmenities::PropertyId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PropertyAmenities::Amenity)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PropertyAmenities::AmenityKey)
                            .text()
                            .not_null(),
                    )
                    .col(created_at(PropertyAmenities::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_amenities_property_id")
                            .from(PropertyAmenities::Table, PropertyAmenities::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_property_amenities_property_id")
                    .table(PropertyAmenities::Table)
                    .col(PropertyAmenities::PropertyId)
                    .to_owned(),
            )
            .await?;

        // price_alerts
        manager
            .create_table(
                Table::create()
                    .table(PriceAlerts::Table)
                    .if_not_exists()
                    .col(uuid_pk(PriceAlerts::Id))
                    .col(ColumnDef::new(PriceAlerts::UserId).uuid().not_null())
                    .col(ColumnDef::new(PriceAlerts::PropertyType).string_len(32).null())
                    .col(ColumnDef::new(PriceAlerts::City).string_len(200).null())
                    .col(ColumnDef::new(PriceAlerts::MinPrice).big_integer().null())
                    .col(ColumnDef::new(PriceAlerts::MaxPrice).big_integer().null())
                    .col(ColumnDef::new(PriceAlerts::MinBedrooms).integer().null())
                    .col(ColumnDef::new(PriceAlerts::MaxBedrooms).integer().null())
                    .col(
                        ColumnDef::new(PriceAlerts::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(created_at(PriceAlerts::CreatedAt))
                    .col(created_at(PriceAlerts::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_price_alerts_user_id")
                            .from(PriceAlerts::Table, PriceAlerts::UserId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_price_alerts_user_id")
                    .table(PriceAlerts::Table)
                    .col(PriceAlerts::UserId)
                    .to_owned(),
            )
            .await?;

        // payments
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(uuid_pk(Payments::Id))
                    .col(ColumnDef::new(Payments::UserId).uuid().not_null())
                    .col(ColumnDef::new(Payments::PropertyId).uuid().null())
                    .col(enum_col(Payments::PaymentType, "publication"))
                    .col(ColumnDef::new(Payments::Amount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Payments::Currency)
                            .string_len(8)
                            .not_null()
                            .default("COP"),
                    )
                    .col(enum_col(Payments::Status, "pending"))
                    .col(
                        ColumnDef::new(Payments::BoldReference)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Payments::BoldTransactionId).string().null())
                    .col(ColumnDef::new(Payments::PaymentMethod).string().null())
                    .col(ColumnDef::new(Payments::Metadata).json().null())
                    .col(created_at(Payments::CreatedAt))
                    .col(created_at(Payments::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_user_id")
                            .from(Payments::Table, Payments::UserId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_property_id")
                            .from(Payments::Table, Payments::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_payments_bold_reference")
                    .table(Payments::Table)
                    .col(Payments::BoldReference)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // transactions
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(uuid_pk(Transactions::Id))
                    .col(ColumnDef::new(Transactions::UserId).uuid().not_null())
                    .col(ColumnDef::new(Transactions::WalletId).uuid().not_null())
                    .col(ColumnDef::new(Transactions::Amount).big_integer().not_null())
                    .col(enum_col(Transactions::TransactionType, "deposit"))
                    .col(enum_col(Transactions::TransactionStatus, "pending"))
                    .col(ColumnDef::new(Transactions::Description).string().null())
                    .col(ColumnDef::new(Transactions::PropertyId).uuid().null())
                    .col(created_at(Transactions::CreatedAt))
                    .col(created_at(Transactions::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_user_id")
                            .from(Transactions::Table, Transactions::UserId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_wallet_id")
                            .from(Transactions::Table, Transactions::WalletId)
                            .to(Wallets::Table, Wallets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_property_id")
                            .from(Transactions::Table, Transactions::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_transactions_wallet_created")
                    .table(Transactions::Table)
                    .col(Transactions::WalletId)
                    .col(Transactions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // children first
        manager
            .drop_table(Table::drop().table(Transactions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payments::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PriceAlerts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(PropertyAmenities::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(PropertyImages::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Properties::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Wallets::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Profiles::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
