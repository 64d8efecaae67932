//! Data module - CSV loading and cleaning

mod cleaner;
mod loader;

pub use cleaner::{date_from_days, CleanError, Cleaner};
pub use loader::{LoaderError, SalesLoader};

/// Column names of the sales table.
pub mod columns {
    pub const ORDER_DATE: &str = "Order Date";
    pub const SHIP_DATE: &str = "Ship Date";
    pub const POSTAL_CODE: &str = "Postal Code";
    pub const SALES: &str = "Sales";
    pub const PROFIT: &str = "Profit";
    pub const CATEGORY: &str = "Category";
    pub const REGION: &str = "Region";
    pub const SHIP_DURATION: &str = "Order_to_Ship_Duration";

    /// Columns the input schema must contain; a missing one is fatal.
    pub const REQUIRED: [&str; 7] = [
        ORDER_DATE,
        SHIP_DATE,
        POSTAL_CODE,
        SALES,
        PROFIT,
        CATEGORY,
        REGION,
    ];
}
