/// Column and sentinel constants shared by the three cleaning passes

// Sentinels
pub const UNKNOWN: &str = "UNKNOWN";
pub const MISSING: &str = "MISSING";
pub const DEFAULT_MISSING_PRICE: &str = "NaN";

/// Suffix appended to a source column name to form its derived column
pub const CLEANED_SUFFIX: &str = "_cleaned";

// Menu table
pub const PLACE: &str = "place";
pub const SPONSOR: &str = "sponsor";
pub const EVENT: &str = "event";
pub const VENUE: &str = "venue";

// MenuItem table
pub const PRICE: &str = "price";
pub const HIGH_PRICE: &str = "high_price";

// MenuPage table
pub const ID: &str = "id";
pub const MENU_ID: &str = "menu_id";
pub const PAGE_NUMBER: &str = "page_number";
pub const FULL_HEIGHT: &str = "full_height";
pub const FULL_WIDTH: &str = "full_width";
pub const IMAGE_ID: &str = "image_id";
pub const UUID: &str = "uuid";

// Default file names
pub const MENU_FILE: &str = "Menu.csv";
pub const MENU_OUTPUT: &str = "Menu_cleaned.csv";
pub const MENU_ITEM_FILE: &str = "MenuItem.csv";
pub const MENU_ITEM_OUTPUT: &str = "MenuItem_cleaned.csv";
pub const MENU_PAGE_FILE: &str = "MenuPage.csv";
pub const MENU_PAGE_OUTPUT: &str = "MenuPage_cleaned.csv";

/// Derived column name for a source column (`place` -> `place_cleaned`)
pub fn cleaned_column(source: &str) -> String {
    format!("{}{}", source, CLEANED_SUFFIX)
}
