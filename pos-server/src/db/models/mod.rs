//! Database Models

// Serde helpers
pub mod serde_helpers;

// Tenancy & auth
pub mod plan;
pub mod restaurant;
pub mod staff;

// Layout
pub mod dining_table;
pub mod space;

// Menu
pub mod category;
pub mod menu_item;
pub mod space_price;

// Drafting & billing
pub mod bill;
pub mod table_draft;

// Re-exports
pub use plan::{Plan, PlanCreate};
pub use restaurant::{Restaurant, Subscription};
pub use staff::{Staff, StaffCreate, StaffRole, StaffUpdate};

pub use dining_table::{DiningTable, DiningTableCreate, DiningTableUpdate};
pub use space::{Space, SpaceCreate, SpaceUpdate};

pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use space_price::{SpacePrice, SpacePriceSet};

pub use bill::{Bill, BillCreate, BillLine, BillLineInput};
pub use table_draft::{
    AuditStamp, CartLine, CartLineInput, DraftSave, DraftStatus, KotLine, KotSnapshot, TableDraft,
};
