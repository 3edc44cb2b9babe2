//! Text output for the player's belongings

pub mod inventory;

pub use inventory::{describe_item, render_inventory, render_items, INVENTORY_EMPTY, INVENTORY_ERROR};
