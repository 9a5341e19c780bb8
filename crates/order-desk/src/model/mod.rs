//! Domain records and the wire-level inputs they are built from.

mod loose;
mod menu;
mod order;

pub use loose::Loose;
pub use menu::{MenuItem, MenuItemId, MenuItemInput};
pub use order::{
    LineItem, LineItemInput, LocatedOrder, Location, Order, OrderCreate, OrderId, OrderStatus,
};
