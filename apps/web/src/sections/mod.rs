//! Presentation sections. Each one renders from its own resource state, so a
//! failing section never takes the rest of the page down with it.

pub mod about;
pub mod careers;
pub mod contact;
pub mod feedback;
pub mod footer;
pub mod hero;
pub mod locations;
pub mod map;
pub mod navbar;
pub mod sell_store;
