pub mod components;
pub mod layout;
pub mod swipe;
pub mod theme;
