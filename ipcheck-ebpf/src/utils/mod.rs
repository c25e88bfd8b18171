pub mod context;
pub mod eth;
pub mod ip;
