pub mod counterparty;
pub mod device;
pub mod dispatch;
pub mod order;
pub mod part;
pub mod schema;
pub mod shared;
pub mod user;
