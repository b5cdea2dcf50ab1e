pub mod binance;
pub mod mock;
pub mod observability;
