pub mod kline;
pub mod price_history;

pub use kline::{InboundEvent, decode_kline_message};
pub use price_history::{HISTORY_CAPACITY, PriceHistory};
