pub mod websocket;

pub use websocket::{BinanceKlineConnector, BinanceKlineStream};
