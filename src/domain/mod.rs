// Candle stream: kline decoding and the rolling price window
pub mod market;

// RSI / MACD
pub mod indicators;

// Indicator thresholds -> trading signal
pub mod signal;

// Port interfaces
pub mod ports;

// Core value types
pub mod types;

// Domain-specific error types
pub mod errors;
