mod error;
mod model;

pub use error::ExchangeError;
pub use model::{
    canonical_symbol, CommonSymbolSet, ExchangeId, ExchangeSnapshot, PriceQuote, SpreadResult,
};
