// Domain types and value objects
mod candle;
mod load_key;
mod symbol;

pub use candle::Candle;
pub use load_key::LoadKey;
pub use symbol::Symbol;
