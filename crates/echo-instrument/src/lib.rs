pub mod command;
pub mod config;
pub mod instrument;

pub use command::InstrumentCommand;
pub use config::InstrumentConfig;
pub use instrument::Instrument;
