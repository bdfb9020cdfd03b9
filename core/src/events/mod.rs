pub mod adapter;
pub mod handler;
pub mod signal;

pub use adapter::EventAdapter;
pub use handler::SignalHandler;
pub use signal::EngineSignal;
