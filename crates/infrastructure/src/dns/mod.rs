pub mod exchanger;
pub mod forwarding;
pub mod transport;

pub use exchanger::HickoryExchanger;
