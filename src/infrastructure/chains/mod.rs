pub mod echo_chain;

pub use echo_chain::EchoChain;
