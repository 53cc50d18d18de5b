pub mod codec;
pub mod forward;
pub mod network;
pub mod param;
pub mod topology;

pub use codec::{decode, encode, encode_into};
pub use forward::evaluate;
pub use network::Network;
pub use param::Param;
pub use topology::Topology;
