//! Off-chain helpers for Roles policies: pruning redundant governance calls,
//! encoding calldata and dry-running requests against a recording avatar.

pub mod avatar;
pub mod encoder;
pub mod optimizer;
pub mod types;


pub use avatar::RecordingAvatar;
pub use encoder::{encode_call, encode_calls, encode_multisend, selector};
pub use optimizer::remove_obsolete_calls;
pub use types::{ExecutedCall, MultiSendTx};
