//! Checked readers over ABI-encoded calldata.

pub mod bytes;
