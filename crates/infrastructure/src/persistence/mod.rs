//! File-backed persistence adapters.

mod expiry_file;

pub use expiry_file::FileExpiryStore;
