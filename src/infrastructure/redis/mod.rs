pub mod client;
pub mod store;

pub use client::RedisService;
pub use store::RedisStore;
