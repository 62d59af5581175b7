pub mod defaults;
pub mod migrate;
pub mod store;
