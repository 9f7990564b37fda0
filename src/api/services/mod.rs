// Services module - business logic sitting between routes and storage

pub mod charette_store;

pub use charette_store::{CharetteStore, StoreMode};
