//! Connection source module.

pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

mod mock;
pub use mock::{MockDataSource, MockDataSourceBuilder};

pub use r#trait::{DataSource, DataSourceBuilder};
