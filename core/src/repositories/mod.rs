pub mod datasource;
pub mod user;

pub use datasource::{DataSource, DataSourceBuilder, MockDataSource, MockDataSourceBuilder};
pub use user::{MockUserRepository, UserRepository};
