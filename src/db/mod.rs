pub mod connection;
pub mod driver;
pub mod error;
pub mod postgres;
pub mod registry;
pub mod sqlite;

pub use connection::{ConnectionInfo, ConnectionTarget, DatabaseKind, QueryResult, Value};
pub use driver::{Driver, NativeDriver, Session};
pub use error::DbError;
pub use registry::{Connection, Registry};
