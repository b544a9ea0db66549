pub mod connection_manager;
pub mod database_browser;
pub mod layout;
pub mod notification;
pub mod query_editor;
pub mod results_viewer;

pub use connection_manager::ConnectionManager;
pub use database_browser::{BrowserItem, DatabaseBrowser};
pub use layout::render;
pub use notification::{Notification, NotificationKind};
pub use query_editor::QueryEditor;
pub use results_viewer::{ResultsViewer, TabMode};
