//! Contact form and post list state for a single page, driven by view
//! events and a substitutable network transport.

pub mod config;
pub mod error;
pub mod form;
pub mod page;
pub mod posts;
pub mod transport;
pub mod validation;

pub use config::{load_settings, Settings};
pub use error::TransportError;
pub use form::FormController;
pub use page::{Completion, ContactPage, FieldSnapshot, PageSnapshot, RequestId, ViewEvent};
pub use posts::PostsLoader;
pub use transport::{HttpTransport, PostsTransport};
