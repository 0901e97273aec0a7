//! HTTP request handlers for the Campaign API.

pub mod contacts;
pub mod fallback;
pub mod health;
pub mod metrics;
pub mod templates;
pub mod tenants;
pub mod users;

pub use contacts::list_user_contacts;
pub use fallback::not_found;
pub use health::{api_info, health_check};
pub use metrics::metrics_handler;
pub use templates::{list_templates, list_user_templates};
pub use tenants::list_owner_tenants;
pub use users::{get_me, get_user};
