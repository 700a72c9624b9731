//! Email delivery - SMTP notifier, templates, and a recording mock

mod mock;
mod smtp;
mod templates;

pub use mock::MockNotifier;
pub use smtp::SmtpNotifier;
pub use templates::render_template;
