// Contact form: field validation and the logging-only submission handler.

pub mod handlers;
pub mod validation;
