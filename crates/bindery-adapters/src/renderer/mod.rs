//! Template rendering adapters.

mod handlebars;

pub use self::handlebars::HandlebarsRenderer;
