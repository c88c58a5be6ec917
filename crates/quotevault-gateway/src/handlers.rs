mod health;
mod quote;

pub use health::health_handler;
pub use quote::{
    create_quote_handler, get_quote_handler, list_categories_handler, list_quotes_handler,
    random_quote_handler, search_quotes_handler,
};
