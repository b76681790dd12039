pub mod client;
pub mod entity_parser;
pub mod page_parser;
pub mod search_parser;
pub mod text;
