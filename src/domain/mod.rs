pub mod json_path;
pub mod search_params;
