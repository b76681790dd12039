pub mod zillow_client;
