pub mod directory_client;
pub mod media_server;
