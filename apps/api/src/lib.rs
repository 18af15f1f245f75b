pub mod config;
pub mod errors;
pub mod evaluation;
pub mod generation;
pub mod kb;
pub mod llm_client;
pub mod routes;
pub mod skills;
pub mod state;
