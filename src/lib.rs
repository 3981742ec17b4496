pub mod config;
pub mod error;
pub mod graph;
pub mod risk;
pub mod tensor;

// Loads .env if present and silently ignores if missing.
pub fn load_env() {
    let _ = dotenvy::dotenv();
}
