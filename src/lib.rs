pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod plants;
pub mod recipes;
pub mod state;

#[cfg(test)]
mod test_support;
