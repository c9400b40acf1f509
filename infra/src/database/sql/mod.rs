//! SQL implementations of the core repositories

pub mod user_repository_impl;

pub use user_repository_impl::SqlUserRepository;
