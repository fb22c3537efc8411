pub mod config;
pub mod db;
pub mod encoders;
pub mod http;
pub mod repositories;
pub mod storage;
