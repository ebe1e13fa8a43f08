#![allow(dead_code)]

pub mod bfs_server;
pub mod keys;
