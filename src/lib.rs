// Main library entry point for scgview.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub mod protos {
    include!(concat!(env!("OUT_DIR"), "/protos/mod.rs"));
}
