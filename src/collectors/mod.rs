pub mod cpu;
pub mod disk;
pub mod host;
pub mod memory;
pub mod mounts;
pub mod network;
pub mod os;
