pub mod config;
pub mod lifecycle;
pub mod phase;
pub mod presenter;
pub mod signal;
pub mod tasks {
    pub mod controller;
    pub mod countdown;
    pub mod presenter;
}
