//! # Scheduler (interface mínima)
//!
//! O scheduler propriamente dito vive fora deste núcleo. Aqui fica apenas o
//! estado que comandos do kernel podem alterar em tempo de execução.

pub mod alive;

pub use alive::{is_sched_alive_thread_enabled, set_sched_alive_thread_enabled};
