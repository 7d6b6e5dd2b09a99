//! Accesspipe Agent - persona-driven model agents with private memory

pub mod agent;
pub mod factory;
pub mod memory;
pub mod persona;

pub use agent::PipelineAgent;
pub use factory::AgentFactory;
pub use memory::ConversationMemory;
pub use persona::AgentPersona;
