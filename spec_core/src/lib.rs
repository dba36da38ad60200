//! # spec_core - Girder Specification Rules Engine
//!
//! `spec_core` answers the questions a precast or spliced girder design
//! program asks of its bridge design specification: which stress checks to
//! run, what the allowable concrete stresses are, how strong the concrete
//! must be to satisfy them, whether the end zones resist splitting, and what
//! criteria govern lifting and hauling.
//!
//! ## Design Philosophy
//!
//! - **Criteria as data**: every coefficient lives in a serializable
//!   [`SpecCriteria`](criteria::SpecCriteria) library entry
//! - **Borrowed collaborators**: the engine reads the bridge through traits
//!   and never owns it
//! - **Rich Errors**: structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use spec_core::config::EngineConfig;
//! use spec_core::engine::{Collaborators, SpecEngine};
//! use spec_core::location::GirderKey;
//! use spec_core::model::BridgeModel;
//! use spec_core::status::StatusLog;
//!
//! let model = BridgeModel::precast_demo();
//! let status = StatusLog::new();
//! let config = EngineConfig::new(Default::default(), model.document);
//! let engine = SpecEngine::new(&config, Collaborators::from_model(&model, &status));
//!
//! let tasks = engine.tasks().girder_tasks(&GirderKey::new(0, 0), false).unwrap();
//! assert!(tasks.windows(2).all(|pair| pair[0] < pair[1]));
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - Façade that wires the components together
//! - [`tasks`] - Stress check task enumeration
//! - [`limits`] - Concrete stress limits
//! - [`required_strength`] - Concrete strength needed for a stress demand
//! - [`splitting`] - End zone splitting resistance
//! - [`handling`] - Lifting and hauling stability criteria
//! - [`tables`] - Published constants and small tables
//! - [`criteria`] - Specification library entries
//! - [`collaborators`] - Traits the engine reads the bridge through
//! - [`model`] - In-memory bridge model implementing the collaborators
//! - [`config`] - Criteria and configuration files
//! - [`errors`] - Structured error types

pub mod collaborators;
pub mod concrete;
pub mod config;
pub mod criteria;
pub mod edition;
pub mod engine;
pub mod errors;
pub mod handling;
pub mod limit_state;
pub mod limits;
pub mod location;
pub mod model;
pub mod required_strength;
pub mod splitting;
pub mod status;
pub mod tables;
pub mod tasks;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use config::{load_criteria, load_engine_config, save_criteria, EngineConfig};
pub use criteria::SpecCriteria;
pub use engine::{Collaborators, SpecEngine};
pub use errors::{SpecError, SpecResult};
