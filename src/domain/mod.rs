// Commodity universe, aliases and price ceilings
pub mod commodity;

// Domain-specific error types
pub mod errors;

// Port interfaces
pub mod ports;

// Trained-artifact column schema and vocabularies
pub mod schema;

// Core request/result types
pub mod types;
