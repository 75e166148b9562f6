// Candidate Search Pipeline
// Stages: criteria → Apollo call → profile extraction → classification → optional export.
// All Apollo calls go through apollo_client; nothing here builds HTTP requests.

pub mod classifier;
pub mod criteria;
pub mod export;
pub mod handlers;
pub mod pipeline;
pub mod profiles;
