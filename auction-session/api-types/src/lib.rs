use uuid::Uuid;

pub mod bid;
pub mod console;
pub mod participant;
pub mod session;

pub type SessionId = Uuid;
pub type ParticipantId = String;
/// Whole currency units.
pub type Amount = u64;
