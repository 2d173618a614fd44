pub mod bid_ledger;
pub mod entities;
