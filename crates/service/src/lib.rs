//! Service layer: the persistence and notification core of the camp admin tool.
//! - `storage`: a total (never failing) typed facade over string key/value storage.
//! - `notify`: delivery credentials plus the event email dispatcher.
//! - Storage failures are absorbed and logged; notification failures are returned.

pub mod errors;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
pub mod storage;
pub mod notify;
